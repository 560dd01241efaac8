extern crate nalgebra as na;

use na::DMatrix;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use saliency::Float;
use saliency::image::{Image, image_encoding::ImageEncoding};
use saliency::fusion::{FusionPolicy, across_scale_addition, fuse, mean_fusion, max_fusion};

fn gray(matrix: DMatrix<Float>) -> Image {
    Image::from_matrix(&matrix, ImageEncoding::F64, false)
}

fn constant(width: usize, height: usize, value: Float) -> Image {
    gray(DMatrix::<Float>::from_element(height, width, value))
}

fn random(rng: &mut SmallRng, width: usize, height: usize) -> Image {
    gray(DMatrix::<Float>::from_fn(height, width, |_, _| rng.gen_range(-1.0..1.0)))
}

#[test]
fn across_scale_of_single_image_is_identity() {
    let mut rng = SmallRng::seed_from_u64(3);
    let image = random(&mut rng, 17, 9);
    let sum = across_scale_addition(&[image.clone()]).unwrap();
    assert_eq!(sum.channel(0), image.channel(0));
}

#[test]
fn across_scale_of_nothing_fails() {
    let images: Vec<Image> = vec![];
    assert!(across_scale_addition(&images).is_err());
}

#[test]
fn across_scale_resamples_to_first_image() {
    let scales = vec![constant(64, 48, 1.0), constant(32, 24, 2.0), constant(16, 12, 0.5), constant(8, 6, 0.25)];
    let sum = across_scale_addition(&scales).unwrap();
    assert_eq!((sum.width(), sum.height()), (64, 48));
    let (min, max) = sum.min_max();
    assert!((min - 3.75).abs() < 1e-9 && (max - 3.75).abs() < 1e-9);

    // the first image sets the resolution even when it is the smallest
    let reversed: Vec<Image> = scales.iter().rev().cloned().collect();
    let sum = across_scale_addition(&reversed).unwrap();
    assert_eq!((sum.width(), sum.height()), (8, 6));
}

#[test]
fn across_scale_rejects_mixed_channel_counts() {
    let scales = vec![constant(8, 8, 1.0), Image::zeros(4, 4, 3, ImageEncoding::F64)];
    assert!(across_scale_addition(&scales).is_err());
}

#[test]
fn fusing_an_image_with_itself() {
    let mut rng = SmallRng::seed_from_u64(11);
    let image = random(&mut rng, 20, 13);

    let mean = mean_fusion(&image, &image, 1.0, 1.0).unwrap();
    assert!((mean.channel(0) - image.channel(0)).amax() < 1e-12);

    let max = max_fusion(&image, &image).unwrap();
    assert_eq!(max.channel(0), image.channel(0));
}

#[test]
fn fusing_zero_maps_gives_zero() {
    let a = constant(64, 64, 0.0);
    let b = constant(64, 64, 0.0);
    for policy in [FusionPolicy::default(), FusionPolicy::Max].iter() {
        let fused = fuse(&a, &b, policy).unwrap();
        assert_eq!((fused.width(), fused.height()), (64, 64));
        assert_eq!(fused.min_max(), (0.0, 0.0));
    }
}

#[test]
fn weighted_mean_fusion() {
    let a = constant(10, 10, 3.0);
    let b = constant(10, 10, 0.0);
    let fused = mean_fusion(&a, &b, 2.0, 1.0).unwrap();
    assert!((fused.channel(0)[(5,5)] - 2.0).abs() < 1e-12);

    let fused = fuse(&a, &b, &FusionPolicy::Mean { w1: 1.0, w2: 2.0 }).unwrap();
    assert!((fused.channel(0)[(5,5)] - 1.0).abs() < 1e-12);

    assert!(mean_fusion(&a, &b, 1.0, -1.0).is_err());
}

#[test]
fn non_finite_mean_weights_are_rejected() {
    let a = constant(10, 10, 1.0);
    assert!(mean_fusion(&a, &a, Float::NAN, 1.0).is_err());
    assert!(mean_fusion(&a, &a, 1.0, Float::INFINITY).is_err());
    assert!(fuse(&a, &a, &FusionPolicy::Mean { w1: Float::NEG_INFINITY, w2: 1.0 }).is_err());
}

#[test]
fn max_fusion_is_pointwise() {
    let a = gray(DMatrix::<Float>::from_row_slice(2, 2, &[1.0, 5.0, -2.0, 0.0]));
    let b = gray(DMatrix::<Float>::from_row_slice(2, 2, &[3.0, 4.0, -3.0, 0.5]));
    let fused = max_fusion(&a, &b).unwrap();
    assert_eq!(fused.channel(0), &DMatrix::<Float>::from_row_slice(2, 2, &[3.0, 5.0, -2.0, 0.5]));

    // weights are applied by the caller
    let weighted = max_fusion(&a.scale(2.0), &b).unwrap();
    assert_eq!(weighted.channel(0)[(0,1)], 10.0);
}

#[test]
fn first_operand_is_resampled_to_the_second() {
    let a = constant(32, 32, 1.0);
    let b = constant(64, 48, 3.0);
    let fused = mean_fusion(&a, &b, 1.0, 1.0).unwrap();
    assert_eq!((fused.width(), fused.height()), (64, 48));
    let (min, max) = fused.min_max();
    assert!((min - 2.0).abs() < 1e-9 && (max - 2.0).abs() < 1e-9);

    let fused = max_fusion(&b, &a).unwrap();
    assert_eq!((fused.width(), fused.height()), (32, 32));
}

#[test]
fn channel_mismatch_fails() {
    let a = constant(16, 16, 1.0);
    let b = Image::zeros(16, 16, 3, ImageEncoding::F64);
    assert!(mean_fusion(&a, &b, 1.0, 1.0).is_err());
    assert!(max_fusion(&b, &a).is_err());
}

#[test]
fn inputs_are_not_modified() {
    let mut rng = SmallRng::seed_from_u64(5);
    let a = random(&mut rng, 8, 8);
    let b = random(&mut rng, 16, 16);
    let (a_copy, b_copy) = (a.clone(), b.clone());
    let _ = fuse(&a, &b, &FusionPolicy::Max).unwrap();
    let _ = across_scale_addition(&[b.clone(), a.clone()]).unwrap();
    assert_eq!(a, a_copy);
    assert_eq!(b, b_copy);
}
