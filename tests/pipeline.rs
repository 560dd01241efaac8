extern crate nalgebra as na;

use na::DMatrix;
use palette::{FromColor, Lab, LinSrgb, Srgb};

use saliency::Float;
use saliency::image::{Image, image_encoding::ImageEncoding};
use saliency::fusion::FusionPolicy;
use saliency::{SaliencyPipeline, SaliencyRuntimeParameters};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn square_on_dark(size: usize, square: usize) -> DMatrix<Float> {
    let start = (size - square)/2;
    DMatrix::<Float>::from_fn(size, size, |r, c| {
        if (start..start+square).contains(&r) && (start..start+square).contains(&c) {1.0} else {0.0}
    })
}

fn region_max(image: &Image, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) -> Float {
    let buffer = image.channel(0);
    rows.flat_map(|r| cols.clone().map(move |c| (r,c))).map(|idx| buffer[idx]).fold(Float::NEG_INFINITY, Float::max)
}

#[test]
fn square_stands_out() {
    init_logging();
    let image = Image::from_matrix(&square_on_dark(128, 24), ImageEncoding::F64, false);
    let pipeline = SaliencyPipeline::new(SaliencyRuntimeParameters::default()).unwrap();
    let maps = pipeline.run(&image).unwrap();

    assert_eq!(maps.contrast.len(), 1);
    assert_eq!((maps.saliency.width(), maps.saliency.height()), (128, 128));
    assert_eq!((maps.orientation.width(), maps.orientation.height()), (128, 128));

    let (min, max) = maps.saliency.min_max();
    assert!((min - 0.0).abs() < 1e-12 && (max - 1.0).abs() < 1e-12);
    assert!(region_max(&maps.saliency, 44..84, 44..84) > 2.0*region_max(&maps.saliency, 0..12, 0..12));
}

#[test]
fn channels_get_their_own_contrast_map() {
    let square = square_on_dark(64, 16);
    let flat = DMatrix::<Float>::from_element(64, 64, 0.5);
    let image = Image::from_channels(vec![square, flat.clone(), flat], ImageEncoding::F64).unwrap();

    let params = SaliencyRuntimeParameters { feature_fusion: FusionPolicy::Max, ..SaliencyRuntimeParameters::default() };
    let maps = SaliencyPipeline::new(params).unwrap().run(&image).unwrap();
    assert_eq!(maps.contrast.len(), 3);
    assert!(maps.contrast[0].min_max().1 > 0.0);
    assert!(maps.contrast[1].min_max().1 < 1e-9);
    assert!(maps.contrast[2].min_max().1 < 1e-9);
}

#[test]
fn black_image_gives_flat_saliency() {
    init_logging();
    let image = Image::zeros(32, 32, 1, ImageEncoding::F64);
    let params = SaliencyRuntimeParameters { output_range: (0.0, 255.0), ..SaliencyRuntimeParameters::default() };
    let maps = SaliencyPipeline::new(params).unwrap().run(&image).unwrap();
    assert_eq!(maps.saliency.min_max(), (0.0, 0.0));
}

#[test]
fn too_many_layers_for_the_image_fails() {
    let image = Image::zeros(8, 8, 1, ImageEncoding::F64);
    let pipeline = SaliencyPipeline::new(SaliencyRuntimeParameters::default()).unwrap();
    assert!(pipeline.run(&image).is_err());
}

#[test]
fn invalid_parameters_are_rejected() {
    let params = SaliencyRuntimeParameters { orientation_count: 0, ..SaliencyRuntimeParameters::default() };
    assert!(SaliencyPipeline::new(params).is_err());

    let params = SaliencyRuntimeParameters { center_sigma: 0.0, ..SaliencyRuntimeParameters::default() };
    assert!(SaliencyPipeline::new(params).is_err());
}

fn to_lab(rgb: [u8; 3]) -> Lab {
    let srgb: Srgb<f32> = Srgb::new(rgb[0] as f32 / 255.0, rgb[1] as f32 / 255.0, rgb[2] as f32 / 255.0);
    let linear: LinSrgb<f32> = srgb.into_linear();
    Lab::from_color(linear)
}

#[test]
fn red_square_in_lab_stands_out_in_every_channel() {
    let (size, square) = (64, 16);
    let start = (size - square)/2;
    let background = to_lab([128, 128, 128]);
    let red = to_lab([200, 30, 30]);
    assert!(background.a.abs() < 0.5 && red.a > 30.0);

    let inside = |r: usize, c: usize| (start..start+square).contains(&r) && (start..start+square).contains(&c);
    let channel = |select: fn(&Lab) -> f32| DMatrix::<Float>::from_fn(size, size, |r, c| {
        select(if inside(r, c) {&red} else {&background}) as Float
    });
    let channels = vec![channel(|lab| lab.l), channel(|lab| lab.a), channel(|lab| lab.b)];
    let image = Image::from_channels(channels, ImageEncoding::F64).unwrap();

    let maps = SaliencyPipeline::new(SaliencyRuntimeParameters::default()).unwrap().run(&image).unwrap();
    assert_eq!(maps.contrast.len(), 3);
    for contrast in maps.contrast.iter() {
        assert!(region_max(contrast, 20..44, 20..44) > 4.0*region_max(contrast, 0..8, 0..8));
    }
}
