extern crate nalgebra as na;

use color_eyre::eyre::{Result, ensure};
use na::DMatrix;
use serde::{Serialize, Deserialize};

use crate::{Float,float};
use float::consts::PI;
use super::kernel::Kernel;

// Fixed taps used for small kernels when only a kernel size is given
const SMALL_GAUSSIAN_TAPS: [&[Float]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125]
];

/// Largest supported kernel radius
pub const MAX_KERNEL_RADIUS: usize = 4096;
/// Sigmas up to this value stay within MAX_KERNEL_RADIUS
pub const MAX_SIGMA: Float = (MAX_KERNEL_RADIUS/4) as Float;

/// Blur strength, either as an odd kernel size or as a standard deviation.
#[derive(Debug,Copy,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurScale {
    KernelSize(usize),
    Sigma(Float)
}

impl BlurScale {
    pub fn sigma(&self) -> Float {
        match *self {
            BlurScale::KernelSize(size) => GaussKernel1D::sigma_for_size(size),
            BlurScale::Sigma(sigma) => sigma
        }
    }
}

#[derive(Debug,Clone)]
pub struct GaussKernel1D {
    kernel: DMatrix<Float>,
    step: usize,
    sigma: Float,
    normalizing_constant: Float
}

impl GaussKernel1D {
    fn sample(mean: Float, std: Float, x:Float) -> Float {
        let exponent = (-0.5*((x-mean)/std).powi(2)).exp();
        let factor = 1.0/(std*(2.0*PI).sqrt());
        factor*exponent
    }

    pub fn new(mean: Float, std: Float, step: usize , radius: usize ) -> GaussKernel1D {
        assert!(step > 0);
        assert_eq!(radius%step,0);

        let start = -(radius as isize);
        let end_exclusive = (radius as isize) + 1;
        let samples: Vec<Float> = (start..end_exclusive).step_by(step).map(|x| GaussKernel1D::sample(mean,std,x as Float)).collect();
        let normalizing_constant = samples.iter().sum();
        GaussKernel1D {
            kernel: DMatrix::from_vec(1,samples.len(),samples),
            step,
            sigma: std,
            normalizing_constant
        }
    }

    /// Kernel of size round(8*sigma + 1) made odd
    pub fn from_sigma(sigma: Float) -> Result<GaussKernel1D> {
        ensure!(sigma.is_finite() && sigma > 0.0, "gaussian sigma must be positive and finite, got {}", sigma);
        let radius = ((sigma*8.0 + 1.0).round()/2.0).floor();
        ensure!(radius <= MAX_KERNEL_RADIUS as Float, "gaussian sigma {} needs a kernel radius of {}, limit is {}", sigma, radius, MAX_KERNEL_RADIUS);
        Ok(GaussKernel1D::new(0.0, sigma, 1, radius as usize))
    }

    pub fn from_kernel_size(size: usize) -> Result<GaussKernel1D> {
        ensure!(size%2 == 1, "gaussian kernel size must be odd and positive, got {}", size);
        let radius = (size-1)/2;
        ensure!(radius <= MAX_KERNEL_RADIUS, "gaussian kernel size {} exceeds the limit of {}", size, 2*MAX_KERNEL_RADIUS+1);
        let sigma = GaussKernel1D::sigma_for_size(size);

        Ok(match SMALL_GAUSSIAN_TAPS.get(radius) {
            Some(taps) => GaussKernel1D {
                kernel: DMatrix::from_row_slice(1, taps.len(), taps),
                step: 1,
                sigma,
                normalizing_constant: 1.0
            },
            None => GaussKernel1D::new(0.0, sigma, 1, radius)
        })
    }

    pub fn from_blur_scale(blur_scale: &BlurScale) -> Result<GaussKernel1D> {
        match *blur_scale {
            BlurScale::KernelSize(size) => GaussKernel1D::from_kernel_size(size),
            BlurScale::Sigma(sigma) => GaussKernel1D::from_sigma(sigma)
        }
    }

    pub fn sigma_for_size(size: usize) -> Float {
        0.3*((size as Float - 1.0)*0.5 - 1.0) + 0.8
    }

    pub fn sigma(&self) -> Float {
        self.sigma
    }
}

impl Kernel for GaussKernel1D {
    fn kernel(&self) -> &DMatrix<Float> {
        &self.kernel
    }

    fn step(&self) -> usize {
        self.step
    }

    fn normalizing_constant(&self) -> Float {
        self.normalizing_constant
    }
}
