extern crate nalgebra as na;

use color_eyre::eyre::{Result, ensure};
use na::DMatrix;
use serde::{Serialize, Deserialize};

use crate::{Float,float};
use float::consts::PI;
use super::gauss_kernel::MAX_KERNEL_RADIUS;

/// Shape of an oriented Gabor band-pass kernel.
/// The kernel spans (2*(size/2)+1) taps per axis.
#[derive(Debug,Copy,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct GaborParameters {
    pub size: usize,
    /// Standard deviation of the gaussian envelope
    pub sigma: Float,
    /// Wavelength of the sinusoidal carrier
    pub lambda: Float,
    /// Spatial aspect ratio
    pub gamma: Float,
    /// Phase offset
    pub psi: Float
}

impl Default for GaborParameters {
    fn default() -> GaborParameters {
        GaborParameters {
            size: 6,
            sigma: 1.0,
            lambda: 2.0,
            gamma: 1.0,
            psi: 0.0
        }
    }
}

impl GaborParameters {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.size > 0 && self.size <= 2*MAX_KERNEL_RADIUS, "gabor kernel size must be in [1, {}], got {}", 2*MAX_KERNEL_RADIUS, self.size);
        ensure!(self.sigma > 0.0, "gabor sigma must be positive, got {}", self.sigma);
        ensure!(self.lambda > 0.0, "gabor wavelength must be positive, got {}", self.lambda);
        ensure!(self.gamma > 0.0, "gabor aspect ratio must be positive, got {}", self.gamma);
        Ok(())
    }
}

pub struct GaborKernel;

impl GaborKernel {

    pub fn new(theta: Float, params: &GaborParameters) -> Result<DMatrix<Float>> {
        params.validate()?;

        let sigma_x = params.sigma;
        let sigma_y = params.sigma/params.gamma;
        let c = theta.cos();
        let s = theta.sin();
        let half = (params.size/2) as isize;
        let side = (2*half + 1) as usize;

        let ex = -0.5/(sigma_x*sigma_x);
        let ey = -0.5/(sigma_y*sigma_y);
        let cscale = 2.0*PI/params.lambda;

        // kernel(half - y, half - x) holds the response at offset (x,y)
        Ok(DMatrix::<Float>::from_fn(side, side, |r, col| {
            let y = (half - r as isize) as Float;
            let x = (half - col as isize) as Float;
            let xr = x*c + y*s;
            let yr = -x*s + y*c;
            (ex*xr*xr + ey*yr*yr).exp()*(cscale*xr + params.psi).cos()
        }))
    }
}
