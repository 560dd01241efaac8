extern crate nalgebra as na;

use color_eyre::eyre::{Result, ensure};
use na::DMatrix;

use crate::{Float,float};
use float::consts::PI;
use super::gabor_kernel::{GaborKernel, GaborParameters};

#[derive(Debug,Clone,PartialEq)]
pub struct OrientedKernel {
    pub orientation: Float,
    pub kernel: DMatrix<Float>
}

impl OrientedKernel {
    pub fn new(orientation: Float, kernel: DMatrix<Float>) -> Result<OrientedKernel> {
        ensure!(kernel.nrows() > 0 && kernel.ncols() > 0, "kernel for orientation {} is empty", orientation);
        Ok(OrientedKernel{orientation, kernel})
    }

    /// All-pass kernel: a single 1 at the anchor of a (2r+1)x(2r+1) window
    pub fn identity(radius: usize) -> OrientedKernel {
        let side = 2*radius+1;
        let mut kernel = DMatrix::<Float>::zeros(side,side);
        kernel[(radius,radius)] = 1.0;
        OrientedKernel{orientation: 0.0, kernel}
    }
}

/// Ordered, non-empty set of oriented kernels
#[derive(Debug,Clone,PartialEq)]
pub struct KernelBank {
    kernels: Vec<OrientedKernel>
}

impl KernelBank {
    pub fn new(kernels: Vec<OrientedKernel>) -> Result<KernelBank> {
        ensure!(!kernels.is_empty(), "a kernel bank needs at least one kernel");
        Ok(KernelBank{kernels})
    }

    /// One Gabor kernel per orientation j*pi/count for j in [0,count)
    pub fn gabor(count: usize, params: &GaborParameters) -> Result<KernelBank> {
        ensure!(count > 0, "orientation count must be positive");
        let kernels = evenly_spaced_orientations(count).into_iter()
            .map(|theta| GaborKernel::new(theta, params).map(|kernel| OrientedKernel{orientation: theta, kernel}))
            .collect::<Result<Vec<OrientedKernel>>>()?;
        KernelBank::new(kernels)
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    pub fn get(&self, idx: usize) -> &OrientedKernel {
        &self.kernels[idx]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrientedKernel> {
        self.kernels.iter()
    }

    pub fn orientations(&self) -> Vec<Float> {
        self.kernels.iter().map(|k| k.orientation).collect()
    }
}

/// Orientations spread over a half turn, since a kernel at theta + pi responds like the one at theta
pub fn evenly_spaced_orientations(count: usize) -> Vec<Float> {
    (0..count).map(|j| j as Float*PI/count as Float).collect()
}
