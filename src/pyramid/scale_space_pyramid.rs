use color_eyre::eyre::{Result, ensure, WrapErr};
use log::debug;

use crate::Float;
use crate::image::Image;
use crate::filter::{gaussian_2_d_convolution, border::BorderMode, gauss_kernel::GaussKernel1D};
use super::{BlurScale, check_index};

pub const DEFAULT_KERNEL_SIZE: usize = 5;

/// Gaussian pyramid. Layer 0 has the source resolution, every further layer half the linear resolution (rounded down).
///
/// Layer k is the blur of the working image at step k. The working image for step k+1 is the
/// nearest neighbour half of the *unblurred* working image at step k.
#[derive(Debug,Clone)]
pub struct ScaleSpacePyramid {
    layers: Vec<Image>,
    blur_scale: BlurScale,
    border_mode: BorderMode
}

impl ScaleSpacePyramid {

    pub fn new(image: &Image, layer_count: usize, blur_scale: BlurScale, border_mode: BorderMode) -> Result<ScaleSpacePyramid> {
        ensure!(layer_count > 0, "a scale space pyramid needs at least one layer");
        ensure!(image.size() > 0, "cannot build a pyramid from an empty image");
        let kernel = GaussKernel1D::from_blur_scale(&blur_scale)?;

        let mut layers = Vec::<Image>::with_capacity(layer_count);
        let mut current = image.clone();

        for k in 0..layer_count {
            let blurred = gaussian_2_d_convolution(&current, &kernel, &border_mode);
            debug!("scale space layer {}: {}x{}, sigma {:.3}", k, blurred.width(), blurred.height(), kernel.sigma());
            layers.push(blurred);

            // The carry for the last layer would never be read
            if k+1 < layer_count {
                current = Image::downsample_half(&current).wrap_err_with(|| format!("source too small for {} layers", layer_count))?;
            }
        }

        Ok(ScaleSpacePyramid{layers, blur_scale, border_mode})
    }

    /// 5x5 kernel, zero padded borders
    pub fn with_kernel_size(image: &Image, layer_count: usize) -> Result<ScaleSpacePyramid> {
        ScaleSpacePyramid::new(image, layer_count, BlurScale::KernelSize(DEFAULT_KERNEL_SIZE), BorderMode::zero())
    }

    /// Blurs every layer of an existing pyramid again. Layer count and resolutions are inherited.
    pub fn from_pyramid(pyramid: &ScaleSpacePyramid, sigma: Float, border_mode: BorderMode) -> Result<ScaleSpacePyramid> {
        let blur_scale = BlurScale::Sigma(sigma);
        let kernel = GaussKernel1D::from_blur_scale(&blur_scale)?;
        let layers = pyramid.layers.iter().map(|layer| gaussian_2_d_convolution(layer, &kernel, &border_mode)).collect();
        Ok(ScaleSpacePyramid{layers, blur_scale, border_mode})
    }

    pub fn num_of_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn get(&self, layer: usize) -> &Image {
        check_index("layer", layer, self.layers.len());
        &self.layers[layer]
    }

    pub fn layers(&self) -> std::slice::Iter<'_, Image> {
        self.layers.iter()
    }

    pub fn blur_scale(&self) -> BlurScale {
        self.blur_scale
    }

    pub fn border_mode(&self) -> BorderMode {
        self.border_mode
    }
}
