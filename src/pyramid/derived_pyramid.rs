use color_eyre::eyre::Result;
use log::debug;

use crate::Float;
use crate::image::Image;
use crate::filter::{gaussian_2_d_convolution, border::BorderMode, gauss_kernel::GaussKernel1D};
use super::{check_index, scale_space_pyramid::ScaleSpacePyramid};

/// Band-pass pyramid: every layer is blur(layer, sigma) - layer at the resolution of the source layer.
#[derive(Debug,Clone)]
pub struct DerivedPyramid {
    layers: Vec<Image>,
    sigma: Float
}

impl DerivedPyramid {

    pub fn new(pyramid: &ScaleSpacePyramid, sigma: Float) -> Result<DerivedPyramid> {
        let kernel = GaussKernel1D::from_sigma(sigma)?;
        let border_mode = BorderMode::Replicate;

        let layers = pyramid.layers().enumerate().map(|(idx, layer)| {
            let blurred = gaussian_2_d_convolution(layer, &kernel, &border_mode);
            debug!("derived layer {}: {}x{}", idx, layer.width(), layer.height());
            blurred.sub(layer)
        }).collect::<Result<Vec<Image>>>()?;

        Ok(DerivedPyramid{layers, sigma})
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

    pub fn sigma(&self) -> Float {
        self.sigma
    }
}
