use color_eyre::eyre::{Result, ensure};
use log::debug;

use crate::Float;
use crate::image::Image;
use crate::filter::{filter_2d_correlation, border::BorderMode, gabor_kernel::GaborParameters, kernel_bank::KernelBank};
use super::{check_index, derived_pyramid::DerivedPyramid};

/// Grid of (layer x orientation) sub-bands. Every layer holds one cell per kernel of the bank.
#[derive(Debug,Clone)]
pub struct OrientedPyramid {
    orientation_maps: Vec<Vec<Image>>,
    kernel_bank: KernelBank
}

impl OrientedPyramid {

    /// Gabor bank with default shape and `orientation_count` orientations over a half turn
    pub fn new(pyramid: &DerivedPyramid, orientation_count: usize) -> Result<OrientedPyramid> {
        OrientedPyramid::with_gabor_parameters(pyramid, orientation_count, &GaborParameters::default())
    }

    pub fn with_gabor_parameters(pyramid: &DerivedPyramid, orientation_count: usize, params: &GaborParameters) -> Result<OrientedPyramid> {
        let kernel_bank = KernelBank::gabor(orientation_count, params)?;
        OrientedPyramid::from_kernel_bank(pyramid, kernel_bank)
    }

    pub fn from_kernel_bank(pyramid: &DerivedPyramid, kernel_bank: KernelBank) -> Result<OrientedPyramid> {
        ensure!(!kernel_bank.is_empty(), "an oriented pyramid needs at least one kernel");
        let border_mode = BorderMode::Reflect101;

        let orientation_maps: Vec<Vec<Image>> = pyramid.layers().enumerate().map(|(idx, layer)| {
            debug!("oriented layer {}: {}x{}, {} orientations", idx, layer.width(), layer.height(), kernel_bank.len());
            kernel_bank.iter().map(|oriented| filter_2d_correlation(layer, &oriented.kernel, &border_mode)).collect::<Vec<Image>>()
        }).collect();

        Ok(OrientedPyramid{orientation_maps, kernel_bank})
    }

    pub fn num_of_layers(&self) -> usize {
        self.orientation_maps.len()
    }

    pub fn num_of_orientations(&self) -> usize {
        self.orientation_maps.first().map_or(0, |orientations| orientations.len())
    }

    pub fn get(&self, layer: usize, orientation: usize) -> &Image {
        check_index("layer", layer, self.num_of_layers());
        check_index("orientation", orientation, self.num_of_orientations());
        &self.orientation_maps[layer][orientation]
    }

    /// The sub-bands of one orientation, finest layer first
    pub fn scales(&self, orientation: usize) -> impl Iterator<Item = &Image> + '_ {
        check_index("orientation", orientation, self.num_of_orientations());
        self.orientation_maps.iter().map(move |orientations| &orientations[orientation])
    }

    pub fn orientation(&self, orientation: usize) -> Float {
        check_index("orientation", orientation, self.num_of_orientations());
        self.kernel_bank.get(orientation).orientation
    }

    pub fn kernel_bank(&self) -> &KernelBank {
        &self.kernel_bank
    }
}
