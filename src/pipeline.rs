use color_eyre::eyre::{Result, WrapErr};
use log::{debug, info};

use crate::image::Image;
use crate::contrast::center_surround;
use crate::fusion::{across_scale_addition, fuse};
use crate::pyramid::{BlurScale, scale_space_pyramid::ScaleSpacePyramid, derived_pyramid::DerivedPyramid, oriented_pyramid::OrientedPyramid};
use crate::filter::kernel_bank::KernelBank;
use crate::runtime_parameters::SaliencyRuntimeParameters;

#[derive(Debug,Clone)]
pub struct SaliencyMaps {
    /// One center-surround map per input channel
    pub contrast: Vec<Image>,
    /// Orientation map of channel 0
    pub orientation: Image,
    /// Fusion of all feature maps, normalized to the configured output range
    pub saliency: Image
}

/// Turns an image, already in the working color space, into a saliency map.
/// Channels are processed as independent pyramids.
#[derive(Debug,Clone)]
pub struct SaliencyPipeline {
    runtime_parameters: SaliencyRuntimeParameters,
    kernel_bank: KernelBank
}

impl SaliencyPipeline {

    pub fn new(runtime_parameters: SaliencyRuntimeParameters) -> Result<SaliencyPipeline> {
        runtime_parameters.validate()?;
        let kernel_bank = KernelBank::gabor(runtime_parameters.orientation_count, &runtime_parameters.gabor)?;
        Ok(SaliencyPipeline{runtime_parameters, kernel_bank})
    }

    pub fn runtime_parameters(&self) -> &SaliencyRuntimeParameters {
        &self.runtime_parameters
    }

    pub fn run(&self, image: &Image) -> Result<SaliencyMaps> {
        info!("saliency for {}x{} image with {} channels ({})", image.width(), image.height(), image.channel_count(), self.runtime_parameters);
        let channels = image.split();

        let contrast = channels.iter().enumerate()
            .map(|(idx, channel)| self.contrast_map(channel).wrap_err_with(|| format!("contrast map of channel {}", idx)))
            .collect::<Result<Vec<Image>>>()?;
        let orientation = self.orientation_map(&channels[0]).wrap_err("orientation map of channel 0")?;

        let policy = &self.runtime_parameters.feature_fusion;
        let mut fused = contrast[0].clone();
        for map in contrast.iter().skip(1) {
            fused = fuse(&fused, map, policy)?;
        }
        fused = fuse(&fused, &orientation, policy)?;

        let (lower, upper) = self.runtime_parameters.output_range;
        let saliency = fused.normalize_to_range(lower, upper);
        info!("saliency done");

        Ok(SaliencyMaps{contrast, orientation, saliency})
    }

    /// Fusion of the across-scale on-off and off-on maps of one channel
    pub fn contrast_map(&self, channel: &Image) -> Result<Image> {
        let params = &self.runtime_parameters;
        let center = ScaleSpacePyramid::new(channel, params.contrast_layer_count, BlurScale::Sigma(params.center_sigma), params.border_mode)?;
        let surround = ScaleSpacePyramid::from_pyramid(&center, params.surround_sigma, params.border_mode)?;

        let (on_off, off_on) = center_surround(&center, &surround)?.across_scale()?;
        debug!("contrast map {}x{}", on_off.width(), on_off.height());
        fuse(&on_off, &off_on, &params.contrast_fusion)
    }

    /// Per orientation across-scale sums of the oriented pyramid, fused into one map
    pub fn orientation_map(&self, channel: &Image) -> Result<Image> {
        let params = &self.runtime_parameters;
        let gaussian = ScaleSpacePyramid::new(channel, params.orientation_layer_count, BlurScale::Sigma(params.orientation_sigma), params.border_mode)?;
        let laplacian = DerivedPyramid::new(&gaussian, params.laplacian_sigma)?;
        let oriented = OrientedPyramid::from_kernel_bank(&laplacian, self.kernel_bank.clone())?;

        let mut fused: Option<Image> = None;
        for orientation in 0..oriented.num_of_orientations() {
            let map = across_scale_addition(oriented.scales(orientation))?;
            debug!("orientation {:.3} rad: {}x{}", oriented.orientation(orientation), map.width(), map.height());
            fused = Some(match fused {
                Some(previous) => fuse(&previous, &map, &params.feature_fusion)?,
                None => map
            });
        }

        // kernel bank is never empty
        Ok(fused.unwrap_or_else(|| channel.scale(0.0)))
    }
}
