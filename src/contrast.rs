use color_eyre::eyre::{Result, ensure};
use log::debug;

use crate::image::Image;
use crate::fusion::across_scale_addition;
use crate::pyramid::scale_space_pyramid::ScaleSpacePyramid;

/// Rectified center-surround differences, one image per pyramid layer.
#[derive(Debug,Clone)]
pub struct ContrastMaps {
    /// max(center - surround, 0): bright spots on a darker surround
    pub on_off: Vec<Image>,
    /// max(surround - center, 0): dark spots on a brighter surround
    pub off_on: Vec<Image>
}

impl ContrastMaps {
    pub fn num_of_layers(&self) -> usize {
        self.on_off.len()
    }

    /// Across-scale sums of (on_off, off_on) at the finest resolution
    pub fn across_scale(&self) -> Result<(Image, Image)> {
        Ok((across_scale_addition(&self.on_off)?, across_scale_addition(&self.off_on)?))
    }
}

pub fn center_surround(center: &ScaleSpacePyramid, surround: &ScaleSpacePyramid) -> Result<ContrastMaps> {
    ensure!(center.num_of_layers() == surround.num_of_layers(),
        "center pyramid has {} layers but surround pyramid has {}", center.num_of_layers(), surround.num_of_layers());

    let mut on_off = Vec::<Image>::with_capacity(center.num_of_layers());
    let mut off_on = Vec::<Image>::with_capacity(center.num_of_layers());

    for (idx, (c, s)) in center.layers().zip(surround.layers()).enumerate() {
        on_off.push(c.sub(s)?.threshold_to_zero(0.0));
        off_on.push(s.sub(c)?.threshold_to_zero(0.0));
        debug!("center-surround layer {}: {}x{}", idx, c.width(), c.height());
    }

    Ok(ContrastMaps{on_off, off_on})
}
