pub mod image;
pub mod filter;
pub mod pyramid;
pub mod fusion;
pub mod contrast;
pub mod runtime_parameters;
pub mod pipeline;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum GradientDirection {
    HORIZINTAL,
    VERTICAL
}

pub use crate::image::Image;
pub use crate::pyramid::{BlurScale, scale_space_pyramid::ScaleSpacePyramid, derived_pyramid::DerivedPyramid, oriented_pyramid::OrientedPyramid};
pub use crate::fusion::{FusionPolicy, across_scale_addition, fuse, mean_fusion, max_fusion};
pub use crate::runtime_parameters::{SaliencyRuntimeParameters, load_runtime_parameters};
pub use crate::pipeline::{SaliencyPipeline, SaliencyMaps};
