use std::borrow::Cow;

use color_eyre::eyre::{Result, ensure, eyre};
use log::debug;
use serde::{Serialize, Deserialize};

use crate::Float;
use crate::image::{Image, resize::Interpolation};

/// How two feature maps are merged pointwise.
///
/// `Max` carries no weights: max does not distribute over a weighted sum the way a mean does,
/// so callers scale the inputs beforehand if they want weighting.
#[derive(Debug,Copy,Clone,PartialEq,Serialize,Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FusionPolicy {
    Mean { w1: Float, w2: Float },
    Max
}

impl Default for FusionPolicy {
    fn default() -> FusionPolicy {
        FusionPolicy::Mean { w1: 1.0, w2: 1.0 }
    }
}

/// Resamples every image to the resolution of the first one (bicubic) and sums them.
pub fn across_scale_addition<'a, I>(scale_images: I) -> Result<Image> where I: IntoIterator<Item = &'a Image> {
    let mut images = scale_images.into_iter();
    let first = images.next().ok_or_else(|| eyre!("across-scale addition needs at least one image"))?;
    let width = first.width();
    let height = first.height();

    let mut sum = first.clone();
    for (idx, image) in images.enumerate() {
        let resized = image.resize(width, height, Interpolation::Bicubic)?;
        debug!("across-scale: adding {}x{} as {}x{} (scale {})", image.width(), image.height(), width, height, idx+1);
        sum = sum.add(&resized)?;
    }

    Ok(sum)
}

// Brings `a` to the resolution of `b`. Only the size is adapted, channel counts must agree.
fn align_to<'a>(a: &'a Image, b: &Image) -> Result<Cow<'a, Image>> {
    ensure!(a.channel_count() == b.channel_count(),
        "cannot fuse a {} channel map with a {} channel map", a.channel_count(), b.channel_count());
    if a.same_shape(b) {
        Ok(Cow::Borrowed(a))
    } else {
        Ok(Cow::Owned(a.resize(b.width(), b.height(), Interpolation::Bicubic)?))
    }
}

/// (w1*a + w2*b)/(w1 + w2) at the resolution of `b`
pub fn mean_fusion(a: &Image, b: &Image, w1: Float, w2: Float) -> Result<Image> {
    ensure!(w1.is_finite() && w2.is_finite(), "mean fusion weights must be finite, got {} and {}", w1, w2);
    let weight_sum = w1 + w2;
    ensure!(weight_sum != 0.0, "mean fusion weights must not sum to zero ({} + {})", w1, w2);
    let resized = align_to(a, b)?;
    resized.zip_map(b, |x,y| (w1*x + w2*y)/weight_sum)
}

/// Pointwise maximum at the resolution of `b`
pub fn max_fusion(a: &Image, b: &Image) -> Result<Image> {
    let resized = align_to(a, b)?;
    resized.max(b)
}

pub fn fuse(a: &Image, b: &Image, policy: &FusionPolicy) -> Result<Image> {
    match *policy {
        FusionPolicy::Mean { w1, w2 } => mean_fusion(a, b, w1, w2),
        FusionPolicy::Max => max_fusion(a, b)
    }
}
