extern crate nalgebra as na;

use color_eyre::eyre::{Result, ensure};
use na::DMatrix;
use serde::{Serialize, Deserialize};

use crate::Float;
use super::Image;

// Keys cubic convolution parameter
const CUBIC_A: Float = -0.75;

#[derive(Debug,Copy,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Nearest,
    Bicubic
}

impl Image {

    /// Halves width and height (rounding down) by keeping every second pixel.
    pub fn downsample_half(image: &Image) -> Result<Image> {
        let width = image.width();
        let height = image.height();

        let new_width = width/2;
        let new_height = height/2;

        ensure!(new_width > 0 && new_height > 0, "cannot halve a {}x{} image: result would be {}x{}", width, height, new_width, new_height);

        Ok(image.map_channels(|buffer| {
            let mut new_buffer = DMatrix::<Float>::zeros(new_height,new_width);
            for x in (0..width).step_by(2) {
                for y in (0..height).step_by(2) {
                    let new_y = y/2;
                    let new_x = x/2;
                    if new_y < new_height && new_x < new_width {
                        new_buffer[(new_y,new_x)] = buffer[(y,x)];
                    }
                }
            }
            new_buffer
        }))
    }

    pub fn resize(&self, new_width: usize, new_height: usize, interpolation: Interpolation) -> Result<Image> {
        ensure!(new_width > 0 && new_height > 0, "cannot resize to an empty image {}x{}", new_width, new_height);
        ensure!(self.size() > 0, "cannot resize an empty image");

        if new_width == self.width() && new_height == self.height() {
            return Ok(self.clone());
        }

        Ok(match interpolation {
            Interpolation::Nearest => self.map_channels(|buffer| resize_nearest(buffer, new_width, new_height)),
            Interpolation::Bicubic => self.map_channels(|buffer| resize_bicubic(buffer, new_width, new_height))
        })
    }

    /// Target size is round(width*factor_x) x round(height*factor_y)
    pub fn resize_by_factor(&self, factor_x: Float, factor_y: Float, interpolation: Interpolation) -> Result<Image> {
        ensure!(factor_x > 0.0 && factor_y > 0.0, "resize factors must be positive, got {} and {}", factor_x, factor_y);
        let new_width = (self.width() as Float*factor_x).round() as usize;
        let new_height = (self.height() as Float*factor_y).round() as usize;
        self.resize(new_width, new_height, interpolation)
    }
}

fn resize_nearest(buffer: &DMatrix<Float>, new_width: usize, new_height: usize) -> DMatrix<Float> {
    let (height, width) = buffer.shape();
    let scale_x = width as Float / new_width as Float;
    let scale_y = height as Float / new_height as Float;

    DMatrix::<Float>::from_fn(new_height, new_width, |y, x| {
        let source_x = ((x as Float * scale_x).floor() as usize).min(width-1);
        let source_y = ((y as Float * scale_y).floor() as usize).min(height-1);
        buffer[(source_y,source_x)]
    })
}

/// Source index and the four tap weights for one output coordinate. Pixel centers are aligned.
fn cubic_taps(target: usize, scale: Float) -> (isize, [Float; 4]) {
    let f = (target as Float + 0.5)*scale - 0.5;
    let source = f.floor();
    (source as isize, cubic_coefficients(f - source))
}

fn cubic_coefficients(x: Float) -> [Float; 4] {
    let c0 = ((CUBIC_A*(x + 1.0) - 5.0*CUBIC_A)*(x + 1.0) + 8.0*CUBIC_A)*(x + 1.0) - 4.0*CUBIC_A;
    let c1 = ((CUBIC_A + 2.0)*x - (CUBIC_A + 3.0))*x*x + 1.0;
    let c2 = ((CUBIC_A + 2.0)*(1.0 - x) - (CUBIC_A + 3.0))*(1.0 - x)*(1.0 - x) + 1.0;
    [c0, c1, c2, 1.0 - c0 - c1 - c2]
}

fn clamp_index(idx: isize, len: usize) -> usize {
    idx.max(0).min(len as isize - 1) as usize
}

// Separable: rows first into (height x new_width), then columns.
fn resize_bicubic(buffer: &DMatrix<Float>, new_width: usize, new_height: usize) -> DMatrix<Float> {
    let (height, width) = buffer.shape();
    let scale_x = width as Float / new_width as Float;
    let scale_y = height as Float / new_height as Float;

    let x_taps: Vec<(isize, [Float; 4])> = (0..new_width).map(|x| cubic_taps(x, scale_x)).collect();
    let y_taps: Vec<(isize, [Float; 4])> = (0..new_height).map(|y| cubic_taps(y, scale_y)).collect();

    let horizontal = DMatrix::<Float>::from_fn(height, new_width, |y, x| {
        let (source_x, weights) = x_taps[x];
        weights.iter().enumerate().map(|(k, w)| w*buffer[(y, clamp_index(source_x - 1 + k as isize, width))]).sum()
    });

    DMatrix::<Float>::from_fn(new_height, new_width, |y, x| {
        let (source_y, weights) = y_taps[y];
        weights.iter().enumerate().map(|(k, w)| w*horizontal[(clamp_index(source_y - 1 + k as isize, height), x)]).sum()
    })
}
