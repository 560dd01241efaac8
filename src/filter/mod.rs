extern crate nalgebra as na;

use na::DMatrix;

use crate::image::Image;
use crate::{Float, GradientDirection};
use self::{kernel::Kernel,gauss_kernel::GaussKernel1D,border::{BorderMode,map_index,border_value}};

pub mod border;
pub mod kernel;
pub mod gauss_kernel;
pub mod gabor_kernel;
pub mod kernel_bank;


pub fn filter_1d_convolution(source: &Image, filter_direction: GradientDirection, filter_kernel: &dyn Kernel, border_mode: &BorderMode) -> Image {
    let kernel = filter_kernel.kernel();
    let step = filter_kernel.step();
    let kernel_radius = filter_kernel.radius();
    let kernel_radius_signed = kernel_radius as isize;
    let normalizing_constant = filter_kernel.normalizing_constant();
    let outside = border_value(border_mode);

    source.map_channels(|buffer| {
        let width = buffer.ncols();
        let height = buffer.nrows();
        let mut target = DMatrix::<Float>::zeros(height,width);

        for y in 0..height {
            for x in 0..width {
                let mut acc = 0.0;
                for kenel_idx in (-kernel_radius_signed..kernel_radius_signed+1).step_by(step){

                    let sample_value = match filter_direction {
                        GradientDirection::HORIZINTAL => {
                            match map_index((x as isize)+kenel_idx, width, border_mode) {
                                Some(sample_idx) => buffer[(y,sample_idx)],
                                None => outside
                            }
                        },
                        GradientDirection::VERTICAL => {
                            match map_index((y as isize)+kenel_idx, height, border_mode) {
                                Some(sample_idx) => buffer[(sample_idx,x)],
                                None => outside
                            }
                        }
                    };

                    let kenel_value = kernel[(0,(kenel_idx + kernel_radius_signed) as usize)];
                    acc += sample_value*kenel_value;
                }

                target[(y,x)] = acc/normalizing_constant;
            }
        }
        target
    })
}

pub fn gaussian_2_d_convolution(image: &Image, filter_kernel: &GaussKernel1D, border_mode: &BorderMode) -> Image {
    let blur_hor = filter_1d_convolution(image, GradientDirection::HORIZINTAL, filter_kernel, border_mode);
    filter_1d_convolution(&blur_hor, GradientDirection::VERTICAL, filter_kernel, border_mode)
}

/// Correlates every channel with a 2D kernel anchored at (rows/2, cols/2). The kernel is not flipped.
pub fn filter_2d_correlation(image: &Image, kernel: &DMatrix<Float>, border_mode: &BorderMode) -> Image {
    let (kernel_rows, kernel_cols) = kernel.shape();
    let anchor_r = (kernel_rows/2) as isize;
    let anchor_c = (kernel_cols/2) as isize;
    let outside = border_value(border_mode);

    image.map_channels(|buffer| {
        let width = buffer.ncols();
        let height = buffer.nrows();

        DMatrix::<Float>::from_fn(height, width, |y, x| {
            let mut acc = 0.0;
            for kr in 0..kernel_rows {
                let row = map_index(y as isize + kr as isize - anchor_r, height, border_mode);
                for kc in 0..kernel_cols {
                    let weight = kernel[(kr,kc)];
                    let col = map_index(x as isize + kc as isize - anchor_c, width, border_mode);
                    let sample = match (row, col) {
                        (Some(r), Some(c)) => buffer[(r,c)],
                        _ => outside
                    };
                    acc += weight*sample;
                }
            }
            acc
        })
    })
}
