extern crate image as image_rs;
extern crate nalgebra as na;

use color_eyre::eyre::{Result, ensure};
use image_rs::{GrayImage, RgbImage, DynamicImage, Pixel, Luma};
use image_rs::flat::NormalForm;
use log::warn;
use na::DMatrix;

use crate::Float;
use self::image_encoding::ImageEncoding;

pub mod image_encoding;
pub mod resize;

/// A 2D grid of floating point samples with one matrix per channel.
/// Every channel is stored as a (height x width) matrix and all channels share the same shape.
#[derive(Debug,Clone,PartialEq)]
pub struct Image {
    buffers: Vec<DMatrix<Float>>,
    pub original_encoding: ImageEncoding
}

impl Image {

    pub fn from_matrix(matrix: &DMatrix<Float>, original_encoding: ImageEncoding, normalize: bool) -> Image {
        let mut buffer = matrix.clone();

        if normalize {
            let max = buffer.amax();
            if max > 0.0 {
                buffer /= max;
            }
        }

        Image{ buffers: vec![buffer], original_encoding}
    }

    pub fn from_channels(buffers: Vec<DMatrix<Float>>, original_encoding: ImageEncoding) -> Result<Image> {
        ensure!(!buffers.is_empty(), "an image needs at least one channel");
        let shape = buffers[0].shape();
        for (idx, buffer) in buffers.iter().enumerate() {
            ensure!(buffer.shape() == shape, "channel {} has shape {:?} but channel 0 has shape {:?}", idx, buffer.shape(), shape);
        }
        Ok(Image{ buffers, original_encoding})
    }

    pub fn zeros(width: usize, height: usize, channel_count: usize, original_encoding: ImageEncoding) -> Image {
        let buffers = (0..channel_count.max(1)).map(|_| DMatrix::<Float>::zeros(height,width)).collect();
        Image{ buffers, original_encoding}
    }

    pub fn from_gray_image(image: &GrayImage, normalize: bool, invert_y : bool) -> Image {
        let mut buffer = Image::image8_to_matrix(image, invert_y, 0);
        if normalize {
            buffer /= ImageEncoding::U8.max_value();
        }
        Image{ buffers: vec![buffer], original_encoding: ImageEncoding::U8}
    }

    pub fn from_rgb_image(image: &RgbImage, normalize: bool, invert_y : bool) -> Image {
        let buffers = (0..3).map(|channel| {
            let mut buffer = Image::image8_to_matrix(image, invert_y, channel);
            if normalize {
                buffer /= ImageEncoding::U8.max_value();
            }
            buffer
        }).collect();
        Image{ buffers, original_encoding: ImageEncoding::U8}
    }

    /// Converts channel 0 to an 8 bit gray image, stretching [min,max] onto [0,255].
    pub fn to_image(&self) -> GrayImage {
        Image::matrix_to_image(&self.buffers[0], self.original_encoding)
    }

    pub fn width(&self) -> usize {
        self.buffers[0].ncols()
    }

    pub fn height(&self) -> usize {
        self.buffers[0].nrows()
    }

    pub fn channel_count(&self) -> usize {
        self.buffers.len()
    }

    /// Number of pixels per channel
    pub fn size(&self) -> usize {
        self.width()*self.height()
    }

    pub fn channel(&self, channel: usize) -> &DMatrix<Float> {
        &self.buffers[channel]
    }

    pub fn channels(&self) -> &[DMatrix<Float>] {
        &self.buffers
    }

    pub fn same_shape(&self, other: &Image) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    pub fn split(&self) -> Vec<Image> {
        self.buffers.iter().map(|buffer| Image::from_matrix(buffer, self.original_encoding, false)).collect()
    }

    pub fn merge(images: &[Image]) -> Result<Image> {
        ensure!(!images.is_empty(), "cannot merge an empty list of images");
        let buffers = images.iter().flat_map(|image| image.buffers.iter().cloned()).collect();
        Image::from_channels(buffers, images[0].original_encoding)
    }

    pub fn map_channels<F>(&self, f: F) -> Image where F: Fn(&DMatrix<Float>) -> DMatrix<Float> {
        Image{ buffers: self.buffers.iter().map(f).collect(), original_encoding: self.original_encoding}
    }

    /// Combines two images of identical shape and channel count sample by sample.
    pub fn zip_map<F>(&self, other: &Image, f: F) -> Result<Image> where F: Fn(Float, Float) -> Float {
        ensure!(self.channel_count() == other.channel_count(),
            "channel count mismatch: {} vs {}", self.channel_count(), other.channel_count());
        ensure!(self.same_shape(other),
            "shape mismatch: {}x{} vs {}x{}", self.width(), self.height(), other.width(), other.height());

        let buffers = self.buffers.iter().zip(other.buffers.iter()).map(|(a,b)| a.zip_map(b, |x,y| f(x,y))).collect();
        Ok(Image{ buffers, original_encoding: ImageEncoding::F64})
    }

    pub fn add(&self, other: &Image) -> Result<Image> {
        self.zip_map(other, |a,b| a + b)
    }

    pub fn sub(&self, other: &Image) -> Result<Image> {
        self.zip_map(other, |a,b| a - b)
    }

    pub fn max(&self, other: &Image) -> Result<Image> {
        self.zip_map(other, |a,b| a.max(b))
    }

    pub fn scale(&self, factor: Float) -> Image {
        self.map_channels(|buffer| buffer*factor)
    }

    /// Sets every sample <= threshold to 0 and keeps the rest
    pub fn threshold_to_zero(&self, threshold: Float) -> Image {
        self.map_channels(|buffer| buffer.map(|v| if v > threshold {v} else {0.0}))
    }

    /// Minimum and maximum over all channels
    pub fn min_max(&self) -> (Float, Float) {
        self.buffers.iter().fold((Float::INFINITY, Float::NEG_INFINITY), |(min, max), buffer| {
            (min.min(buffer.min()), max.max(buffer.max()))
        })
    }

    /// Linearly stretches the samples onto [lower, upper]. A flat image maps to lower.
    pub fn normalize_to_range(&self, lower: Float, upper: Float) -> Image {
        let (min, max) = self.min_max();
        let spread = max - min;
        if spread <= 0.0 {
            warn!("normalizing a flat {}x{} image, mapping all samples to {}", self.width(), self.height(), lower);
            return self.map_channels(|buffer| DMatrix::<Float>::from_element(buffer.nrows(), buffer.ncols(), lower));
        }
        let factor = (upper - lower)/spread;
        self.map_channels(|buffer| buffer.map(|v| lower + (v - min)*factor))
    }

    fn image8_to_matrix<P>(image: &image_rs::ImageBuffer<P, Vec<u8>>, invert_y: bool, channel: usize) -> DMatrix<Float> where P: Pixel<Subpixel = u8> {
        debug_assert!(image.sample_layout().is_normal(NormalForm::RowMajorPacked));

        let (width, height) = image.dimensions();
        let size = (width * height) as usize;
        let mut vec_column_major: Vec<Float> = Vec::with_capacity(size);
        for x in 0..width {
            for y in 0..height {
                let pixel = match invert_y {
                    true =>  image.get_pixel(x, height - 1 - y),
                    false => image.get_pixel(x, y)
                };
                let pixel_value = pixel.channels()[channel];
                vec_column_major.push(pixel_value as Float);
            }
        }
        DMatrix::<Float>::from_vec(height as usize, width as usize, vec_column_major)
    }

    fn matrix_to_image(matrix: &DMatrix<Float>,  encoding: ImageEncoding) -> GrayImage {
        let (rows, cols) = matrix.shape();

        let mut gray_image = DynamicImage::new_luma8(cols as u32, rows as u32).to_luma8();
        let max = matrix.max();
        let min = matrix.min();
        for c in 0..cols {
            for r in 0..rows {
                let val = *matrix.index((r, c));
                let pixel_value =  encoding.normalize_to_gray(max,min,val);
                gray_image.put_pixel(c as u32, r as u32, Luma([pixel_value]));
            }
        }
        gray_image
    }
}
