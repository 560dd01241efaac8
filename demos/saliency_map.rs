extern crate image as image_rs;
extern crate nalgebra as na;
extern crate saliency;

use std::path::Path;
use color_eyre::eyre::Result;
use image_rs::RgbImage;
use log::info;
use na::DMatrix;
use palette::{FromColor, Lab, LinSrgb, Srgb};

use saliency::Float;
use saliency::image::{Image, image_encoding::ImageEncoding};
use saliency::{SaliencyPipeline, SaliencyRuntimeParameters, load_runtime_parameters};

// One channel each for L, a and b
fn lab_image(rgb_image: &RgbImage) -> Result<Image> {
    let (width, height) = rgb_image.dimensions();
    let mut channels = vec![DMatrix::<Float>::zeros(height as usize, width as usize); 3];
    for (x, y, pixel) in rgb_image.enumerate_pixels() {
        let srgb: Srgb<f32> = Srgb::new(pixel[0] as f32 / 255.0, pixel[1] as f32 / 255.0, pixel[2] as f32 / 255.0);
        let linear: LinSrgb<f32> = srgb.into_linear();
        let lab: Lab = Lab::from_color(linear);
        let idx = (y as usize, x as usize);
        channels[0][idx] = lab.l as Float;
        channels[1][idx] = lab.a as Float;
        channels[2][idx] = lab.b as Float;
    }
    Image::from_channels(channels, ImageEncoding::F64)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let image_name = "lenna";
    let image_format = "png";
    let image_folder = "images/";
    let image_out_folder = "output/";
    let runtime_parameters_path = "config/saliency.yaml";
    let image_path = format!("{}{}.{}",image_folder,image_name, image_format);

    let runtime_parameters = match Path::new(runtime_parameters_path).exists() {
        true => load_runtime_parameters(runtime_parameters_path)?,
        false => SaliencyRuntimeParameters::default()
    };

    let rgb_image = image_rs::open(&Path::new(&image_path))?.to_rgb8();
    let image = lab_image(&rgb_image)?;

    let pipeline = SaliencyPipeline::new(runtime_parameters)?;
    let maps = pipeline.run(&image)?;

    for (i, contrast) in maps.contrast.iter().enumerate() {
        let file_path = format!("{}{}_contrast_{}.{}",image_out_folder,image_name,i,image_format);
        contrast.to_image().save(file_path)?;
    }
    maps.orientation.to_image().save(format!("{}{}_orientation.{}",image_out_folder,image_name,image_format))?;

    let saliency_path = format!("{}{}_saliency_{}.{}",image_out_folder,image_name,pipeline.runtime_parameters(),image_format);
    maps.saliency.to_image().save(&saliency_path)?;
    info!("wrote {}", saliency_path);

    Ok(())
}
