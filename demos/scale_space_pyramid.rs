extern crate image as image_rs;
extern crate saliency;

use std::path::Path;
use color_eyre::eyre::Result;

use saliency::image::Image;
use saliency::pyramid::{BlurScale, scale_space_pyramid::ScaleSpacePyramid, derived_pyramid::DerivedPyramid, oriented_pyramid::OrientedPyramid};
use saliency::filter::border::BorderMode;
use saliency::fusion::across_scale_addition;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let image_name = "lenna";
    let image_format = "png";
    let image_folder = "images/";
    let image_out_folder = "output/";
    let image_path = format!("{}{}.{}",image_folder,image_name, image_format);

    let gray_image = image_rs::open(&Path::new(&image_path))?.to_luma8();
    let image = Image::from_gray_image(&gray_image, true, false);

    let gaussian_pyramid = ScaleSpacePyramid::new(&image, 5, BlurScale::Sigma(1.0), BorderMode::Replicate)?;
    let laplacian_pyramid = DerivedPyramid::new(&gaussian_pyramid, 4.0)?;
    let oriented_pyramid = OrientedPyramid::new(&laplacian_pyramid, 8)?;

    for i in 0..gaussian_pyramid.num_of_layers() {
        let file_path = format!("{}{}_gaussian_{}.{}",image_out_folder,image_name,i,image_format);
        gaussian_pyramid.get(i).to_image().save(file_path)?;
        let file_path = format!("{}{}_laplacian_{}.{}",image_out_folder,image_name,i,image_format);
        laplacian_pyramid.get(i).to_image().save(file_path)?;
    }

    for i in 0..oriented_pyramid.num_of_orientations() {
        let filtered = across_scale_addition(oriented_pyramid.scales(i))?;
        let file_path = format!("{}{}_orientation_{}.{}",image_out_folder,image_name,i,image_format);
        filtered.to_image().save(file_path)?;
    }

    Ok(())
}
