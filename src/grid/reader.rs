use std::path::Path;

use image::RgbImage;

use super::{Grid, ImageReader, RgbGrid};
use crate::{color::Rgb, error::Error};

/// Decodes any format supported by the `image` crate into an RGB grid.
pub struct FileImageReader<'a> {
    path: &'a Path,
}

impl<'a> FileImageReader<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }
}

impl ImageReader for FileImageReader<'_> {
    fn read_image(&mut self) -> crate::Result<RgbGrid> {
        let path_name = self.path.display().to_string();
        if !self.path.is_file() {
            return Err(Error::InputFileNotFound(path_name));
        }
        let image = image::open(self.path)
            .map_err(|e| Error::UnableToDecodeInputImage(path_name.clone(), e))?
            .to_rgb8();
        let grid = grid_from_rgb_image(&image);
        log::info!(
            "Decoded '{}' with {}x{} pixels",
            path_name,
            grid.width(),
            grid.height()
        );
        Ok(grid)
    }
}

pub fn grid_from_rgb_image(image: &RgbImage) -> RgbGrid {
    Grid::from_fn(image.width() as usize, image.height() as usize, |x, y| {
        Rgb::from(*image.get_pixel(x as u32, y as u32))
    })
}
