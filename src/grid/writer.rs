use std::path::Path;

use image::{GrayImage, RgbImage};

use super::{Grid, ImageWriter};
use crate::{color::Rgb, error::Error};

/// Encodes a grid into a file, the format follows the file extension.
///
/// Grids of `Rgb` are written in RGB mode, grids of intensities in L mode.
pub struct FileImageWriter<'a, T> {
    path: &'a Path,
    grid: &'a Grid<T>,
}

impl<'a, T> FileImageWriter<'a, T> {
    pub fn new(path: &'a Path, grid: &'a Grid<T>) -> Self {
        Self { path, grid }
    }

    fn finish_write(&self, result: image::ImageResult<()>) -> crate::Result<()> {
        let path_name = self.path.display().to_string();
        result.map_err(|e| Error::UnableToEncodeOutputImage(path_name.clone(), e))?;
        log::info!(
            "Wrote {}x{} image to '{}'",
            self.grid.width(),
            self.grid.height(),
            path_name
        );
        Ok(())
    }
}

impl ImageWriter for FileImageWriter<'_, Rgb> {
    fn write_image(&mut self) -> crate::Result<()> {
        let image = rgb_image_from_grid(self.grid);
        self.finish_write(image.save(self.path))
    }
}

impl ImageWriter for FileImageWriter<'_, u8> {
    fn write_image(&mut self) -> crate::Result<()> {
        let grid = self.grid;
        let image = GrayImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
            image::Luma([grid.dot(x as usize, y as usize)])
        });
        self.finish_write(image.save(self.path))
    }
}

pub fn rgb_image_from_grid(grid: &Grid<Rgb>) -> RgbImage {
    RgbImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        grid.dot(x as usize, y as usize).into()
    })
}
