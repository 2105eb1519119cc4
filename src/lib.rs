use std::path::{Path, PathBuf};

pub use cli::CLIParser;
pub use colorizer::{Colorization, ColorizationOptions, Colorizer};
pub use error::Error;
use grid::{reader::FileImageReader, writer::FileImageWriter, ImageReader, ImageWriter};
use threadpool::ThreadPool;

mod cli;
pub mod cluster;
pub mod color;
pub mod colorizer;
mod error;
pub mod grid;
mod logger;
pub mod matcher;
pub mod palette;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_directory: Option<PathBuf>,
    precision: usize,
    patch_size: usize,
    match_count: Option<usize>,
    max_iterations: usize,
    seed: Option<u64>,
    number_of_threads: usize,
    full_image: bool,
    palette_swatch_file: Option<PathBuf>,
    grayscale_file: Option<PathBuf>,
}

/// `{precision}-colorized_{input file name}` inside `output_directory`, or next to the input
pub fn output_file_path(
    input_file: &Path,
    output_directory: Option<&Path>,
    precision: usize,
) -> Result<PathBuf> {
    let file_name = input_file
        .file_name()
        .ok_or_else(|| Error::InputFileNotFound(input_file.display().to_string()))?;
    let output_name = format!("{}-colorized_{}", precision, file_name.to_string_lossy());
    let directory = match output_directory {
        Some(directory) => directory.to_path_buf(),
        None => input_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    Ok(directory.join(output_name))
}

/// Colorizes the right half of the input image and writes the result.
///
/// Returns the path of the written image.
pub fn colorize_image(arguments: &Arguments) -> Result<PathBuf> {
    let options = ColorizationOptions::from(arguments);
    options.validate()?;
    let output_file = output_file_path(
        &arguments.input_file,
        arguments.output_directory.as_deref(),
        options.precision,
    )?;

    let image = FileImageReader::new(&arguments.input_file).read_image()?;
    if let Some(grayscale_file) = &arguments.grayscale_file {
        FileImageWriter::new(grayscale_file, &image.grayscale()).write_image()?;
    }

    let threadpool = ThreadPool::new(options.number_of_threads);
    let colorization = Colorizer::new(&options, &threadpool).colorize(&image)?;

    if let Some(palette_swatch_file) = &arguments.palette_swatch_file {
        FileImageWriter::new(palette_swatch_file, &colorization.palette.swatch()).write_image()?;
    }
    if arguments.full_image {
        FileImageWriter::new(&output_file, &colorization.full_image()).write_image()?;
    } else {
        FileImageWriter::new(&output_file, &colorization.target).write_image()?;
    }
    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::output_file_path;

    #[test]
    fn output_file_next_to_input() {
        let path = output_file_path(Path::new("images/landscape.png"), None, 15).unwrap();
        assert_eq!(path, PathBuf::from("images/15-colorized_landscape.png"));
    }

    #[test]
    fn output_file_in_output_directory() {
        let path =
            output_file_path(Path::new("landscape.png"), Some(Path::new("/results")), 4).unwrap();
        assert_eq!(path, PathBuf::from("/results/4-colorized_landscape.png"));
    }

    #[test]
    fn output_file_without_input_name() {
        assert!(output_file_path(Path::new(".."), None, 4).is_err());
    }
}
