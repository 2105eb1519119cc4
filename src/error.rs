use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InputFileNotFound(String),
    UnableToDecodeInputImage(String, image::ImageError),
    UnableToEncodeOutputImage(String, image::ImageError),
    InvalidPaletteSize(usize),
    InvalidPatchSize(usize),
    InvalidMatchCount(usize),
    InvalidNumberOfThreads(usize),
    ImageTooSmallForPatchSize {
        width: usize,
        height: usize,
        patch_size: usize,
    },
    ColorizationWorkerFailed(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputFileNotFound(path) => {
                write!(f, "Input file '{}' not found", path)
            }
            Self::UnableToDecodeInputImage(path, error) => {
                write!(f, "Unable to decode input image '{}': {}", path, error)
            }
            Self::UnableToEncodeOutputImage(path, error) => {
                write!(f, "Unable to encode output image '{}': {}", path, error)
            }
            Self::InvalidPaletteSize(size) => {
                write!(f, "Palette size must be at least 1, but was {}", size)
            }
            Self::InvalidPatchSize(size) => {
                write!(f, "Patch size must be an odd number, but was {}", size)
            }
            Self::InvalidMatchCount(count) => {
                write!(f, "Number of matches must be at least 1, but was {}", count)
            }
            Self::InvalidNumberOfThreads(count) => {
                write!(f, "Number of threads must be at least 1, but was {}", count)
            }
            Self::ImageTooSmallForPatchSize {
                width,
                height,
                patch_size,
            } => {
                write!(
                    f,
                    "Image of {}x{} pixels is too small, its left half must hold a patch of size {}",
                    width, height, patch_size
                )
            }
            Self::ColorizationWorkerFailed(missing_columns) => {
                write!(
                    f,
                    "Colorization failed, {} columns were not delivered by the workers",
                    missing_columns
                )
            }
        }
    }
}

impl std::error::Error for Error {}
