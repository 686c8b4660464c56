use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriftError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error(
        "Dimension mismatch: reference is {}x{}, candidate is {}x{}",
        .reference.0, .reference.1, .candidate.0, .candidate.1
    )]
    DimensionMismatch {
        /// (width, height) of the reference.
        reference: (usize, usize),
        /// (width, height) of the candidate.
        candidate: (usize, usize),
    },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("No reference image for hour {hour} ({available} loaded)")]
    MissingReference { hour: u8, available: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed run log at line {line}: {message}")]
    LogFormat { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, DriftError>;
