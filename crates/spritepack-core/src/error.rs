use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpritePackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cannot read sprite directory '{path}': {source}")]
    ScanDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Sprite '{path}' is fully transparent; nothing to pack")]
    FullyTransparent { path: PathBuf },

    #[error("Nothing to pack: input list is empty")]
    Empty,

    #[error("Invalid dimensions: width and height must be greater than 0 (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unplaceable: input #{index} ({width}x{height}) does not fit any free rectangle")]
    Unplaceable {
        index: usize,
        width: u32,
        height: u32,
    },

    #[error("Packing failed: no heuristic produced a complete placement")]
    PackingFailed,

    #[error("Trimmed size of '{name}' changed between passes: expected {expected_w}x{expected_h}, got {actual_w}x{actual_h}")]
    TrimMismatch {
        name: String,
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },
}

pub type Result<T> = std::result::Result<T, SpritePackError>;
