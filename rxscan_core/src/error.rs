use std::path::PathBuf;
use thiserror::Error;

use crate::extraction::rules::BuildError;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Image must be at most {limit} bytes ({} is {size} bytes)", .path.display())]
    ImageTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("Not a supported image file: {}", .0.display())]
    NotAnImage(PathBuf),

    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("Extraction rules error: {0}")]
    Rules(#[from] BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
