//! Validation of prescription images before recognition.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, ScanError};

/// Largest accepted image, 10 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Image formats recognised by their leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Webp,
    Tiff,
}

impl ImageFormat {
    /// Sniff the format from the first bytes of a file.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'B', b'M', ..] => Some(Self::Bmp),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(Self::Tiff),
            _ => None,
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Webp => "image/webp",
            Self::Tiff => "image/tiff",
        }
    }
}

/// An image that passed the size and type checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub format: ImageFormat,
    /// SHA-256 of the file contents, hex encoded.
    pub digest: String,
}

impl ImageUpload {
    /// Validate the file at `path` and fingerprint its contents.
    ///
    /// # Errors
    /// Returns `ImageTooLarge` above `max_bytes`, `NotAnImage` for anything
    /// that does not look like an image, or `Io` if the file cannot be read.
    pub async fn load(path: &Path, max_bytes: u64) -> Result<Self> {
        let size = tokio::fs::metadata(path).await?.len();
        if size > max_bytes {
            return Err(ScanError::ImageTooLarge {
                path: path.to_path_buf(),
                size,
                limit: max_bytes,
            });
        }

        let bytes = tokio::fs::read(path).await?;
        Self::from_bytes(path, &bytes, max_bytes)
    }

    /// Validate an image already held in memory.
    ///
    /// # Errors
    /// Same conditions as [`ImageUpload::load`], minus IO.
    pub fn from_bytes(path: &Path, bytes: &[u8], max_bytes: u64) -> Result<Self> {
        let size = bytes.len() as u64;
        if size > max_bytes {
            return Err(ScanError::ImageTooLarge {
                path: path.to_path_buf(),
                size,
                limit: max_bytes,
            });
        }

        let format =
            ImageFormat::detect(bytes).ok_or_else(|| ScanError::NotAnImage(path.to_path_buf()))?;

        let digest = format!("{:x}", Sha256::digest(bytes));
        debug!(path = %path.display(), size, mime = format.mime_type(), "Accepted image");

        Ok(Self {
            path: path.to_path_buf(),
            size_bytes: size,
            format,
            digest,
        })
    }
}
