//! Scanner state as an explicit value.
//!
//! Each transition consumes the current state and returns the next one, so
//! the caller owns the state and every step is a pure function of its input.

use crate::error::{Result, ScanError};
use crate::scan::report::ScanReport;
use crate::scan::upload::ImageUpload;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanSession {
    /// Nothing selected yet.
    #[default]
    Idle,
    /// An image is selected and waiting to be scanned.
    Previewing(ImageUpload),
    /// Recognition is in progress.
    Scanning(ImageUpload),
    /// Recognition and extraction finished.
    Completed(ScanReport),
    /// Recognition failed; the image is kept so the scan can be retried.
    Failed { upload: ImageUpload, reason: String },
}

impl ScanSession {
    #[must_use]
    pub const fn state_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Previewing(_) => "previewing",
            Self::Scanning(_) => "scanning",
            Self::Completed(_) => "completed",
            Self::Failed { .. } => "failed",
        }
    }

    fn invalid(&self, action: &'static str) -> ScanError {
        ScanError::InvalidTransition {
            action,
            state: self.state_name(),
        }
    }

    /// Select an image. Replaces any previous selection unless a scan is running.
    pub fn select_image(self, upload: ImageUpload) -> Result<Self> {
        match self {
            Self::Scanning(_) => Err(self.invalid("select an image")),
            _ => Ok(Self::Previewing(upload)),
        }
    }

    /// Start recognizing the selected image.
    pub fn begin_scan(self) -> Result<Self> {
        match self {
            Self::Previewing(upload) => Ok(Self::Scanning(upload)),
            other => Err(other.invalid("begin a scan")),
        }
    }

    /// Record the result of a running scan.
    pub fn complete(self, report: ScanReport) -> Result<Self> {
        match self {
            Self::Scanning(_) => Ok(Self::Completed(report)),
            other => Err(other.invalid("complete a scan")),
        }
    }

    /// Record a failed scan.
    pub fn fail(self, reason: impl Into<String>) -> Result<Self> {
        match self {
            Self::Scanning(upload) => Ok(Self::Failed {
                upload,
                reason: reason.into(),
            }),
            other => Err(other.invalid("fail a scan")),
        }
    }

    /// Go back to the preview of a failed image.
    pub fn retry(self) -> Result<Self> {
        match self {
            Self::Failed { upload, .. } => Ok(Self::Previewing(upload)),
            other => Err(other.invalid("retry")),
        }
    }

    /// Drop everything and start over.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::Idle
    }

    #[must_use]
    pub const fn upload(&self) -> Option<&ImageUpload> {
        match self {
            Self::Previewing(upload) | Self::Scanning(upload) | Self::Failed { upload, .. } => {
                Some(upload)
            }
            Self::Idle | Self::Completed(_) => None,
        }
    }

    #[must_use]
    pub const fn report(&self) -> Option<&ScanReport> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }
}
