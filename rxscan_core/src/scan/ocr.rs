//! Text recognition backends.
//!
//! Recognition itself is delegated to an external engine; this module only
//! defines the seam the scanner calls and the backends that fill it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Result, ScanError};

/// Turns an image into recognized text.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the backend can run on this machine.
    async fn is_available(&self) -> bool;

    /// Recognize the full text of the image at `image`.
    async fn recognize(&self, image: &Path) -> Result<String>;
}

/// Settings for the tesseract command-line engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Binary to invoke.
    #[serde(default = "OcrConfig::default_binary")]
    pub binary: String,

    /// Tesseract language code.
    #[serde(default = "OcrConfig::default_language")]
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: Self::default_binary(),
            language: Self::default_language(),
        }
    }
}

impl OcrConfig {
    fn default_binary() -> String {
        "tesseract".to_string()
    }

    fn default_language() -> String {
        "eng".to_string()
    }
}

/// Runs `tesseract <image> stdout -l <lang>`.
#[derive(Debug, Clone, Default)]
pub struct TesseractRecognizer {
    config: OcrConfig,
}

impl TesseractRecognizer {
    #[must_use]
    pub const fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &OcrConfig {
        &self.config
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.config.binary)
            .arg("--version")
            .output()
            .await
            .is_ok_and(|o| o.status.success())
    }

    async fn recognize(&self, image: &Path) -> Result<String> {
        info!(
            "Running {} on {} (lang={})",
            self.config.binary,
            image.display(),
            self.config.language
        );

        let output = Command::new(&self.config.binary)
            .arg(image)
            .arg("stdout")
            .args(["-l", &self.config.language])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ScanError::OcrUnavailable(format!(
                        "{} not found (install tesseract-ocr)",
                        self.config.binary
                    ))
                } else {
                    ScanError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanError::OcrFailed(format!(
                "{} exited with {}: {}",
                self.config.binary,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = text.len(), "Tesseract finished");
        Ok(text)
    }
}

/// Reads a text file that already holds recognized text.
///
/// Lets OCR output produced elsewhere flow through the same pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFileRecognizer;

#[async_trait]
impl TextRecognizer for TextFileRecognizer {
    fn name(&self) -> &str {
        "text-file"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn recognize(&self, image: &Path) -> Result<String> {
        let bytes = tokio::fs::read(image).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_unavailable() {
        let recognizer = TesseractRecognizer::new(OcrConfig {
            binary: "rxscan-no-such-ocr-binary".to_string(),
            language: "eng".to_string(),
        });

        assert!(!recognizer.is_available().await);

        let err = recognizer.recognize(Path::new("scan.png")).await.err();
        assert!(matches!(err, Some(ScanError::OcrUnavailable(_))));
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn text_file_recognizer_reads_contents() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("ocr.txt");
        std::fs::write(&path, "Tab Amoxicillin\n").expect("write text");

        let text = TextFileRecognizer
            .recognize(&path)
            .await
            .expect("text file should be read");
        assert_eq!(text, "Tab Amoxicillin\n");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn config_defaults_apply() {
        let config: OcrConfig = serde_json::from_str("{}").expect("empty config should parse");
        assert_eq!(config, OcrConfig::default());
        assert_eq!(config.binary, "tesseract");
        assert_eq!(config.language, "eng");
    }
}
