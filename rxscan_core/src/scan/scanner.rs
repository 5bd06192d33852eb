//! Scan pipeline: validate, recognize, extract, report.

use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::extraction::extractor::CandidateExtractor;
use crate::links::DEFAULT_MARKETPLACE_URL;
use crate::scan::ocr::TextRecognizer;
use crate::scan::report::ScanReport;
use crate::scan::session::ScanSession;
use crate::scan::upload::{DEFAULT_MAX_IMAGE_BYTES, ImageUpload};

/// Limits and link settings for a scanner.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScannerConfig {
    /// Images larger than this are rejected before recognition.
    #[serde(default = "ScannerConfig::default_max_image_bytes")]
    pub max_image_bytes: u64,

    /// Search page each candidate links to.
    #[serde(default = "ScannerConfig::default_marketplace_base_url")]
    pub marketplace_base_url: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: Self::default_max_image_bytes(),
            marketplace_base_url: Self::default_marketplace_base_url(),
        }
    }
}

impl ScannerConfig {
    const fn default_max_image_bytes() -> u64 {
        DEFAULT_MAX_IMAGE_BYTES
    }

    fn default_marketplace_base_url() -> String {
        DEFAULT_MARKETPLACE_URL.to_string()
    }
}

/// Runs recognized text through the extractor and builds reports.
pub struct Scanner<R: TextRecognizer> {
    recognizer: R,
    extractor: CandidateExtractor,
    config: ScannerConfig,
}

impl<R: TextRecognizer> Scanner<R> {
    #[must_use]
    pub const fn new(recognizer: R, extractor: CandidateExtractor, config: ScannerConfig) -> Self {
        Self {
            recognizer,
            extractor,
            config,
        }
    }

    #[must_use]
    pub const fn recognizer(&self) -> &R {
        &self.recognizer
    }

    #[must_use]
    pub const fn extractor(&self) -> &CandidateExtractor {
        &self.extractor
    }

    /// Scan an image file end to end.
    ///
    /// Returns the final session: `Completed` with a report, or `Failed` when
    /// recognition failed. Upload validation errors are returned as `Err`.
    pub async fn scan_image(&self, path: &Path) -> Result<ScanSession> {
        let upload = ImageUpload::load(path, self.config.max_image_bytes).await?;
        let digest = upload.digest.clone();

        let session = ScanSession::Idle.select_image(upload)?.begin_scan()?;

        info!("Reading prescription with {}", self.recognizer.name());
        let text = match self.recognizer.recognize(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("OCR error: {e}");
                return session.fail(e.to_string());
            }
        };

        info!("Extracting medicine names");
        let report = self.report(Some(digest), &text);
        info!("{}", report.summary());

        session.complete(report)
    }

    /// Build a report from text that was recognized elsewhere.
    #[must_use]
    pub fn scan_text(&self, text: &str) -> ScanReport {
        let report = self.report(None, text);
        info!("{}", report.summary());
        report
    }

    fn report(&self, image_digest: Option<String>, text: &str) -> ScanReport {
        let candidates = self.extractor.extract(text);
        ScanReport::new(image_digest, candidates, &self.config.marketplace_base_url)
    }
}
