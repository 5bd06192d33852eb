use rxscan_config::Config;
use rxscan_core::{ScanSession, TesseractRecognizer, TextRecognizer};
use std::path::PathBuf;
use tracing::info;

/// Input parameters for the Scan command strategy.
#[derive(Debug, Clone)]
pub struct ScanInput {
    /// Prescription image to recognize.
    pub image: PathBuf,
    /// Tesseract language override.
    pub lang: Option<String>,
    /// Print the report as JSON.
    pub json: bool,
}

/// Strategy for scanning a prescription image with tesseract.
///
/// Validates the image, runs OCR, extracts candidates and prints the report.
#[derive(Debug, Clone, Copy)]
pub struct ScanStrategy;

impl super::CommandStrategy for ScanStrategy {
    type Input = ScanInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load_or_default()?;
        if let Some(lang) = input.lang {
            config.ocr.language = lang;
        }

        let recognizer = TesseractRecognizer::new(config.ocr.clone());
        if !recognizer.is_available().await {
            anyhow::bail!(
                "'{}' is not available. Install with: apt install tesseract-ocr",
                config.ocr.binary
            );
        }

        let scanner = super::build_scanner(&config, recognizer)?;
        info!("Scanning {}", input.image.display());

        match scanner.scan_image(&input.image).await? {
            ScanSession::Completed(report) => super::print_report(&report, input.json),
            ScanSession::Failed { reason, .. } => {
                anyhow::bail!("Error processing image. Please try again. ({reason})")
            }
            other => anyhow::bail!("Scan ended in unexpected state: {}", other.state_name()),
        }
    }
}
