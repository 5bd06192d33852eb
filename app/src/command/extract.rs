use rxscan_config::Config;
use rxscan_core::{TextFileRecognizer, TextRecognizer};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::info;

/// Input parameters for the Extract command strategy.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    /// File holding recognized text; stdin when absent.
    pub file: Option<PathBuf>,
    /// Print the report as JSON.
    pub json: bool,
}

/// Strategy for extracting medicine names from text that was already recognized.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let scanner = super::build_scanner(&config, TextFileRecognizer)?;

        let text = match input.file {
            Some(path) => {
                info!("Reading OCR text from {}", path.display());
                scanner.recognizer().recognize(&path).await?
            }
            None => {
                info!("Reading OCR text from stdin");
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                text
            }
        };

        let report = scanner.scan_text(&text);
        super::print_report(&report, input.json)
    }
}
