//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own type and input, dispatched
//! statically from `main`.

use rxscan_config::Config;
use rxscan_core::{CandidateExtractor, ScanReport, Scanner, TextRecognizer};
use tracing::info;

mod extract;
mod init;
mod rules;
mod scan;
mod version;

pub use extract::{ExtractInput, ExtractStrategy};
pub use init::InitStrategy;
pub use rules::RulesStrategy;
pub use scan::{ScanInput, ScanStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Build a scanner from the loaded configuration.
fn build_scanner<R: TextRecognizer>(config: &Config, recognizer: R) -> anyhow::Result<Scanner<R>> {
    let extractor = CandidateExtractor::new(&config.extraction)?;
    info!(
        "Extractor ready: {} rules, {} excluded words, cap {}",
        extractor.rules().len(),
        extractor.exclusions().len(),
        extractor.max_candidates()
    );

    Ok(Scanner::new(recognizer, extractor, config.scanner.clone()))
}

/// Print a report either as pretty JSON or as a list of search links.
fn print_report(report: &ScanReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}", report.summary());
    for (i, medicine) in report.medicines.iter().enumerate() {
        println!("{:>2}. {}", i + 1, medicine.name);
        println!("    {}", medicine.url);
    }

    Ok(())
}
