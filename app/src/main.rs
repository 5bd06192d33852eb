#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    CommandStrategy, ExtractInput, ExtractStrategy, InitStrategy, RulesStrategy, ScanInput,
    ScanStrategy, VersionStrategy,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rxscan")]
#[command(about = "Find medicine names in prescription scans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract medicine names from OCR text (file or stdin)
    Extract {
        /// File holding recognized text
        file: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run OCR on a prescription image and extract medicine names
    Scan {
        /// Prescription image
        image: PathBuf,

        /// Tesseract language code
        #[arg(short = 'l', long)]
        lang: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show active extraction rules and exclusions
    Rules,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { file, json } => {
            ExtractStrategy
                .execute(ExtractInput { file, json })
                .await
        }
        Commands::Scan { image, lang, json } => {
            ScanStrategy
                .execute(ScanInput { image, lang, json })
                .await
        }
        Commands::Rules => RulesStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
