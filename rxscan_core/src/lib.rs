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

pub mod error;
pub mod extraction;
pub mod links;
pub mod scan;

pub use error::{Result, ScanError};
pub use extraction::exclusion::{DEFAULT_EXCLUDED_WORDS, ExclusionSet};
pub use extraction::extractor::{
    CandidateExtractor, DEFAULT_MAX_CANDIDATES, ExtractorConfig, extract_candidates,
};
pub use extraction::rules::{BuildError, Cleanup, PatternRule, RuleDef, default_rules};
pub use links::{DEFAULT_MARKETPLACE_URL, SearchLink, link_candidates, search_url};
pub use scan::{
    ImageFormat, ImageUpload, NO_MEDICINES_MESSAGE, OcrConfig, ScanReport, ScanSession, Scanner,
    ScannerConfig, TesseractRecognizer, TextFileRecognizer, TextRecognizer,
};
