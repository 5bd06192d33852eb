//! Medicine name extraction from OCR text.
//!
//! This module turns noisy recognized text into a short, ordered list of
//! plausible medicine names using configurable regex rules.

pub mod exclusion;
pub mod extractor;
pub mod rules;
