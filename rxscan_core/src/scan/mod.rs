//! Prescription scanning around the extractor.
//!
//! Image validation, the OCR seam, the scan state value and the pipeline that
//! ties them to candidate extraction.

pub mod ocr;
pub mod report;
pub mod scanner;
pub mod session;
pub mod upload;

pub use ocr::{OcrConfig, TesseractRecognizer, TextFileRecognizer, TextRecognizer};
pub use report::{NO_MEDICINES_MESSAGE, ScanReport};
pub use scanner::{Scanner, ScannerConfig};
pub use session::ScanSession;
pub use upload::{DEFAULT_MAX_IMAGE_BYTES, ImageFormat, ImageUpload};
