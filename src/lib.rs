//! docx-extract: persistent DOCX text extraction service
//!
//! A long-lived worker that reads file paths from a line-oriented input
//! stream, converts each document with a single warm converter, composes
//! plain text that avoids markdown-table padding blow-up, detects the
//! document language, and emits one JSON result per request. Faults are
//! isolated per request; one bad document never kills the worker.

pub mod compose;
pub mod document;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod project;
pub mod server;

// Re-export commonly used types
pub use document::{Convert, DocxConverter, StructuredDocument};
pub use error::ExtractError;
pub use language::{ClassifyLanguage, WhatlangClassifier, detect_language};
pub use pipeline::{ExtractionResult, extract};
pub use project::strip_image_payloads;
