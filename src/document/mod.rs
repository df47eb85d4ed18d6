//! Structured document model and the DOCX converter
//!
//! The converter is the one warm, expensive resource of the service; it is
//! constructed once and consumed through the [`Convert`] trait everywhere
//! else.

pub(crate) mod io;

pub mod converter;
pub mod markdown;
pub mod models;

pub use converter::{Convert, ConverterConfig, DocxConverter, InputFormat};
pub use models::*;
