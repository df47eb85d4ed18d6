//! Per-document extraction pipeline
//!
//! Orchestrates one document end to end: convert, compose text, detect
//! language, project the structured record, assemble the result. Either the
//! full record is produced or the pipeline fails for that one document; the
//! caller is responsible for fault isolation.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::compose::compose_text;
use crate::document::Convert;
use crate::language::{ClassifyLanguage, detect_language};
use crate::project::strip_image_payloads;

/// The output record for one request.
///
/// Word and character counts are computed from the composed text, not from
/// any raw export, so they reflect the table-padding-avoidance policy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub text: String,
    pub word_count: usize,
    pub char_count: usize,
    pub table_count: usize,
    pub image_count: usize,
    pub language: String,
    pub language_confidence: f64,
    pub extraction: Value,
}

/// Extract text and structure from one document.
///
/// Conversion failures propagate unchanged; there is no retry and no
/// partial result.
pub fn extract<C, L>(converter: &C, classifier: &L, path: &Path) -> Result<ExtractionResult>
where
    C: Convert + ?Sized,
    L: ClassifyLanguage + ?Sized,
{
    let doc = converter.convert(path)?;

    let text = compose_text(&doc);
    let (language, language_confidence) = detect_language(classifier, &text);
    let extraction = strip_image_payloads(doc.export_to_dict()?);

    Ok(ExtractionResult {
        word_count: text.split_whitespace().count(),
        char_count: text.chars().count(),
        table_count: doc.tables.len(),
        image_count: doc.pictures.len(),
        text,
        language,
        language_confidence,
        extraction,
    })
}
