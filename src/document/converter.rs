//! Converter capability and its docx-rs backed implementation
//!
//! The rest of the service only sees the [`Convert`] trait; everything
//! docx-rs specific stays behind [`DocxConverter`].

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::io::{extract_media_images, validate_docx_file};
use super::models::{
    BodyRef, ItemLabel, PictureItem, StructuredDocument, TableCell, TableData, TableItem, TextItem,
};

/// Input formats the converter knows how to restrict to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Docx,
}

/// Converter construction options. The format list is fixed at construction
/// and never changes while the service runs.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub allowed_formats: Vec<InputFormat>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            allowed_formats: vec![InputFormat::Docx],
        }
    }
}

/// Capability interface for document conversion.
pub trait Convert {
    fn convert(&self, path: &Path) -> Result<StructuredDocument>;
}

/// Warm converter instance: constructed once, reused for every request.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    config: ConverterConfig,
}

impl DocxConverter {
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }
}

impl Convert for DocxConverter {
    fn convert(&self, path: &Path) -> Result<StructuredDocument> {
        let format = detect_format(path)
            .with_context(|| format!("unsupported input format: {}", path.display()))?;
        if !self.config.allowed_formats.contains(&format) {
            bail!("input format {format:?} is not enabled for this converter");
        }

        validate_docx_file(path)?;

        let data = std::fs::read(path)?;
        let docx = docx_rs::read_docx(&data)?;

        let mut doc = build_document(path, &docx);
        attach_media_images(path, &mut doc)?;

        log::debug!(
            "converted {}: {} texts, {} tables, {} pictures",
            path.display(),
            doc.texts.len(),
            doc.tables.len(),
            doc.pictures.len()
        );
        Ok(doc)
    }
}

fn detect_format(path: &Path) -> Option<InputFormat> {
    let extension = path.extension().and_then(|ext| ext.to_str())?;
    extension
        .eq_ignore_ascii_case("docx")
        .then_some(InputFormat::Docx)
}

/// Walk the docx-rs document tree and build the structured body.
fn build_document(path: &Path, docx: &docx_rs::Docx) -> StructuredDocument {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();
    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let mut doc = StructuredDocument::new(name, filename);

    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                // Anchored drawings come before the paragraph text so body
                // order matches document order.
                for _ in 0..count_drawings(para) {
                    doc.body.push(BodyRef::Picture(doc.pictures.len()));
                    doc.pictures.push(PictureItem {
                        label: ItemLabel::Picture,
                        caption: None,
                        mimetype: None,
                        image: None,
                    });
                }

                let text = paragraph_text(para);
                if text.trim().is_empty() {
                    continue;
                }
                let (label, level) = classify_paragraph(para);
                doc.body.push(BodyRef::Text(doc.texts.len()));
                doc.texts.push(TextItem { label, text, level });
            }
            docx_rs::DocumentChild::Table(table) => {
                let data = extract_table_grid(table);
                doc.body.push(BodyRef::Table(doc.tables.len()));
                doc.tables.push(TableItem {
                    label: ItemLabel::Table,
                    data,
                });
            }
            _ => {}
        }
    }

    doc
}

/// Pair embedded media payloads with the drawing placeholders found during
/// the walk. Media entries with no matching drawing (headers, floating
/// shapes) are appended at the end of the body.
fn attach_media_images(path: &Path, doc: &mut StructuredDocument) -> Result<()> {
    let images = extract_media_images(path)?;
    for (index, image) in images.into_iter().enumerate() {
        if let Some(picture) = doc.pictures.get_mut(index) {
            picture.mimetype = Some(image.mimetype.clone());
            picture.image = Some(image);
        } else {
            doc.body.push(BodyRef::Picture(doc.pictures.len()));
            doc.pictures.push(PictureItem {
                label: ItemLabel::Picture,
                caption: None,
                mimetype: Some(image.mimetype.clone()),
                image: Some(image),
            });
        }
    }
    Ok(())
}

fn count_drawings(para: &docx_rs::Paragraph) -> usize {
    let mut count = 0;
    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if matches!(run_child, docx_rs::RunChild::Drawing(_)) {
                    count += 1;
                }
            }
        }
    }
    count
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(text_elem) = run_child {
                    text.push_str(&text_elem.text);
                }
            }
        }
    }
    text
}

/// Decide the content label from Word paragraph properties: explicit heading
/// styles first, then numbering (list items), otherwise plain text.
fn classify_paragraph(para: &docx_rs::Paragraph) -> (ItemLabel, Option<u8>) {
    if let Some(style) = &para.property.style {
        if style.val == "Title" {
            return (ItemLabel::Title, None);
        }
        if style.val.starts_with("Heading") || style.val.starts_with("heading") {
            let level = style
                .val
                .chars()
                .last()
                .and_then(|c| c.to_digit(10))
                .map_or(1, |level| level.min(6) as u8);
            return (ItemLabel::SectionHeader, Some(level));
        }
    }

    if para.property.numbering_property.is_some() {
        return (ItemLabel::ListItem, None);
    }

    (ItemLabel::Text, None)
}

fn extract_table_grid(table: &docx_rs::Table) -> TableData {
    let mut grid = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            let mut cell_text = String::new();

            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(para) => {
                        if !cell_text.is_empty() && !cell_text.ends_with(' ') {
                            cell_text.push(' ');
                        }
                        cell_text.push_str(&paragraph_text(para));
                    }
                    _ => {
                        // Nested tables contribute their own top-level entry
                    }
                }
            }

            cells.push(TableCell::from_text(cell_text));
        }

        grid.push(cells);
    }

    let num_rows = grid.len();
    let num_cols = grid.iter().map(Vec::len).max().unwrap_or(0);
    TableData {
        num_rows,
        num_cols,
        grid,
    }
}
