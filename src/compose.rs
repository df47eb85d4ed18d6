//! Table-aware plain-text composition
//!
//! Markdown table rendering pads every cell to its column width, which
//! multiplies output size when tables nest. The composer renders non-table
//! content as markdown and table cells as delimiter-joined plain text, so
//! word and character counts stay proportional to actual content.

use crate::document::{ItemLabel, StructuredDocument};

/// Delimiter between cell texts within one table row.
pub const CELL_DELIMITER: &str = " | ";

/// Produce the plain-text rendering of a document.
///
/// Non-table content keeps its markdown structure; each table becomes one
/// block of newline-joined rows with cells joined by [`CELL_DELIMITER`].
/// Rows with no non-empty cells are dropped, as are tables with no rows.
pub fn compose_text(doc: &StructuredDocument) -> String {
    let non_table = doc.export_to_markdown(&[ItemLabel::Table]);

    let mut table_blocks = Vec::new();
    for table in &doc.tables {
        let mut rows = Vec::new();
        for row in &table.data.grid {
            let cells: Vec<&str> = row
                .iter()
                .filter_map(|cell| cell.text.as_deref())
                .filter(|text| !text.is_empty())
                .collect();
            if !cells.is_empty() {
                rows.push(cells.join(CELL_DELIMITER));
            }
        }
        if !rows.is_empty() {
            table_blocks.push(rows.join("\n"));
        }
    }

    if table_blocks.is_empty() {
        non_table
    } else {
        format!("{}\n\n{}", non_table, table_blocks.join("\n\n"))
    }
}
