//! Markdown rendering of the structured document
//!
//! Renders the body in reading order with optional label exclusion. Table
//! rendering pads every cell to its column width; callers that need compact
//! output exclude tables here and render them separately (see the composer).

use unicode_segmentation::UnicodeSegmentation;

use super::models::{BodyRef, ItemLabel, StructuredDocument, TableData, TextItem};

const IMAGE_PLACEHOLDER: &str = "<!-- image -->";

/// Minimum rendered column width, matching typical word-processor output.
const MIN_COLUMN_WIDTH: usize = 3;

impl StructuredDocument {
    /// Render the document as markdown, skipping items whose label appears
    /// in `exclude`.
    pub fn export_to_markdown(&self, exclude: &[ItemLabel]) -> String {
        let mut blocks = Vec::new();

        for item in &self.body {
            match *item {
                BodyRef::Text(i) => {
                    let Some(text_item) = self.texts.get(i) else {
                        continue;
                    };
                    if exclude.contains(&text_item.label) {
                        continue;
                    }
                    blocks.push(render_text(text_item));
                }
                BodyRef::Table(i) => {
                    if exclude.contains(&ItemLabel::Table) {
                        continue;
                    }
                    let Some(table) = self.tables.get(i) else {
                        continue;
                    };
                    let rendered = render_table(&table.data);
                    if !rendered.is_empty() {
                        blocks.push(rendered);
                    }
                }
                BodyRef::Picture(_) => {
                    if exclude.contains(&ItemLabel::Picture) {
                        continue;
                    }
                    blocks.push(IMAGE_PLACEHOLDER.to_string());
                }
            }
        }

        blocks.join("\n\n")
    }
}

fn render_text(item: &TextItem) -> String {
    match item.label {
        ItemLabel::Title => format!("# {}", item.text),
        ItemLabel::SectionHeader => {
            let level = item.level.unwrap_or(1).clamp(1, 6) as usize;
            format!("{} {}", "#".repeat(level), item.text)
        }
        ItemLabel::ListItem => format!("- {}", item.text),
        _ => item.text.clone(),
    }
}

/// Render a table as a markdown grid with cells padded to column width.
///
/// Padding multiplies output size when tables nest; the text composer
/// deliberately bypasses this path.
fn render_table(data: &TableData) -> String {
    if data.grid.is_empty() {
        return String::new();
    }

    let num_cols = data
        .grid
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(data.num_cols);
    if num_cols == 0 {
        return String::new();
    }

    let mut widths = vec![MIN_COLUMN_WIDTH; num_cols];
    for row in &data.grid {
        for (col, cell) in row.iter().enumerate() {
            let width = display_width(cell.text.as_deref().unwrap_or(""));
            widths[col] = widths[col].max(width);
        }
    }

    let mut lines = Vec::new();
    for (row_index, row) in data.grid.iter().enumerate() {
        let mut line = String::from("|");
        for (col, width) in widths.iter().enumerate() {
            let text = row
                .get(col)
                .and_then(|cell| cell.text.as_deref())
                .unwrap_or("");
            let pad = width.saturating_sub(display_width(text));
            line.push(' ');
            line.push_str(text);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        lines.push(line);

        // Header separator after the first row
        if row_index == 0 {
            let mut separator = String::from("|");
            for width in &widths {
                separator.push_str(&"-".repeat(width + 2));
                separator.push('|');
            }
            lines.push(separator);
        }
    }

    lines.join("\n")
}

fn display_width(text: &str) -> usize {
    text.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::models::{TableCell, TableItem};

    fn doc_with(
        texts: Vec<TextItem>,
        tables: Vec<TableItem>,
        body: Vec<BodyRef>,
    ) -> StructuredDocument {
        let mut doc = StructuredDocument::new("test".into(), "test.docx".into());
        doc.texts = texts;
        doc.tables = tables;
        doc.body = body;
        doc
    }

    fn cell(text: &str) -> TableCell {
        TableCell {
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn renders_headings_and_paragraphs_in_order() {
        let doc = doc_with(
            vec![
                TextItem {
                    label: ItemLabel::SectionHeader,
                    text: "Intro".into(),
                    level: Some(2),
                },
                TextItem {
                    label: ItemLabel::Text,
                    text: "Hello world.".into(),
                    level: None,
                },
            ],
            vec![],
            vec![BodyRef::Text(0), BodyRef::Text(1)],
        );
        assert_eq!(doc.export_to_markdown(&[]), "## Intro\n\nHello world.");
    }

    #[test]
    fn excluding_tables_drops_them_from_output() {
        let doc = doc_with(
            vec![TextItem {
                label: ItemLabel::Text,
                text: "Before".into(),
                level: None,
            }],
            vec![TableItem {
                label: ItemLabel::Table,
                data: TableData {
                    num_rows: 1,
                    num_cols: 2,
                    grid: vec![vec![cell("a"), cell("b")]],
                },
            }],
            vec![BodyRef::Text(0), BodyRef::Table(0)],
        );
        assert_eq!(doc.export_to_markdown(&[ItemLabel::Table]), "Before");
        assert!(doc.export_to_markdown(&[]).contains("| a   | b   |"));
    }

    #[test]
    fn table_cells_are_padded_to_column_width() {
        let data = TableData {
            num_rows: 2,
            num_cols: 2,
            grid: vec![
                vec![cell("name"), cell("x")],
                vec![cell("y"), cell("long value")],
            ],
        };
        let rendered = render_table(&data);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "| name | x          |");
        assert_eq!(lines[2], "| y    | long value |");
    }
}
