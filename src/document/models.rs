//! Structured document model produced by the converter
//!
//! This is the keyed "dict form" schema consumed downstream: an ordered body
//! of item references plus separate text, table, and picture collections.
//! Cell text and image payloads are optional fields, never probed at runtime.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// MIME type recorded in the origin of every converted DOCX document.
pub const DOCX_MIMETYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A fully converted document: reading-order body plus typed collections.
#[derive(Debug, Clone, Serialize)]
pub struct StructuredDocument {
    pub schema_name: String,
    pub name: String,
    pub origin: Origin,
    pub body: Vec<BodyRef>,
    pub texts: Vec<TextItem>,
    pub tables: Vec<TableItem>,
    pub pictures: Vec<PictureItem>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Origin {
    pub mimetype: String,
    pub filename: String,
}

/// Content label attached to every item in the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLabel {
    Title,
    SectionHeader,
    Text,
    ListItem,
    Table,
    Picture,
}

/// Reference from the body into one of the typed collections.
///
/// Serialized in `$ref` form (`#/texts/0`, `#/tables/1`, ...) so the dict
/// export stays a plain JSON tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRef {
    Text(usize),
    Table(usize),
    Picture(usize),
}

impl Serialize for BodyRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cref = match self {
            BodyRef::Text(i) => format!("#/texts/{i}"),
            BodyRef::Table(i) => format!("#/tables/{i}"),
            BodyRef::Picture(i) => format!("#/pictures/{i}"),
        };
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$ref", &cref)?;
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TextItem {
    pub label: ItemLabel,
    pub text: String,
    /// Heading level, present only for section headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableItem {
    pub label: ItemLabel,
    pub data: TableData,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub num_rows: usize,
    pub num_cols: usize,
    pub grid: Vec<Vec<TableCell>>,
}

/// One cell of a table grid. Cells without textual content carry no text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableCell {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PictureItem {
    pub label: ItemLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    /// Embedded binary payload. Stripped before the record leaves the
    /// service; see the projection module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageData>,
}

/// Embedded image payload as a base64 data URI.
#[derive(Debug, Clone, Serialize)]
pub struct ImageData {
    pub mimetype: String,
    pub uri: String,
}

impl StructuredDocument {
    pub fn new(name: String, filename: String) -> Self {
        Self {
            schema_name: "StructuredDocument".to_string(),
            name,
            origin: Origin {
                mimetype: DOCX_MIMETYPE.to_string(),
                filename,
            },
            body: Vec::new(),
            texts: Vec::new(),
            tables: Vec::new(),
            pictures: Vec::new(),
        }
    }

    /// Export the full structured record, including any image payloads.
    pub fn export_to_dict(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl TableCell {
    pub fn from_text(text: String) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self { text: None }
        } else {
            Self {
                text: Some(trimmed.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_refs_serialize_as_ref_paths() {
        let json = serde_json::to_value(BodyRef::Table(3)).unwrap();
        assert_eq!(json, serde_json::json!({"$ref": "#/tables/3"}));

        let json = serde_json::to_value(BodyRef::Text(0)).unwrap();
        assert_eq!(json, serde_json::json!({"$ref": "#/texts/0"}));
    }

    #[test]
    fn empty_cell_text_becomes_absent_field() {
        let cell = TableCell::from_text("   ".to_string());
        assert!(cell.text.is_none());
        assert_eq!(serde_json::to_value(&cell).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn dict_export_keeps_picture_payload() {
        let mut doc = StructuredDocument::new("memo".into(), "memo.docx".into());
        doc.pictures.push(PictureItem {
            label: ItemLabel::Picture,
            caption: None,
            mimetype: Some("image/png".into()),
            image: Some(ImageData {
                mimetype: "image/png".into(),
                uri: "data:image/png;base64,AAAA".into(),
            }),
        });
        let dict = doc.export_to_dict().unwrap();
        assert!(
            dict["pictures"][0]["image"]["uri"]
                .as_str()
                .unwrap()
                .starts_with("data:image/png")
        );
    }
}
