//! File validation and media access
//!
//! Validates that an input file really is a .docx archive and reads embedded
//! media payloads out of it.

use anyhow::{Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use super::models::ImageData;

/// Validates that the file is a legitimate .docx archive.
pub(crate) fn validate_docx_file(file_path: &Path) -> Result<()> {
    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    if archive.by_name("word/document.xml").is_err() {
        if archive.by_name("xl/workbook.xml").is_ok() {
            bail!("this appears to be an Excel workbook (.xlsx), not a Word document");
        }
        bail!("invalid .docx file: missing word/document.xml");
    }

    Ok(())
}

/// Read every embedded image under `word/media/`, in archive-name order,
/// as a base64 data URI.
pub(crate) fn extract_media_images(file_path: &Path) -> Result<Vec<ImageData>> {
    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("word/media/"))
        .map(str::to_string)
        .collect();
    names.sort();

    let mut images = Vec::with_capacity(names.len());
    for name in names {
        let mut entry = archive.by_name(&name)?;
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;

        let mimetype = media_mimetype(&name);
        images.push(ImageData {
            mimetype: mimetype.to_string(),
            uri: format!("data:{};base64,{}", mimetype, STANDARD.encode(&bytes)),
        });
    }

    Ok(images)
}

fn media_mimetype(name: &str) -> &'static str {
    let extension = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "emf" => "image/emf",
        "wmf" => "image/wmf",
        _ => {
            log::debug!("unrecognized media entry {name}, treating as opaque bytes");
            "application/octet-stream"
        }
    }
}
