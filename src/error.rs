//! Error taxonomy for per-request failures
//!
//! Classification failures never appear here; they are absorbed inside
//! language detection. Nothing in this taxonomy is fatal to the service.

use thiserror::Error;

/// A failure local to one request, reported as a failure response line.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The request path does not exist; detected before conversion so an
    /// obviously invalid request never pays converter overhead.
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// The converter rejected or could not process the document.
    #[error(transparent)]
    Conversion(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_references_the_path() {
        let err = ExtractError::NotFound {
            path: "/tmp/missing.docx".to_string(),
        };
        assert_eq!(err.to_string(), "File not found: /tmp/missing.docx");
    }

    #[test]
    fn conversion_errors_surface_their_message() {
        let err = ExtractError::from(anyhow::anyhow!("invalid .docx file"));
        assert_eq!(err.to_string(), "invalid .docx file");
    }
}
