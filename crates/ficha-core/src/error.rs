use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FichaError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load export config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid export config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FichaError {
    /// True when the error means the document itself could not be opened or
    /// decoded, as opposed to a problem with the tool setup or configuration.
    pub fn is_document_unreadable(&self) -> bool {
        matches!(
            self,
            FichaError::Extraction(_) | FichaError::PdftotextFailed { .. } | FichaError::Io(_)
        )
    }
}
