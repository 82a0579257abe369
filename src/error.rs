//! Error handling for the resume ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeRankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text decoding error: {0}")]
    TextDecoding(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Embedding dimensions don't match: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    MissingInput(String),

    #[error("{0}")]
    NoValidText(String),

    #[error("Report export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResumeRankerError {
    /// Errors the user can fix by changing the input, shown as warnings.
    pub fn is_user_warning(&self) -> bool {
        matches!(
            self,
            ResumeRankerError::MissingInput(_) | ResumeRankerError::NoValidText(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ResumeRankerError>;

/// model2vec-rs and hf-hub report failures through anyhow
impl From<anyhow::Error> for ResumeRankerError {
    fn from(err: anyhow::Error) -> Self {
        ResumeRankerError::Embedding(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ResumeRankerError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ResumeRankerError::Export(err.to_string())
    }
}
