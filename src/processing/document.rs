//! Document structures

use crate::processing::text_processor::{normalize, TextStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Display name, usually the uploaded file name. Not required to be unique.
    pub name: String,
    pub content: String,
    pub normalized: String,
    /// Position in the upload batch
    pub upload_index: usize,
}

impl Document {
    pub fn new(name: impl Into<String>, content: String, upload_index: usize) -> Self {
        let normalized = normalize(&content);
        Self {
            name: name.into(),
            content,
            normalized,
            upload_index,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.normalized.is_empty()
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.normalized)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub name: String,
    pub upload_index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    NoText,
    ExtractionFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoText => write!(f, "no text could be extracted"),
            SkipReason::ExtractionFailed(msg) => write!(f, "extraction failed: {}", msg),
        }
    }
}
