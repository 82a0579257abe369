//! Report structures shared by the output formatters

use crate::processing::document::SkippedDocument;
use crate::processing::pipeline::RankingOutcome;
use crate::processing::ranker::ScoredCandidate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What one ranking run hands to the formatters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    /// Best matches shown interactively
    pub top_matches: Vec<ScoredCandidate>,

    /// Full ranking, as exported to the spreadsheet
    pub ranking: Vec<ScoredCandidate>,

    /// Uploads left out of the ranking, with the reason
    pub skipped: Vec<SkippedDocument>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub ranker_version: String,
    pub embedding_model: String,
    pub embedding_dimension: usize,
    pub top_k: usize,
    pub processing_time_ms: u64,
    /// Where the spreadsheet was written, if it was
    pub export_path: Option<String>,
}

impl RankingReport {
    pub fn from_outcome(outcome: &RankingOutcome, top_k: usize) -> Self {
        Self {
            top_matches: outcome.ranking.top(top_k).to_vec(),
            ranking: outcome.ranking.entries().to_vec(),
            skipped: outcome.skipped.clone(),
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                ranker_version: env!("CARGO_PKG_VERSION").to_string(),
                embedding_model: outcome.model_name.clone(),
                embedding_dimension: outcome.embedding_dimension,
                top_k,
                processing_time_ms: outcome.processing_time_ms,
                export_path: None,
            },
        }
    }

    pub fn with_export_path(mut self, path: impl Into<String>) -> Self {
        self.metadata.export_path = Some(path.into());
        self
    }
}
