//! Ranking pipeline: extraction, normalization, embedding, scoring and ranking
//! for one job description against one batch of uploads.

use crate::error::{Result, ResumeRankerError};
use crate::input::manager::UploadedFile;
use crate::input::text_extractor;
use crate::processing::document::{Document, SkipReason, SkippedDocument};
use crate::processing::embeddings::Embedder;
use crate::processing::ranker::{rank_candidates, Candidate, Ranking};
use crate::processing::text_processor::normalize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub const MISSING_INPUT_MESSAGE: &str =
    "Please provide both a job description and at least one resume.";
pub const NO_VALID_TEXT_MESSAGE: &str = "No valid text found in the uploaded resumes.";

/// Everything one invocation produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub ranking: Ranking,
    pub skipped: Vec<SkippedDocument>,
    pub model_name: String,
    pub embedding_dimension: usize,
    pub processing_time_ms: u64,
}

pub struct RankingPipeline<E: Embedder> {
    embedder: E,
    show_progress: bool,
}

impl<E: Embedder> RankingPipeline<E> {
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, enable: bool) -> Self {
        self.show_progress = enable;
        self
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Rank `files` against `job_description`.
    ///
    /// A file that fails to extract is skipped and reported; it never aborts
    /// the batch. Fails with `MissingInput` before any work when either input
    /// is absent, and with `NoValidText` when no file yields text.
    pub fn run(&self, job_description: &str, files: &[UploadedFile]) -> Result<RankingOutcome> {
        let start_time = Instant::now();

        if job_description.trim().is_empty() || files.is_empty() {
            return Err(ResumeRankerError::MissingInput(MISSING_INPUT_MESSAGE.to_string()));
        }

        let (documents, skipped) = self.prepare_documents(files);
        if documents.is_empty() {
            return Err(ResumeRankerError::NoValidText(NO_VALID_TEXT_MESSAGE.to_string()));
        }

        info!(
            "Embedding job description and {} resume(s) with {}",
            documents.len(),
            self.embedder.model_name()
        );
        let reference = self.embedder.embed(&normalize(job_description))?;

        let progress = self.progress_bar(documents.len() as u64);
        let mut candidates = Vec::with_capacity(documents.len());
        for document in documents {
            progress.set_message(document.name.clone());
            let embedding = self.embedder.embed(&document.normalized)?;
            candidates.push(Candidate {
                name: document.name,
                upload_index: document.upload_index,
                embedding,
            });
            progress.inc(1);
        }
        progress.finish_and_clear();

        let ranking = rank_candidates(candidates, &reference)?;
        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Ranked {} resume(s), skipped {}, in {}ms",
            ranking.len(),
            skipped.len(),
            processing_time_ms
        );

        Ok(RankingOutcome {
            ranking,
            skipped,
            model_name: self.embedder.model_name().to_string(),
            embedding_dimension: reference.dimension(),
            processing_time_ms,
        })
    }

    /// Extract and normalize every upload, keeping upload order.
    fn prepare_documents(&self, files: &[UploadedFile]) -> (Vec<Document>, Vec<SkippedDocument>) {
        let mut documents = Vec::new();
        let mut skipped = Vec::new();

        for (upload_index, file) in files.iter().enumerate() {
            let reason = match text_extractor::extract(file) {
                Ok(text) => {
                    let document = Document::new(file.name.clone(), text, upload_index);
                    if document.has_text() {
                        debug!("{}: {} words", document.name, document.stats().word_count);
                        documents.push(document);
                        continue;
                    }
                    SkipReason::NoText
                }
                Err(e) => SkipReason::ExtractionFailed(e.to_string()),
            };

            warn!("Skipping {}: {}", file.name, reason);
            skipped.push(SkippedDocument {
                name: file.name.clone(),
                upload_index,
                reason,
            });
        }

        (documents, skipped)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        ProgressBar::new(len).with_style(style)
    }
}
