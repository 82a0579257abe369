//! Ordering of scored candidates

use crate::error::Result;
use crate::processing::embeddings::Embedding;
use crate::processing::similarity::cosine_similarity;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_K: usize = 5;

/// A candidate waiting to be scored.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub upload_index: usize,
    pub embedding: Embedding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub name: String,
    /// Cosine similarity, in [-1, 1]
    pub score: f64,
    pub upload_index: usize,
}

impl ScoredCandidate {
    /// Score rescaled to the percentage-like value used in exports
    pub fn percentage(&self) -> f64 {
        self.score * 100.0
    }
}

/// Candidates sorted by descending score, ties kept in upload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    entries: Vec<ScoredCandidate>,
}

impl Ranking {
    /// Sorts the given entries; `sort_by` is stable so equal scores keep their order.
    pub fn from_scored(mut entries: Vec<ScoredCandidate>) -> Self {
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { entries }
    }

    pub fn entries(&self) -> &[ScoredCandidate] {
        &self.entries
    }

    pub fn top(&self, k: usize) -> &[ScoredCandidate] {
        &self.entries[..k.min(self.entries.len())]
    }

    pub fn top_five(&self) -> &[ScoredCandidate] {
        self.top(DEFAULT_TOP_K)
    }

    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a ScoredCandidate;
    type IntoIter = std::slice::Iter<'a, ScoredCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Score `(name, embedding)` pairs against the reference and sort them.
///
/// Upload order is the iteration order of `candidates`.
pub fn rank<I>(candidates: I, reference: &Embedding) -> Result<Ranking>
where
    I: IntoIterator<Item = (String, Embedding)>,
{
    let candidates = candidates
        .into_iter()
        .enumerate()
        .map(|(upload_index, (name, embedding))| Candidate {
            name,
            upload_index,
            embedding,
        })
        .collect();

    rank_candidates(candidates, reference)
}

/// Like [`rank`], for candidates that carry their own upload position.
pub fn rank_candidates(candidates: Vec<Candidate>, reference: &Embedding) -> Result<Ranking> {
    let scored = candidates
        .into_iter()
        .map(|candidate| {
            let score = cosine_similarity(&candidate.embedding, reference)?;
            Ok(ScoredCandidate {
                name: candidate.name,
                score,
                upload_index: candidate.upload_index,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Ranking::from_scored(scored))
}
