//! Cosine similarity between embeddings

use crate::error::{Result, ResumeRankerError};
use crate::processing::embeddings::Embedding;

/// `1 - cosine_distance(a, b)`, accumulated in f64.
///
/// Not clamped: the result lies in [-1, 1] up to rounding. A zero vector
/// scores 0.0 against anything.
pub fn cosine_similarity(a: &Embedding, b: &Embedding) -> Result<f64> {
    if a.dimension() != b.dimension() {
        return Err(ResumeRankerError::DimensionMismatch {
            expected: a.dimension(),
            actual: b.dimension(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (&x, &y) in a.as_slice().iter().zip(b.as_slice()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}
