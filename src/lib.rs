//! Resume ranker library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeRankerError};
pub use input::manager::UploadedFile;
pub use processing::embeddings::{Embedder, Embedding, EmbeddingEngine};
pub use processing::pipeline::{RankingOutcome, RankingPipeline};
pub use processing::ranker::{rank, Ranking, ScoredCandidate};
pub use processing::similarity::cosine_similarity;
pub use processing::text_processor::normalize;
