//! Embeddings generation using Model2Vec

use crate::config::Config;
use crate::error::{Result, ResumeRankerError};
use log::{debug, info};
use model2vec_rs::model::StaticModel;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Dense vector produced by an embedding model. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Maps normalized text to a fixed-dimension embedding.
///
/// Implementations must be deterministic: the same text always yields the
/// same vector.
pub trait Embedder {
    fn embed(&self, text: &str) -> Result<Embedding>;

    fn model_name(&self) -> &str;
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn embed(&self, text: &str) -> Result<Embedding> {
        (**self).embed(text)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Where the model weights come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Directory holding tokenizer.json, model.safetensors and config.json
    Local(PathBuf),
    /// Hugging Face repository id, downloaded on first load
    Hub(String),
}

impl ModelSource {
    fn location(&self) -> String {
        match self {
            ModelSource::Local(path) => path.to_string_lossy().to_string(),
            ModelSource::Hub(repo_id) => repo_id.clone(),
        }
    }
}

pub const MODEL_FILES: &[&str] = &["tokenizer.json", "model.safetensors", "config.json"];

pub fn is_model_directory(path: &Path) -> bool {
    path.is_dir() && MODEL_FILES.iter().all(|file| path.join(file).is_file())
}

/// Production embedder backed by a Model2Vec static model.
///
/// The model is loaded on the first `embed` call and shared by every later
/// call on this engine.
pub struct EmbeddingEngine {
    source: ModelSource,
    model_name: String,
    model: OnceCell<StaticModel>,
}

impl EmbeddingEngine {
    pub fn new(source: ModelSource, model_name: impl Into<String>) -> Self {
        Self {
            source,
            model_name: model_name.into(),
            model: OnceCell::new(),
        }
    }

    /// Build an engine for `requested` (or the configured default) without loading it.
    pub fn from_config(config: &Config, requested: Option<&str>) -> Self {
        let wanted = requested.unwrap_or(&config.models.default_embedding_model);
        let (model_name, source) = Self::resolve_source(config, wanted);
        Self::new(source, model_name)
    }

    /// Local copy in the models directory first, then the hub.
    fn resolve_source(config: &Config, wanted: &str) -> (String, ModelSource) {
        match config.get_model_by_name(wanted) {
            Some(model) => {
                let local_path = config.models_dir().join(&model.name);
                if is_model_directory(&local_path) {
                    (model.name.clone(), ModelSource::Local(local_path))
                } else {
                    (model.name.clone(), ModelSource::Hub(model.repo_id.clone()))
                }
            }
            None => {
                let as_path = PathBuf::from(wanted);
                if is_model_directory(&as_path) {
                    (wanted.to_string(), ModelSource::Local(as_path))
                } else {
                    (wanted.to_string(), ModelSource::Hub(wanted.to_string()))
                }
            }
        }
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    fn model(&self) -> Result<&StaticModel> {
        self.model.get_or_try_init(|| {
            let start_time = Instant::now();
            info!("Loading Model2Vec embedding model from: {}", self.source.location());

            let model = StaticModel::from_pretrained(
                self.source.location(),
                None, // token
                None, // normalize
                None, // subfolder
            )
            .map_err(|e| ResumeRankerError::ModelLoading(format!("Failed to load model: {}", e)))?;

            info!("Model loaded successfully in {:.2?}", start_time.elapsed());
            Ok(model)
        })
    }
}

impl Embedder for EmbeddingEngine {
    fn embed(&self, text: &str) -> Result<Embedding> {
        let model = self.model()?;
        let start_time = Instant::now();
        let values = model.encode_single(text);
        debug!(
            "Embedded {} chars into {} dims in {:.2?}",
            text.len(),
            values.len(),
            start_time.elapsed()
        );

        if values.is_empty() {
            return Err(ResumeRankerError::Embedding(format!(
                "Model '{}' returned an empty embedding",
                self.model_name
            )));
        }

        Ok(Embedding::new(values))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
