//! Embedding model management for downloading and managing Model2Vec models

use crate::config::{AvailableModel, Config};
use crate::error::{Result, ResumeRankerError};
use crate::processing::embeddings::{is_model_directory, MODEL_FILES};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Manager for embedding models - handles download, lookup and removal
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, AvailableModel>,
    downloaded_models: HashSet<String>,
}

impl EmbeddingModelManager {
    pub async fn new(config: &Config) -> Result<Self> {
        let models_dir = config.models_dir().clone();
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                ResumeRankerError::ModelLoading(format!("Failed to create models directory: {}", e))
            })?;
        }

        let available_models = config
            .models
            .available_models
            .iter()
            .map(|m| (m.name.clone(), m.clone()))
            .collect();

        let mut manager = Self {
            models_dir,
            available_models,
            downloaded_models: HashSet::new(),
        };
        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() && is_model_directory(&entry.path()) {
                self.downloaded_models
                    .insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(())
    }

    /// Download an embedding model from Hugging Face Hub
    pub async fn download_model(&mut self, model_id: &str, force: bool) -> Result<PathBuf> {
        let model_info = self
            .get_model_info(model_id)
            .cloned()
            .ok_or_else(|| ResumeRankerError::ModelNotFound(model_id.to_string()))?;

        let model_dir = self.models_dir.join(&model_info.name);
        if !force && self.downloaded_models.contains(&model_info.name) {
            return Ok(model_dir);
        }

        info!(
            "Downloading embedding model: {} ({} MB) from {}",
            model_info.name, model_info.size_mb, model_info.repo_id
        );

        fs::create_dir_all(&model_dir).await?;

        let api = Api::new()
            .map_err(|e| ResumeRankerError::ModelLoading(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.model(model_info.repo_id.clone());

        for file in MODEL_FILES {
            let cached = repo.get(file).await.map_err(|e| {
                ResumeRankerError::ModelLoading(format!("Failed to download required file {}: {}", file, e))
            })?;
            fs::copy(&cached, model_dir.join(file)).await?;
            info!("  Downloaded: {}", file);
        }

        match repo.get("README.md").await {
            Ok(cached) => {
                fs::copy(&cached, model_dir.join("README.md")).await?;
            }
            Err(e) => warn!("Optional file README.md not found: {}", e),
        }

        self.downloaded_models.insert(model_info.name.clone());
        Ok(model_dir)
    }

    pub async fn remove_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let name = self
            .resolve_model_id(model_id)
            .ok_or_else(|| ResumeRankerError::ModelNotFound(model_id.to_string()))?;

        if !self.downloaded_models.contains(&name) {
            return Err(ResumeRankerError::InvalidInput(format!(
                "Model '{}' is not downloaded",
                name
            )));
        }

        let model_dir = self.models_dir.join(&name);
        fs::remove_dir_all(&model_dir).await?;
        self.downloaded_models.remove(&name);
        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        let name = self.resolve_model_id(model_id)?;
        self.downloaded_models
            .contains(&name)
            .then(|| self.models_dir.join(name))
    }

    pub fn list_available_models(&self) -> Vec<&AvailableModel> {
        self.available_models.values().collect()
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        let mut models: Vec<String> = self.downloaded_models.iter().cloned().collect();
        models.sort();
        models
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&AvailableModel> {
        let name = self.resolve_model_id(model_id)?;
        self.available_models.get(&name)
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.resolve_model_id(model_id)
            .map(|name| self.downloaded_models.contains(&name))
            .unwrap_or(false)
    }

    /// Resolve model ID from various formats (name, repo_id, case-insensitive name)
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        if let Some(info) = self.available_models.values().find(|m| m.repo_id == input) {
            return Some(info.name.clone());
        }

        let input_lower = input.to_lowercase();
        self.available_models
            .keys()
            .find(|name| name.to_lowercase() == input_lower)
            .cloned()
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }
}
