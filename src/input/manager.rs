//! Input manager for loading uploads from disk

use crate::error::{Result, ResumeRankerError};
use crate::input::file_detector::FileType;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A candidate file as handed to the pipeline: display name plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_name(&self.name)
    }
}

pub struct InputManager {
    cache: HashMap<PathBuf, UploadedFile>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a single file into an upload named after its file name.
    pub async fn load_file(&mut self, path: &Path) -> Result<UploadedFile> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                info!("Using cached upload for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeRankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ResumeRankerError::InvalidInput(format!("Not a file: {}", path.display())))?;

        let bytes = fs::read(path).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        let upload = UploadedFile::new(name, bytes);
        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), upload.clone());
        }

        Ok(upload)
    }

    /// Load uploads in the given order.
    ///
    /// Directories expand to their supported files, sorted by name; files
    /// named explicitly are kept whatever their suffix.
    pub async fn load_batch(&mut self, paths: &[PathBuf]) -> Result<Vec<UploadedFile>> {
        let mut uploads = Vec::new();

        for path in paths {
            if fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false) {
                for file in self.supported_files_in(path).await? {
                    uploads.push(self.load_file(&file).await?);
                }
            } else {
                uploads.push(self.load_file(path).await?);
            }
        }

        info!("Loaded {} upload(s)", uploads.len());
        Ok(uploads)
    }

    async fn supported_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_file = entry.file_type().await?.is_file();
            let supported = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| FileType::from_name(n).is_supported())
                .unwrap_or(false);

            if is_file && supported {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
