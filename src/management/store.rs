use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::types::PersistedAlbum;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache file is not valid json: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Storage for resolved album image urls between sessions.
#[async_trait]
pub trait ImageUrlStore: Send + Sync {
    async fn load(&self) -> Result<Vec<PersistedAlbum>, StoreError>;

    async fn save(&self, entries: &[PersistedAlbum]) -> Result<(), StoreError>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location in the local data directory.
    pub fn default_location() -> Self {
        Self::new(Self::cache_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("lastgrid/cache/album-images.json");
        path
    }
}

#[async_trait]
impl ImageUrlStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<PersistedAlbum>, StoreError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let entries: Vec<PersistedAlbum> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    async fn save(&self, entries: &[PersistedAlbum]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}
