use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{ObjectStore, StoreError, StoreResult};

/// Object store backed by a local directory.
///
/// Keys map to paths under `base_path`; URLs are `base_url` joined with the
/// key. Mainly useful for development and tests, but the semantics match
/// what the pipeline expects from a remote backend.
pub struct LocalObjectStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalObjectStore {
    pub async fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> StoreResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)
            .await
            .map_err(|e| StoreError::BucketMisconfigured(format!(
                "cannot create storage directory {}: {e}",
                base_path.display()
            )))?;
        Ok(Self {
            base_path,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn key_to_path(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
            return Err(StoreError::Opaque(format!("invalid object key: {key}")));
        }
        Ok(self.base_path.join(key))
    }

    async fn ensure_parent(path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StoreResult<()> {
        let start = Instant::now();
        let path = self.key_to_path(key)?;
        Self::ensure_parent(&path).await?;

        let mut file = fs::File::create(&path).await?;
        file.write_all(&data).await?;
        file.sync_all().await?;

        tracing::info!(
            key,
            content_type,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "stored object"
        );
        Ok(())
    }

    async fn retrievable_url(&self, key: &str) -> StoreResult<String> {
        let path = self.key_to_path(key)?;
        if !fs::try_exists(&path).await? {
            return Err(StoreError::NotFound(key.to_string()));
        }
        Ok(format!("{}/{}", self.base_url, key))
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await?)
    }
}
