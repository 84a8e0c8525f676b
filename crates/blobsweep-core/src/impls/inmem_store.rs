//! InMemoryBlobStore - 開発・テスト用の BlobStore
//!
//! コンテナ名 → (blob 名 → 最終更新時刻) の BTreeMap で保持するので、
//! list は常に名前順になる。

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{BlobEntry, StoreError};
use crate::ports::BlobStore;

#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    containers: RwLock<HashMap<String, BTreeMap<String, DateTime<Utc>>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 空のコンテナを作る（既にあれば何もしない）
    pub async fn create_container(&self, container: &str) {
        self.containers
            .write()
            .await
            .entry(container.to_string())
            .or_default();
    }

    /// blob を追加する。コンテナがなければ作る
    pub async fn put(&self, container: &str, blob: &str, last_modified: DateTime<Utc>) {
        self.containers
            .write()
            .await
            .entry(container.to_string())
            .or_default()
            .insert(blob.to_string(), last_modified);
    }

    /// コンテナ内の blob 名（名前順）。コンテナがなければ None
    pub async fn blob_names(&self, container: &str) -> Option<Vec<String>> {
        self.containers
            .read()
            .await
            .get(container)
            .map(|blobs| blobs.keys().cloned().collect())
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn list(
        &self,
        container: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<BlobEntry>, StoreError> {
        let containers = self.containers.read().await;
        let blobs = containers
            .get(container)
            .ok_or_else(|| StoreError::ContainerNotFound(container.to_string()))?;

        Ok(blobs
            .iter()
            .filter(|(name, _)| prefix.is_none_or(|p| name.starts_with(p)))
            .map(|(name, last_modified)| BlobEntry {
                name: name.clone(),
                last_modified: *last_modified,
            })
            .collect())
    }

    async fn delete(&self, container: &str, blob: &str) -> Result<(), StoreError> {
        let mut containers = self.containers.write().await;
        let blobs = containers
            .get_mut(container)
            .ok_or_else(|| StoreError::ContainerNotFound(container.to_string()))?;

        blobs
            .remove(blob)
            .map(|_| ())
            .ok_or_else(|| StoreError::BlobNotFound {
                container: container.to_string(),
                blob: blob.to_string(),
            })
    }
}
