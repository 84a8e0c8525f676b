//! RetentionCleaner - 一定期間より古い blob を削除する cleaner
//!
//! # フロー
//! 1. `now - max_age` を cutoff とする
//! 2. コンテナ（prefix 指定があればその配下）の blob を列挙
//! 3. cutoff より前に更新された blob を削除

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{CleanerError, CleanerSpec, StoreError};
use crate::ports::{BlobCleaner, BlobStore, CleanerFactory, Clock};

pub struct RetentionCleaner {
    spec: CleanerSpec,
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
}

impl RetentionCleaner {
    pub fn new(spec: CleanerSpec, store: Arc<dyn BlobStore>, clock: Arc<dyn Clock>) -> Self {
        Self { spec, store, clock }
    }

    pub fn spec(&self) -> &CleanerSpec {
        &self.spec
    }
}

#[async_trait]
impl BlobCleaner for RetentionCleaner {
    fn container_name(&self) -> &str {
        self.spec.container()
    }

    async fn execute(&self) -> Result<(), CleanerError> {
        let container = self.spec.container();
        let max_age = chrono::Duration::from_std(self.spec.max_age())
            .map_err(|e| CleanerError::failed(format!("max_age out of range: {e}")))?;
        let Some(cutoff) = self.clock.now().checked_sub_signed(max_age) else {
            debug!(container, "cutoff precedes representable time, nothing to delete");
            return Ok(());
        };

        let blobs = self.store.list(container, self.spec.prefix()).await?;
        let mut deleted = 0usize;
        for blob in blobs.iter().filter(|b| b.last_modified < cutoff) {
            match self.store.delete(container, &blob.name).await {
                Ok(()) => deleted += 1,
                // 列挙後に別経路で消えたものは無視
                Err(StoreError::BlobNotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }

        debug!(
            container,
            scanned = blobs.len(),
            deleted,
            %cutoff,
            "retention sweep finished"
        );
        Ok(())
    }
}

/// RetentionCleanerFactory は共有の BlobStore / Clock を使って RetentionCleaner を作る
pub struct RetentionCleanerFactory {
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
}

impl RetentionCleanerFactory {
    pub fn new(store: Arc<dyn BlobStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

impl CleanerFactory for RetentionCleanerFactory {
    fn create(&self, spec: &CleanerSpec) -> Arc<dyn BlobCleaner> {
        Arc::new(RetentionCleaner::new(
            spec.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
        ))
    }
}
