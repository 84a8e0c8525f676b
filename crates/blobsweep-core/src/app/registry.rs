//! CleanerRegistry - 登録順を保つ cleaner の列
//!
//! 設計:
//! - 初期化時に組み立てる（append のみ）
//! - agent の実行中は読み取り専用
//! - 重複チェックはしない（同じコンテナを 2 回登録すれば 2 回実行される）

use std::sync::Arc;

use crate::domain::RegistryError;
use crate::ports::BlobCleaner;

#[derive(Default)]
pub struct CleanerRegistry {
    cleaners: Vec<Arc<dyn BlobCleaner>>,
}

impl CleanerRegistry {
    pub fn new() -> Self {
        Self {
            cleaners: Vec::new(),
        }
    }

    /// Append a cleaner.
    ///
    /// 名前のない handle は null 相当として拒否し、何も追加しない。
    pub fn register(&mut self, cleaner: Arc<dyn BlobCleaner>) -> Result<(), RegistryError> {
        if cleaner.container_name().trim().is_empty() {
            return Err(RegistryError::MissingArgument("cleaner"));
        }
        self.cleaners.push(cleaner);
        Ok(())
    }

    /// Registered cleaners in registration order.
    pub fn all(&self) -> &[Arc<dyn BlobCleaner>] {
        &self.cleaners
    }

    pub fn names(&self) -> Vec<&str> {
        self.cleaners.iter().map(|c| c.container_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.cleaners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleaners.is_empty()
    }
}
