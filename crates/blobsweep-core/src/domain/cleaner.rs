//! Cleaner の定義（検証済み設定）と BlobStore 上のエントリ

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::errors::RegistryError;

/// CleanerSpec は検証済みの cleaner 定義
///
/// 設定ファイルの `[[cleaners]]` エントリから作られ、
/// `CleanerFactory` に渡されて `BlobCleaner` になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanerSpec {
    container: String,
    prefix: Option<String>,
    max_age: Duration,
}

impl CleanerSpec {
    /// コンテナ名が空、`max_age` が 0、または chrono で表せない長さの場合はエラー
    pub fn new(container: impl Into<String>, max_age: Duration) -> Result<Self, RegistryError> {
        let container = container.into();
        if container.trim().is_empty() {
            return Err(RegistryError::MissingArgument("container"));
        }
        if max_age.is_zero() {
            return Err(RegistryError::InvalidCleaner(format!(
                "max_age must be positive for container '{container}'"
            )));
        }
        if chrono::Duration::from_std(max_age).is_err() {
            return Err(RegistryError::InvalidCleaner(format!(
                "max_age is out of range for container '{container}'"
            )));
        }
        Ok(Self {
            container,
            prefix: None,
            max_age,
        })
    }

    /// 空文字の prefix は「指定なし」と同じ扱い
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

/// BlobEntry は BlobStore の list 結果 1 件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobEntry {
    pub name: String,
    pub last_modified: DateTime<Utc>,
}
