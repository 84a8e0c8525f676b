//! Errors - エラー型と分類
//!
//! - **CleanerError**: 個々の cleaner の実行エラー（ログに残して握りつぶす）
//! - **RegistryError**: 登録時のエラー（呼び出し元に即座に返す / Fail-fast）
//! - **StoreError**: BlobStore port のエラー

use std::time::Duration;

use thiserror::Error;

/// CleanerError は 1 回の `execute()` の失敗
///
/// CleanupAgent はこのエラーを呼び出し元へ伝播しない。
/// コンテナ名と一緒に error ログへ記録して次の cleaner に進む。
#[derive(Debug, Error)]
pub enum CleanerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("cleaner did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("cleaner task aborted: {0}")]
    Aborted(String),

    #[error("{0}")]
    Failed(String),
}

impl CleanerError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// RegistryError は cleaner 登録時のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// null 相当（設定ノードなし / 名前が空の handle）
    #[error("argument must not be empty: {0}")]
    MissingArgument(&'static str),

    #[error("invalid cleaner definition: {0}")]
    InvalidCleaner(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("blob not found: {container}/{blob}")]
    BlobNotFound { container: String, blob: String },

    #[error("invalid blob path: {0}")]
    InvalidName(String),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}
