//! BlobCleaner port - cleanup の 1 単位
//!
//! CleanupAgent から見た cleaner は「コンテナ名」と「execute()」だけを持つ。
//! 実際に何を消すかは実装側の責務。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{CleanerError, CleanerSpec};

/// BlobCleaner は 1 つのコンテナに対する cleanup 処理
///
/// # 使用例
/// ```ignore
/// struct MyCleaner;
///
/// #[async_trait]
/// impl BlobCleaner for MyCleaner {
///     fn container_name(&self) -> &str {
///         "diagnostics-logs"
///     }
///
///     async fn execute(&self) -> Result<(), CleanerError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait BlobCleaner: Send + Sync {
    /// ログやステータスで cleaner を識別する名前
    fn container_name(&self) -> &str;

    async fn execute(&self) -> Result<(), CleanerError>;
}

/// CleanerFactory は検証済みの CleanerSpec から BlobCleaner を作る
///
/// 設定のパースと登録を分離するための明示的なファクトリ。
pub trait CleanerFactory: Send + Sync {
    fn create(&self, spec: &CleanerSpec) -> Arc<dyn BlobCleaner>;
}
