//! BlobStore port - コンテナ内の blob の列挙と削除
//!
//! # 実装
//! - **InMemoryBlobStore**: テスト用
//! - **FsBlobStore**: ローカルディレクトリをコンテナとして扱う

use async_trait::async_trait;

use crate::domain::{BlobEntry, StoreError};

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// `prefix` に一致する blob を名前順で返す
    ///
    /// コンテナが存在しない場合は `StoreError::ContainerNotFound`
    async fn list(
        &self,
        container: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<BlobEntry>, StoreError>;

    async fn delete(&self, container: &str, blob: &str) -> Result<(), StoreError>;
}
