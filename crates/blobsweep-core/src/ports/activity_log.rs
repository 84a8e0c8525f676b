//! ActivityLog port - ログ出力の抽象化
//!
//! # 実装
//! - **TracingActivityLog**: tracing へ流す（本番用）
//! - **RecordingActivityLog**: メモリに溜める（テスト用）

use std::error::Error;

/// ActivityLog は source（agent 名）付きでメッセージを記録する
pub trait ActivityLog: Send + Sync {
    fn info(&self, source: &str, message: &str);

    /// `container` は失敗した cleaner のコンテナ名
    fn error(
        &self,
        source: &str,
        container: &str,
        message: &str,
        error: &(dyn Error + 'static),
    );
}
