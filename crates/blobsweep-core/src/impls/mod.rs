//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **TracingActivityLog** / **RecordingActivityLog**: ActivityLog
//! - **MetricsRunCounter** / **AtomicRunCounter**: RunCounter
//! - **InMemoryBlobStore** / **FsBlobStore**: BlobStore
//! - **RetentionCleaner** / **RetentionCleanerFactory**: BlobCleaner とそのファクトリ
//!
//! クラウドストレージ向けの BlobStore は別クレートで実装する想定。

pub mod counters;
pub mod fs_store;
pub mod inmem_store;
pub mod recording_log;
pub mod retention;
pub mod tracing_log;

// 主要な型を再エクスポート
pub use self::counters::{AtomicRunCounter, CLEANUP_RUNS_METRIC, MetricsRunCounter};
pub use self::fs_store::FsBlobStore;
pub use self::inmem_store::InMemoryBlobStore;
pub use self::recording_log::{LogEntry, LogLevel, RecordingActivityLog};
pub use self::retention::{RetentionCleaner, RetentionCleanerFactory};
pub use self::tracing_log::TracingActivityLog;
