//! Ports - 抽象化レイヤー
//!
//! CleanupAgent が依存する外部コラボレータを trait として定義する。
//! ログ・メトリクス・ストレージ・時刻はすべて構築時に注入され、
//! プロセス全体のシングルトンには依存しない。

pub mod activity_log;
pub mod blob_cleaner;
pub mod blob_store;
pub mod clock;
pub mod run_counter;

// 主要な trait を再エクスポート
pub use self::activity_log::ActivityLog;
pub use self::blob_cleaner::{BlobCleaner, CleanerFactory};
pub use self::blob_store::BlobStore;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::run_counter::RunCounter;
