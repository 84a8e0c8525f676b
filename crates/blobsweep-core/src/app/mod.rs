//! App - アプリケーション層
//!
//! ports を組み合わせて cleanup agent を組み立てる。
//!
//! # 主要コンポーネント
//! - **CleanerRegistry**: 登録順を保つ cleaner の列
//! - **CleanupAgent**: cleaner を順番に実行し、失敗を隔離する
//! - **AgentBuilder**: 構築とワイヤリング

pub mod agent;
pub mod builder;
pub mod registry;

// 主要な型を再エクスポート
pub use self::agent::CleanupAgent;
pub use self::builder::AgentBuilder;
pub use self::registry::CleanerRegistry;
