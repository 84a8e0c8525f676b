//! blobsweep-core
//!
//! Core building blocks for the blob cleanup agent.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（CleanerSpec, RunId, AgentStatus, errors）
//! - **ports**: 抽象化レイヤー（BlobCleaner, ActivityLog, RunCounter, BlobStore, Clock）
//! - **app**: アプリケーションロジック（CleanerRegistry, CleanupAgent, AgentBuilder）
//! - **impls**: ports の実装（tracing / metrics / in-memory / filesystem）
//! - **config**: 設定ファイルの読み込みと検証
//! - **observability**: tracing subscriber の初期化

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
