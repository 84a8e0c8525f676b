//! Status - 直近の run の結果と累計

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RunId;

/// RunSummary は 1 回の run の結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// 実行した cleaner の数
    pub cleaners: usize,
    /// 失敗した cleaner のコンテナ名（実行順）
    pub failed: Vec<String>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.cleaners.saturating_sub(self.failed.len())
    }
}

/// AgentStatus は CleanupAgent の観測用スナップショット
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentStatus {
    pub agent: String,
    pub runs_completed: u64,
    pub last_run: Option<RunSummary>,
}
