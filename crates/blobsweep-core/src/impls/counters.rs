//! RunCounter の実装
//!
//! - **MetricsRunCounter**: `metrics` facade へ counter を送る（本番用）
//! - **AtomicRunCounter**: プロセス内の AtomicU64（テスト・ステータス用）

use std::sync::atomic::{AtomicU64, Ordering};

use crate::ports::RunCounter;

/// 完了した cleanup run の counter 名
pub const CLEANUP_RUNS_METRIC: &str = "blobsweep_cleanup_task_runs_total";

pub struct MetricsRunCounter {
    agent: String,
}

impl MetricsRunCounter {
    pub fn new(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
        }
    }
}

impl RunCounter for MetricsRunCounter {
    fn increment(&self) {
        let agent = self.agent.clone();
        metrics::counter!(CLEANUP_RUNS_METRIC, 1, "agent" => agent);
    }
}

#[derive(Debug, Default)]
pub struct AtomicRunCounter {
    count: AtomicU64,
}

impl AtomicRunCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}

impl RunCounter for AtomicRunCounter {
    fn increment(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
