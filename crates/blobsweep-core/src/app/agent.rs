//! CleanupAgent - 登録された cleaner を順番に実行する
//!
//! # フロー（1 回の run）
//! 1. 開始ログ（cleaner 数付き、`log_activity` が true のときだけ）
//! 2. 登録順に `execute()`。失敗はコンテナ名付きで error ログに残して次へ
//! 3. 終了ログ（`log_activity` が true のときだけ）
//! 4. RunCounter を 1 だけ進める
//!
//! run 自体は失敗しない。個々の cleaner の失敗は呼び出し元に返さない。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{Instrument, info_span};

use crate::domain::{AgentStatus, CleanerError, RunId, RunSummary};
use crate::ports::{ActivityLog, BlobCleaner, Clock, RunCounter};

use super::registry::CleanerRegistry;

pub struct CleanupAgent {
    name: String,
    registry: CleanerRegistry,
    log_activity: bool,
    execute_timeout: Option<Duration>,
    log: Arc<dyn ActivityLog>,
    counter: Arc<dyn RunCounter>,
    clock: Arc<dyn Clock>,
    // run 全体を直列化する（スケジューラが重ねて呼んでも同時に走らない）
    run_lock: Mutex<()>,
    status: RwLock<AgentStatus>,
}

impl CleanupAgent {
    pub(crate) fn new(
        name: String,
        registry: CleanerRegistry,
        log_activity: bool,
        execute_timeout: Option<Duration>,
        log: Arc<dyn ActivityLog>,
        counter: Arc<dyn RunCounter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let status = AgentStatus {
            agent: name.clone(),
            ..AgentStatus::default()
        };
        Self {
            name,
            registry,
            log_activity,
            execute_timeout,
            log,
            counter,
            clock,
            run_lock: Mutex::new(()),
            status: RwLock::new(status),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &CleanerRegistry {
        &self.registry
    }

    pub fn log_activity(&self) -> bool {
        self.log_activity
    }

    pub fn execute_timeout(&self) -> Option<Duration> {
        self.execute_timeout
    }

    pub async fn status(&self) -> AgentStatus {
        self.status.read().await.clone()
    }

    /// Run every registered cleaner once, in registration order.
    pub async fn run(&self) {
        let _guard = self.run_lock.lock().await;

        let run_id = RunId::new();
        let span = info_span!("cleanup_run", agent = %self.name, %run_id);
        self.run_cleaners(run_id).instrument(span).await;
    }

    async fn run_cleaners(&self, run_id: RunId) {
        let started_at = self.clock.now();
        self.log_info(&format!(
            "{}: Started. The cleaner count is '{}'.",
            self.name,
            self.registry.len()
        ));

        let mut failed = Vec::new();
        for cleaner in self.registry.all() {
            if let Err(err) = self.execute_isolated(cleaner).await {
                let message = format!(
                    "{}: Error occurred while cleaning the '{}' blob container.",
                    self.name,
                    cleaner.container_name()
                );
                self.log.error(&self.name, cleaner.container_name(), &message, &err);
                failed.push(cleaner.container_name().to_string());
            }
        }

        self.log_info(&format!("{}: Done.", self.name));
        self.counter.increment();

        let summary = RunSummary {
            run_id,
            started_at,
            finished_at: self.clock.now(),
            cleaners: self.registry.len(),
            failed,
        };
        let mut status = self.status.write().await;
        status.runs_completed += 1;
        status.last_run = Some(summary);
    }

    /// cleaner を別タスクで実行し、panic と（設定されていれば）時間超過もエラーとして扱う
    async fn execute_isolated(&self, cleaner: &Arc<dyn BlobCleaner>) -> Result<(), CleanerError> {
        let mut handle = tokio::spawn({
            let cleaner = Arc::clone(cleaner);
            async move { cleaner.execute().await }.in_current_span()
        });

        let joined = match self.execute_timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    handle.abort();
                    return Err(CleanerError::TimedOut(limit));
                }
            },
            None => handle.await,
        };

        joined.map_err(|e| CleanerError::Aborted(e.to_string()))?
    }

    fn log_info(&self, message: &str) {
        if !self.log_activity {
            return;
        }
        self.log.info(&self.name, message);
    }
}
