//! AgentBuilder - CleanupAgent の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - 登録時に cleaner 定義を検証し、不正なら RegistryError を即座に返す
//! - build() 後は登録できない（registry は run 中に変化しない）

use std::sync::Arc;
use std::time::Duration;

use crate::config::{CleanerConfig, SweeperConfig};
use crate::domain::RegistryError;
use crate::impls::{MetricsRunCounter, TracingActivityLog};
use crate::ports::{ActivityLog, BlobCleaner, CleanerFactory, Clock, RunCounter, SystemClock};

use super::agent::CleanupAgent;
use super::registry::CleanerRegistry;

/// AgentBuilder は CleanupAgent を構築
///
/// # 使用例
/// ```ignore
/// let agent = AgentBuilder::new("blobs-cleanup")
///     .add_cleaner(Some(&CleanerConfig::new("diagnostics-logs")), &factory)?
///     .build();
/// agent.run().await;
/// ```
///
/// 注入しなかったコラボレータは既定値になる:
/// - ActivityLog: TracingActivityLog
/// - RunCounter: MetricsRunCounter（label `agent` = 名前）
/// - Clock: SystemClock
pub struct AgentBuilder {
    name: String,
    registry: CleanerRegistry,
    log_activity: bool,
    execute_timeout: Option<Duration>,
    activity_log: Option<Arc<dyn ActivityLog>>,
    run_counter: Option<Arc<dyn RunCounter>>,
    clock: Option<Arc<dyn Clock>>,
}

impl AgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: CleanerRegistry::new(),
            log_activity: true,
            execute_timeout: None,
            activity_log: None,
            run_counter: None,
            clock: None,
        }
    }

    /// 設定ファイルの agent セクションと全 cleaner から builder を作る
    pub fn from_config(
        config: &SweeperConfig,
        factory: &dyn CleanerFactory,
    ) -> Result<Self, RegistryError> {
        let mut builder = Self::new(config.agent.name.clone())
            .log_activity(config.agent.log_activity)
            .execute_timeout(config.agent.execute_timeout());
        for cleaner in &config.cleaners {
            builder = builder.add_cleaner(Some(cleaner), factory)?;
        }
        Ok(builder)
    }

    pub fn log_activity(mut self, enabled: bool) -> Self {
        self.log_activity = enabled;
        self
    }

    /// None なら上限なし
    pub fn execute_timeout(mut self, limit: Option<Duration>) -> Self {
        self.execute_timeout = limit;
        self
    }

    pub fn activity_log(mut self, log: Arc<dyn ActivityLog>) -> Self {
        self.activity_log = Some(log);
        self
    }

    pub fn run_counter(mut self, counter: Arc<dyn RunCounter>) -> Self {
        self.run_counter = Some(counter);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn register(mut self, cleaner: Arc<dyn BlobCleaner>) -> Result<Self, RegistryError> {
        self.registry.register(cleaner)?;
        Ok(self)
    }

    /// 設定エントリを検証し、factory で cleaner を作って登録する
    ///
    /// `config` が None（設定ノードなし）の場合は MissingArgument
    pub fn add_cleaner(
        self,
        config: Option<&CleanerConfig>,
        factory: &dyn CleanerFactory,
    ) -> Result<Self, RegistryError> {
        let config = config.ok_or(RegistryError::MissingArgument("config"))?;
        let spec = config.to_spec()?;
        self.register(factory.create(&spec))
    }

    pub fn build(self) -> CleanupAgent {
        let log = self
            .activity_log
            .unwrap_or_else(|| Arc::new(TracingActivityLog));
        let counter = self
            .run_counter
            .unwrap_or_else(|| Arc::new(MetricsRunCounter::new(self.name.clone())));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        CleanupAgent::new(
            self.name,
            self.registry,
            self.log_activity,
            self.execute_timeout,
            log,
            counter,
            clock,
        )
    }
}
