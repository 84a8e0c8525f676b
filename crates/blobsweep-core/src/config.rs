//! Config - 設定ファイルと環境変数の読み込み
//!
//! ファイル（拡張子で TOML / YAML / JSON を判定）に
//! `BLOBSWEEP` プレフィックスの環境変数を重ねる。
//! プレフィックスの後ろもネストも `__` 区切り（例: `BLOBSWEEP__AGENT__LOG_ACTIVITY=false`）。
//! `BLOBSWEEP_AGENT__...` のように区切りが `_` 1 つだと無視される。

use std::path::{Path, PathBuf};
use std::time::Duration;

use config as config_loader;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{CleanerSpec, RegistryError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to load config: {0}")]
    Load(#[from] config_loader::ConfigError),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error(transparent)]
    InvalidCleaner(#[from] RegistryError),
}

/// Global config structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SweeperConfig {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cleaners: Vec<CleanerConfig>,
}

/// CleanupAgent の設定
#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    #[serde(default = "AgentConfig::default_name")]
    pub name: String,
    /// false にすると開始/終了の info ログを出さない（error ログは常に出る）
    #[serde(default = "AgentConfig::default_log_activity")]
    pub log_activity: bool,
    #[serde(default = "AgentConfig::default_interval_secs")]
    pub interval_secs: u64,
    /// 未設定なら cleaner ごとの実行時間に上限を設けない
    #[serde(default)]
    pub execute_timeout_secs: Option<u64>,
}

impl AgentConfig {
    fn default_name() -> String {
        "blobs-cleanup".to_string()
    }
    fn default_log_activity() -> bool {
        true
    }
    fn default_interval_secs() -> u64 {
        3600
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn execute_timeout(&self) -> Option<Duration> {
        self.execute_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            log_activity: Self::default_log_activity(),
            interval_secs: Self::default_interval_secs(),
            execute_timeout_secs: None,
        }
    }
}

/// Logging config
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
    #[serde(default)]
    pub to_file: bool,
    #[serde(default = "LoggingConfig::default_file_path")]
    pub file_path: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
    fn default_file_path() -> String {
        "./logs/blobsweep.log".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            to_file: false,
            file_path: Self::default_file_path(),
        }
    }
}

/// FsBlobStore のルート
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_root")]
    pub root: String,
}

impl StorageConfig {
    fn default_root() -> String {
        "./data".to_string()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
        }
    }
}

/// `[[cleaners]]` エントリ（未検証）
#[derive(Debug, Deserialize, Clone)]
pub struct CleanerConfig {
    #[serde(default)]
    pub container: String,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default = "CleanerConfig::default_max_age_secs")]
    pub max_age_secs: u64,
}

impl CleanerConfig {
    fn default_max_age_secs() -> u64 {
        7 * 24 * 60 * 60
    }

    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            prefix: None,
            max_age_secs: Self::default_max_age_secs(),
        }
    }

    /// 検証して CleanerSpec に変換する
    pub fn to_spec(&self) -> Result<CleanerSpec, RegistryError> {
        let spec = CleanerSpec::new(
            self.container.clone(),
            Duration::from_secs(self.max_age_secs),
        )?;
        Ok(match &self.prefix {
            Some(prefix) => spec.with_prefix(prefix.clone()),
            None => spec,
        })
    }
}

impl SweeperConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load the .env file
        Self::load_with_env(path, None)
    }

    /// `env` が Some ならプロセスの環境変数の代わりにその map を重ねる
    fn load_with_env<P: AsRef<Path>>(
        path: P,
        env: Option<config_loader::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let cfg = config_loader::Config::builder()
            .add_source(config_loader::File::from(path.to_path_buf()))
            .add_source(
                config_loader::Environment::with_prefix("BLOBSWEEP")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize::<SweeperConfig>()?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// 文字列から読み込む（環境変数は重ねない）
    pub fn from_str_with_format(
        contents: &str,
        format: config_loader::FileFormat,
    ) -> Result<Self, ConfigError> {
        let cfg = config_loader::Config::builder()
            .add_source(config_loader::File::from_str(contents, format))
            .build()?
            .try_deserialize::<SweeperConfig>()?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// 起動前に全 cleaner と agent の値を検証する（Fail-fast）
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "agent.name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.agent.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "agent.interval_secs",
                reason: "must be positive".to_string(),
            });
        }
        if self.agent.execute_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "agent.execute_timeout_secs",
                reason: "must be positive when set".to_string(),
            });
        }
        for cleaner in &self.cleaners {
            cleaner.to_spec()?;
        }
        Ok(())
    }
}
