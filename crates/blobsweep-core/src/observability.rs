//! tracing subscriber の初期化
//!
//! コンソール出力に加えて、`to_file` のときは日次ローテーションのファイルにも書く。

use std::ffi::OsStr;
use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

// non-blocking writer はこの guard が生きている間だけ flush される
static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub fn init_tracing(cfg: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_new(&cfg.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_ansi(true)
        .with_writer(std::io::stdout);

    if !cfg.to_file {
        return tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .try_init();
    }

    let file_path = Path::new(&cfg.file_path);
    let dir = file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("./logs"));
    let name = file_path
        .file_name()
        .unwrap_or_else(|| OsStr::new("blobsweep.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(rolling::daily(dir, name));
    GUARD.set(guard).ok();

    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
}
