mod cli;

use std::sync::Arc;

use anyhow::Result;
use blobsweep_core::app::{AgentBuilder, CleanupAgent};
use blobsweep_core::config::SweeperConfig;
use blobsweep_core::impls::{FsBlobStore, RetentionCleanerFactory};
use blobsweep_core::observability::init_tracing;
use blobsweep_core::ports::SystemClock;
use clap::Parser;
use cli::{Cli, Commands};
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let cfg = SweeperConfig::load(&args.config)?;

    init_tracing(&cfg.logging)?;
    info!(
        config = %args.config.display(),
        cleaners = cfg.cleaners.len(),
        "configuration loaded"
    );

    // (A) BlobStore と factory を用意し、設定から agent を組み立てる
    let store = Arc::new(FsBlobStore::new(&cfg.storage.root));
    let factory = RetentionCleanerFactory::new(store, Arc::new(SystemClock));
    let agent = AgentBuilder::from_config(&cfg, &factory)?.build();

    match args.command.unwrap_or(Commands::Serve) {
        Commands::RunOnce { json } => run_once(&agent, json).await?,
        Commands::Serve => serve(&agent, &cfg).await,
        Commands::List => {
            for (i, name) in agent.registry().names().iter().enumerate() {
                println!("{:>3}  {name}", i + 1);
            }
        }
    }

    Ok(())
}

async fn run_once(agent: &CleanupAgent, json: bool) -> Result<()> {
    agent.run().await;
    let status = agent.status().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    if let Some(last) = &status.last_run {
        println!(
            "{}: {} cleaners, {} succeeded, {} failed",
            last.run_id,
            last.cleaners,
            last.succeeded(),
            last.failed.len()
        );
        for name in &last.failed {
            println!("  failed: {name}");
        }
    }
    Ok(())
}

/// interval ごとに run する。shutdown が来たら次の tick を待たずに抜ける
async fn serve(agent: &CleanupAgent, cfg: &SweeperConfig) {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    spawn_signal_handlers(shutdown_tx);

    let mut ticker = interval(cfg.agent.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        agent = agent.name(),
        interval_secs = cfg.agent.interval_secs,
        "cleanup agent scheduled"
    );

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => break,
            _ = ticker.tick() => agent.run().await,
        }
    }

    info!("cleanup agent stopped");
}

fn spawn_signal_handlers(shutdown_tx: watch::Sender<bool>) {
    let shutdown_tx = Arc::new(shutdown_tx);

    let tx = Arc::clone(&shutdown_tx);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {e}");
            return;
        }
        info!("received Ctrl+C");
        // ignore send error: receiver may already be dropped
        let _ = tx.send(true);
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let tx = Arc::clone(&shutdown_tx);
        tokio::spawn(async move {
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                info!("received SIGTERM");
                let _ = tx.send(true);
            }
        });
    }
}
