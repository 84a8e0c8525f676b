use std::sync::Arc;

use blobsweep_core::app::AgentBuilder;
use blobsweep_core::config::SweeperConfig;
use blobsweep_core::impls::{
    AtomicRunCounter, FsBlobStore, InMemoryBlobStore, RecordingActivityLog,
    RetentionCleanerFactory,
};
use blobsweep_core::ports::FixedClock;
use chrono::{DateTime, Duration, TimeZone, Utc};
use config::FileFormat;
use tempfile::TempDir;

const CONFIG: &str = r#"
[agent]
name = "Scheduling.BlobsCleanupAgent"

[[cleaners]]
container = "diagnostics"
max_age_secs = 86400

[[cleaners]]
container = "missing-container"

[[cleaners]]
container = "media"
prefix = "thumbs/"
max_age_secs = 3600
"#;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn config_driven_run_isolates_the_broken_container() {
    let store = Arc::new(InMemoryBlobStore::new());
    store.put("diagnostics", "old.log", now() - Duration::days(3)).await;
    store.put("diagnostics", "fresh.log", now() - Duration::hours(2)).await;
    store.put("media", "thumbs/a.png", now() - Duration::hours(5)).await;
    store.put("media", "full/a.png", now() - Duration::hours(5)).await;

    let clock = Arc::new(FixedClock::new(now()));
    let factory = RetentionCleanerFactory::new(store.clone(), clock.clone());
    let log = Arc::new(RecordingActivityLog::new());
    let counter = Arc::new(AtomicRunCounter::new());

    let cfg = SweeperConfig::from_str_with_format(CONFIG, FileFormat::Toml).unwrap();
    let agent = AgentBuilder::from_config(&cfg, &factory)
        .unwrap()
        .activity_log(log.clone())
        .run_counter(counter.clone())
        .clock(clock)
        .build();

    agent.run().await;

    assert_eq!(
        store.blob_names("diagnostics").await,
        Some(vec!["fresh.log".to_string()])
    );
    // 3 番目の cleaner は 2 番目の失敗後も実行されている
    assert_eq!(
        store.blob_names("media").await,
        Some(vec!["full/a.png".to_string()])
    );

    let errors = log.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("missing-container"));
    assert!(errors[0].error.as_deref().unwrap().contains("container not found"));

    let infos = log.infos();
    assert_eq!(infos.len(), 2);
    assert!(infos[0].message.contains("'3'"));
    assert_eq!(counter.get(), 1);

    let status = agent.status().await;
    let last = status.last_run.unwrap();
    assert_eq!(last.cleaners, 3);
    assert_eq!(last.failed, vec!["missing-container"]);
    assert_eq!(last.succeeded(), 2);
    assert_eq!(last.started_at, now());
}

#[tokio::test]
async fn filesystem_store_is_swept_end_to_end() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("logs/nested")).unwrap();
    std::fs::write(root.path().join("logs/a.log"), b"a").unwrap();
    std::fs::write(root.path().join("logs/nested/b.log"), b"b").unwrap();

    // 2 日後の時計から見ると、今作ったファイルはすべて 1 日より古い
    let clock = Arc::new(FixedClock::new(Utc::now() + Duration::days(2)));
    let factory = RetentionCleanerFactory::new(Arc::new(FsBlobStore::new(root.path())), clock);
    let log = Arc::new(RecordingActivityLog::new());

    let doc = "[[cleaners]]\ncontainer = \"logs\"\nmax_age_secs = 86400\n";
    let cfg = SweeperConfig::from_str_with_format(doc, FileFormat::Toml).unwrap();
    let agent = AgentBuilder::from_config(&cfg, &factory)
        .unwrap()
        .activity_log(log.clone())
        .run_counter(Arc::new(AtomicRunCounter::new()))
        .build();

    agent.run().await;

    assert!(log.errors().is_empty());
    assert!(!root.path().join("logs/a.log").exists());
    assert!(!root.path().join("logs/nested/b.log").exists());
}

#[tokio::test]
async fn status_serializes_to_json() {
    let agent = AgentBuilder::new("json-agent")
        .activity_log(Arc::new(RecordingActivityLog::new()))
        .run_counter(Arc::new(AtomicRunCounter::new()))
        .build();

    agent.run().await;
    let status = agent.status().await;

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["agent"], "json-agent");
    assert_eq!(json["runs_completed"], 1);
    assert_eq!(json["last_run"]["cleaners"], 0);
    assert!(json["last_run"]["run_id"].is_string());
}
