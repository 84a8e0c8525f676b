//! FsBlobStore - ローカルディレクトリを BlobStore として扱う
//!
//! - `root/<container>/` がコンテナ
//! - コンテナ配下のファイルが blob（名前は `/` 区切りの相対パス）
//! - 最終更新時刻はファイルの mtime

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use crate::domain::{BlobEntry, StoreError};
use crate::ports::BlobStore;

#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn container_dir(&self, container: &str) -> Result<PathBuf, StoreError> {
        let relative = checked_relative(container)?;
        Ok(self.root.join(relative))
    }
}

/// `..` や絶対パスで root の外に出る名前を拒否する
fn checked_relative(name: &str) -> Result<&Path, StoreError> {
    let path = Path::new(name);
    let escapes = name.is_empty()
        || path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
    if escapes {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(path)
}

fn blob_name(container_dir: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(container_dir).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// コンテナ配下のファイルを再帰的に列挙する（blocking なので spawn_blocking から呼ぶ）
fn walk_container(
    container_dir: &Path,
    container: &str,
    prefix: Option<&str>,
) -> Result<Vec<BlobEntry>, StoreError> {
    if !container_dir.try_exists()? {
        return Err(StoreError::ContainerNotFound(container.to_string()));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(container_dir).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = blob_name(container_dir, entry.path()) else {
            continue;
        };
        if prefix.is_some_and(|p| !name.starts_with(p)) {
            continue;
        }
        let metadata = entry.metadata().map_err(io::Error::from)?;
        entries.push(BlobEntry {
            name,
            last_modified: DateTime::<Utc>::from(metadata.modified()?),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn list(
        &self,
        container: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<BlobEntry>, StoreError> {
        let container_dir = self.container_dir(container)?;
        let container = container.to_string();
        let prefix = prefix.map(str::to_string);

        tokio::task::spawn_blocking(move || {
            walk_container(&container_dir, &container, prefix.as_deref())
        })
        .await
        .map_err(io::Error::other)?
    }

    async fn delete(&self, container: &str, blob: &str) -> Result<(), StoreError> {
        let path = self.container_dir(container)?.join(checked_relative(blob)?);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::BlobNotFound {
                container: container.to_string(),
                blob: blob.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_files(files: &[&str]) -> (TempDir, FsBlobStore) {
        let temp_dir = TempDir::new().unwrap();
        for file in files {
            let path = temp_dir.path().join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, b"x").unwrap();
        }
        let store = FsBlobStore::new(temp_dir.path());
        (temp_dir, store)
    }

    #[tokio::test]
    async fn lists_nested_files_with_slash_names() {
        let (_dir, store) = store_with_files(&["logs/b.log", "logs/2024/a.log", "other/c.log"]);

        let entries = store.list("logs", None).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["2024/a.log", "b.log"]);

        let filtered = store.list("logs", Some("2024/")).await.unwrap();
        assert_eq!(filtered.len(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinked_directories_are_not_followed() {
        let (dir, store) = store_with_files(&["logs/a.log", "outside/secret.log"]);
        std::os::unix::fs::symlink(dir.path().join("outside"), dir.path().join("logs/link"))
            .unwrap();

        let entries = store.list("logs", None).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.log"]);
    }

    #[tokio::test]
    async fn empty_container_lists_nothing() {
        let (dir, store) = store_with_files(&[]);
        std::fs::create_dir_all(dir.path().join("logs")).unwrap();

        assert!(store.list("logs", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_container_is_reported() {
        let (_dir, store) = store_with_files(&[]);
        let err = store.list("logs", None).await.unwrap_err();
        assert!(matches!(err, StoreError::ContainerNotFound(_)));
    }

    #[tokio::test]
    async fn rejects_names_outside_root() {
        let (_dir, store) = store_with_files(&["logs/a.log"]);
        let err = store.list("../etc", None).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidName(_)));

        let err = store.delete("logs", "../../a.log").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidName(_)));
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let (dir, store) = store_with_files(&["logs/a.log"]);
        store.delete("logs", "a.log").await.unwrap();
        assert!(!dir.path().join("logs/a.log").exists());

        let err = store.delete("logs", "a.log").await.unwrap_err();
        assert!(matches!(err, StoreError::BlobNotFound { .. }));
    }
}
