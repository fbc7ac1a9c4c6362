//! Journal-backed download service.
//!
//! Records every cancel/erase/create as one JSON line in an append-only
//! journal file. Used by the CLI watch loop, where the real transfer stack is
//! out of scope: the journal is the authoritative record of what the engine
//! decided to do with each download.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use super::{DownloadService, ServiceError};

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JournalEntry<'a> {
    Cancel { id: i64 },
    Erase { limit: u32 },
    Create { id: i64, url: &'a str, destination: &'a str },
}

pub struct JournalDownloadService {
    path: PathBuf,
    next_id: AtomicI64,
}

impl JournalDownloadService {
    /// Journal at `path`; created on first write. Ids for re-issued downloads
    /// count down from -1 so they never collide with ids from the event feed.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            next_id: AtomicI64::new(-1),
        }
    }

    async fn append(&self, entry: &JournalEntry<'_>) -> Result<(), ServiceError> {
        let line = serde_json::to_string(entry)
            .map_err(|e| ServiceError::Rejected(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        Ok(())
    }
}

#[async_trait]
impl DownloadService for JournalDownloadService {
    async fn cancel(&self, id: i64) -> Result<(), ServiceError> {
        self.append(&JournalEntry::Cancel { id }).await
    }

    async fn erase_history(&self, limit: u32) -> Result<(), ServiceError> {
        self.append(&JournalEntry::Erase { limit }).await
    }

    async fn create(&self, url: &str, destination: &str) -> Result<i64, ServiceError> {
        let id = self.next_id.fetch_sub(1, Ordering::Relaxed);
        self.append(&JournalEntry::Create { id, url, destination })
            .await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn journal_records_calls_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");
        let service = JournalDownloadService::new(&path);

        service.cancel(42).await.unwrap();
        service.erase_history(1).await.unwrap();
        let id = service.create("http://x/a.zip", "/dl/a.zip").await.unwrap();
        assert_eq!(id, -1);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], r#"{"event":"cancel","id":42}"#);
        assert_eq!(lines[1], r#"{"event":"erase","limit":1}"#);
        assert_eq!(
            lines[2],
            r#"{"event":"create","id":-1,"url":"http://x/a.zip","destination":"/dl/a.zip"}"#
        );
    }

    #[tokio::test]
    async fn created_ids_are_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let service = JournalDownloadService::new(&dir.path().join("j.jsonl"));
        let a = service.create("http://x/a", "/dl/a").await.unwrap();
        let b = service.create("http://x/b", "/dl/b").await.unwrap();
        assert_ne!(a, b);
    }
}
