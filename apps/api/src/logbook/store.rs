//! Log Store — the persistence seam behind the audit log.
//!
//! `AppState` holds an `Arc<dyn LogStore>`. `FileLogStore` backs production;
//! `MemoryLogStore` backs tests and ephemeral runs (`LOG_BACKEND=memory`).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Banner written once when the store is created.
pub const LOG_HEADER: &str = "==== Resume Skill Analyzer Logs (Web Version) ====\n\n";

#[derive(Debug, Error)]
pub enum LogStoreError {
    #[error("Log store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Append-only text store. Implementations must write each block atomically
/// with respect to other appends on the same store.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Creates the store with `LOG_HEADER` if it does not exist yet.
    async fn ensure_initialized(&self) -> Result<(), LogStoreError>;

    /// Appends `block` verbatim.
    async fn append(&self, block: &str) -> Result<(), LogStoreError>;

    /// Full content, or `None` if the store has never been created.
    async fn read_all(&self) -> Result<Option<String>, LogStoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// FileLogStore
// ────────────────────────────────────────────────────────────────────────────

/// A single UTF-8 text file opened in append mode for every write.
pub struct FileLogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LogStore for FileLogStore {
    async fn ensure_initialized(&self) -> Result<(), LogStoreError> {
        // Held until the banner is flushed so no append can land ahead of it.
        // create_new covers initializers outside this process.
        let _guard = self.write_lock.lock().await;

        let created = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await;

        match created {
            Ok(mut file) => {
                file.write_all(LOG_HEADER.as_bytes()).await?;
                file.flush().await?;
                info!("Created log store at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn append(&self, block: &str) -> Result<(), LogStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;
        file.write_all(block.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended {} bytes to {}", block.len(), self.path.display());
        Ok(())
    }

    async fn read_all(&self) -> Result<Option<String>, LogStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryLogStore
// ────────────────────────────────────────────────────────────────────────────

/// In-process store. Content is lost when the process exits.
#[derive(Default)]
pub struct MemoryLogStore {
    content: Mutex<Option<String>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn ensure_initialized(&self) -> Result<(), LogStoreError> {
        let mut content = self.content.lock().await;
        if content.is_none() {
            *content = Some(LOG_HEADER.to_string());
        }
        Ok(())
    }

    async fn append(&self, block: &str) -> Result<(), LogStoreError> {
        self.content
            .lock()
            .await
            .get_or_insert_with(String::new)
            .push_str(block);
        Ok(())
    }

    async fn read_all(&self) -> Result<Option<String>, LogStoreError> {
        Ok(self.content.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_file_store_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLogStore::new(dir.path().join("logs.txt"));

        store.ensure_initialized().await.unwrap();
        store.ensure_initialized().await.unwrap();

        let content = store.read_all().await.unwrap().unwrap();
        assert_eq!(content, LOG_HEADER);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLogStore::new(dir.path().join("absent.txt"));
        assert!(store.read_all().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_never_truncates_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.txt");
        std::fs::write(&path, "existing\n").unwrap();

        let store = FileLogStore::new(&path);
        store.ensure_initialized().await.unwrap();
        store.append("next\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing\nnext\n");
    }

    #[tokio::test]
    async fn test_file_store_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLogStore::new(dir.path().join("no_such_dir").join("logs.txt"));
        assert!(store.ensure_initialized().await.is_err());
        assert!(store.append("block\n").await.is_err());
    }

    #[tokio::test]
    async fn test_file_store_concurrent_appends_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileLogStore::new(dir.path().join("logs.txt")));
        store.ensure_initialized().await.unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let block = format!("{}\n", i.to_string().repeat(512));
                store.append(&block).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let content = store.read_all().await.unwrap().unwrap();
        let body = content.strip_prefix(LOG_HEADER).unwrap();
        let mut lines: Vec<String> = body.lines().map(str::to_string).collect();
        let mut expected: Vec<String> = (0..16).map(|i: i32| i.to_string().repeat(512)).collect();
        lines.sort();
        expected.sort();
        assert_eq!(lines, expected);
    }

    #[tokio::test]
    async fn test_file_store_concurrent_init_keeps_header_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileLogStore::new(dir.path().join("logs.txt")));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.ensure_initialized().await.unwrap();
                store.append(&format!("record {i}\n")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let content = store.read_all().await.unwrap().unwrap();
        assert!(content.starts_with(LOG_HEADER), "header not first: {content:?}");
        assert_eq!(content.matches(LOG_HEADER).count(), 1);
        assert_eq!(content[LOG_HEADER.len()..].lines().count(), 8);
    }

    #[tokio::test]
    async fn test_memory_store_header_then_appends() {
        let store = MemoryLogStore::new();
        assert!(store.read_all().await.unwrap().is_none());

        store.ensure_initialized().await.unwrap();
        store.append("a\n").await.unwrap();
        store.ensure_initialized().await.unwrap();
        store.append("b\n").await.unwrap();

        let content = store.read_all().await.unwrap().unwrap();
        assert_eq!(content, format!("{LOG_HEADER}a\nb\n"));
    }
}
