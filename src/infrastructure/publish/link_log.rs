//! JSON file link log.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::atomic::write_atomic;
use crate::domain::entities::LinkRecord;
use crate::domain::errors::LinkLogError;
use crate::domain::ports::LinkLogPort;

/// Link log stored as a pretty-printed JSON array.
///
/// A missing, unreadable, invalid or non-array file is treated as an empty
/// log and replaced on the next append. Existing array entries are kept
/// untouched whatever their shape.
pub struct JsonLinkLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLinkLog {
    /// Creates log backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every entry as raw JSON, tolerating a missing or corrupt file.
    ///
    /// Entries are kept as written, including ones that do not match the
    /// current record shape.
    pub async fn load_entries(&self) -> Vec<Value> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read link log, starting fresh"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!(path = %self.path.display(), "Link log is not an array, starting fresh");
                Vec::new()
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Link log is not valid JSON, starting fresh"
                );
                Vec::new()
            }
        }
    }

    /// Reads the entries that parse as link records.
    pub async fn load(&self) -> Vec<LinkRecord> {
        self.load_entries()
            .await
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()
    }
}

#[async_trait]
impl LinkLogPort for JsonLinkLog {
    async fn append(&self, record: &LinkRecord) -> Result<usize, LinkLogError> {
        let _guard = self.lock.lock().await;

        let mut entries = self.load_entries().await;
        entries.push(serde_json::to_value(record)?);
        let mut content = serde_json::to_string_pretty(&entries)?;
        content.push('\n');

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, content.as_bytes()))
            .await
            .map_err(std::io::Error::other)??;

        debug!(path = %self.path.display(), total = entries.len(), "Appended link record");
        Ok(entries.len())
    }
}
