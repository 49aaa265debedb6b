//! Disk-backed cache storage that persists generations across runs.
//!
//! Layout: one directory per generation (hex-encoded version key), and one
//! `<sha256>.entry` file per request. An entry file holds a single line of
//! JSON metadata followed by the raw body, so status, headers and body are
//! always replaced together.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, trace, warn};

use crate::domain::entities::{CacheRequest, CacheVersion, CachedResponse, ResponseKind};
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::CacheStoragePort;

const ENTRY_EXT: &str = "entry";

#[derive(Debug, Serialize, Deserialize)]
struct EntryMeta {
    key: String,
    status: u16,
    kind: ResponseKind,
    headers: Vec<(String, String)>,
}

/// Cache storage persisted under a root directory.
pub struct DiskCacheStorage {
    root: PathBuf,
}

impl DiskCacheStorage {
    /// Creates a storage rooted at the directory, creating it if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn new(root: impl Into<PathBuf>) -> CacheResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            CacheError::storage(format!("failed to create {}: {e}", root.display()))
        })?;
        Ok(Self { root })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn generation_dir(&self, version: &CacheVersion) -> PathBuf {
        self.root.join(hex::encode(version.as_str()))
    }

    fn entry_path(dir: &Path, request: &CacheRequest) -> PathBuf {
        dir.join(hex::encode(Sha256::digest(request.cache_key().as_bytes())))
            .with_extension(ENTRY_EXT)
    }

    fn encode_entry(request: &CacheRequest, response: &CachedResponse) -> CacheResult<Vec<u8>> {
        let meta = EntryMeta {
            key: request.cache_key(),
            status: response.status(),
            kind: response.kind(),
            headers: response.headers().to_vec(),
        };
        // Compact JSON escapes newlines, so the first one ends the header.
        let mut raw =
            serde_json::to_vec(&meta).map_err(|e| CacheError::storage(e.to_string()))?;
        raw.push(b'\n');
        raw.extend_from_slice(response.body());
        Ok(raw)
    }

    fn decode_entry(path: &Path, raw: &[u8]) -> CacheResult<(String, CachedResponse)> {
        let corrupt = |message: String| CacheError::CorruptEntry {
            key: path.display().to_string(),
            message,
        };
        let split = raw
            .iter()
            .position(|byte| *byte == b'\n')
            .ok_or_else(|| corrupt("missing metadata terminator".to_string()))?;
        let meta: EntryMeta =
            serde_json::from_slice(&raw[..split]).map_err(|e| corrupt(e.to_string()))?;
        let body = Bytes::copy_from_slice(&raw[split + 1..]);
        let response = CachedResponse::from_parts(meta.status, meta.kind, meta.headers, body);
        Ok((meta.key, response))
    }

    async fn read_entry(path: &Path) -> CacheResult<Option<(String, CachedResponse)>> {
        match fs::read(path).await {
            Ok(raw) => Self::decode_entry(path, &raw).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes through a uniquely named temp file in the same directory.
    async fn write_atomic(path: PathBuf, contents: Vec<u8>) -> CacheResult<()> {
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let dir = path
                .parent()
                .ok_or_else(|| std::io::Error::other("entry path has no parent"))?;
            let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
            temp_file.write_all(&contents)?;
            temp_file.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| CacheError::storage(format!("write task failed: {e}")))??;
        Ok(())
    }
}

#[async_trait]
impl CacheStoragePort for DiskCacheStorage {
    async fn open(&self, version: &CacheVersion) -> CacheResult<()> {
        let dir = self.generation_dir(version);
        if !fs::try_exists(&dir).await? {
            debug!(version = %version, path = %dir.display(), "Creating cache generation");
        }
        fs::create_dir_all(&dir).await?;
        Ok(())
    }

    async fn versions(&self) -> CacheResult<Vec<CacheVersion>> {
        let mut versions = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let decoded = hex::decode(name.to_string_lossy().as_bytes())
                .ok()
                .and_then(|raw| String::from_utf8(raw).ok())
                .and_then(CacheVersion::new);
            match decoded {
                Some(version) => versions.push(version),
                None => warn!(path = %entry.path().display(), "Ignoring unknown cache directory"),
            }
        }

        versions.sort();
        Ok(versions)
    }

    async fn delete(&self, version: &CacheVersion) -> CacheResult<bool> {
        let dir = self.generation_dir(version);
        match fs::remove_dir_all(&dir).await {
            Ok(()) => {
                debug!(version = %version, "Deleted cache generation from disk");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn lookup(
        &self,
        version: &CacheVersion,
        request: &CacheRequest,
    ) -> CacheResult<Option<CachedResponse>> {
        let path = Self::entry_path(&self.generation_dir(version), request);

        let found = Self::read_entry(&path).await?;
        trace!(request = %request, hit = found.is_some(), "Disk cache lookup");
        Ok(found.map(|(_, response)| response))
    }

    async fn put(
        &self,
        version: &CacheVersion,
        request: &CacheRequest,
        response: &CachedResponse,
    ) -> CacheResult<()> {
        let dir = self.generation_dir(version);
        fs::create_dir_all(&dir).await?;

        let raw = Self::encode_entry(request, response)?;
        Self::write_atomic(Self::entry_path(&dir, request), raw).await?;

        debug!(request = %request, size = response.body().len(), "Stored response on disk");
        Ok(())
    }

    async fn entries(&self, version: &CacheVersion) -> CacheResult<Vec<(String, CachedResponse)>> {
        let dir = self.generation_dir(version);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == ENTRY_EXT)
                && let Some(item) = Self::read_entry(&path).await?
            {
                found.push(item);
            }
        }

        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }
}
