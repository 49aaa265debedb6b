//! In-memory cache storage implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::{CacheRequest, CacheVersion, CachedResponse};
use crate::domain::errors::CacheResult;
use crate::domain::ports::CacheStoragePort;

type Generation = BTreeMap<String, CachedResponse>;

/// Cache storage held entirely in memory.
/// Thread-safe; used in tests and for ephemeral runs.
#[derive(Default)]
pub struct MemoryCacheStorage {
    generations: RwLock<HashMap<CacheVersion, Generation>>,
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
}

impl MemoryCacheStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns storage statistics.
    #[must_use]
    pub fn stats(&self) -> StorageStats {
        StorageStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }

    /// Returns the number of entries in a generation, or None if it does not exist.
    pub async fn len(&self, version: &CacheVersion) -> Option<usize> {
        self.generations.read().await.get(version).map(BTreeMap::len)
    }
}

/// Counters describing storage usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries written.
    pub writes: u64,
}

impl std::fmt::Display for StorageStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache storage: {} hits, {} misses, {} writes",
            self.hits, self.misses, self.writes
        )
    }
}

#[async_trait]
impl CacheStoragePort for MemoryCacheStorage {
    async fn open(&self, version: &CacheVersion) -> CacheResult<()> {
        let mut generations = self.generations.write().await;
        generations.entry(version.clone()).or_insert_with(|| {
            debug!(version = %version, "Created cache generation");
            Generation::new()
        });
        Ok(())
    }

    async fn versions(&self) -> CacheResult<Vec<CacheVersion>> {
        let mut versions: Vec<CacheVersion> =
            self.generations.read().await.keys().cloned().collect();
        versions.sort();
        Ok(versions)
    }

    async fn delete(&self, version: &CacheVersion) -> CacheResult<bool> {
        let removed = self.generations.write().await.remove(version).is_some();
        if removed {
            debug!(version = %version, "Deleted cache generation");
        }
        Ok(removed)
    }

    async fn lookup(
        &self,
        version: &CacheVersion,
        request: &CacheRequest,
    ) -> CacheResult<Option<CachedResponse>> {
        let generations = self.generations.read().await;
        let found = generations
            .get(version)
            .and_then(|generation| generation.get(&request.cache_key()))
            .cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(request = %request, "Memory cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(request = %request, "Memory cache miss");
        }
        Ok(found)
    }

    async fn put(
        &self,
        version: &CacheVersion,
        request: &CacheRequest,
        response: &CachedResponse,
    ) -> CacheResult<()> {
        let mut generations = self.generations.write().await;
        generations
            .entry(version.clone())
            .or_default()
            .insert(request.cache_key(), response.clone());
        self.writes.fetch_add(1, Ordering::Relaxed);
        trace!(request = %request, "Stored response in memory cache");
        Ok(())
    }

    async fn put_all(
        &self,
        version: &CacheVersion,
        entries: &[(CacheRequest, CachedResponse)],
    ) -> CacheResult<()> {
        let mut generations = self.generations.write().await;
        let generation = generations.entry(version.clone()).or_default();
        for (request, response) in entries {
            generation.insert(request.cache_key(), response.clone());
        }
        self.writes
            .fetch_add(entries.len() as u64, Ordering::Relaxed);
        debug!(version = %version, count = entries.len(), "Stored batch in memory cache");
        Ok(())
    }

    async fn entries(&self, version: &CacheVersion) -> CacheResult<Vec<(String, CachedResponse)>> {
        let generations = self.generations.read().await;
        Ok(generations
            .get(version)
            .map(|generation| {
                generation
                    .iter()
                    .map(|(key, response)| (key.clone(), response.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(name: &str) -> CacheVersion {
        CacheVersion::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_put_and_lookup() {
        let storage = MemoryCacheStorage::new();
        let v1 = version("v1");
        let request = CacheRequest::get("./index.html");

        storage
            .put(&v1, &request, &CachedResponse::new(200, "hello"))
            .await
            .unwrap();
        let found = storage.lookup(&v1, &request).await.unwrap();

        assert_eq!(found.unwrap().body().as_ref(), b"hello");
    }

    #[tokio::test]
    async fn test_generations_are_isolated() {
        let storage = MemoryCacheStorage::new();
        let request = CacheRequest::get("./app.js");

        storage
            .put(&version("v1"), &request, &CachedResponse::new(200, "old"))
            .await
            .unwrap();

        assert!(storage.lookup(&version("v2"), &request).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let storage = MemoryCacheStorage::new();
        let v1 = version("v1");
        let request = CacheRequest::get("./");

        storage.put(&v1, &request, &CachedResponse::new(200, "a")).await.unwrap();
        storage.put(&v1, &request, &CachedResponse::new(200, "b")).await.unwrap();

        assert_eq!(storage.len(&v1).await, Some(1));
        let found = storage.lookup(&v1, &request).await.unwrap().unwrap();
        assert_eq!(found.body().as_ref(), b"b");
    }

    #[tokio::test]
    async fn test_delete_and_versions() {
        let storage = MemoryCacheStorage::new();
        storage.open(&version("v1")).await.unwrap();
        storage.open(&version("v2")).await.unwrap();

        assert!(storage.delete(&version("v1")).await.unwrap());
        assert!(!storage.delete(&version("v1")).await.unwrap());
        assert_eq!(storage.versions().await.unwrap(), vec![version("v2")]);
    }

    #[tokio::test]
    async fn test_stats() {
        let storage = MemoryCacheStorage::new();
        let v1 = version("v1");
        let request = CacheRequest::get("./");

        let _ = storage.lookup(&v1, &request).await;
        storage.put(&v1, &request, &CachedResponse::new(200, "x")).await.unwrap();
        let _ = storage.lookup(&v1, &request).await;

        let stats = storage.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.writes, 1);
    }
}
