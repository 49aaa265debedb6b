//! Port definition for version-keyed cache storage.

use async_trait::async_trait;

use crate::domain::entities::{CacheRequest, CacheVersion, CachedResponse};
use crate::domain::errors::CacheResult;

/// Port for a store of request/response pairs split into named generations.
///
/// Each operation is atomic with respect to concurrent callers.
#[async_trait]
pub trait CacheStoragePort: Send + Sync {
    /// Opens the generation, creating it when absent.
    async fn open(&self, version: &CacheVersion) -> CacheResult<()>;

    /// Lists every existing generation.
    async fn versions(&self) -> CacheResult<Vec<CacheVersion>>;

    /// Deletes a generation and all of its entries.
    /// Returns false if it did not exist.
    async fn delete(&self, version: &CacheVersion) -> CacheResult<bool>;

    /// Looks up the stored response for a request.
    async fn lookup(
        &self,
        version: &CacheVersion,
        request: &CacheRequest,
    ) -> CacheResult<Option<CachedResponse>>;

    /// Stores a response, replacing any previous entry for the request.
    async fn put(
        &self,
        version: &CacheVersion,
        request: &CacheRequest,
        response: &CachedResponse,
    ) -> CacheResult<()>;

    /// Stores several entries. Implementations may make this all-or-nothing.
    async fn put_all(
        &self,
        version: &CacheVersion,
        entries: &[(CacheRequest, CachedResponse)],
    ) -> CacheResult<()> {
        for (request, response) in entries {
            self.put(version, request, response).await?;
        }
        Ok(())
    }

    /// Returns all entries of a generation sorted by request key.
    async fn entries(&self, version: &CacheVersion) -> CacheResult<Vec<(String, CachedResponse)>>;
}
