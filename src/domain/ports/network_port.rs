//! Port definition for network access from the cache manager.

use async_trait::async_trait;

use crate::domain::entities::{CacheRequest, CachedResponse};
use crate::domain::errors::NetworkError;

/// Port for performing a request against the live network.
///
/// Any HTTP status counts as success; only transport failures are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkPort: Send + Sync {
    /// Fetches the request from the network.
    async fn fetch(&self, request: &CacheRequest) -> Result<CachedResponse, NetworkError>;
}
