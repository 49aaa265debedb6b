//! Domain layer with core entities, errors, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{CacheRequest, CacheVersion, CachedResponse, CoreAssetSet};
pub use errors::{CacheError, NetworkError, PublishError};
pub use ports::{CacheStoragePort, NetworkPort};
