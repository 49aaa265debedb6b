//! Domain error types.

mod cache_error;
mod publish_error;

pub use cache_error::{CacheError, CacheResult, NetworkError};
pub use publish_error::{GenerationError, LinkLogError, PageError, PublishError, UploadError};
