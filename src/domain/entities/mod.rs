//! Domain entity definitions.

mod credentials;
mod generation;
mod link_record;
mod request;
mod response;
mod wallpaper;

pub use credentials::{AlbumId, ApiKey, DEFAULT_ALBUM, Secret, UserHash};
pub use generation::{CacheVersion, CoreAssetSet, DEFAULT_CACHE_VERSION, DEFAULT_CORE_ASSETS};
pub use link_record::LinkRecord;
pub use request::{CacheRequest, RequestClass, RequestMode};
pub use response::{CachedResponse, ResponseKind};
pub use wallpaper::{DEFAULT_PROMPT, ImageQuality, ImageRequest, ImageSize};
