//! Application services.

pub mod offline_cache;
pub mod page_builder;

pub use offline_cache::{LifecycleState, OfflineCacheManager};
pub use page_builder::{DEFAULT_TEMPLATE, IMAGE_URL_PLACEHOLDER, placeholder_count, render_page};
