//! Offline cache adapters: storages and network access.

pub mod disk_storage;
pub mod http_network;
pub mod memory_storage;

pub use disk_storage::DiskCacheStorage;
pub use http_network::HttpNetwork;
pub use memory_storage::{MemoryCacheStorage, StorageStats};
