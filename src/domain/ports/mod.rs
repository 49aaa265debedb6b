mod cache_storage_port;
mod image_generator_port;
mod link_log_port;
mod network_port;
mod page_publisher_port;
mod uploader_port;

pub use cache_storage_port::CacheStoragePort;
pub use image_generator_port::ImageGeneratorPort;
pub use link_log_port::LinkLogPort;
pub use network_port::NetworkPort;
pub use page_publisher_port::PagePublisherPort;
pub use uploader_port::UploaderPort;
