//! Infrastructure layer with external service adapters.

/// Offline cache storages and network.
pub mod cache;
/// Catbox file host client.
pub mod catbox;
/// Application configuration.
pub mod config;
/// OpenAI image generation client.
pub mod openai;
/// Link log and page writers.
pub mod publish;

pub use cache::{DiskCacheStorage, HttpNetwork, MemoryCacheStorage, StorageStats};
pub use catbox::CatboxUploader;
pub use config::{AppConfig, CliArgs, ConfigLoader, LogLevel};
pub use openai::OpenAiImageClient;
pub use publish::{JsonLinkLog, TemplatePageWriter};
