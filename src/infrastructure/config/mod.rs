//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{AppConfig, CacheConfig, ImageConfig, LogLevel, PathsConfig, UploadConfig};
pub use args::{CacheAction, CliArgs, Command, PublishArgs};
pub use storage::{ConfigError, ConfigLoader};
