//! Application layer with services, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{PublishRequest, PublishResponse};
pub use services::{LifecycleState, OfflineCacheManager};
pub use use_cases::PublishWallpaperUseCase;
