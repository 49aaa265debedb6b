//! Page publishing port definition.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::PageError;

/// Port for writing the clock page that displays the wallpaper.
#[async_trait]
pub trait PagePublisherPort: Send + Sync {
    /// Builds the page for the image URL and returns where it was written.
    async fn publish(&self, image_url: &str) -> Result<PathBuf, PageError>;
}
