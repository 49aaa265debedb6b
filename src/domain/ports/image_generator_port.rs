//! Image generation port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::ImageRequest;
use crate::domain::errors::GenerationError;

/// Port for text-to-image generation.
#[async_trait]
pub trait ImageGeneratorPort: Send + Sync {
    /// Generates an image and returns its PNG bytes.
    async fn generate(&self, request: &ImageRequest) -> Result<Bytes, GenerationError>;
}
