//! Daily wallpaper publishing use case.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{PublishRequest, PublishResponse};
use crate::domain::entities::{ImageRequest, LinkRecord};
use crate::domain::errors::PublishError;
use crate::domain::ports::{ImageGeneratorPort, LinkLogPort, PagePublisherPort, UploaderPort};

const DEFAULT_FILENAME: &str = "wallpaper.png";

/// Generates, uploads, logs and publishes one wallpaper.
///
/// Steps run strictly in order and the first failure ends the run, so no
/// page is written for an image that was not logged.
#[derive(Clone)]
pub struct PublishWallpaperUseCase {
    generator: Arc<dyn ImageGeneratorPort>,
    uploader: Arc<dyn UploaderPort>,
    link_log: Arc<dyn LinkLogPort>,
    page: Arc<dyn PagePublisherPort>,
    model: String,
    prompt: Option<String>,
}

impl PublishWallpaperUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(
        generator: Arc<dyn ImageGeneratorPort>,
        uploader: Arc<dyn UploaderPort>,
        link_log: Arc<dyn LinkLogPort>,
        page: Arc<dyn PagePublisherPort>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            uploader,
            link_log,
            page,
            model: model.into(),
            prompt: None,
        }
    }

    /// Overrides the built-in prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: Option<String>) -> Self {
        self.prompt = prompt.filter(|p| !p.trim().is_empty());
        self
    }

    /// Executes the publish pipeline.
    ///
    /// # Errors
    /// Returns the first generation, upload, logging or page error.
    pub async fn execute(&self, request: PublishRequest) -> Result<PublishResponse, PublishError> {
        let mut image_request = ImageRequest::new(&self.model, request.size, request.quality);
        if let Some(prompt) = &self.prompt {
            image_request = image_request.with_prompt(prompt.clone());
        }

        info!(
            model = %image_request.model,
            size = %request.size,
            quality = %request.quality,
            "Generating wallpaper"
        );
        let image = self.generator.generate(&image_request).await?;
        debug!(bytes = image.len(), "Wallpaper generated");

        let filename = match &request.local_copy {
            Some(path) => {
                save_local_copy(path, &image).await?;
                path.file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or(DEFAULT_FILENAME)
                    .to_string()
            }
            None => DEFAULT_FILENAME.to_string(),
        };

        if request.user_hash.is_some() {
            info!("Using authenticated upload");
        } else {
            info!("No user hash configured, attempting anonymous upload");
        }
        let url = self
            .uploader
            .upload(image, &filename, request.user_hash.as_ref())
            .await?;
        info!(url = %url, "Wallpaper uploaded");

        let added_to_album = match (&request.user_hash, &request.album) {
            (Some(user_hash), Some(album)) => {
                self.uploader.add_to_album(&url, user_hash, album).await?;
                info!(album = %album, "Added upload to album");
                true
            }
            (None, _) => {
                debug!("No user hash, skipping album add");
                false
            }
            (Some(_), None) => {
                debug!("No album configured, skipping album add");
                false
            }
        };

        let record = LinkRecord::now(&url, request.size, request.quality);
        let total = self.link_log.append(&record).await?;
        debug!(total, "Link logged");

        let page_path = self.page.publish(&url).await?;
        info!(path = %page_path.display(), "Clock page written");

        Ok(PublishResponse {
            url,
            record,
            added_to_album,
            page_path,
        })
    }
}

async fn save_local_copy(path: &Path, image: &[u8]) -> Result<(), PublishError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(PublishError::LocalCopy)?;
    }
    tokio::fs::write(path, image).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to save wallpaper");
        PublishError::LocalCopy(e)
    })?;
    debug!(path = %path.display(), "Saved wallpaper locally");
    Ok(())
}
