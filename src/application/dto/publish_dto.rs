//! Publishing DTOs.

use std::path::PathBuf;

use crate::domain::entities::{AlbumId, ImageQuality, ImageSize, LinkRecord, UserHash};

/// Parameters of one publish run.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Target dimensions.
    pub size: ImageSize,
    /// Quality tier.
    pub quality: ImageQuality,
    /// Catbox user hash; uploads are anonymous without it.
    pub user_hash: Option<UserHash>,
    /// Album the upload is filed into when authenticated.
    pub album: Option<AlbumId>,
    /// Where to keep a local copy of the image, if anywhere.
    pub local_copy: Option<PathBuf>,
}

impl PublishRequest {
    /// Creates anonymous request.
    #[must_use]
    pub const fn new(size: ImageSize, quality: ImageQuality) -> Self {
        Self {
            size,
            quality,
            user_hash: None,
            album: None,
            local_copy: None,
        }
    }

    /// Sets the user hash.
    #[must_use]
    pub fn with_user_hash(mut self, user_hash: Option<UserHash>) -> Self {
        self.user_hash = user_hash;
        self
    }

    /// Sets the album.
    #[must_use]
    pub fn with_album(mut self, album: Option<AlbumId>) -> Self {
        self.album = album;
        self
    }

    /// Sets the local copy path.
    #[must_use]
    pub fn with_local_copy(mut self, path: Option<PathBuf>) -> Self {
        self.local_copy = path;
        self
    }
}

/// Outcome of a successful publish run.
#[derive(Debug, Clone)]
pub struct PublishResponse {
    /// Public URL of the wallpaper.
    pub url: String,
    /// Record appended to the link log.
    pub record: LinkRecord,
    /// Whether the upload was filed into an album.
    pub added_to_album: bool,
    /// Path of the written page.
    pub page_path: PathBuf,
}
