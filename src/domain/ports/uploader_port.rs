//! File host upload port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::{AlbumId, UserHash};
use crate::domain::errors::UploadError;

/// Port for publishing image bytes to a public file host.
#[async_trait]
pub trait UploaderPort: Send + Sync {
    /// Uploads the file and returns its public URL.
    /// Uploads are anonymous when no user hash is given.
    async fn upload(
        &self,
        image: Bytes,
        filename: &str,
        user_hash: Option<&UserHash>,
    ) -> Result<String, UploadError>;

    /// Files an uploaded URL into a remote album.
    async fn add_to_album(
        &self,
        file_url: &str,
        user_hash: &UserHash,
        album: &AlbumId,
    ) -> Result<(), UploadError>;
}
