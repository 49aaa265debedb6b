//! Catbox file host client.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use regex::Regex;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::domain::entities::{AlbumId, UserHash};
use crate::domain::errors::UploadError;
use crate::domain::ports::UploaderPort;

/// Default upload endpoint.
pub const CATBOX_API_URL: &str = "https://catbox.moe/user/api.php";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());

static ANON_PAUSED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)anon uploads are temporarily paused").unwrap());

static ALBUM_ERROR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)error").unwrap());

/// Uploader for catbox.moe.
pub struct CatboxUploader {
    client: Client,
    endpoint: String,
}

impl CatboxUploader {
    /// Creates uploader for the default endpoint.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, UploadError> {
        Self::with_endpoint(CATBOX_API_URL)
    }

    /// Creates uploader for a custom endpoint.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| UploadError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn send(&self, form: Form) -> Result<(u16, String), UploadError> {
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach file host");
                UploadError::network(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::network(format!("failed to read response: {e}")))?;
        Ok((status, body.trim().to_string()))
    }
}

/// Interprets an upload response body.
///
/// # Errors
/// Returns [`UploadError::AnonymousPaused`] when the host refuses anonymous
/// uploads, or [`UploadError::Rejected`] for any other non-URL answer.
pub fn interpret_upload_response(status: u16, body: &str) -> Result<String, UploadError> {
    let body = body.trim();
    if (200..300).contains(&status) && URL_RE.is_match(body) {
        return Ok(body.to_string());
    }
    if ANON_PAUSED_RE.is_match(body) {
        return Err(UploadError::AnonymousPaused);
    }
    Err(UploadError::rejected(status, body))
}

/// Interprets an album update response body.
///
/// # Errors
/// Returns [`UploadError::Album`] on a non-2xx status or an error body.
pub fn interpret_album_response(
    status: u16,
    body: &str,
    file: &str,
    album: &AlbumId,
) -> Result<(), UploadError> {
    if (200..300).contains(&status) && !ALBUM_ERROR_RE.is_match(body) {
        return Ok(());
    }
    Err(UploadError::Album {
        file: file.to_string(),
        album: album.to_string(),
        message: format!("status {status}: {}", body.trim()),
    })
}

/// Returns the last path segment of an uploaded file URL.
#[must_use]
pub fn file_name_from_url(file_url: &str) -> String {
    let path = reqwest::Url::parse(file_url)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| file_url.to_string());
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl UploaderPort for CatboxUploader {
    async fn upload(
        &self,
        image: Bytes,
        filename: &str,
        user_hash: Option<&UserHash>,
    ) -> Result<String, UploadError> {
        let part = Part::stream(image)
            .file_name(filename.to_string())
            .mime_str("image/png")
            .map_err(|e| UploadError::network(e.to_string()))?;

        let mut form = Form::new().text("reqtype", "fileupload");
        if let Some(hash) = user_hash {
            form = form.text("userhash", hash.expose().to_string());
        }
        let form = form.part("fileToUpload", part);

        debug!(filename, authenticated = user_hash.is_some(), "Uploading file");
        let (status, body) = self.send(form).await?;
        interpret_upload_response(status, &body)
    }

    async fn add_to_album(
        &self,
        file_url: &str,
        user_hash: &UserHash,
        album: &AlbumId,
    ) -> Result<(), UploadError> {
        let file = file_name_from_url(file_url);
        let form = Form::new()
            .text("reqtype", "addtoalbum")
            .text("userhash", user_hash.expose().to_string())
            .text("short", album.as_str().to_string())
            .text("files", file.clone());

        debug!(file = %file, album = %album, "Adding file to album");
        let (status, body) = self.send(form).await?;
        interpret_album_response(status, &body, &file, album)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use tokio_test::{assert_err, assert_ok};

    #[test_case(200, "https://files.catbox.moe/abc123.png" ; "https")]
    #[test_case(200, "HTTP://files.catbox.moe/abc123.png" ; "uppercase scheme")]
    #[test_case(201, "  https://files.catbox.moe/x.png\n" ; "padded")]
    fn test_upload_success(status: u16, body: &str) {
        let url = interpret_upload_response(status, body).unwrap();
        assert!(url.to_ascii_lowercase().starts_with("http"));
        assert_eq!(url, body.trim());
    }

    #[test]
    fn test_anonymous_paused_detected() {
        let err = interpret_upload_response(
            412,
            "Anon Uploads are temporarily paused, please use a userhash",
        )
        .unwrap_err();
        assert!(matches!(err, UploadError::AnonymousPaused));

        let err =
            interpret_upload_response(200, "anon uploads are TEMPORARILY paused").unwrap_err();
        assert!(matches!(err, UploadError::AnonymousPaused));
    }

    #[test]
    fn test_url_body_with_error_status_rejected() {
        let err = interpret_upload_response(500, "https://files.catbox.moe/abc.png").unwrap_err();
        assert!(matches!(err, UploadError::Rejected { status: 500, .. }));
    }

    #[test]
    fn test_other_body_rejected() {
        let err = interpret_upload_response(200, "No files given").unwrap_err();
        match err {
            UploadError::Rejected { status, body } => {
                assert_eq!(status, 200);
                assert_eq!(body, "No files given");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_album_response() {
        let album = AlbumId::new("ou6aoj").unwrap();
        assert_ok!(interpret_album_response(200, "ok", "abc.png", &album));
        assert_err!(interpret_album_response(200, "Error: no album", "abc.png", &album));
        assert_err!(interpret_album_response(403, "", "abc.png", &album));
    }

    #[test_case("https://files.catbox.moe/abc123.png", "abc123.png" ; "plain")]
    #[test_case("https://files.catbox.moe/abc123.png?x=1", "abc123.png" ; "query")]
    #[test_case("https://files.catbox.moe/dir/abc123.png/", "abc123.png" ; "trailing slash")]
    fn test_file_name_from_url(url: &str, expected: &str) {
        assert_eq!(file_name_from_url(url), expected);
    }
}
