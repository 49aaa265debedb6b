//! Wallpaper publishing error types.

use thiserror::Error;

/// Image generation failures.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum GenerationError {
    #[error("no API key configured for image generation")]
    MissingApiKey,

    #[error("image API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error during image generation: {message}")]
    Network { message: String },

    #[error("image API response had no image data")]
    EmptyResponse,

    #[error("failed to decode generated image: {message}")]
    Decode { message: String },
}

impl GenerationError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// File host upload failures.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum UploadError {
    #[error("anonymous uploads are paused and no valid user hash was used")]
    AnonymousPaused,

    #[error("upload rejected (status {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("network error during upload: {message}")]
    Network { message: String },

    #[error("adding {file} to album {album} failed: {message}")]
    Album {
        file: String,
        album: String,
        message: String,
    },
}

impl UploadError {
    /// Creates rejected error.
    #[must_use]
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: body.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }
}

/// Link log write failures. Unreadable existing content is not an error.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum LinkLogError {
    #[error("link log io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize link log: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Page build failures.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PageError {
    #[error("failed to read template {path}: {source}")]
    Template {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write page {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure of the publish pipeline. All are terminal for the run.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PublishError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    LinkLog(#[from] LinkLogError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("failed to save wallpaper locally: {0}")]
    LocalCopy(#[source] std::io::Error),
}
