//! Offline cache error types.

use thiserror::Error;

/// Failure reaching the network for a routed request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NetworkError {
    #[error("invalid request url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request timed out: {url}")]
    Timeout { url: String },

    #[error("network unreachable for {url}: {message}")]
    Unreachable { url: String, message: String },
}

impl NetworkError {
    /// Creates unreachable error.
    #[must_use]
    pub fn unreachable(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unreachable {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates invalid url error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Cache store and lifecycle error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CacheError {
    #[error("cache storage error: {message}")]
    Storage { message: String },

    #[error("corrupt cache entry {key}: {message}")]
    CorruptEntry { key: String, message: String },

    #[error("installation failed: core asset {url} could not be cached: {reason}")]
    InstallFailed { url: String, reason: String },

    #[error("cannot {action} while {state}")]
    InvalidLifecycle {
        action: &'static str,
        state: &'static str,
    },

    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    /// Creates storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates install failure for a core asset.
    #[must_use]
    pub fn install_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InstallFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns whether the error aborted an installation.
    #[must_use]
    pub const fn is_install_failure(&self) -> bool {
        matches!(self, Self::InstallFailed { .. })
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
