//! Stored response snapshot.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Visibility of a response to the requesting page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Same-origin response, fully readable.
    #[default]
    Basic,
    /// Cross-origin response with CORS headers.
    Cors,
    /// Cross-origin response whose status and headers are hidden.
    Opaque,
    /// Network error placeholder.
    Error,
}

/// Response body plus a snapshot of its status and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    status: u16,
    kind: ResponseKind,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl CachedResponse {
    /// Creates a readable response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            kind: ResponseKind::Basic,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Creates an opaque response. Status and headers are not observable.
    #[must_use]
    pub fn opaque(body: impl Into<Bytes>) -> Self {
        Self {
            status: 0,
            kind: ResponseKind::Opaque,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Generic network error result.
    #[must_use]
    pub const fn error() -> Self {
        Self {
            status: 0,
            kind: ResponseKind::Error,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Rebuilds a response from stored parts.
    #[must_use]
    pub fn from_parts(
        status: u16,
        kind: ResponseKind,
        headers: Vec<(String, String)>,
        body: Bytes,
    ) -> Self {
        Self {
            status,
            kind,
            headers,
            body,
        }
    }

    /// Sets the response kind. Switching to opaque hides status and headers.
    #[must_use]
    pub fn with_kind(mut self, kind: ResponseKind) -> Self {
        if kind == ResponseKind::Opaque {
            self.status = 0;
            self.headers.clear();
        }
        self.kind = kind;
        self
    }

    /// Adds a header to the snapshot. Ignored for opaque responses.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if self.kind != ResponseKind::Opaque {
            self.headers.push((name.into(), value.into()));
        }
        self
    }

    /// Returns the status code (0 for opaque and error responses).
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the response kind.
    #[must_use]
    pub const fn kind(&self) -> ResponseKind {
        self.kind
    }

    /// Returns the header snapshot.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Looks up a header case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the body bytes.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns true for 2xx readable responses.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self.kind, ResponseKind::Basic | ResponseKind::Cors)
            && (200..300).contains(&self.status)
    }

    /// Returns true for opaque responses.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.kind == ResponseKind::Opaque
    }

    /// Returns true for the network error placeholder.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == ResponseKind::Error
    }

    /// Whether a response fetched on an asset cache miss may be stored.
    ///
    /// Opaque responses are accepted without inspection, since an opaque
    /// error cannot be told apart from an opaque success.
    #[must_use]
    pub fn is_cacheable_asset(&self) -> bool {
        self.status == 200 || self.is_opaque()
    }
}
