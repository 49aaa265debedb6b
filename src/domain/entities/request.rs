//! Intercepted request value object.

use std::fmt;

use serde::{Deserialize, Serialize};

const HTML_MEDIA_TYPE: &str = "text/html";

/// How the page issued the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMode {
    /// Top-level page navigation.
    Navigate,
    /// Any other fetch (subresource, script, image).
    #[default]
    Other,
}

/// Caching policy selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    /// Page navigations and HTML documents, served network-first.
    HtmlLike,
    /// Everything else, served cache-first.
    AssetLike,
}

/// Request intercepted by the offline cache manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheRequest {
    method: String,
    url: String,
    mode: RequestMode,
    accept: Option<String>,
}

impl CacheRequest {
    /// Creates a GET request for the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            mode: RequestMode::Other,
            accept: None,
        }
    }

    /// Creates a navigation request for the given URL.
    #[must_use]
    pub fn navigate(url: impl Into<String>) -> Self {
        Self::get(url).with_mode(RequestMode::Navigate)
    }

    /// Replaces the request URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the request method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into().to_ascii_uppercase();
        self
    }

    /// Sets the request mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: RequestMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the `Accept` header value.
    #[must_use]
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Returns the request method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the request mode.
    #[must_use]
    pub const fn mode(&self) -> RequestMode {
        self.mode
    }

    /// Returns the `Accept` header value, if any.
    #[must_use]
    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }

    /// Returns true for navigations and requests accepting HTML.
    #[must_use]
    pub fn is_html_like(&self) -> bool {
        self.mode == RequestMode::Navigate
            || self
                .accept
                .as_deref()
                .is_some_and(|accept| accept.contains(HTML_MEDIA_TYPE))
    }

    /// Classifies the request for routing.
    #[must_use]
    pub fn class(&self) -> RequestClass {
        if self.is_html_like() {
            RequestClass::HtmlLike
        } else {
            RequestClass::AssetLike
        }
    }

    /// Key under which responses to this request are stored.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

impl fmt::Display for CacheRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(CacheRequest::navigate("./"), RequestClass::HtmlLike ; "navigation")]
    #[test_case(CacheRequest::get("./index.html").with_accept("text/html,application/xhtml+xml"), RequestClass::HtmlLike ; "accepts_html")]
    #[test_case(CacheRequest::get("./icons/icon-192.png").with_accept("image/avif,image/webp,*/*"), RequestClass::AssetLike ; "image")]
    #[test_case(CacheRequest::get("./manifest.webmanifest"), RequestClass::AssetLike ; "no_accept_header")]
    fn test_classification(request: CacheRequest, expected: RequestClass) {
        assert_eq!(request.class(), expected);
    }

    #[test]
    fn test_cache_key_includes_method() {
        let request = CacheRequest::get("./index.html").with_method("head");
        assert_eq!(request.cache_key(), "HEAD ./index.html");
    }

    #[test]
    fn test_key_ignores_mode_and_accept() {
        let plain = CacheRequest::get("./");
        let nav = CacheRequest::navigate("./").with_accept("text/html");
        assert_eq!(plain.cache_key(), nav.cache_key());
    }
}
