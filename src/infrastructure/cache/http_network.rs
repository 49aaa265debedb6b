//! HTTP network adapter for the offline cache manager.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url, header};
use tracing::{debug, warn};

use crate::domain::entities::{CacheRequest, CachedResponse, CoreAssetSet, ResponseKind};
use crate::domain::errors::NetworkError;
use crate::domain::ports::NetworkPort;

const USER_AGENT: &str = concat!("inspo-clock/", env!("CARGO_PKG_VERSION"));

/// Performs requests with reqwest, resolving relative URLs against the page origin.
///
/// Responses from other origins without CORS headers are reduced to opaque
/// responses, mirroring what a page would observe.
pub struct HttpNetwork {
    client: Client,
    origin: Url,
}

impl HttpNetwork {
    /// Creates an adapter for pages served from `origin`.
    ///
    /// `timeout` of `None` lets requests wait indefinitely.
    ///
    /// # Errors
    /// Returns error if the origin is not a valid URL or the client cannot be built.
    pub fn new(origin: &str, timeout: Option<Duration>) -> Result<Self, NetworkError> {
        let origin =
            Url::parse(origin).map_err(|e| NetworkError::invalid_url(origin, e.to_string()))?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            NetworkError::unreachable(origin.as_str(), format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Self { client, origin })
    }

    /// Returns the page origin.
    #[must_use]
    pub const fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolves a request URL against the page origin.
    ///
    /// # Errors
    /// Returns error if the URL cannot be joined.
    pub fn resolve(&self, url: &str) -> Result<Url, NetworkError> {
        self.origin
            .join(url)
            .map_err(|e| NetworkError::invalid_url(url, e.to_string()))
    }

    /// Rewrites the request URL to its absolute form, so every spelling of
    /// the same resource shares one cache key.
    ///
    /// # Errors
    /// Returns error if the URL cannot be joined.
    pub fn canonicalize(&self, request: CacheRequest) -> Result<CacheRequest, NetworkError> {
        let url = self.resolve(request.url())?;
        Ok(request.with_url(url.as_str()))
    }

    /// Resolves every core asset URL against the page origin.
    ///
    /// # Errors
    /// Returns error if any URL cannot be joined.
    pub fn canonical_assets(&self, assets: &CoreAssetSet) -> Result<CoreAssetSet, NetworkError> {
        let urls = assets
            .iter()
            .map(|url| self.resolve(url).map(String::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CoreAssetSet::new(urls))
    }

    fn classify(&self, url: &Url, headers: &header::HeaderMap) -> ResponseKind {
        if url.origin() == self.origin.origin() {
            ResponseKind::Basic
        } else if headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
            ResponseKind::Cors
        } else {
            ResponseKind::Opaque
        }
    }
}

#[async_trait]
impl NetworkPort for HttpNetwork {
    async fn fetch(&self, request: &CacheRequest) -> Result<CachedResponse, NetworkError> {
        let url = self.resolve(request.url())?;
        let method = Method::from_bytes(request.method().as_bytes())
            .map_err(|e| NetworkError::invalid_url(request.url(), format!("bad method: {e}")))?;

        debug!(method = %method, url = %url, "Fetching from network");

        let mut builder = self.client.request(method, url.clone());
        if let Some(accept) = request.accept() {
            builder = builder.header(header::ACCEPT, accept);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, url = %url, "Network fetch failed");
            if e.is_timeout() {
                NetworkError::Timeout {
                    url: url.to_string(),
                }
            } else {
                NetworkError::unreachable(url.as_str(), e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let kind = self.classify(&url, response.headers());
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = response.bytes().await.map_err(|e| {
            NetworkError::unreachable(url.as_str(), format!("failed to read body: {e}"))
        })?;

        debug!(url = %url, status, ?kind, size = body.len(), "Network fetch complete");

        let response = headers
            .into_iter()
            .fold(CachedResponse::new(status, body), |response, (name, value)| {
                response.with_header(name, value)
            })
            .with_kind(kind);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_urls_resolve_against_origin() {
        let network = HttpNetwork::new("https://clock.example/app/", None).unwrap();

        assert_eq!(
            network.resolve("./index.html").unwrap().as_str(),
            "https://clock.example/app/index.html"
        );
        assert_eq!(
            network.resolve("https://files.catbox.moe/a.png").unwrap().as_str(),
            "https://files.catbox.moe/a.png"
        );
    }

    #[test]
    fn test_cross_origin_without_cors_is_opaque() {
        let network = HttpNetwork::new("https://clock.example/", None).unwrap();
        let foreign = Url::parse("https://files.catbox.moe/a.png").unwrap();
        let local = Url::parse("https://clock.example/icons/icon-192.png").unwrap();

        let mut cors = header::HeaderMap::new();
        cors.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, header::HeaderValue::from_static("*"));

        assert_eq!(network.classify(&foreign, &header::HeaderMap::new()), ResponseKind::Opaque);
        assert_eq!(network.classify(&foreign, &cors), ResponseKind::Cors);
        assert_eq!(network.classify(&local, &header::HeaderMap::new()), ResponseKind::Basic);
    }

    #[test]
    fn test_equivalent_spellings_share_cache_key() {
        let network = HttpNetwork::new("http://localhost:8080/", None).unwrap();
        let keys: Vec<String> = [
            "./manifest.webmanifest",
            "/manifest.webmanifest",
            "http://localhost:8080/manifest.webmanifest",
        ]
        .into_iter()
        .map(|url| network.canonicalize(CacheRequest::get(url)).unwrap().cache_key())
        .collect();

        assert_eq!(keys[0], "GET http://localhost:8080/manifest.webmanifest");
        assert!(keys.iter().all(|key| *key == keys[0]));
    }

    #[test]
    fn test_canonical_assets_are_absolute_and_deduplicated() {
        let network = HttpNetwork::new("http://localhost:8080/", None).unwrap();
        let assets = CoreAssetSet::new(["./", "/", "./index.html"]);

        let canonical = network.canonical_assets(&assets).unwrap();

        assert_eq!(
            canonical.iter().collect::<Vec<_>>(),
            vec!["http://localhost:8080/", "http://localhost:8080/index.html"]
        );
    }

    #[test]
    fn test_invalid_origin_rejected() {
        assert!(matches!(
            HttpNetwork::new("not a url", None),
            Err(NetworkError::InvalidUrl { .. })
        ));
    }
}
