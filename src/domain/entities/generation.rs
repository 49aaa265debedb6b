//! Cache generation identifiers and the core asset set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Version key of the generation shipped with this build.
pub const DEFAULT_CACHE_VERSION: &str = "inspo-clock-v1";

/// Application shell assets fetched at install time.
pub const DEFAULT_CORE_ASSETS: [&str; 5] = [
    "./",
    "./index.html",
    "./manifest.webmanifest",
    "./icons/icon-192.png",
    "./icons/icon-512.png",
];

/// Version key naming one generation of the cache store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheVersion(String);

impl CacheVersion {
    /// Creates a version key. Blank keys are rejected.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return None;
        }
        Some(Self(value))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CacheVersion {
    fn default() -> Self {
        Self(DEFAULT_CACHE_VERSION.to_string())
    }
}

impl fmt::Display for CacheVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for CacheVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Fixed list of URLs that must be cached before the manager activates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoreAssetSet(Vec<String>);

impl CoreAssetSet {
    /// Creates a set, dropping duplicate URLs while keeping first-seen order.
    #[must_use]
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for url in urls {
            let url = url.into();
            if !unique.contains(&url) {
                unique.push(url);
            }
        }
        Self(unique)
    }

    /// Iterates the URLs in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CoreAssetSet {
    fn default() -> Self {
        Self::new(DEFAULT_CORE_ASSETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_version_rejected() {
        assert!(CacheVersion::new("  ").is_none());
        assert_eq!(CacheVersion::new(" v2 ").unwrap().as_str(), "v2");
    }

    #[test]
    fn test_core_assets_deduplicated() {
        let set = CoreAssetSet::new(["/", "/index.html", "/"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["/", "/index.html"]);
    }

    #[test]
    fn test_default_core_assets() {
        assert_eq!(CoreAssetSet::default().len(), 5);
        assert_eq!(CacheVersion::default().as_str(), "inspo-clock-v1");
    }
}
