//! Offline cache manager: install, activate and fetch routing for the clock page.

use std::fmt;
use std::sync::Arc;

use futures_util::future::{join_all, try_join_all};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::entities::{
    CacheRequest, CacheVersion, CachedResponse, CoreAssetSet, RequestClass,
};
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::{CacheStoragePort, NetworkPort};

/// Lifecycle position of the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created, not yet installed.
    Parsed,
    /// Core assets are being fetched.
    Installing,
    /// Core assets cached, waiting to activate.
    Installed,
    /// Old generations purged, controlling pages.
    Activated,
    /// Installation failed; this manager never activates.
    Redundant,
}

impl LifecycleState {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Parsed => "parsed",
            Self::Installing => "installing",
            Self::Installed => "installed",
            Self::Activated => "activated",
            Self::Redundant => "redundant",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct Lifecycle {
    state: LifecycleState,
    skip_waiting: bool,
    clients_claimed: bool,
}

/// Routes page requests between the current cache generation and the network.
///
/// HTML-like requests are network-first so newly published wallpapers show up
/// on reload; everything else is cache-first. Exactly one generation survives
/// activation.
pub struct OfflineCacheManager {
    storage: Arc<dyn CacheStoragePort>,
    network: Arc<dyn NetworkPort>,
    version: CacheVersion,
    core_assets: CoreAssetSet,
    lifecycle: Mutex<Lifecycle>,
}

impl OfflineCacheManager {
    /// Creates a manager for the given generation.
    #[must_use]
    pub fn new(
        storage: Arc<dyn CacheStoragePort>,
        network: Arc<dyn NetworkPort>,
        version: CacheVersion,
        core_assets: CoreAssetSet,
    ) -> Self {
        Self {
            storage,
            network,
            version,
            core_assets,
            lifecycle: Mutex::new(Lifecycle {
                state: LifecycleState::Parsed,
                skip_waiting: false,
                clients_claimed: false,
            }),
        }
    }

    /// Returns the current generation key.
    #[must_use]
    pub const fn version(&self) -> &CacheVersion {
        &self.version
    }

    /// Returns the core asset set.
    #[must_use]
    pub const fn core_assets(&self) -> &CoreAssetSet {
        &self.core_assets
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.lock().state
    }

    /// Whether installation asked to skip the waiting phase.
    #[must_use]
    pub fn skip_waiting_requested(&self) -> bool {
        self.lifecycle.lock().skip_waiting
    }

    /// Whether activation claimed the open pages.
    #[must_use]
    pub fn clients_claimed(&self) -> bool {
        self.lifecycle.lock().clients_claimed
    }

    /// Caches every core asset into the current generation.
    ///
    /// All-or-nothing: if any asset cannot be fetched with a successful
    /// status, nothing is stored and the manager becomes redundant.
    /// Returns the number of cached assets.
    ///
    /// # Errors
    /// Returns `CacheError::InstallFailed` naming the first failing asset,
    /// or a storage error.
    pub async fn on_install(&self) -> CacheResult<usize> {
        let previous = {
            let mut lifecycle = self.lifecycle.lock();
            lifecycle.skip_waiting = true;
            std::mem::replace(&mut lifecycle.state, LifecycleState::Installing)
        };

        info!(
            version = %self.version,
            assets = self.core_assets.len(),
            "Installing offline cache"
        );

        let result = self.precache().await;

        let mut lifecycle = self.lifecycle.lock();
        match &result {
            Ok(count) => {
                lifecycle.state = if previous == LifecycleState::Activated {
                    LifecycleState::Activated
                } else {
                    LifecycleState::Installed
                };
                info!(version = %self.version, count, "Core assets cached");
            }
            Err(e) => {
                // An already active generation keeps serving.
                lifecycle.state = if previous == LifecycleState::Activated {
                    LifecycleState::Activated
                } else {
                    LifecycleState::Redundant
                };
                warn!(version = %self.version, error = %e, "Installation failed");
            }
        }
        result
    }

    async fn precache(&self) -> CacheResult<usize> {
        self.storage.open(&self.version).await?;

        let requests: Vec<CacheRequest> = self.core_assets.iter().map(CacheRequest::get).collect();
        let fetched = join_all(requests.iter().map(|request| self.network.fetch(request))).await;

        let mut entries = Vec::with_capacity(requests.len());
        for (request, result) in requests.into_iter().zip(fetched) {
            let response = result
                .map_err(|e| CacheError::install_failed(request.url(), e.to_string()))?;
            if !response.is_ok() {
                return Err(CacheError::install_failed(
                    request.url(),
                    format!("unexpected status {}", response.status()),
                ));
            }
            entries.push((request, response));
        }

        self.storage.put_all(&self.version, &entries).await?;
        Ok(entries.len())
    }

    /// Deletes every generation other than the current one and claims pages.
    /// Returns the deleted generation keys.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidLifecycle` unless installation succeeded,
    /// or a storage error.
    pub async fn on_activate(&self) -> CacheResult<Vec<CacheVersion>> {
        let state = self.state();
        if !matches!(
            state,
            LifecycleState::Installed | LifecycleState::Activated
        ) {
            return Err(CacheError::InvalidLifecycle {
                action: "activate",
                state: state.as_str(),
            });
        }

        let stale: Vec<CacheVersion> = self
            .storage
            .versions()
            .await?
            .into_iter()
            .filter(|version| version != &self.version)
            .collect();

        try_join_all(stale.iter().map(|version| self.storage.delete(version))).await?;

        for version in &stale {
            info!(version = %version, "Deleted stale cache generation");
        }

        let mut lifecycle = self.lifecycle.lock();
        lifecycle.clients_claimed = true;
        lifecycle.state = LifecycleState::Activated;
        info!(version = %self.version, purged = stale.len(), "Offline cache activated");

        Ok(stale)
    }

    /// Answers a page request. Never fails: unrecoverable cases produce
    /// `CachedResponse::error()`.
    pub async fn on_fetch(&self, request: &CacheRequest) -> CachedResponse {
        match request.class() {
            RequestClass::HtmlLike => self.network_first(request).await,
            RequestClass::AssetLike => self.cache_first(request).await,
        }
    }

    async fn network_first(&self, request: &CacheRequest) -> CachedResponse {
        match self.network.fetch(request).await {
            Ok(response) => {
                self.store(request, &response).await;
                response
            }
            Err(e) => {
                debug!(request = %request, error = %e, "Network failed, trying cache");
                self.cached(request).await.unwrap_or_else(|| {
                    warn!(request = %request, "Offline with no cached page");
                    CachedResponse::error()
                })
            }
        }
    }

    async fn cache_first(&self, request: &CacheRequest) -> CachedResponse {
        if let Some(hit) = self.cached(request).await {
            debug!(request = %request, "Serving asset from cache");
            return hit;
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable_asset() {
                    self.store(request, &response).await;
                } else {
                    debug!(request = %request, status = response.status(), "Not caching asset");
                }
                response
            }
            Err(e) => {
                warn!(request = %request, error = %e, "Asset unavailable offline");
                CachedResponse::error()
            }
        }
    }

    async fn cached(&self, request: &CacheRequest) -> Option<CachedResponse> {
        match self.storage.lookup(&self.version, request).await {
            Ok(found) => found,
            Err(e) => {
                warn!(request = %request, error = %e, "Cache lookup failed");
                None
            }
        }
    }

    async fn store(&self, request: &CacheRequest, response: &CachedResponse) {
        if let Err(e) = self.storage.put(&self.version, request, response).await {
            warn!(request = %request, error = %e, "Failed to cache response");
        }
    }
}
