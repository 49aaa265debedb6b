use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use inspo_clock::application::{LifecycleState, OfflineCacheManager};
use inspo_clock::domain::entities::{
    CacheRequest, CacheVersion, CachedResponse, CoreAssetSet, ResponseKind,
};
use inspo_clock::domain::errors::NetworkError;
use inspo_clock::domain::ports::{CacheStoragePort, NetworkPort};
use inspo_clock::infrastructure::{DiskCacheStorage, HttpNetwork, MemoryCacheStorage};

/// Network double serving fixed bodies that can be switched offline.
struct FakeNetwork {
    online: AtomicBool,
    calls: AtomicUsize,
    bodies: HashMap<String, &'static str>,
}

impl FakeNetwork {
    fn new(routes: &[(&str, &'static str)]) -> Self {
        Self {
            online: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
            bodies: routes
                .iter()
                .map(|(url, body)| ((*url).to_string(), *body))
                .collect(),
        }
    }

    fn go_offline(&self) {
        self.online.store(false, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkPort for FakeNetwork {
    async fn fetch(&self, request: &CacheRequest) -> Result<CachedResponse, NetworkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.online.load(Ordering::SeqCst) {
            return Err(NetworkError::unreachable(request.url(), "offline"));
        }
        Ok(match self.bodies.get(request.url()) {
            Some(body) => CachedResponse::new(200, *body),
            None => CachedResponse::new(404, "not found"),
        })
    }
}

fn version(name: &str) -> CacheVersion {
    CacheVersion::new(name).unwrap()
}

fn manager(
    storage: Arc<dyn CacheStoragePort>,
    network: Arc<FakeNetwork>,
    name: &str,
    core: &[&str],
) -> OfflineCacheManager {
    let core = CoreAssetSet::new(core.iter().copied());
    OfflineCacheManager::new(storage, network, version(name), core)
}

#[tokio::test]
async fn installed_manifest_is_served_offline() {
    let storage = Arc::new(MemoryCacheStorage::new());
    let network = Arc::new(FakeNetwork::new(&[
        ("/", "<html>root</html>"),
        ("/index.html", "<html>index</html>"),
        ("/manifest.webmanifest", r#"{"name":"Inspo Clock"}"#),
    ]));
    let manager = manager(
        storage.clone(),
        network.clone(),
        "inspo-clock-v1",
        &["/", "/index.html", "/manifest.webmanifest"],
    );

    assert_eq!(manager.on_install().await.unwrap(), 3);
    manager.on_activate().await.unwrap();
    assert_eq!(manager.state(), LifecycleState::Activated);

    network.go_offline();
    let response = manager
        .on_fetch(&CacheRequest::get("/manifest.webmanifest"))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.body().as_ref(), br#"{"name":"Inspo Clock"}"#);
    assert_eq!(network.calls(), 3);
}

#[tokio::test]
async fn navigation_falls_back_to_last_online_copy() {
    let storage = Arc::new(MemoryCacheStorage::new());
    let network = Arc::new(FakeNetwork::new(&[("/today", "A")]));
    let manager = manager(storage.clone(), network.clone(), "inspo-clock-v1", &[]);

    let online = manager.on_fetch(&CacheRequest::navigate("/today")).await;
    assert_eq!(online.body().as_ref(), b"A");
    assert_eq!(storage.len(&version("inspo-clock-v1")).await, Some(1));

    network.go_offline();
    let offline = manager.on_fetch(&CacheRequest::navigate("/today")).await;

    assert_eq!(offline.status(), 200);
    assert_eq!(offline.body().as_ref(), b"A");
    assert_eq!(network.calls(), 2);
}

#[tokio::test]
async fn uncached_navigation_offline_is_network_error() {
    let network = Arc::new(FakeNetwork::new(&[]));
    network.go_offline();
    let manager = manager(
        Arc::new(MemoryCacheStorage::new()),
        network,
        "inspo-clock-v1",
        &[],
    );

    let response = manager.on_fetch(&CacheRequest::navigate("/never")).await;

    assert!(response.is_error());
    assert_eq!(response.kind(), ResponseKind::Error);
}

#[tokio::test]
async fn failed_install_leaves_nothing_behind() {
    let storage = Arc::new(MemoryCacheStorage::new());
    let network = Arc::new(FakeNetwork::new(&[("/", "root")]));
    let manager = manager(
        storage.clone(),
        network,
        "inspo-clock-v1",
        &["/", "/missing.png"],
    );

    assert!(manager.on_install().await.is_err());
    assert_eq!(manager.state(), LifecycleState::Redundant);
    assert_eq!(storage.len(&version("inspo-clock-v1")).await.unwrap_or(0), 0);
}

#[tokio::test]
async fn new_version_on_disk_replaces_old_one() {
    let dir = tempfile::tempdir().unwrap();
    let routes = [("./", "shell"), ("./index.html", "index")];
    let core = ["./", "./index.html"];

    {
        let storage = Arc::new(DiskCacheStorage::new(dir.path()).await.unwrap());
        let network = Arc::new(FakeNetwork::new(&routes));
        let old = manager(storage, network, "inspo-clock-v1", &core);
        old.on_install().await.unwrap();
        old.on_activate().await.unwrap();
    }

    let storage = Arc::new(DiskCacheStorage::new(dir.path()).await.unwrap());
    let network = Arc::new(FakeNetwork::new(&routes));
    let next = manager(storage.clone(), network.clone(), "inspo-clock-v2", &core);
    next.on_install().await.unwrap();
    let purged = next.on_activate().await.unwrap();

    assert_eq!(purged, vec![version("inspo-clock-v1")]);
    assert_eq!(storage.versions().await.unwrap(), vec![version("inspo-clock-v2")]);

    network.go_offline();
    let response = next.on_fetch(&CacheRequest::get("./index.html")).await;
    assert_eq!(response.body().as_ref(), b"index");
}

#[tokio::test]
async fn any_spelling_of_an_installed_asset_hits_offline() {
    let origin = HttpNetwork::new("http://localhost:8080/", None).unwrap();
    let network = Arc::new(FakeNetwork::new(&[
        ("http://localhost:8080/", "shell"),
        ("http://localhost:8080/index.html", "index"),
        ("http://localhost:8080/manifest.webmanifest", "manifest"),
        ("http://localhost:8080/icons/icon-192.png", "icon192"),
        ("http://localhost:8080/icons/icon-512.png", "icon512"),
    ]));
    let manager = OfflineCacheManager::new(
        Arc::new(MemoryCacheStorage::new()),
        network.clone(),
        version("inspo-clock-v1"),
        origin.canonical_assets(&CoreAssetSet::default()).unwrap(),
    );
    manager.on_install().await.unwrap();
    network.go_offline();

    for url in [
        "./manifest.webmanifest",
        "/manifest.webmanifest",
        "http://localhost:8080/manifest.webmanifest",
    ] {
        let request = origin.canonicalize(CacheRequest::get(url)).unwrap();
        let response = manager.on_fetch(&request).await;
        assert!(!response.is_error(), "{url} missed the cache");
        assert_eq!(response.body().as_ref(), b"manifest");
    }
}
