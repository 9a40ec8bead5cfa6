//! Install, fetch and activate logic over an abstract cache store.

use std::future::Future;

use crate::{CacheError, CacheManifest};

/// The cache and network operations the worker relies on.
///
/// In the browser this is `CacheStorage` plus `fetch`; tests use an
/// in-memory double.
pub trait CacheBackend {
    type Request;
    type Response;

    /// Open `cache_name` and store every URL. Fails as a whole if any
    /// single URL cannot be fetched.
    fn add_all(
        &self,
        cache_name: &str,
        urls: &[String],
    ) -> impl Future<Output = Result<(), CacheError>>;

    /// Look a request up across all caches.
    fn lookup(
        &self,
        request: &Self::Request,
    ) -> impl Future<Output = Result<Option<Self::Response>, CacheError>>;

    /// Pass a request through to the network.
    fn fetch(
        &self,
        request: &Self::Request,
    ) -> impl Future<Output = Result<Self::Response, CacheError>>;

    /// Names of every existing cache.
    fn keys(&self) -> impl Future<Output = Result<Vec<String>, CacheError>>;

    fn delete(&self, cache_name: &str) -> impl Future<Output = Result<bool, CacheError>>;
}

/// Offline cache manager for one manifest.
pub struct OfflineCache<B> {
    manifest: CacheManifest,
    backend: B,
}

impl<B: CacheBackend> OfflineCache<B> {
    pub fn new(manifest: CacheManifest, backend: B) -> Self {
        Self { manifest, backend }
    }

    pub fn manifest(&self) -> &CacheManifest {
        &self.manifest
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Populate the current cache with the full asset list.
    pub async fn install(&self) -> Result<(), CacheError> {
        tracing::info!(
            target: "zenpen::sw",
            version = %self.manifest.version,
            assets = self.manifest.assets.len(),
            "installing"
        );
        self.backend
            .add_all(&self.manifest.version, &self.manifest.assets)
            .await
    }

    /// Serve from cache, falling back to the network without caching.
    pub async fn respond(&self, request: &B::Request) -> Result<B::Response, CacheError> {
        if let Some(response) = self.backend.lookup(request).await? {
            return Ok(response);
        }
        self.backend.fetch(request).await
    }

    /// Delete every cache other than the current version.
    ///
    /// Returns the names that were removed.
    pub async fn activate(&self) -> Result<Vec<String>, CacheError> {
        let mut removed = Vec::new();
        for name in self.backend.keys().await? {
            if name != self.manifest.version && self.backend.delete(&name).await? {
                tracing::debug!(target: "zenpen::sw", cache = %name, "removed stale cache");
                removed.push(name);
            }
        }
        Ok(removed)
    }
}
