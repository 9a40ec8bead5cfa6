//! Service worker that keeps the zenpen assets available offline.
//!
//! The static asset set is cached once at install under a versioned cache
//! name. Fetches are answered from that cache when possible and passed
//! through to the network otherwise. Activation removes every cache whose
//! name is not the current version.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

pub mod offline;

pub use offline::{CacheBackend, OfflineCache};

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub mod host;

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
mod worker;

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use worker::{BrowserCaches, install_handlers, manifest_from_global};

/// Current cache name. Bumping it invalidates every older cache.
pub const CACHE_VERSION: &str = "zenpen-v1";

/// Assets cached at install, in order.
pub const DEFAULT_ASSETS: [&str; 12] = [
    "./",
    "./index.html",
    "./css/style.css",
    "./css/fonts.css",
    "./js/editor.js",
    "./js/ui.js",
    "./js/utils.js",
    "./js/default.js",
    "./js/libs/FileSaver.min.js",
    "./js/libs/Blob.min.js",
    "./js/libs/screenfull.min.js",
    "//fonts.googleapis.com/css?family=Lora:400,700,400italic,700italic",
];

/// Versioned list of assets to keep offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheManifest {
    pub version: String,
    pub assets: Vec<String>,
}

impl Default for CacheManifest {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION.to_string(),
            assets: DEFAULT_ASSETS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Errors from cache storage and network access.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Diagnostic)]
pub enum CacheError {
    #[error("failed to open cache `{name}`: {reason}")]
    #[diagnostic(code(zenpen_sw::open))]
    Open { name: String, reason: String },

    #[error("failed to cache assets for `{version}`: {reason}")]
    #[diagnostic(
        code(zenpen_sw::install),
        help("every asset in the manifest must be reachable; the install is retried by the browser")
    )]
    Install { version: String, reason: String },

    #[error("cache lookup failed: {0}")]
    #[diagnostic(code(zenpen_sw::lookup))]
    Lookup(String),

    #[error("network fetch failed: {0}")]
    #[diagnostic(code(zenpen_sw::network))]
    Network(String),

    #[error("failed to delete cache `{name}`: {reason}")]
    #[diagnostic(code(zenpen_sw::delete))]
    Delete { name: String, reason: String },

    #[error("cache storage unavailable: {0}")]
    #[diagnostic(code(zenpen_sw::unavailable))]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let manifest = CacheManifest::default();
        assert_eq!(manifest.version, "zenpen-v1");
        assert_eq!(manifest.assets.len(), 12);
        assert_eq!(manifest.assets[0], "./");
        assert!(manifest.assets[11].starts_with("//fonts.googleapis.com/"));
    }
}
