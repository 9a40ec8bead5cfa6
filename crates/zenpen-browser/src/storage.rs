//! Local storage access for autosave.
//!
//! Markup is stored as raw strings under the `header` and `content` keys, so
//! this goes through the underlying `Storage` object rather than gloo's JSON
//! helpers.

use gloo_storage::{LocalStorage, Storage};
use zenpen_core::{DocumentStore, PlatformError};

const PROBE_KEY: &str = "zenpen:probe";

/// Check whether local storage exists and accepts writes.
///
/// Some browsers expose `localStorage` but throw on access or on the first
/// write (private browsing, disabled by policy).
pub fn supports_local_storage() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let storage = match window.local_storage() {
        Ok(Some(storage)) => storage,
        _ => return false,
    };

    let writable = storage.set_item(PROBE_KEY, PROBE_KEY).is_ok();
    let _ = storage.remove_item(PROBE_KEY);

    tracing::debug!(target: "zenpen::storage", writable, "local storage probe");
    writable
}

/// [`DocumentStore`] backed by `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDocumentStore;

impl LocalDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for LocalDocumentStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlatformError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| PlatformError::Storage {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
