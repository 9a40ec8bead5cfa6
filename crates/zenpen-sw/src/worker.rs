//! `CacheStorage` backend and event wiring inside the service worker scope.

use std::future::Future;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::{Cache, CacheStorage, ExtendableEvent, FetchEvent, Request, Response};
use web_sys::ServiceWorkerGlobalScope;

use crate::{CacheBackend, CacheError, CacheManifest, OfflineCache};

/// Global property a page build can set to override the built-in manifest.
const MANIFEST_GLOBAL: &str = "ZENPEN_CACHE_MANIFEST";

fn reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

fn to_js(error: CacheError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Browser caches and network reached through the worker's global scope.
pub struct BrowserCaches {
    scope: ServiceWorkerGlobalScope,
    caches: CacheStorage,
}

impl BrowserCaches {
    pub fn new(scope: ServiceWorkerGlobalScope) -> Result<Self, CacheError> {
        let caches = scope
            .caches()
            .map_err(|e| CacheError::Unavailable(reason(&e)))?;
        Ok(Self { scope, caches })
    }
}

impl CacheBackend for BrowserCaches {
    type Request = Request;
    type Response = Response;

    fn add_all(
        &self,
        cache_name: &str,
        urls: &[String],
    ) -> impl Future<Output = Result<(), CacheError>> {
        let open = self.caches.open(cache_name);
        let list: js_sys::Array = urls.iter().map(|u| JsValue::from_str(u)).collect();
        let name = cache_name.to_string();

        async move {
            let cache: Cache = JsFuture::from(open)
                .await
                .map_err(|e| CacheError::Open {
                    name: name.clone(),
                    reason: reason(&e),
                })?
                .unchecked_into();

            JsFuture::from(cache.add_all_with_str_sequence(&list))
                .await
                .map_err(|e| CacheError::Install {
                    version: name,
                    reason: reason(&e),
                })?;
            Ok(())
        }
    }

    fn lookup(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Option<Response>, CacheError>> {
        let promise = self.caches.match_with_request(request);
        async move {
            let value = JsFuture::from(promise)
                .await
                .map_err(|e| CacheError::Lookup(reason(&e)))?;
            Ok(value.dyn_into::<Response>().ok())
        }
    }

    fn fetch(&self, request: &Request) -> impl Future<Output = Result<Response, CacheError>> {
        let promise = self.scope.fetch_with_request(request);
        async move {
            let value = JsFuture::from(promise)
                .await
                .map_err(|e| CacheError::Network(reason(&e)))?;
            value
                .dyn_into::<Response>()
                .map_err(|v| CacheError::Network(format!("not a response: {:?}", v)))
        }
    }

    fn keys(&self) -> impl Future<Output = Result<Vec<String>, CacheError>> {
        let promise = self.caches.keys();
        async move {
            let value = JsFuture::from(promise)
                .await
                .map_err(|e| CacheError::Lookup(reason(&e)))?;
            let names: js_sys::Array = value.unchecked_into();
            Ok(names.iter().filter_map(|v| v.as_string()).collect())
        }
    }

    fn delete(&self, cache_name: &str) -> impl Future<Output = Result<bool, CacheError>> {
        let promise = self.caches.delete(cache_name);
        let name = cache_name.to_string();
        async move {
            let value = JsFuture::from(promise)
                .await
                .map_err(|e| CacheError::Delete {
                    name,
                    reason: reason(&e),
                })?;
            Ok(value.as_bool().unwrap_or(false))
        }
    }
}

/// Read a manifest override from the worker's global scope, if one is set.
pub fn manifest_from_global(scope: &ServiceWorkerGlobalScope) -> Option<CacheManifest> {
    let value = js_sys::Reflect::get(scope, &JsValue::from_str(MANIFEST_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match serde_wasm_bindgen::from_value(value) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            tracing::warn!(target: "zenpen::sw", error = %e, "ignoring invalid manifest override");
            None
        }
    }
}

/// Attach install, fetch and activate handlers for the lifetime of the worker.
pub fn install_handlers(
    scope: &ServiceWorkerGlobalScope,
    manifest: CacheManifest,
) -> Result<(), CacheError> {
    let offline = Rc::new(OfflineCache::new(
        manifest,
        BrowserCaches::new(scope.clone())?,
    ));

    let cache = offline.clone();
    EventListener::new(scope, "install", move |event| {
        let event: &ExtendableEvent = event.unchecked_ref();
        let cache = cache.clone();
        let promise = future_to_promise(async move {
            cache.install().await.map_err(to_js)?;
            Ok(JsValue::UNDEFINED)
        });
        if let Err(e) = event.wait_until(&promise) {
            tracing::error!(target: "zenpen::sw", error = %reason(&e), "waitUntil rejected");
        }
    })
    .forget();

    let cache = offline.clone();
    EventListener::new(scope, "fetch", move |event| {
        let event: &FetchEvent = event.unchecked_ref();
        let request = event.request();
        let cache = cache.clone();
        let promise = future_to_promise(async move {
            let response = cache.respond(&request).await.map_err(to_js)?;
            Ok(response.into())
        });
        if let Err(e) = event.respond_with(&promise) {
            tracing::error!(target: "zenpen::sw", error = %reason(&e), "respondWith rejected");
        }
    })
    .forget();

    let cache = offline;
    EventListener::new(scope, "activate", move |event| {
        let event: &ExtendableEvent = event.unchecked_ref();
        let cache = cache.clone();
        let promise = future_to_promise(async move {
            cache.activate().await.map_err(to_js)?;
            Ok(JsValue::UNDEFINED)
        });
        if let Err(e) = event.wait_until(&promise) {
            tracing::error!(target: "zenpen::sw", error = %reason(&e), "waitUntil rejected");
        }
    })
    .forget();

    Ok(())
}
