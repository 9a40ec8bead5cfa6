//! Page-side registration of the offline service worker.
//!
//! # Example
//!
//! ```ignore
//! wasm_bindgen_futures::spawn_local(async {
//!     if let Err(e) = zenpen_sw::host::register_service_worker("./sw.js").await {
//!         tracing::warn!("service worker unavailable: {:?}", e);
//!     }
//! });
//! ```

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Register the worker script at `script_url` for the current page.
///
/// Resolves once the browser has accepted the registration; installation
/// continues in the background.
pub async fn register_service_worker(script_url: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let container = window.navigator().service_worker();

    tracing::debug!(target: "zenpen::sw", script_url, "registering service worker");
    JsFuture::from(container.register(script_url)).await?;
    tracing::debug!(target: "zenpen::sw", "service worker registered");

    Ok(())
}
