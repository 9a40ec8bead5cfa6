//! Entry point for the offline service worker.
//!
//! This binary is compiled separately and registered by the page to cache
//! the editor's static assets.

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
fn main() {
    console_error_panic_hook::set_once();
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;
    use wasm_bindgen::JsCast;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );
    let _ = set_global_default(Registry::default().with(wasm_layer));

    let scope: web_sys::ServiceWorkerGlobalScope = js_sys::global().unchecked_into();
    let manifest = zenpen_sw::manifest_from_global(&scope).unwrap_or_default();

    if let Err(e) = zenpen_sw::install_handlers(&scope, manifest) {
        tracing::error!(target: "zenpen::sw", error = %e, "offline cache disabled");
    }
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
fn main() {
    eprintln!("This binary is only meant to run as a WASM service worker");
}
