//! ZenPen - the editor wrapper for JavaScript.

use std::fmt::Display;

use wasm_bindgen::prelude::*;
use zenpen_browser::EditorHandle;
use zenpen_core::{EditorConfig, EditorError};

use crate::actions::JsFormatAction;

fn js_error(e: impl Display) -> JsError {
    JsError::new(&e.to_string())
}

/// The editor instance exposed to JavaScript.
///
/// Construct with an optional configuration object, then call `init()` once
/// the page markup is in place.
#[wasm_bindgen]
pub struct ZenPen {
    config: EditorConfig,
    handle: Option<EditorHandle>,
}

impl ZenPen {
    fn handle(&self) -> Result<&EditorHandle, JsError> {
        self.handle
            .as_ref()
            .ok_or_else(|| JsError::new("editor is not initialized; call init() first"))
    }
}

#[wasm_bindgen]
impl ZenPen {
    /// Create an editor. Every configuration key is optional.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ZenPen, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| js_error(EditorError::Config(e.to_string())))?
        };

        Ok(Self {
            config,
            handle: None,
        })
    }

    /// Bind the page, load saved or default content and start listening.
    ///
    /// Calling it again remounts the editor.
    pub fn init(&mut self) -> Result<(), JsError> {
        self.handle.take();
        let handle = EditorHandle::mount(self.config.clone()).map_err(js_error)?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Persist header and content now.
    #[wasm_bindgen(js_name = saveState)]
    pub fn save_state(&self) -> Result<(), JsError> {
        self.handle()?.save_state().map_err(js_error)
    }

    /// Number of words in the content field. Zero before `init()`.
    #[wasm_bindgen(js_name = getWordCount)]
    pub fn get_word_count(&self) -> usize {
        self.handle
            .as_ref()
            .map(EditorHandle::word_count)
            .unwrap_or(0)
    }

    /// Returns whether typewriter mode is now on.
    #[wasm_bindgen(js_name = toggleTypewriterMode)]
    pub fn toggle_typewriter_mode(&self) -> Result<bool, JsError> {
        Ok(self.handle()?.toggle_typewriter_mode())
    }

    /// Returns whether focus mode is now on.
    #[wasm_bindgen(js_name = toggleFocusMode)]
    pub fn toggle_focus_mode(&self) -> Result<bool, JsError> {
        Ok(self.handle()?.toggle_focus_mode())
    }

    /// Run a toolbar action against the current selection.
    #[wasm_bindgen(js_name = applyFormat)]
    pub fn apply_format(&self, action: JsFormatAction) -> Result<(), JsError> {
        self.handle()?.apply_format(action.into());
        Ok(())
    }

    /// Detach every listener and cancel pending timers.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.destroy();
        }
    }

    /// Register the offline service worker script.
    #[cfg(all(target_family = "wasm", target_os = "unknown"))]
    #[wasm_bindgen(js_name = registerServiceWorker)]
    pub fn register_service_worker(script_url: String) -> js_sys::Promise {
        wasm_bindgen_futures::future_to_promise(async move {
            zenpen_sw::host::register_service_worker(&script_url).await?;
            Ok(JsValue::UNDEFINED)
        })
    }
}
