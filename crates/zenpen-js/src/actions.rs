//! Formatting actions callable from JavaScript.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;
use zenpen_core::FormatKind;

/// A toolbar action, as triggered from a host keyboard shortcut.
///
/// Behaves exactly like clicking the matching toolbar control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum JsFormatAction {
    Bold,
    Italic,
    Quote,
    Link,
}

impl From<JsFormatAction> for FormatKind {
    fn from(action: JsFormatAction) -> Self {
        match action {
            JsFormatAction::Bold => FormatKind::Bold,
            JsFormatAction::Italic => FormatKind::Italic,
            JsFormatAction::Quote => FormatKind::Quote,
            JsFormatAction::Link => FormatKind::Link,
        }
    }
}
