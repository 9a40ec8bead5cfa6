//! Editor configuration.
//!
//! Every field has a default, so hosts only pass what they want to change.
//! The JS bindings deserialize this from a plain object with camelCase keys.

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_CONTENT, DEFAULT_TITLE};
use crate::timer::Millis;

/// CSS selectors for the elements the editor binds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub header: String,
    pub content: String,
    pub text_options: String,
    /// Relative to `text_options`.
    pub options: String,
    pub bold: String,
    pub italic: String,
    pub quote: String,
    pub url: String,
    pub url_input: String,
    pub save_indicator: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: ".header".into(),
            content: ".content".into(),
            text_options: ".text-options".into(),
            options: ".options".into(),
            bold: ".bold".into(),
            italic: ".italic".into(),
            quote: ".quote".into(),
            url: ".url".into(),
            url_input: ".url-input".into(),
            save_indicator: ".save-indicator".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub selectors: Selectors,
    /// Delay between a collapse and hiding the toolbar.
    pub fade_delay_ms: Millis,
    /// Delay between opening the link input and inspecting the selection.
    pub link_reveal_delay_ms: Millis,
    /// Quiet period after the last save before the indicator flashes.
    pub save_indicator_delay_ms: Millis,
    /// How long the indicator stays visible.
    pub save_indicator_visible_ms: Millis,
    /// Typewriter mode ignores caret offsets from centre up to this many pixels.
    pub typewriter_threshold_px: f64,
    /// Gap between the selection's top edge and the toolbar.
    pub bubble_offset_px: f64,
    /// Caret offset inside the header after initialization.
    pub header_caret_offset: u32,
    /// Tag name of the editable article container.
    pub container_tag: String,
    /// Class of the editable content container.
    pub content_class: String,
    pub default_title: String,
    pub default_content: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            fade_delay_ms: 260.0,
            link_reveal_delay_ms: 100.0,
            save_indicator_delay_ms: 1000.0,
            save_indicator_visible_ms: 2000.0,
            typewriter_threshold_px: 20.0,
            bubble_offset_px: 5.0,
            header_caret_offset: 1,
            container_tag: "ARTICLE".into(),
            content_class: "content".into(),
            default_title: DEFAULT_TITLE.into(),
            default_content: DEFAULT_CONTENT.into(),
        }
    }
}
