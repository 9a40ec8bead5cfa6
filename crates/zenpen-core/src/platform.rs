//! Platform abstraction traits for editor operations.
//!
//! These traits define the interface between the editor logic and the host
//! (browser DOM, or a test double). The session only decides what should
//! happen; implementations touch the real selection, classes and storage.

use miette::Diagnostic;

use crate::actions::FormatCommand;
use crate::bubble::ToolbarState;
use crate::tree::NodeTree;
use crate::types::{SelectionSnapshot, Viewport};

/// Error type for platform operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Diagnostic)]
pub enum PlatformError {
    #[error("{0}")]
    #[diagnostic(code(zenpen::platform))]
    Message(String),

    #[error("rich-text command `{command}` failed: {reason}")]
    #[diagnostic(code(zenpen::platform::command))]
    Command {
        command: &'static str,
        reason: String,
    },

    #[error("storage write for `{key}` failed: {reason}")]
    #[diagnostic(code(zenpen::platform::storage))]
    Storage { key: String, reason: String },
}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError::Message(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError::Message(s)
    }
}

/// The host's rich-text command surface.
pub trait FormatPlatform {
    /// Execute a formatting command against the current selection.
    fn exec(&mut self, command: &FormatCommand) -> Result<(), PlatformError>;
}

/// String key/value persistence (local storage in the browser).
pub trait DocumentStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlatformError>;
}

/// Everything the editor session needs from its host.
///
/// The tree half (`NodeTree`) answers questions about the document; the
/// remaining methods read the selection and apply visual state.
/// Implementations must not dispatch events synchronously back into the
/// session; focus and blur of the link input are requested through
/// [`crate::EventOutcome`] instead.
pub trait EditorPlatform: NodeTree + FormatPlatform {
    /// A saved selection range that can be re-applied later.
    type Range: Clone;

    /// Current selection.
    fn selection(&self) -> SelectionSnapshot<Self::Node>;

    fn viewport(&self) -> Viewport;

    /// Save the first range of the current selection.
    fn capture_range(&self) -> Option<Self::Range>;

    /// Replace the current selection with a saved range.
    fn restore_range(&mut self, range: &Self::Range) -> Result<(), PlatformError>;

    /// Apply visibility, position and active-state classes to the toolbar.
    fn render_toolbar(&mut self, state: &ToolbarState);

    /// Show or hide the link input inside the toolbar.
    fn set_link_mode(&mut self, open: bool);

    fn link_input_value(&self) -> String;

    fn set_link_input_value(&mut self, value: &str);

    /// Smooth-scroll the page vertically by `dy` pixels.
    fn scroll_by(&mut self, dy: f64);

    /// Toggle the page-level focus mode class.
    fn set_focus_mode(&mut self, enabled: bool);

    /// Mark or unmark a block as the active one in focus mode.
    fn set_block_active(&mut self, block: &Self::Node, active: bool);

    fn set_save_indicator(&mut self, visible: bool);

    fn header_html(&self) -> String;

    fn content_html(&self) -> String;

    fn set_header_html(&mut self, html: &str);

    fn set_content_html(&mut self, html: &str);

    /// The editable content container.
    fn content_root(&self) -> Self::Node;

    /// Place a collapsed caret at `offset` inside the header field.
    fn place_caret_in_header(&mut self, offset: u32) -> Result<(), PlatformError>;
}
