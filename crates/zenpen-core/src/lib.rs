//! zenpen-core: platform-agnostic editor logic for the zenpen writing surface.
//!
//! This crate provides:
//! - `NodeTree` trait for ancestor scans over any tree (DOM or [`MemoryTree`])
//! - `BubbleController` - selection tracking and toolbar state
//! - `EditorSession<P, S>` - autosave, display modes and link editing,
//!   generic over an `EditorPlatform` and a `DocumentStore`
//! - Explicit timer state so hosts drive time and tests stay deterministic

pub mod actions;
pub mod autosave;
pub mod bubble;
pub mod config;
pub mod defaults;
pub mod error;
pub mod link;
pub mod modes;
pub mod platform;
pub mod session;
pub mod text;
pub mod timer;
pub mod tree;
pub mod types;

pub use actions::{
    BlockTag, EventOutcome, FormatCommand, FormatKind, Key, PLACEHOLDER_LINK, link_commands,
    normalize_link_url, quote_toggle,
};
pub use autosave::{
    CONTENT_KEY, HEADER_KEY, IndicatorChange, MemoryStore, PersistedDocument, SaveIndicator,
    load_document, save_document,
};
pub use bubble::{
    BubbleController, BubbleVisibility, FormatFlags, OFFSCREEN, ToolbarState, bubble_position,
};
pub use config::{EditorConfig, Selectors};
pub use error::EditorError;
pub use link::LinkEditor;
pub use modes::{BlockChange, DisplayModes, focus_block_change, typewriter_scroll};
pub use platform::{DocumentStore, EditorPlatform, FormatPlatform, PlatformError};
pub use session::EditorSession;
pub use smol_str::SmolStr;
pub use text::{extract_text, trim, word_count};
pub use timer::{DeferredQueue, Millis, TimerState, earliest};
pub use tree::{AncestorSet, MemoryTree, NodeId, NodeKind, NodeTree, enclosing_block, scan_ancestors};
pub use types::{EventOrigin, Point, Rect, SelectionSnapshot, Viewport};
