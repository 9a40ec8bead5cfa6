//! Browser DOM layer for the zenpen editor.
//!
//! This crate binds an [`EditorSession`] to a live page. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: `NodeTree` over `web_sys::Node`
//! - `platform`: element binding, toolbar rendering, `execCommand`
//! - `storage`: local storage probe and `DocumentStore`
//! - `events`: listeners, timers and the mounted `EditorHandle`
//!
//! # Re-exports
//!
//! This crate re-exports `zenpen-core` for convenience, so consumers only
//! need to depend on `zenpen-browser`.

// Re-export core crate
pub use zenpen_core;
pub use zenpen_core::*;

pub mod dom;
pub mod events;
pub mod platform;
pub mod storage;

pub use events::{BrowserSession, EditorHandle, event_origin, now};
pub use platform::BrowserPlatform;
pub use storage::{LocalDocumentStore, supports_local_storage};
