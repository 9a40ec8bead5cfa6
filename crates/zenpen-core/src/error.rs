//! Session-level errors.

use miette::Diagnostic;

use crate::platform::PlatformError;

/// Main error type for editor session operations.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum EditorError {
    /// Host platform failure
    #[error(transparent)]
    #[diagnostic(transparent)]
    Platform(#[from] PlatformError),

    /// A required element could not be bound
    #[error("required element `{selector}` is missing")]
    #[diagnostic(
        code(zenpen::bind),
        help("the page must contain an element matching `{selector}`")
    )]
    MissingElement { selector: String },

    /// Configuration could not be read
    #[error("invalid editor configuration: {0}")]
    #[diagnostic(code(zenpen::config))]
    Config(String),
}

impl EditorError {
    pub fn missing(selector: impl Into<String>) -> Self {
        EditorError::MissingElement {
            selector: selector.into(),
        }
    }
}
