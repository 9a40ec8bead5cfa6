//! Formatting commands and key input types.
//!
//! `FormatCommand` is the vocabulary the core uses to talk to the host's
//! rich-text command surface. The core decides *when* to issue a command; the
//! host (`document.execCommand` in the browser) decides how to carry it out.

use smol_str::SmolStr;

use crate::tree::AncestorSet;

/// Target of a placeholder link inserted while the user types a URL.
pub const PLACEHOLDER_LINK: &str = "/";

/// The four formatting kinds the bubble reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Bold,
    Italic,
    Quote,
    Link,
}

impl FormatKind {
    pub const ALL: [FormatKind; 4] = [
        FormatKind::Bold,
        FormatKind::Italic,
        FormatKind::Quote,
        FormatKind::Link,
    ];

    /// Element name that carries this formatting.
    pub fn tag(self) -> &'static str {
        match self {
            FormatKind::Bold => "B",
            FormatKind::Italic => "I",
            FormatKind::Quote => "BLOCKQUOTE",
            FormatKind::Link => "A",
        }
    }

    /// Base class of the toolbar control for this kind.
    pub fn control_class(self) -> &'static str {
        match self {
            FormatKind::Bold => "bold",
            FormatKind::Italic => "italic",
            FormatKind::Quote => "quote",
            FormatKind::Link => "url",
        }
    }
}

/// Block element a paragraph can be reformatted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Paragraph,
    Blockquote,
}

impl BlockTag {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockTag::Paragraph => "p",
            BlockTag::Blockquote => "blockquote",
        }
    }
}

/// Rich-text operations understood by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    /// Toggle bold on the selection.
    Bold,
    /// Toggle italic on the selection.
    Italic,
    /// Convert the enclosing block.
    FormatBlock(BlockTag),
    /// Remove one level of indentation.
    Outdent,
    /// Wrap the selection in a link.
    CreateLink(String),
    /// Remove links from the selection.
    Unlink,
}

impl FormatCommand {
    /// Command name as understood by `document.execCommand`.
    pub fn name(&self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::FormatBlock(_) => "formatBlock",
            FormatCommand::Outdent => "outdent",
            FormatCommand::CreateLink(_) => "createLink",
            FormatCommand::Unlink => "unlink",
        }
    }

    /// Command argument, if the command takes one.
    pub fn value(&self) -> Option<&str> {
        match self {
            FormatCommand::FormatBlock(tag) => Some(tag.as_str()),
            FormatCommand::CreateLink(url) => Some(url),
            _ => None,
        }
    }
}

/// Commands that toggle a block quote around the current selection.
///
/// Inside a quote the block goes back to a paragraph and loses one level of
/// indentation; anywhere else it becomes a quote.
pub fn quote_toggle(ancestors: &AncestorSet) -> Vec<FormatCommand> {
    if ancestors.has_format(FormatKind::Quote) {
        vec![
            FormatCommand::FormatBlock(BlockTag::Paragraph),
            FormatCommand::Outdent,
        ]
    } else {
        vec![FormatCommand::FormatBlock(BlockTag::Blockquote)]
    }
}

/// Prefix `http://` unless the URL already starts with `http://` or `https://`.
///
/// The check is case-sensitive and nothing else is validated. Empty input
/// yields None.
pub fn normalize_link_url(url: &str) -> Option<String> {
    if url.is_empty() {
        None
    } else if url.starts_with("http://") || url.starts_with("https://") {
        Some(url.to_string())
    } else {
        Some(format!("http://{url}"))
    }
}

/// Commands applying a typed URL to the restored selection.
pub fn link_commands(url: &str) -> Vec<FormatCommand> {
    let mut commands = vec![FormatCommand::Unlink];
    if let Some(url) = normalize_link_url(url) {
        commands.push(FormatCommand::CreateLink(url));
    }
    commands
}

/// Key values the editor reacts to.
///
/// Platform-specific code converts from native key events to this enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    /// A character key.
    Character(SmolStr),
    /// Anything else, by its platform name.
    Other(SmolStr),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            k if k.chars().count() == 1 => Key::Character(SmolStr::new(k)),
            k => Key::Other(SmolStr::new(k)),
        }
    }
}

/// Result of handling a key or pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The host should call `preventDefault`.
    pub prevent_default: bool,
    /// Focus the link input once the session is no longer borrowed.
    pub focus_link_input: bool,
    /// Blur the link input once the session is no longer borrowed.
    pub blur_link_input: bool,
}

impl EventOutcome {
    pub fn merge(self, other: EventOutcome) -> Self {
        Self {
            prevent_default: self.prevent_default || other.prevent_default,
            focus_link_input: self.focus_link_input || other.focus_link_input,
            blur_link_input: self.blur_link_input || other.blur_link_input,
        }
    }
}
