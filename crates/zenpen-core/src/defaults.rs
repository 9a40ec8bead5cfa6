//! Built-in content shown when nothing has been saved yet.

pub const DEFAULT_TITLE: &str = "ZenPen";

pub const DEFAULT_CONTENT: &str = concat!(
    "<p>This is a minimalist writing space. Nothing here but you and your words.</p>",
    "<p>Select any text to bring up the formatting bubble. From there you can make ",
    "text <b>bold</b>, <i>italic</i>, turn a paragraph into a quote, or add a link.</p>",
    "<blockquote>Quotes stand apart from the rest of the page.</blockquote>",
    "<p>Everything you write is saved in this browser as you type. ",
    "Typewriter mode keeps the caret in the middle of the screen, and focus mode ",
    "dims every paragraph except the one you are working on.</p>",
);
