//! Typewriter and focus display modes.

use crate::tree::{NodeKind, NodeTree, enclosing_block};
use crate::types::Viewport;

/// Session-only display toggles. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayModes {
    pub typewriter: bool,
    pub focus: bool,
}

/// Scroll needed to bring the caret to the vertical centre of the viewport.
///
/// Positive values scroll down. Offsets of `threshold` pixels or less are
/// ignored so small caret movements do not jitter the page.
pub fn typewriter_scroll(caret_top: f64, viewport: &Viewport, threshold: f64) -> Option<f64> {
    let diff = caret_top - viewport.center_y();
    (diff.abs() > threshold).then_some(diff)
}

/// Changes focus mode should apply to the active-block mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockChange<N> {
    pub unmark: Option<N>,
    pub mark: Option<N>,
}

/// Work out which block should carry the active mark for a caret in `focus`.
///
/// `current` is the block marked last time. Only element blocks are marked;
/// a caret in a bare text node directly under the container clears the mark.
/// Returns None when the caret is outside the container, leaving the mark
/// where it is.
pub fn focus_block_change<T: NodeTree + ?Sized>(
    tree: &T,
    focus: &T::Node,
    current: Option<&T::Node>,
    container_tag: &str,
    container_class: &str,
) -> Option<BlockChange<T::Node>> {
    let block = enclosing_block(tree, focus, container_tag, container_class)?;

    let unmark = current.filter(|c| **c != block).cloned();
    let mark = (tree.kind(&block) == NodeKind::Element).then_some(block);

    Some(BlockChange { unmark, mark })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemoryTree;

    #[test]
    fn test_typewriter_scrolls_by_offset_from_centre() {
        // 600px viewport, centre at 300.
        let viewport = Viewport::new(0.0, 0.0, 600.0);
        assert_eq!(typewriter_scroll(380.0, &viewport, 20.0), Some(80.0));
        assert_eq!(typewriter_scroll(220.0, &viewport, 20.0), Some(-80.0));
    }

    #[test]
    fn test_typewriter_ignores_small_offsets() {
        let viewport = Viewport::new(0.0, 0.0, 600.0);
        assert_eq!(typewriter_scroll(290.0, &viewport, 20.0), None);
        assert_eq!(typewriter_scroll(320.0, &viewport, 20.0), None);
        assert_eq!(typewriter_scroll(321.0, &viewport, 20.0), Some(21.0));
    }

    #[test]
    fn test_focus_moves_mark_between_blocks() {
        let mut tree = MemoryTree::new();
        let root = tree.root();
        let article = tree.element(root, "article");
        let first = tree.element(article, "p");
        let first_text = tree.text(first, "one");
        let second = tree.element(article, "p");
        let b = tree.element(second, "b");
        let second_text = tree.text(b, "two");

        let change = focus_block_change(&tree, &first_text, None, "ARTICLE", "content");
        assert_eq!(
            change,
            Some(BlockChange {
                unmark: None,
                mark: Some(first)
            })
        );

        let change = focus_block_change(&tree, &second_text, Some(&first), "ARTICLE", "content");
        assert_eq!(
            change,
            Some(BlockChange {
                unmark: Some(first),
                mark: Some(second)
            })
        );

        let change = focus_block_change(&tree, &second_text, Some(&second), "ARTICLE", "content");
        assert_eq!(
            change,
            Some(BlockChange {
                unmark: None,
                mark: Some(second)
            })
        );
    }

    #[test]
    fn test_focus_on_bare_text_clears_mark() {
        let mut tree = MemoryTree::new();
        let root = tree.root();
        let article = tree.element(root, "article");
        let p = tree.element(article, "p");
        let loose = tree.text(article, "loose");

        let change = focus_block_change(&tree, &loose, Some(&p), "ARTICLE", "content");
        assert_eq!(
            change,
            Some(BlockChange {
                unmark: Some(p),
                mark: None
            })
        );
    }

    #[test]
    fn test_focus_outside_container_is_ignored() {
        let mut tree = MemoryTree::new();
        let root = tree.root();
        let header = tree.element(root, "header");
        let text = tree.text(header, "Title");

        assert_eq!(
            focus_block_change(&tree, &text, None, "ARTICLE", "content"),
            None
        );
    }
}
