//! Plain-text helpers: trimming, markup-to-text extraction and word counts.

use crate::tree::{NodeKind, NodeTree};

/// Strip leading and trailing whitespace.
pub fn trim(s: &str) -> &str {
    s.trim()
}

/// Extract the plain text under `node`.
///
/// Text nodes contribute their value, comment nodes are skipped and element
/// nodes contribute their own extraction. Every level is trimmed, so the
/// text of adjacent blocks is joined without a separator.
pub fn extract_text<T: NodeTree + ?Sized>(tree: &T, node: &T::Node) -> String {
    let mut out = String::from(" ");

    for child in tree.children(node) {
        match tree.kind(&child) {
            NodeKind::Comment => {}
            NodeKind::Element => out.push_str(&extract_text(tree, &child)),
            _ => {
                if let Some(value) = tree.value(&child) {
                    out.push_str(&value);
                }
            }
        }
    }

    trim(&out).to_string()
}

/// Count whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
    let text = trim(text);
    if text.is_empty() {
        0
    } else {
        text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemoryTree;

    #[test]
    fn test_trim() {
        assert_eq!(trim("  a b \n\t"), "a b");
        assert_eq!(trim("   "), "");
    }

    #[test]
    fn test_word_count_empty() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count(" \n "), 0);
    }

    #[test]
    fn test_word_count_collapses_whitespace() {
        assert_eq!(word_count("  hello   world  "), 2);
        assert_eq!(word_count("one\ttwo\nthree"), 3);
    }

    #[test]
    fn test_extract_text_skips_comments() {
        let mut tree = MemoryTree::new();
        let root = tree.root();
        let article = tree.element(root, "article");
        let p = tree.element(article, "p");
        tree.text(p, "  hello ");
        tree.comment(p, "not counted");
        let b = tree.element(p, "b");
        tree.text(b, " world  ");

        assert_eq!(extract_text(&tree, &article), "hello world");
        assert_eq!(word_count(&extract_text(&tree, &article)), 2);
    }

    #[test]
    fn test_extract_text_of_empty_container() {
        let mut tree = MemoryTree::new();
        let root = tree.root();
        let article = tree.element(root, "article");
        assert_eq!(extract_text(&tree, &article), "");
        assert_eq!(word_count(&extract_text(&tree, &article)), 0);
    }

    #[test]
    fn test_extract_text_joins_blocks_without_separator() {
        let mut tree = MemoryTree::new();
        let root = tree.root();
        let article = tree.element(root, "article");
        let p1 = tree.element(article, "p");
        tree.text(p1, "first");
        let p2 = tree.element(article, "p");
        tree.text(p2, "second");
        assert_eq!(extract_text(&tree, &article), "firstsecond");
    }
}
