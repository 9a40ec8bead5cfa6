//! Ancestor capability scan over tree-like documents.
//!
//! The editor never keeps its own document model; it asks the host tree
//! (the browser DOM, or [`MemoryTree`] in tests and native hosts) about parent
//! links, node names and link targets. Everything the bubble controller and
//! focus mode need is expressed through the [`NodeTree`] trait.

use std::collections::BTreeSet;
use std::fmt;

use smol_str::SmolStr;

use crate::actions::FormatKind;

/// Coarse node classification, mirroring DOM `nodeType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    Document,
    Other,
}

/// Read-only view of a tree of nodes.
///
/// Node names follow DOM conventions: upper-case tag names for elements
/// (`"B"`, `"ARTICLE"`), `"#text"` for text nodes.
pub trait NodeTree {
    /// Opaque node handle.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Parent of `node`, or None at the root.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Children of `node` in document order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn kind(&self, node: &Self::Node) -> NodeKind;

    fn name(&self, node: &Self::Node) -> SmolStr;

    /// Node value (text content for text and comment nodes).
    fn value(&self, node: &Self::Node) -> Option<String>;

    /// Resolved target URL if `node` is a hyperlink element.
    fn link_target(&self, node: &Self::Node) -> Option<String>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
}

/// Set of node names seen between a node and the document root.
///
/// Also carries the target URL of an enclosing hyperlink, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorSet {
    names: BTreeSet<SmolStr>,
    link: Option<String>,
}

impl AncestorSet {
    /// Check whether a node with this name was seen.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Check whether the given formatting kind encloses the scanned node.
    pub fn has_format(&self, kind: FormatKind) -> bool {
        self.contains(kind.tag())
    }

    /// Target URL of the enclosing link.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(SmolStr::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Walk from `node` up through parent links, collecting node names.
///
/// The root itself (the node without a parent) is not recorded. When an
/// ancestor is a hyperlink element its target URL is recorded; with nested
/// links the outermost one wins.
pub fn scan_ancestors<T: NodeTree + ?Sized>(tree: &T, node: &T::Node) -> AncestorSet {
    let mut set = AncestorSet::default();
    let mut current = node.clone();

    while let Some(parent) = tree.parent(&current) {
        set.names.insert(tree.name(&current));
        if tree.name(&parent) == FormatKind::Link.tag() {
            set.link = tree.link_target(&parent);
        }
        current = parent;
    }

    set
}

/// Find the direct child of the editable container that holds `node`.
///
/// The container is recognised by tag name or by class. Returns the child
/// regardless of its kind; callers decide whether it can be marked.
pub fn enclosing_block<T: NodeTree + ?Sized>(
    tree: &T,
    node: &T::Node,
    container_tag: &str,
    container_class: &str,
) -> Option<T::Node> {
    let mut current = node.clone();

    while let Some(parent) = tree.parent(&current) {
        if tree.name(&parent) == container_tag || tree.has_class(&parent, container_class) {
            return Some(current);
        }
        current = parent;
    }

    None
}

/// Handle into a [`MemoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct MemoryNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
    name: SmolStr,
    value: Option<String>,
    href: Option<String>,
    classes: Vec<SmolStr>,
}

impl MemoryNode {
    fn new(parent: Option<NodeId>, kind: NodeKind, name: SmolStr) -> Self {
        Self {
            parent,
            children: Vec::new(),
            kind,
            name,
            value: None,
            href: None,
            classes: Vec::new(),
        }
    }
}

/// Arena-backed tree for hosts without a DOM.
///
/// Starts with a single `#document` root; element, text and comment nodes are
/// appended under existing nodes.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    nodes: Vec<MemoryNode>,
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![MemoryNode::new(
                None,
                NodeKind::Document,
                SmolStr::new_static("#document"),
            )],
        }
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, parent: NodeId, node: MemoryNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append an element. The tag is stored upper-cased.
    pub fn element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let name = SmolStr::new(tag.to_ascii_uppercase());
        self.push(parent, MemoryNode::new(Some(parent), NodeKind::Element, name))
    }

    /// Append a hyperlink element pointing at `href`.
    pub fn link(&mut self, parent: NodeId, href: &str) -> NodeId {
        let id = self.element(parent, "a");
        self.nodes[id.0].href = Some(href.to_string());
        id
    }

    pub fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let mut node = MemoryNode::new(Some(parent), NodeKind::Text, SmolStr::new_static("#text"));
        node.value = Some(text.to_string());
        self.push(parent, node)
    }

    pub fn comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        let mut node = MemoryNode::new(
            Some(parent),
            NodeKind::Comment,
            SmolStr::new_static("#comment"),
        );
        node.value = Some(text.to_string());
        self.push(parent, node)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(SmolStr::new(class));
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    /// Rename an element in place, as a block reformat does.
    pub fn rename(&mut self, node: NodeId, tag: &str) {
        self.nodes[node.0].name = SmolStr::new(tag.to_ascii_uppercase());
    }

    /// Drop all children of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        for child in std::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
        }
    }

    /// All nodes currently carrying `class`.
    pub fn with_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.classes.iter().any(|c| c == class))
            .map(|(i, _)| NodeId(i))
            .collect()
    }
}

impl NodeTree for MemoryTree {
    type Node = NodeId;

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn kind(&self, node: &NodeId) -> NodeKind {
        self.nodes
            .get(node.0)
            .map(|n| n.kind)
            .unwrap_or(NodeKind::Other)
    }

    fn name(&self, node: &NodeId) -> SmolStr {
        self.nodes
            .get(node.0)
            .map(|n| n.name.clone())
            .unwrap_or_default()
    }

    fn value(&self, node: &NodeId) -> Option<String> {
        self.nodes.get(node.0)?.value.clone()
    }

    fn link_target(&self, node: &NodeId) -> Option<String> {
        self.nodes.get(node.0)?.href.clone()
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes
            .get(node.0)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }
}
