//! `NodeTree` over the live DOM.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlAnchorElement, Node};
use zenpen_core::{NodeKind, NodeTree, SmolStr};

use crate::platform::BrowserPlatform;

pub fn node_kind(node: &Node) -> NodeKind {
    match node.node_type() {
        Node::ELEMENT_NODE => NodeKind::Element,
        Node::TEXT_NODE => NodeKind::Text,
        Node::COMMENT_NODE => NodeKind::Comment,
        Node::DOCUMENT_NODE => NodeKind::Document,
        _ => NodeKind::Other,
    }
}

impl NodeTree for BrowserPlatform {
    type Node = Node;

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn kind(&self, node: &Node) -> NodeKind {
        node_kind(node)
    }

    fn name(&self, node: &Node) -> SmolStr {
        SmolStr::new(node.node_name())
    }

    fn value(&self, node: &Node) -> Option<String> {
        node.node_value()
    }

    fn link_target(&self, node: &Node) -> Option<String> {
        node.dyn_ref::<HtmlAnchorElement>().map(|a| a.href())
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        node.dyn_ref::<Element>()
            .is_some_and(|el| el.class_list().contains(class))
    }
}
