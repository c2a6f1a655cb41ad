/*
Rendering lives behind a trait so the CLI and tests can share it without
pulling termtree into the engine itself.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{NodeId, NodeTree};

/// How each node is labelled when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Label {
    #[default]
    Name,
    /// Name followed by the resolved URI, when there is one
    NameAndUri,
}

pub trait TreeDisplay {
    fn to_tree_string(&self, start: NodeId, label: Label) -> Tree<String>;
}

impl TreeDisplay for NodeTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, start: NodeId, label: Label) -> Tree<String> {
        fn label_for(tree: &NodeTree, idx: NodeId, label: Label) -> String {
            let Some(node) = tree.get_node(idx) else {
                return "<missing>".to_string();
            };
            let mut text = node.name().to_string();
            if !node.data.nodes_loaded {
                text.push_str(" …");
            }
            if label == Label::NameAndUri {
                if let Ok(Some(uri)) = tree.uri(idx) {
                    text.push_str(&format!("  [{uri}]"));
                }
            }
            text
        }

        fn build_tree(tree: &NodeTree, node_idx: NodeId, parent_tree: &mut Tree<String>, label: Label) {
            if let Some(node) = tree.get_node(node_idx) {
                for &child_idx in node.children() {
                    let mut child_tree = Tree::new(label_for(tree, child_idx, label));
                    build_tree(tree, child_idx, &mut child_tree, label);
                    parent_tree.push(child_tree);
                }
            }
        }

        if !self.contains(start) {
            return Tree::new("Empty tree".to_string());
        }
        let mut root = Tree::new(label_for(self, start, label));
        build_tree(self, start, &mut root, label);
        root
    }
}
