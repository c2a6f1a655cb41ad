//! Navigation for a site: a root node plus a priority.

use tracing::instrument;

use crate::domain::arena::{NodeId, NodeTree, TreeNode};
use crate::domain::entities::SiteId;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::uri::{BaseUri, Uri};

/// Owns one tree with a navigation root and forwards node edits to that root.
#[derive(Debug, Clone)]
pub struct Navigation {
    site_id: SiteId,
    priority: i32,
    tree: NodeTree,
    root: NodeId,
}

impl Navigation {
    pub fn new(site_id: Option<SiteId>, priority: i32) -> DomainResult<Self> {
        let site_id =
            site_id.ok_or_else(|| DomainError::invalid_argument("site id cannot be absent"))?;
        let mut tree = NodeTree::new();
        let root = tree.create_root();
        Ok(Self {
            site_id,
            priority,
            tree,
            root,
        })
    }

    pub fn site_id(&self) -> &SiteId {
        &self.site_id
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Direct access for edits below the first level.
    pub fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }

    /// Detached node in this navigation's tree, ready for `add_node`.
    pub fn create_node(&mut self, name: &str) -> DomainResult<NodeId> {
        self.tree.create_node(name)
    }

    pub fn set_base_uri(&mut self, base_uri: Option<BaseUri>) -> DomainResult<()> {
        self.tree.set_base_uri(self.root, base_uri)
    }

    pub fn is_nodes_loaded(&self) -> DomainResult<bool> {
        self.tree.is_nodes_loaded(self.root)
    }

    #[instrument(level = "debug", skip(self), fields(site = %self.site_id))]
    pub fn add_node(&mut self, node: NodeId) -> DomainResult<()> {
        self.tree.add_node(self.root, node)
    }

    pub fn node(&self, name: &str) -> DomainResult<Option<NodeId>> {
        self.tree.child(self.root, name)
    }

    #[instrument(level = "debug", skip(self), fields(site = %self.site_id))]
    pub fn remove_node(&mut self, name: &str) -> DomainResult<bool> {
        self.tree.remove_node(self.root, name)
    }

    pub fn nodes(&self) -> DomainResult<&[NodeId]> {
        self.tree.children(self.root)
    }

    /// Top-level nodes with their payload, in order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self.tree
            .get_node(self.root)
            .map(TreeNode::children)
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.tree.get_node(id).map(|node| (id, node)))
    }

    pub fn uri(&self, node: NodeId) -> DomainResult<Option<Uri>> {
        self.tree.uri(node)
    }

    /// Looks up `a/b/c` below the root.
    pub fn resolve(&self, path: &str) -> DomainResult<Option<NodeId>> {
        self.tree.resolve_path(self.root, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_site_when_creating_navigation_then_invalid_argument() {
        let err = Navigation::new(None, 1).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn given_navigation_when_adding_node_then_visible_from_root() {
        let mut nav = Navigation::new(Some(SiteId::portal("classic")), 1).unwrap();
        let home = nav.create_node("home").unwrap();
        nav.add_node(home).unwrap();

        assert_eq!(nav.node("home").unwrap(), Some(home));
        assert_eq!(nav.nodes().unwrap(), &[home]);
        assert_eq!(nav.tree().parent(home).unwrap(), Some(nav.root()));
        let names: Vec<_> = nav.iter_nodes().map(|(_, n)| n.name().to_string()).collect();
        assert_eq!(names, vec!["home"]);
    }
}
