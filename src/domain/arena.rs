//! Arena-backed navigation tree.
//!
//! All nodes of a forest live in one [`NodeTree`]. Ownership is the child
//! sequence of each node; the parent link is a plain index back into the
//! arena, so detaching a node can never leave a second owner behind.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::displayable::LocalizedString;
use crate::domain::entities::{validate_name, NodeData, Visibility};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::uri::{BaseUri, Uri};

/// Handle to a node inside a [`NodeTree`].
///
/// Handles are generational: once a node's slot is freed the handle stops
/// resolving instead of pointing at whatever reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{slot}.{generation}")
    }
}

/// Tree node in the arena.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Name and presentation payload
    pub data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TreeNode {
    fn detached(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.data.name()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_detached(&self) -> bool {
        self.parent.is_none()
    }
}

/// Pre-order copy of a subtree: payload plus position of the parent entry.
type Snapshot = Vec<(NodeData, Option<usize>)>;

/// Forest of navigation nodes with invariant-preserving edits.
///
/// Invariants kept by every operation:
/// - sibling names are unique
/// - a node has at most one parent
/// - no node is its own ancestor
/// - child order only changes through explicit add/remove
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    arena: Arena<TreeNode>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Creates a detached node.
    ///
    /// Any nonempty name is accepted. A name containing `/` is kept verbatim, but
    /// its URI segment is then indistinguishable from two segments and
    /// [`resolve_path`](Self::resolve_path) cannot reach it.
    #[instrument(level = "debug", skip(self))]
    pub fn create_node(&mut self, name: &str) -> DomainResult<NodeId> {
        let data = NodeData::new(name)?;
        Ok(self.insert_detached(data))
    }

    /// Creates a detached navigation root.
    #[instrument(level = "debug", skip(self))]
    pub fn create_root(&mut self) -> NodeId {
        self.insert_detached(NodeData::root())
    }

    /// Creates a detached node from prepared payload.
    #[instrument(level = "debug", skip(self))]
    pub fn create_node_with(&mut self, data: NodeData) -> NodeId {
        self.insert_detached(data)
    }

    fn insert_detached(&mut self, data: NodeData) -> NodeId {
        NodeId(self.arena.insert(TreeNode::detached(data)))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    /// Number of live nodes across all subtrees.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena
            .iter()
            .filter(|(_, node)| node.is_detached())
            .map(|(idx, _)| NodeId(idx))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id.0)
    }

    /// Like [`get_node`](Self::get_node) but a stale handle is an error.
    pub fn node(&self, id: NodeId) -> DomainResult<&TreeNode> {
        self.arena
            .get(id.0)
            .ok_or_else(|| DomainError::null_reference(format!("node {id} does not exist")))
    }

    fn node_mut(&mut self, id: NodeId) -> DomainResult<&mut TreeNode> {
        self.arena
            .get_mut(id.0)
            .ok_or_else(|| DomainError::null_reference(format!("node {id} does not exist")))
    }

    pub fn data(&self, id: NodeId) -> DomainResult<&NodeData> {
        Ok(&self.node(id)?.data)
    }

    /// Mutable access to the payload; the name stays fixed.
    pub fn data_mut(&mut self, id: NodeId) -> DomainResult<&mut NodeData> {
        Ok(&mut self.node_mut(id)?.data)
    }

    pub fn name(&self, id: NodeId) -> DomainResult<&str> {
        Ok(self.node(id)?.name())
    }

    pub fn parent(&self, id: NodeId) -> DomainResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Children in insertion order.
    pub fn children(&self, id: NodeId) -> DomainResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// Direct child lookup by name.
    #[instrument(level = "trace", skip(self))]
    pub fn child(&self, id: NodeId, name: &str) -> DomainResult<Option<NodeId>> {
        let node = self.node(id)?;
        Ok(self.find_child(node, name))
    }

    fn find_child(&self, node: &TreeNode, name: &str) -> Option<NodeId> {
        node.children.iter().copied().find(|&child| {
            self.arena
                .get(child.0)
                .is_some_and(|c| c.data.name() == name)
        })
    }

    pub fn is_nodes_loaded(&self, id: NodeId) -> DomainResult<bool> {
        Ok(self.node(id)?.data.nodes_loaded)
    }

    pub fn set_nodes_loaded(&mut self, id: NodeId, loaded: bool) -> DomainResult<()> {
        self.node_mut(id)?.data.nodes_loaded = loaded;
        Ok(())
    }

    pub fn base_uri(&self, id: NodeId) -> DomainResult<Option<&BaseUri>> {
        Ok(self.node(id)?.data.base_uri.as_ref())
    }

    pub fn set_base_uri(&mut self, id: NodeId, base_uri: Option<BaseUri>) -> DomainResult<()> {
        self.node_mut(id)?.data.base_uri = base_uri;
        Ok(())
    }

    pub fn set_display_names(&mut self, id: NodeId, names: LocalizedString) -> DomainResult<()> {
        self.node_mut(id)?.data.display_names = names;
        Ok(())
    }

    pub fn set_icon_name(&mut self, id: NodeId, icon: Option<String>) -> DomainResult<()> {
        self.node_mut(id)?.data.icon_name = icon;
        Ok(())
    }

    pub fn set_visibility(&mut self, id: NodeId, visibility: Visibility) -> DomainResult<()> {
        self.node_mut(id)?.data.visibility = visibility;
        Ok(())
    }

    /// Parent, grandparent, ... up to the top of the subtree.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get_node(id).and_then(|n| n.parent),
        }
    }

    /// True when `candidate` is `id` or one of its ancestors. Pure; walks O(depth).
    fn is_self_or_ancestor(&self, candidate: NodeId, id: NodeId) -> bool {
        candidate == id || self.ancestors(id).any(|ancestor| ancestor == candidate)
    }

    /// Every check `add_node` needs, without touching the arena.
    fn ensure_attachable(&self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        let parent_node = self
            .get_node(parent)
            .ok_or_else(|| DomainError::null_reference(format!("parent {parent} does not exist")))?;
        let child_node = self
            .get_node(child)
            .ok_or_else(|| DomainError::null_reference(format!("child {child} does not exist")))?;

        if let Some(owner) = child_node.parent {
            let owner_name = self.get_node(owner).map(TreeNode::name).unwrap_or("?");
            return Err(DomainError::invalid_argument(format!(
                "node '{}' already has parent '{}'",
                child_node.name(),
                owner_name
            )));
        }
        if self.find_child(parent_node, child_node.name()).is_some() {
            return Err(DomainError::invalid_argument(format!(
                "node '{}' already has a child named '{}'",
                parent_node.name(),
                child_node.name()
            )));
        }
        if child == parent {
            return Err(DomainError::invalid_argument(format!(
                "node '{}' cannot be added to itself",
                child_node.name()
            )));
        }
        if self.is_self_or_ancestor(child, parent) {
            return Err(DomainError::invalid_argument(format!(
                "adding '{}' under '{}' would create a cycle",
                child_node.name(),
                parent_node.name()
            )));
        }
        Ok(())
    }

    /// Appends a detached `child` to `parent`'s children.
    ///
    /// Fails with `NullReference` for a stale handle, and with
    /// `InvalidArgument` if `child` already has a parent, a sibling has the
    /// same name, or the edit would make a node its own ancestor. On failure
    /// nothing changes.
    #[instrument(level = "debug", skip(self))]
    pub fn add_node(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        if let Err(e) = self.ensure_attachable(parent, child) {
            debug!("add_node rejected: {}", e);
            return Err(e);
        }
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detaches the direct child called `name`, returning its handle.
    ///
    /// The detached subtree stays intact and can be re-added anywhere.
    #[instrument(level = "debug", skip(self))]
    pub fn take_node(&mut self, parent: NodeId, name: &str) -> DomainResult<Option<NodeId>> {
        let parent_node = self.node(parent)?;
        let Some(position) = parent_node.children.iter().position(|&child| {
            self.arena
                .get(child.0)
                .is_some_and(|c| c.data.name() == name)
        }) else {
            debug!("no child named '{}' under {}", name, parent);
            return Ok(None);
        };

        let child = self.node_mut(parent)?.children.remove(position);
        self.node_mut(child)?.parent = None;
        Ok(Some(child))
    }

    /// Detaches the direct child called `name`. `Ok(false)` when there is none.
    pub fn remove_node(&mut self, parent: NodeId, name: &str) -> DomainResult<bool> {
        Ok(self.take_node(parent, name)?.is_some())
    }

    /// Deep copy of `id`'s subtree as a new detached node.
    #[instrument(level = "debug", skip(self))]
    pub fn copy_node(&mut self, id: NodeId) -> DomainResult<NodeId> {
        let snapshot = self.snapshot(id)?;
        Ok(self.materialize(snapshot))
    }

    /// Deep copy of `id`'s subtree whose top node is called `new_name`.
    ///
    /// Renaming is always done this way: the original node keeps its name
    /// and position, the copy is detached and can replace it.
    #[instrument(level = "debug", skip(self))]
    pub fn copy_renamed(&mut self, new_name: &str, id: NodeId) -> DomainResult<NodeId> {
        validate_name(new_name)?;
        let mut snapshot = self.snapshot(id)?;
        let renamed = snapshot[0].0.renamed(new_name)?;
        snapshot[0].0 = renamed;
        Ok(self.materialize(snapshot))
    }

    /// Deep copy of a subtree living in another tree.
    #[instrument(level = "debug", skip(self, other))]
    pub fn import_subtree(&mut self, other: &NodeTree, id: NodeId) -> DomainResult<NodeId> {
        let snapshot = other.snapshot(id)?;
        Ok(self.materialize(snapshot))
    }

    /// Moves a detached subtree out into its own tree.
    ///
    /// Handles into the moved subtree stop resolving here. Returns the new
    /// tree and the handle of the subtree's top node in it.
    #[instrument(level = "debug", skip(self))]
    pub fn take_subtree(&mut self, id: NodeId) -> DomainResult<(NodeTree, NodeId)> {
        self.ensure_detached(id)?;
        let snapshot = self.snapshot(id)?;
        self.free_subtree(id);

        let mut tree = NodeTree::new();
        let top = tree.materialize(snapshot);
        Ok((tree, top))
    }

    /// Frees a detached subtree, returning how many nodes were dropped.
    #[instrument(level = "debug", skip(self))]
    pub fn discard_subtree(&mut self, id: NodeId) -> DomainResult<usize> {
        self.ensure_detached(id)?;
        Ok(self.free_subtree(id))
    }

    fn ensure_detached(&self, id: NodeId) -> DomainResult<()> {
        let node = self.node(id)?;
        if node.parent.is_some() {
            return Err(DomainError::invalid_argument(format!(
                "node '{}' must be removed from its parent first",
                node.name()
            )));
        }
        Ok(())
    }

    fn free_subtree(&mut self, id: NodeId) -> usize {
        let ids: Vec<NodeId> = self.iter_from(id).map(|(idx, _)| idx).collect();
        for &idx in &ids {
            self.arena.remove(idx.0);
        }
        ids.len()
    }

    fn snapshot(&self, id: NodeId) -> DomainResult<Snapshot> {
        self.node(id)?;
        let mut snapshot = Vec::new();
        let mut stack: Vec<(NodeId, Option<usize>)> = vec![(id, None)];

        while let Some((current, parent_pos)) = stack.pop() {
            let node = self.node(current)?;
            let pos = snapshot.len();
            snapshot.push((node.data.clone(), parent_pos));
            // Push children in reverse order for left-to-right traversal
            for &child in node.children.iter().rev() {
                stack.push((child, Some(pos)));
            }
        }
        Ok(snapshot)
    }

    fn materialize(&mut self, snapshot: Snapshot) -> NodeId {
        let mut created: Vec<NodeId> = Vec::with_capacity(snapshot.len());
        for (data, parent_pos) in snapshot {
            let id = self.insert_detached(data);
            if let Some(pos) = parent_pos {
                let parent = created[pos];
                if let Some(node) = self.arena.get_mut(id.0) {
                    node.parent = Some(parent);
                }
                if let Some(parent_node) = self.arena.get_mut(parent.0) {
                    parent_node.children.push(id);
                }
            }
            created.push(id);
        }
        created[0]
    }

    /// Resolved address of `id`, recomputed on every call.
    ///
    /// Walks up to the nearest node carrying a base URI and appends the names
    /// from there down to `id`. Navigation roots contribute no segment.
    /// `Ok(None)` when no node on the way up has a base URI.
    #[instrument(level = "trace", skip(self))]
    pub fn uri(&self, id: NodeId) -> DomainResult<Option<Uri>> {
        let mut segments: Vec<&str> = Vec::new();
        let mut current = Some(id);

        while let Some(cur) = current {
            let node = self.node(cur)?;
            if !node.data.is_navigation_root() {
                segments.push(node.name());
            }
            if let Some(base) = &node.data.base_uri {
                return Ok(Some(base.compose(segments.into_iter().rev())));
            }
            current = node.parent;
        }
        Ok(None)
    }

    /// Names from the top of the subtree down to `id`, without navigation roots.
    pub fn path(&self, id: NodeId) -> DomainResult<Vec<String>> {
        let node = self.node(id)?;
        let mut names: Vec<String> = self
            .ancestors(id)
            .filter_map(|a| self.get_node(a))
            .filter(|a| !a.data.is_navigation_root())
            .map(|a| a.name().to_string())
            .collect();
        names.reverse();
        if !node.data.is_navigation_root() {
            names.push(node.name().to_string());
        }
        Ok(names)
    }

    /// Follows `a/b/c` through direct children starting at `from`.
    #[instrument(level = "trace", skip(self))]
    pub fn resolve_path(&self, from: NodeId, path: &str) -> DomainResult<Option<NodeId>> {
        let mut current = from;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match self.child(current, segment)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Structural equality of two subtrees in this tree; parent links are ignored.
    pub fn subtree_eq(&self, a: NodeId, b: NodeId) -> DomainResult<bool> {
        self.subtree_eq_across(self, a, b)
    }

    /// Structural equality of `a` in this tree and `b` in `other`.
    pub fn subtree_eq_across(&self, other: &NodeTree, a: NodeId, b: NodeId) -> DomainResult<bool> {
        let left = self.node(a)?;
        let right = other.node(b)?;
        if left.data != right.data || left.children.len() != right.children.len() {
            return Ok(false);
        }
        for (&l, &r) in left.children.iter().zip(right.children.iter()) {
            if !self.subtree_eq_across(other, l, r)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Pre-order walk of the subtree rooted at `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_from(&self, id: NodeId) -> TreeIterator<'_> {
        TreeIterator::new(self, id)
    }

    /// Post-order walk of the subtree rooted at `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder_from(&self, id: NodeId) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, id)
    }

    /// Number of levels in the subtree rooted at `id` (a lone node is 1).
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: NodeId) -> usize {
        if let Some(node) = self.get_node(id) {
            1 + node
                .children
                .iter()
                .map(|&child| self.depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Nodes without children below `id`, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.iter_from(id)
            .filter(|(_, node)| node.children.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Nodes with at least one child below `id`, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn branches(&self, id: NodeId) -> Vec<NodeId> {
        self.iter_from(id)
            .filter(|(_, node)| !node.children.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }
}

pub struct Ancestors<'a> {
    tree: &'a NodeTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.get_node(current).and_then(|n| n.parent);
        Some(current)
    }
}

pub struct TreeIterator<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a NodeTree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a NodeTree,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a NodeTree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push((start, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                if !visited {
                    self.stack.push((current, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (NodeTree, NodeId) {
        // root
        // ├── a
        // │   └── a1
        // └── b
        let mut tree = NodeTree::new();
        let root = tree.create_node("root").unwrap();
        let a = tree.create_node("a").unwrap();
        let a1 = tree.create_node("a1").unwrap();
        let b = tree.create_node("b").unwrap();
        tree.add_node(root, a).unwrap();
        tree.add_node(a, a1).unwrap();
        tree.add_node(root, b).unwrap();
        (tree, root)
    }

    fn names<'a>(items: impl Iterator<Item = (NodeId, &'a TreeNode)>) -> Vec<String> {
        items.map(|(_, n)| n.name().to_string()).collect()
    }

    #[test]
    fn given_tree_when_iterating_preorder_then_parents_before_children() {
        let (tree, root) = sample();
        assert_eq!(names(tree.iter_from(root)), vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn given_tree_when_iterating_postorder_then_children_before_parents() {
        let (tree, root) = sample();
        assert_eq!(
            names(tree.iter_postorder_from(root)),
            vec!["a1", "a", "b", "root"]
        );
    }

    #[test]
    fn given_tree_when_measuring_then_depth_and_leaves_match() {
        let (tree, root) = sample();
        assert_eq!(tree.depth(root), 3);
        let leaves: Vec<_> = tree
            .leaf_nodes(root)
            .into_iter()
            .map(|id| tree.name(id).unwrap().to_string())
            .collect();
        assert_eq!(leaves, vec!["a1", "b"]);
    }

    #[test]
    fn given_tree_when_listing_branches_then_inner_nodes_in_preorder() {
        let (mut tree, root) = sample();
        let branches: Vec<_> = tree
            .branches(root)
            .into_iter()
            .map(|id| tree.name(id).unwrap().to_string())
            .collect();
        assert_eq!(branches, vec!["root", "a"]);

        let lone = tree.create_node("lone").unwrap();
        assert!(tree.branches(lone).is_empty());
    }

    #[test]
    fn given_grandchild_when_walking_ancestors_then_nearest_first() {
        let (tree, root) = sample();
        let a1 = tree.resolve_path(root, "a/a1").unwrap().unwrap();
        let chain: Vec<_> = tree
            .ancestors(a1)
            .map(|id| tree.name(id).unwrap().to_string())
            .collect();
        assert_eq!(chain, vec!["a", "root"]);
        assert_eq!(tree.path(a1).unwrap(), vec!["root", "a", "a1"]);
    }

    #[test]
    fn given_rejected_add_when_checking_then_arena_unchanged() {
        let (mut tree, root) = sample();
        let a = tree.child(root, "a").unwrap().unwrap();
        let before = tree.children(a).unwrap().to_vec();

        assert!(tree.add_node(a, root).unwrap_err().is_invalid_argument());
        assert_eq!(tree.children(a).unwrap(), before.as_slice());
        assert_eq!(tree.parent(root).unwrap(), None);
    }

    #[test]
    fn given_discarded_subtree_when_using_old_handle_then_null_reference() {
        let (mut tree, root) = sample();
        let a = tree.take_node(root, "a").unwrap().unwrap();
        assert_eq!(tree.discard_subtree(a).unwrap(), 2);
        assert!(tree.name(a).unwrap_err().is_null_reference());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn given_forest_when_listing_roots_then_only_detached_nodes() {
        let (mut tree, root) = sample();
        let loose = tree.create_node("loose").unwrap();

        let mut roots: Vec<_> = tree.roots().collect();
        roots.sort_by_key(|id| id.to_string());
        let mut expected = vec![root, loose];
        expected.sort_by_key(|id| id.to_string());
        assert_eq!(roots, expected);
    }
}
