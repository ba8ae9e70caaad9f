//! Arena-backed frame tree.
//!
//! Nodes live in a [`SlotMap`] and refer to each other through [`NodeId`]
//! keys. A key of a removed node stays invalid forever, so handles held by the
//! scheduler across a removal simply resolve to nothing.

mod dirty;
mod node;
mod task;

use slotmap::SlotMap;
use tideui_core::{LayoutConstraint, Size};
use tracing::debug;

pub use node::FrameNode;

use crate::pattern::Pattern;
use crate::scheduler::PageId;

slotmap::new_key_type! {
    /// Generation-checked identifier of a node stored inside a [`FrameTree`].
    pub struct NodeId;
}

/// Errors returned by structural tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The node does not exist, or was removed.
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    /// The node already has a parent or is a root.
    #[error("node {0:?} is already attached")]
    AlreadyAttached(NodeId),
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
}

/// Arena owning every frame node.
#[derive(Debug)]
pub struct FrameTree {
    nodes: SlotMap<NodeId, FrameNode>,
    root_size: Size,
}

impl FrameTree {
    /// Creates an empty tree whose roots are laid out into `root_size`.
    #[must_use]
    pub fn new(root_size: Size) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_size,
        }
    }

    /// Creates a detached node. Attach it with [`FrameTree::append_child`].
    pub fn create_node<P: Pattern>(&mut self, tag: &'static str, pattern: P) -> NodeId {
        let pattern: Box<dyn Pattern> = Box::new(pattern);
        self.nodes
            .insert_with_key(|id| FrameNode::new(id, tag, pattern))
    }

    /// Creates a mounted root node at depth 0.
    ///
    /// Nodes attached below it inherit `page_id`. A root without a page id is
    /// scheduled under the scheduler's current page.
    pub fn create_root<P: Pattern>(
        &mut self,
        tag: &'static str,
        pattern: P,
        page_id: Option<PageId>,
    ) -> NodeId {
        let id = self.create_node(tag, pattern);
        if let Some(node) = self.nodes.get_mut(id) {
            node.mounted = true;
            node.page_id = page_id;
        }
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// The child's whole subtree takes over the parent's page id and mounted
    /// state, and depths are recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if either node does not exist,
    /// [`TreeError::AlreadyAttached`] if `child` already has a parent or is a
    /// root, and [`TreeError::Cycle`] if `child` is `parent` or one of its
    /// ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let parent_node = self.nodes.get(parent).ok_or(TreeError::UnknownNode(parent))?;
        let child_node = self.nodes.get(child).ok_or(TreeError::UnknownNode(child))?;
        if child_node.parent.is_some() || child_node.mounted {
            return Err(TreeError::AlreadyAttached(child));
        }
        if self.ancestors_and_self(parent).any(|id| id == child) {
            return Err(TreeError::Cycle { parent, child });
        }

        let depth = parent_node.depth + 1;
        let page_id = parent_node.page_id;
        let mounted = parent_node.mounted;

        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        self.propagate_attachment(child, depth, page_id, mounted);
        debug!(?parent, ?child, depth, "attached node");
        Ok(())
    }

    /// Removes `id` and its whole subtree from the tree.
    ///
    /// Returns the former parent, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` does not exist.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        let parent = self.nodes.get(id).ok_or(TreeError::UnknownNode(id))?.parent;
        if let Some(parent_node) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            parent_node.children.retain(|child| *child != id);
        }

        let mut stack = vec![id];
        let mut removed = 0usize;
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        debug!(?id, removed, "removed subtree");
        Ok(parent)
    }

    /// Returns the node, if it exists.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&FrameNode> {
        self.nodes.get(id)
    }

    /// Returns the node mutably, if it exists.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut FrameNode> {
        self.nodes.get_mut(id)
    }

    /// Returns true if `id` refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Child identifiers of `id`, empty for unknown nodes.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Size roots are laid out into.
    #[must_use]
    pub const fn root_size(&self) -> Size {
        self.root_size
    }

    /// Updates the size roots are laid out into.
    pub const fn set_root_size(&mut self, size: Size) {
        self.root_size = size;
    }

    /// Forgets that any node is queued with the scheduler.
    ///
    /// Must accompany [`crate::UiTaskScheduler::clean_up`] while the tree stays
    /// alive, otherwise nodes dropped from the queues are never queued again.
    /// Pending change flags are kept.
    pub fn clear_dirty_marks(&mut self) {
        for node in self.nodes.values_mut() {
            node.layout_dirty_marked = false;
            node.render_dirty_marked = false;
        }
    }

    /// Mounted nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.mounted && node.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Constraint used when `id` is measured as the top of a layout task.
    ///
    /// Roots always span the whole surface. Other nodes reuse the constraint
    /// their parent imposed last time, falling back to the root constraint
    /// when they were never measured.
    #[must_use]
    pub fn layout_constraint(&self, id: NodeId) -> LayoutConstraint {
        let root = LayoutConstraint::root(self.root_size);
        let Some(node) = self.nodes.get(id) else {
            return root;
        };
        if node.parent.is_none() {
            return root;
        }
        node.geometry
            .parent_layout_constraint()
            .copied()
            .unwrap_or(root)
    }

    fn ancestors_and_self(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(Some(id), |current| self.parent(*current))
    }

    fn propagate_attachment(
        &mut self,
        id: NodeId,
        depth: u32,
        page_id: Option<PageId>,
        mounted: bool,
    ) {
        let mut stack = vec![(id, depth)];
        while let Some((next, depth)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(next) else {
                continue;
            };
            node.depth = depth;
            node.page_id = page_id;
            node.mounted = mounted;
            stack.extend(node.children.iter().map(|child| (*child, depth + 1)));
        }
    }
}
