//! A single node of the frame tree.

use core::fmt;

use tideui_core::{GeometryNode, LayoutProperty, PaintProperty};

use super::NodeId;
use crate::paint::RenderContext;
use crate::pattern::Pattern;
use crate::scheduler::PageId;

/// Node stored inside the [`FrameTree`](super::FrameTree).
///
/// Owns the settled geometry, both property bags and the pattern that gives
/// the node its behavior. Structural fields (parent, depth, page) are only
/// changed by the tree.
pub struct FrameNode {
    pub(crate) id: NodeId,
    pub(crate) tag: &'static str,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) depth: u32,
    pub(crate) page_id: Option<PageId>,
    pub(crate) mounted: bool,
    pub(crate) active: bool,
    pub(crate) measure_boundary: bool,
    pub(crate) render_boundary: bool,
    pub(crate) geometry: GeometryNode,
    pub(crate) layout_property: LayoutProperty,
    pub(crate) paint_property: PaintProperty,
    pub(crate) pattern: Option<Box<dyn Pattern>>,
    pub(crate) render_context: RenderContext,
    pub(crate) layout_dirty_marked: bool,
    pub(crate) render_dirty_marked: bool,
    pub(crate) layout_pass: u64,
}

impl FrameNode {
    pub(crate) fn new(id: NodeId, tag: &'static str, pattern: Box<dyn Pattern>) -> Self {
        Self {
            id,
            tag,
            parent: None,
            children: Vec::new(),
            depth: 0,
            page_id: None,
            mounted: false,
            active: false,
            measure_boundary: pattern.is_measure_boundary(),
            render_boundary: pattern.is_render_boundary(),
            geometry: GeometryNode::new(),
            layout_property: LayoutProperty::new(),
            paint_property: pattern.create_paint_property(),
            pattern: Some(pattern),
            render_context: RenderContext::default(),
            layout_dirty_marked: false,
            render_dirty_marked: false,
            layout_pass: 0,
        }
    }

    /// Identifier of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Human readable kind, used in logs.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Parent node, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in paint order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Nesting level: roots are at depth 0.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Page this node belongs to, inherited from its root.
    #[must_use]
    pub const fn page_id(&self) -> Option<PageId> {
        self.page_id
    }

    /// Returns true when the node is reachable from a root.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns true once the node has taken part in a layout pass.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true when a measure change stops at this node.
    #[must_use]
    pub const fn is_measure_boundary(&self) -> bool {
        self.measure_boundary
    }

    /// Returns true when the node repaints on its own.
    #[must_use]
    pub const fn is_render_boundary(&self) -> bool {
        self.render_boundary
    }

    /// Settled geometry from the last layout pass.
    #[must_use]
    pub const fn geometry(&self) -> &GeometryNode {
        &self.geometry
    }

    /// Layout properties.
    #[must_use]
    pub const fn layout_property(&self) -> &LayoutProperty {
        &self.layout_property
    }

    /// Mutable layout properties. Mark the node dirty afterwards.
    pub const fn layout_property_mut(&mut self) -> &mut LayoutProperty {
        &mut self.layout_property
    }

    /// Paint properties.
    #[must_use]
    pub const fn paint_property(&self) -> &PaintProperty {
        &self.paint_property
    }

    /// Mutable paint properties. Mark the node dirty afterwards.
    pub const fn paint_property_mut(&mut self) -> &mut PaintProperty {
        &mut self.paint_property
    }

    /// Pattern attached to the node.
    ///
    /// Returns `None` only while the pattern is borrowed by its own swap hook.
    #[must_use]
    pub fn pattern(&self) -> Option<&(dyn Pattern + 'static)> {
        self.pattern.as_deref()
    }

    /// Mutable access to the pattern.
    pub fn pattern_mut(&mut self) -> Option<&mut (dyn Pattern + 'static)> {
        self.pattern.as_deref_mut()
    }

    /// Output of the last paint.
    #[must_use]
    pub const fn render_context(&self) -> &RenderContext {
        &self.render_context
    }

    /// Returns true while the node waits in the layout queue.
    #[must_use]
    pub const fn is_layout_dirty_marked(&self) -> bool {
        self.layout_dirty_marked
    }

    /// Returns true while the node waits in the render queue.
    #[must_use]
    pub const fn is_render_dirty_marked(&self) -> bool {
        self.render_dirty_marked
    }

    /// A node with a fixed ideal size absorbs plain child requests.
    pub(crate) fn needs_request_parent_measure(&self) -> bool {
        let flag = self.layout_property.change_flag();
        if flag.is_child_request_only() && self.layout_property.ideal_size().is_fixed() {
            return false;
        }
        flag.needs_parent_measure()
    }
}

impl fmt::Debug for FrameNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameNode")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("depth", &self.depth)
            .field("page_id", &self.page_id)
            .field("mounted", &self.mounted)
            .field("active", &self.active)
            .field("frame", &self.geometry.frame())
            .field("layout_flag", &self.layout_property.change_flag())
            .field("paint_flag", &self.paint_property.change_flag())
            .finish_non_exhaustive()
    }
}
