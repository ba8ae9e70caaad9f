use core::any::Any;
use core::fmt;

use tideui_core::{GeometryNode, LayoutConstraint, LayoutProperty, Size};

use super::LayoutAlgorithm;
use crate::tree::NodeId;

/// Transient handle pairing a node with its layout algorithm for one pass.
///
/// Holds copies of the node's geometry and layout property; the tree only
/// sees the results once the wrapper is mounted back.
pub struct LayoutWrapper {
    host: NodeId,
    tag: &'static str,
    geometry: GeometryNode,
    layout_property: LayoutProperty,
    algorithm: Option<Box<dyn LayoutAlgorithm>>,
    skip_measure: bool,
    skip_layout: bool,
    active: bool,
    children: Vec<LayoutWrapper>,
}

impl LayoutWrapper {
    pub(crate) fn new(
        host: NodeId,
        tag: &'static str,
        geometry: GeometryNode,
        layout_property: LayoutProperty,
        algorithm: Option<Box<dyn LayoutAlgorithm>>,
    ) -> Self {
        Self {
            host,
            tag,
            geometry,
            layout_property,
            algorithm,
            skip_measure: false,
            skip_layout: false,
            active: false,
            children: Vec::new(),
        }
    }

    /// Node this wrapper belongs to.
    #[must_use]
    pub const fn host(&self) -> NodeId {
        self.host
    }

    /// Tag of the host node.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Geometry computed in this pass.
    #[must_use]
    pub const fn geometry(&self) -> &GeometryNode {
        &self.geometry
    }

    /// Mutable geometry, for algorithms positioning this node.
    pub const fn geometry_mut(&mut self) -> &mut GeometryNode {
        &mut self.geometry
    }

    /// Snapshot of the host's layout property.
    #[must_use]
    pub const fn layout_property(&self) -> &LayoutProperty {
        &self.layout_property
    }

    /// Algorithm driving this wrapper, if the node needed work.
    #[must_use]
    pub fn layout_algorithm(&self) -> Option<&dyn LayoutAlgorithm> {
        self.algorithm.as_deref()
    }

    /// Algorithm downcast to its concrete type.
    #[must_use]
    pub fn layout_algorithm_as<A: LayoutAlgorithm>(&self) -> Option<&A> {
        let algorithm: &dyn Any = self.algorithm.as_deref()?;
        algorithm.downcast_ref()
    }

    /// Measure is skipped because the node's size is still valid.
    #[must_use]
    pub const fn skip_measure(&self) -> bool {
        self.skip_measure
    }

    /// Layout is skipped because the node's children are still in place.
    #[must_use]
    pub const fn skip_layout(&self) -> bool {
        self.skip_layout
    }

    pub(crate) const fn set_skip(&mut self, skip_measure: bool, skip_layout: bool) {
        self.skip_measure = skip_measure;
        self.skip_layout = skip_layout;
    }

    /// Whether the node takes part in layout. Gone nodes are inactive.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Child wrappers in tree order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Mutable child wrappers, for algorithms measuring them.
    pub fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    pub(crate) fn append_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Content constraint resolved by the last [`LayoutWrapper::measure`].
    #[must_use]
    pub fn content_constraint(&self) -> LayoutConstraint {
        self.layout_property
            .content_constraint()
            .copied()
            .unwrap_or_default()
    }

    /// Measures the node under `parent_constraint`.
    ///
    /// Does nothing when measure is skipped. Otherwise records the
    /// constraint, resolves the node's own and content constraints and runs
    /// the algorithm.
    pub fn measure(&mut self, parent_constraint: LayoutConstraint) {
        if self.skip_measure {
            return;
        }
        self.geometry
            .set_parent_layout_constraint(parent_constraint);
        self.layout_property
            .update_layout_constraint(parent_constraint);
        self.active = true;

        let Some(mut algorithm) = self.algorithm.take() else {
            return;
        };
        algorithm.measure(self);
        self.algorithm = Some(algorithm);
    }

    /// Lays out the node's children. Does nothing when layout is skipped.
    pub fn layout(&mut self) {
        if self.skip_layout {
            return;
        }
        let Some(mut algorithm) = self.algorithm.take() else {
            return;
        };
        algorithm.layout(self);
        self.algorithm = Some(algorithm);
    }

    /// Frame size for a node whose content measured `content`.
    ///
    /// An ideal size wins over the content; the result always satisfies the
    /// node's constraint.
    #[must_use]
    pub fn resolve_frame_size(&self, content: Size) -> Size {
        let Some(constraint) = self.layout_property.layout_constraint() else {
            return content;
        };
        let padded = self.layout_property.padding().inflate(content);
        constraint.constrain(constraint.self_ideal_size.unwrap_or(padded))
    }

    /// Stores `frame` as the measured frame size and derives the content box.
    pub fn set_measured_size(&mut self, frame: Size) {
        let padding = self.layout_property.padding();
        self.geometry.set_frame_size(frame);
        self.geometry.set_content_size(padding.deflate(frame));
        self.geometry.set_content_offset(padding.offset());
    }
}

impl fmt::Debug for LayoutWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutWrapper")
            .field("host", &self.host)
            .field("tag", &self.tag)
            .field("frame", &self.geometry.frame())
            .field("skip_measure", &self.skip_measure)
            .field("skip_layout", &self.skip_layout)
            .field("active", &self.active)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
