//! The per-node behavior contract driven by the pipeline.

use core::any::Any;
use core::fmt::{self, Debug};
use std::time::Instant;

use tideui_core::{PaintProperty, PropertyChangeFlag};

use crate::layout::{BoxLayoutAlgorithm, LayoutAlgorithm, LayoutWrapper};
use crate::paint::NodePaintMethod;
use crate::scheduler::UiTaskScheduler;
use crate::tree::{FrameTree, NodeId};

/// What happened to a node during the layout pass that is being mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtySwapConfig {
    /// The node was not measured in this pass.
    pub skip_measure: bool,
    /// The node was not laid out in this pass.
    pub skip_layout: bool,
    /// The frame size differs from the previous pass.
    pub frame_size_change: bool,
    /// The frame offset differs from the previous pass.
    pub frame_offset_change: bool,
    /// The content size differs from the previous pass.
    pub content_size_change: bool,
    /// The content offset differs from the previous pass.
    pub content_offset_change: bool,
}

impl DirtySwapConfig {
    /// Returns true when neither measure nor layout ran for the node.
    #[must_use]
    pub const fn skipped_all(&self) -> bool {
        self.skip_measure && self.skip_layout
    }
}

/// Behavior attached to a frame node.
///
/// The pipeline only talks to nodes through this trait, so widget kinds form
/// an open set. Every method has a default that suits a plain container.
pub trait Pattern: Debug + Any {
    /// Algorithm measuring and positioning this node and its children.
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(BoxLayoutAlgorithm)
    }

    /// Initial paint properties of the node.
    fn create_paint_property(&self) -> PaintProperty {
        PaintProperty::new()
    }

    /// Paint method used when the node is render-dirty. `None` paints nothing.
    fn create_node_paint_method(&self) -> Option<Box<dyn NodePaintMethod>> {
        None
    }

    /// Called once the node's new geometry has been written back.
    ///
    /// This is the place to cache geometry-derived values. Return `true` to
    /// have the node repainted in the same frame.
    fn on_dirty_layout_wrapper_swap(
        &mut self,
        dirty: &LayoutWrapper,
        config: DirtySwapConfig,
        ctx: &mut PatternContext<'_>,
    ) -> bool {
        let _ = (dirty, config, ctx);
        false
    }

    /// Measure changes of this node do not affect its parent.
    fn is_measure_boundary(&self) -> bool {
        false
    }

    /// The node is repainted on its own rather than as part of its parent.
    fn is_render_boundary(&self) -> bool {
        true
    }
}

impl dyn Pattern {
    /// Downcasts to a concrete pattern type.
    #[must_use]
    pub fn downcast_ref<P: Pattern>(&self) -> Option<&P> {
        (self as &dyn Any).downcast_ref()
    }

    /// Mutably downcasts to a concrete pattern type.
    pub fn downcast_mut<P: Pattern>(&mut self) -> Option<&mut P> {
        (self as &mut dyn Any).downcast_mut()
    }
}

/// Access a pattern gets to the pipeline while its swap hook runs.
///
/// The host's own pattern is detached from the tree for the duration of the
/// call, so [`FrameNode::pattern`](crate::tree::FrameNode::pattern) returns
/// `None` for the host.
pub struct PatternContext<'a> {
    host: NodeId,
    tree: &'a mut FrameTree,
    scheduler: &'a mut UiTaskScheduler,
}

impl<'a> PatternContext<'a> {
    pub(crate) const fn new(
        host: NodeId,
        tree: &'a mut FrameTree,
        scheduler: &'a mut UiTaskScheduler,
    ) -> Self {
        Self {
            host,
            tree,
            scheduler,
        }
    }

    /// Node whose pattern is being called.
    #[must_use]
    pub const fn host(&self) -> NodeId {
        self.host
    }

    /// Read access to the tree.
    #[must_use]
    pub fn tree(&self) -> &FrameTree {
        &*self.tree
    }

    /// Marks any node dirty. Work it causes runs in the next flush.
    pub fn mark_dirty_node(&mut self, id: NodeId, flag: PropertyChangeFlag) {
        self.tree.mark_dirty_node(id, flag, self.scheduler);
    }

    /// Queues a repaint of any node.
    pub fn mark_need_render_only(&mut self, id: NodeId) {
        self.tree.mark_need_render_only(id, self.scheduler);
    }

    /// Runs `task` after the current flush has painted.
    pub fn add_after_layout_task(&mut self, task: impl FnOnce() + 'static) {
        self.scheduler.add_after_layout_task(task);
    }

    /// Queues idle-time work.
    pub fn add_predict_task(&mut self, task: impl FnOnce(Instant, &mut UiTaskScheduler) + 'static) {
        self.scheduler.add_predict_task(task);
    }
}

impl Debug for PatternContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternContext")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::Pattern;

    /// Container with every default.
    #[derive(Debug, Default)]
    pub struct Plain {
        inline: bool,
    }

    impl Plain {
        /// A container painted as part of its parent.
        pub const fn inline() -> Self {
            Self { inline: true }
        }
    }

    impl Pattern for Plain {
        fn is_render_boundary(&self) -> bool {
            !self.inline
        }
    }

    /// Container that stops measure propagation.
    #[derive(Debug, Default)]
    pub struct Boundary;

    impl Pattern for Boundary {
        fn is_measure_boundary(&self) -> bool {
            true
        }
    }

    #[test]
    fn downcast_through_trait_object() {
        let pattern: Box<dyn Pattern> = Box::new(Boundary);
        assert!(pattern.downcast_ref::<Boundary>().is_some());
        assert!(pattern.downcast_ref::<Plain>().is_none());
    }
}
