//! Dirty marking: deciding which node ends up in which scheduler queue.

use tideui_core::PropertyChangeFlag;
use tracing::trace;

use super::{FrameTree, NodeId};
use crate::scheduler::UiTaskScheduler;

const RENDER_FLAGS: PropertyChangeFlag =
    PropertyChangeFlag::RENDER.union(PropertyChangeFlag::RENDER_BY_CHILD_REQUEST);

impl FrameTree {
    /// Merges `extra` into the node's pending changes and registers the
    /// responsible node with the scheduler.
    ///
    /// Measure changes travel to the parent as [`PropertyChangeFlag::BY_CHILD_REQUEST`]
    /// until they reach a measure boundary, which is then queued for layout.
    /// Paint-only changes queue the nearest render boundary for rendering.
    /// Nodes that are not mounted only accumulate flags.
    pub fn mark_dirty_node(
        &mut self,
        id: NodeId,
        extra: PropertyChangeFlag,
        scheduler: &mut UiTaskScheduler,
    ) {
        let Some(node) = self.nodes.get_mut(id) else {
            trace!(?id, "mark dirty on removed node");
            return;
        };
        node.paint_property.update_change_flag(extra & RENDER_FLAGS);
        node.layout_property.update_change_flag(extra - RENDER_FLAGS);

        let layout_flag = node.layout_property.change_flag();
        let paint_flag = node.paint_property.change_flag();
        if (layout_flag | paint_flag).is_empty() {
            trace!(tag = node.tag, "mark dirty without changes");
            return;
        }
        if !node.mounted {
            return;
        }

        if layout_flag.needs_measure_or_layout() {
            if !node.measure_boundary && node.needs_request_parent_measure() {
                if let Some(parent) = node.parent {
                    self.mark_dirty_node(parent, PropertyChangeFlag::BY_CHILD_REQUEST, scheduler);
                    return;
                }
            }
            if node.layout_dirty_marked {
                trace!(tag = node.tag, "already queued for layout");
                return;
            }
            node.layout_dirty_marked = true;
            scheduler.add_dirty_layout_node(node);
            return;
        }

        let render_boundary = node.render_boundary;
        self.mark_need_render(id, render_boundary, scheduler);
    }

    /// Queues a repaint of `id` without touching layout.
    pub fn mark_need_render_only(&mut self, id: NodeId, scheduler: &mut UiTaskScheduler) {
        let Some(render_boundary) = self.nodes.get(id).map(|node| node.render_boundary) else {
            return;
        };
        self.mark_need_render(id, render_boundary, scheduler);
    }

    fn mark_need_render(
        &mut self,
        id: NodeId,
        render_boundary: bool,
        scheduler: &mut UiTaskScheduler,
    ) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.paint_property
            .update_change_flag(PropertyChangeFlag::RENDER);
        if !node.mounted || node.render_dirty_marked || node.layout_dirty_marked {
            return;
        }
        if render_boundary {
            node.render_dirty_marked = true;
            scheduler.add_dirty_render_node(node);
            return;
        }
        // Painted as part of the nearest render boundary above.
        if let Some(parent) = node.parent {
            self.mark_dirty_node(parent, PropertyChangeFlag::RENDER_BY_CHILD_REQUEST, scheduler);
        }
    }
}
