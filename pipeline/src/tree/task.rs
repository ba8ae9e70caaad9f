//! Building transient layout and paint wrappers from tree nodes, and swapping
//! their results back.

use tideui_core::{GeometryNode, PropertyChangeFlag, Visibility};
use tracing::{debug, trace};

use super::{FrameTree, NodeId};
use crate::layout::LayoutWrapper;
use crate::paint::PaintWrapper;
use crate::pattern::{DirtySwapConfig, PatternContext};
use crate::scheduler::UiTaskScheduler;

impl FrameTree {
    /// Builds the layout wrapper tree rooted at `id` for layout pass `pass`.
    ///
    /// Every node included in the wrapper tree is stamped with `pass` and
    /// loses its layout mark; the scheduler skips stamped nodes it pops later
    /// in the same pass. Returns `None` for removed nodes.
    pub(crate) fn create_layout_wrapper(
        &mut self,
        id: NodeId,
        pass: u64,
        force_measure: bool,
    ) -> Option<LayoutWrapper> {
        let node = self.nodes.get_mut(id)?;
        node.layout_dirty_marked = false;
        node.layout_pass = pass;

        if node.layout_property.visibility() == Visibility::Gone {
            let mut wrapper = LayoutWrapper::new(
                id,
                node.tag,
                GeometryNode::new(),
                node.layout_property.clone(),
                None,
            );
            wrapper.set_skip(true, true);
            wrapper.set_active(false);
            return Some(wrapper);
        }

        if !node.active || force_measure {
            node.layout_property
                .update_change_flag(PropertyChangeFlag::MEASURE);
        }
        let flag = node.layout_property.change_flag();
        let property = node.layout_property.clone();
        node.layout_property.clean_dirty();

        let algorithm = if flag.needs_measure_or_layout() {
            node.pattern
                .as_ref()
                .map(|pattern| pattern.create_layout_algorithm())
        } else {
            None
        };
        let (skip_measure, skip_layout) = if flag.needs_measure() {
            (false, false)
        } else if flag.needs_layout() {
            (true, false)
        } else {
            (true, true)
        };
        let mut wrapper =
            LayoutWrapper::new(id, node.tag, node.geometry.clone(), property, algorithm);
        wrapper.set_skip(skip_measure, skip_layout);
        wrapper.set_active(node.active);
        trace!(tag = node.tag, ?flag, force_measure, "create layout wrapper");

        if !skip_layout {
            let force_child_measure = !skip_measure && flag.forces_child_measure();
            let children = node.children.clone();
            for child in children {
                if let Some(child) = self.create_layout_wrapper(child, pass, force_child_measure) {
                    wrapper.append_child(child);
                }
            }
        }
        Some(wrapper)
    }

    /// Writes a finished wrapper tree back into the nodes, children first.
    pub(crate) fn mount_to_host(&mut self, wrapper: &LayoutWrapper, scheduler: &mut UiTaskScheduler) {
        for child in wrapper.children() {
            self.mount_to_host(child, scheduler);
        }
        self.swap_dirty_layout_wrapper(wrapper, scheduler);
    }

    fn swap_dirty_layout_wrapper(&mut self, dirty: &LayoutWrapper, scheduler: &mut UiTaskScheduler) {
        let id = dirty.host();
        let Some(node) = self.nodes.get_mut(id) else {
            debug!(?id, "host removed before swap");
            return;
        };
        node.layout_property
            .update_layout_constraint_from(dirty.layout_property());
        node.active = dirty.is_active();
        if !node.active {
            trace!(tag = node.tag, "inactive node, nothing to mount");
            return;
        }

        let current = &node.geometry;
        let settled = dirty.geometry();
        let config = DirtySwapConfig {
            skip_measure: dirty.skip_measure(),
            skip_layout: dirty.skip_layout(),
            frame_size_change: current.frame_size() != settled.frame_size(),
            frame_offset_change: current.frame_offset() != settled.frame_offset(),
            content_size_change: current.content_size() != settled.content_size(),
            content_offset_change: current.content_offset() != settled.content_offset(),
        };
        node.geometry = settled.clone();
        if config.frame_size_change || config.frame_offset_change {
            node.render_context.sync_geometry(node.geometry.frame());
        }

        let Some(mut pattern) = node.pattern.take() else {
            return;
        };
        let mut needs_render = {
            let mut ctx = PatternContext::new(id, self, scheduler);
            pattern.on_dirty_layout_wrapper_swap(dirty, config, &mut ctx)
        };
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.pattern = Some(pattern);
        trace!(tag = node.tag, ?config, needs_render, "swapped layout wrapper");

        needs_render |= node.paint_property.change_flag().needs_render();
        if needs_render {
            self.mark_dirty_node(id, PropertyChangeFlag::RENDER, scheduler);
        }
    }

    /// Builds the paint wrappers for a render-dirty node.
    ///
    /// The node comes first, followed by descendants that are not render
    /// boundaries themselves and are therefore painted along with it. Nodes
    /// without a paint method only get their paint flag cleaned. Nodes that
    /// are not visible, or sit below an invisible ancestor, are not painted
    /// and lose their previous scene.
    pub(crate) fn create_paint_wrappers(&mut self, id: NodeId) -> Vec<PaintWrapper> {
        let shown = self
            .ancestors_and_self(id)
            .skip(1)
            .all(|ancestor| self.is_visible(ancestor));
        let mut wrappers = Vec::new();
        let mut stack = vec![(id, shown)];
        while let Some((next, shown)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(next) else {
                continue;
            };
            node.render_dirty_marked = false;
            let shown = shown && node.layout_property.visibility() == Visibility::Visible;
            let method = node
                .pattern
                .as_ref()
                .filter(|_| shown)
                .and_then(|pattern| pattern.create_node_paint_method());
            match method {
                Some(method) => wrappers.push(PaintWrapper::new(
                    next,
                    node.geometry.clone(),
                    node.paint_property.clone(),
                    method,
                )),
                None => {
                    node.paint_property.clean_dirty();
                    if !shown {
                        trace!(tag = node.tag, "invisible node not painted");
                        node.render_context.clear_content();
                    }
                }
            }
            let children = node.children.clone();
            stack.extend(
                children
                    .into_iter()
                    .rev()
                    .filter(|child| {
                        self.nodes
                            .get(*child)
                            .is_some_and(|child| !child.render_boundary)
                    })
                    .map(|child| (child, shown)),
            );
        }
        wrappers
    }

    fn is_visible(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.layout_property.visibility() == Visibility::Visible)
    }
}
