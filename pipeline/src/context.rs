//! The pipeline driver owning the tree and the scheduler.
//!
//! [`PipelineContext`] is what a host embeds: it creates and mounts nodes,
//! forwards property changes into dirty marking, and turns vsync and idle
//! callbacks into scheduler flushes.

use core::mem;
use std::time::Instant;

use tideui_core::{LayoutProperty, PaintProperty, PropertyChangeFlag, Size};
use tracing::{debug, info_span, trace, warn};

use crate::config::PipelineConfig;
use crate::pattern::Pattern;
use crate::scheduler::{PageId, UiTaskScheduler};
use crate::tree::{FrameNode, FrameTree, NodeId, TreeError};

/// Outcome of [`PipelineContext::flush_vsync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResult {
    /// A flush cycle ran.
    Presented,
    /// Nothing was pending.
    Idle,
}

/// Pattern of the stage root every page-less node is mounted under.
#[derive(Debug, Default)]
struct StagePattern;

impl Pattern for StagePattern {
    fn is_measure_boundary(&self) -> bool {
        true
    }
}

/// Owns a frame tree and the scheduler driving it.
#[derive(Debug)]
pub struct PipelineContext {
    config: PipelineConfig,
    tree: FrameTree,
    scheduler: UiTaskScheduler,
    root: NodeId,
    next_page_id: PageId,
    frame_requested: bool,
}

impl PipelineContext {
    /// Creates a pipeline with a stage root on page 0 spanning the configured
    /// surface.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let mut tree = FrameTree::new(config.root_size());
        let mut scheduler = UiTaskScheduler::new();
        let root = tree.create_root("stage", StagePattern, Some(0));
        tree.mark_dirty_node(root, PropertyChangeFlag::empty(), &mut scheduler);
        debug!(width = config.root_width, height = config.root_height, "pipeline created");
        Self {
            config,
            tree,
            scheduler,
            root,
            next_page_id: 1,
            frame_requested: true,
        }
    }

    // ========================================================================
    // Tree building
    // ========================================================================

    /// Creates a detached node.
    pub fn create_node<P: Pattern>(&mut self, tag: &'static str, pattern: P) -> NodeId {
        self.tree.create_node(tag, pattern)
    }

    /// Attaches `child` below `parent` and schedules its first layout.
    ///
    /// # Errors
    ///
    /// Fails with the [`TreeError`] returned by [`FrameTree::append_child`].
    pub fn mount_to_parent(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.tree.append_child(parent, child)?;
        self.mark_dirty_node(child, PropertyChangeFlag::empty());
        Ok(())
    }

    /// Creates the root of a new page and makes it the current page.
    ///
    /// Pages are independent roots laid out into the whole surface.
    pub fn push_page<P: Pattern>(&mut self, tag: &'static str, pattern: P) -> NodeId {
        let page = self.next_page_id;
        self.next_page_id += 1;
        let id = self.tree.create_root(tag, pattern, Some(page));
        self.scheduler.update_current_page_id(page);
        debug!(tag, page, "pushed page");
        self.mark_dirty_node(id, PropertyChangeFlag::empty());
        id
    }

    /// Removes `id` with its subtree and re-measures the former parent.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` does not exist.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), TreeError> {
        if let Some(parent) = self.tree.remove_node(id)? {
            self.mark_dirty_node(parent, PropertyChangeFlag::BY_CHILD_REQUEST);
        }
        Ok(())
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Edits the layout property of `id` and marks the node with whatever
    /// the edit changed. Returns false for unknown nodes.
    pub fn update_layout_property(
        &mut self,
        id: NodeId,
        update: impl FnOnce(&mut LayoutProperty),
    ) -> bool {
        let Some(node) = self.tree.get_mut(id) else {
            return false;
        };
        update(node.layout_property_mut());
        self.mark_dirty_node(id, PropertyChangeFlag::empty());
        true
    }

    /// Edits the paint property of `id`. Same rules as
    /// [`Self::update_layout_property`].
    pub fn update_paint_property(
        &mut self,
        id: NodeId,
        update: impl FnOnce(&mut PaintProperty),
    ) -> bool {
        let Some(node) = self.tree.get_mut(id) else {
            return false;
        };
        update(node.paint_property_mut());
        self.mark_dirty_node(id, PropertyChangeFlag::empty());
        true
    }

    /// Runs `f` on the pattern of `id` if it is a `P`.
    ///
    /// Nothing is marked dirty; follow up with [`Self::mark_dirty_node`] when
    /// the pattern state affects layout or paint.
    pub fn with_pattern<P: Pattern, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut P) -> R,
    ) -> Option<R> {
        let pattern = self.tree.get_mut(id)?.pattern_mut()?.downcast_mut::<P>()?;
        Some(f(pattern))
    }

    /// Merges `flag` into the node and queues the responsible node.
    pub fn mark_dirty_node(&mut self, id: NodeId, flag: PropertyChangeFlag) {
        self.tree.mark_dirty_node(id, flag, &mut self.scheduler);
        self.request_frame();
    }

    /// Queues a repaint of `id`.
    pub fn mark_need_render_only(&mut self, id: NodeId) {
        self.tree.mark_need_render_only(id, &mut self.scheduler);
        self.request_frame();
    }

    /// Queues idle-time work, run by [`Self::on_idle`].
    pub fn add_predict_task(&mut self, task: impl FnOnce(Instant, &mut UiTaskScheduler) + 'static) {
        self.scheduler.add_predict_task(task);
    }

    /// Queues a callback for the end of the next flush cycle.
    pub fn add_after_layout_task(&mut self, task: impl FnOnce() + 'static) {
        self.scheduler.add_after_layout_task(task);
        self.request_frame();
    }

    /// Resizes the surface and re-measures every root.
    pub fn set_root_size(&mut self, size: Size) {
        if self.tree.root_size() == size {
            return;
        }
        debug!(width = size.width, height = size.height, "surface resized");
        self.tree.set_root_size(size);
        let roots: Vec<_> = self.tree.roots().collect();
        for root in roots {
            self.mark_dirty_node(root, PropertyChangeFlag::MEASURE);
        }
    }

    // ========================================================================
    // Driving
    // ========================================================================

    /// Runs one flush cycle for the frame starting at `frame_time`.
    ///
    /// Requests another frame when work was deferred to the next cycle.
    pub fn flush_vsync(&mut self, frame_time: Instant) -> FrameResult {
        self.frame_requested = false;
        if self.scheduler.is_empty() && self.scheduler.after_layout_task_count() == 0 {
            trace!("vsync without pending work");
            return FrameResult::Idle;
        }

        let span = info_span!("flush_vsync", ?frame_time);
        let _guard = span.enter();
        self.scheduler.flush_task(&mut self.tree);
        if !self.scheduler.is_empty() {
            trace!(
                layout = self.scheduler.dirty_layout_count(),
                render = self.scheduler.dirty_render_count(),
                "work deferred to the next frame"
            );
            self.frame_requested = true;
        }
        FrameResult::Presented
    }

    /// Flushes until nothing is dirty, at most
    /// [`PipelineConfig::max_flush_passes`] times.
    pub fn flush_pipeline_immediately(&mut self) {
        let span = info_span!("flush_pipeline_immediately");
        let _guard = span.enter();
        for _ in 0..self.config.max_flush_passes {
            self.scheduler.flush_task(&mut self.tree);
            if self.scheduler.is_empty() {
                return;
            }
        }
        warn!(
            passes = self.config.max_flush_passes,
            layout = self.scheduler.dirty_layout_count(),
            render = self.scheduler.dirty_render_count(),
            "dirty nodes left after immediate flush"
        );
    }

    /// Runs predict tasks until the idle threshold before `deadline`.
    pub fn on_idle(&mut self, deadline: Instant) {
        let Some(deadline) = deadline.checked_sub(self.config.idle_threshold()) else {
            return;
        };
        self.scheduler.flush_predict_task(deadline);
    }

    /// Returns whether a frame was requested since the last call, and clears
    /// the request.
    pub fn take_frame_request(&mut self) -> bool {
        mem::take(&mut self.frame_requested)
    }

    /// Drops every queued node and task, keeping the tree.
    ///
    /// Nodes keep their pending change flags and are queued again by the
    /// next [`Self::mark_dirty_node`].
    pub fn clean_up(&mut self) {
        self.scheduler.clean_up();
        self.tree.clear_dirty_marks();
        self.frame_requested = false;
        debug!("pipeline queues cleaned up");
    }

    /// Drops every pending task and every node.
    pub fn destroy(&mut self) {
        self.clean_up();
        let roots: Vec<_> = self.tree.roots().collect();
        for root in roots {
            if let Err(err) = self.tree.remove_node(root) {
                warn!(%err, "failed to remove root");
            }
        }
        self.frame_requested = false;
        debug!("pipeline destroyed");
    }

    fn request_frame(&mut self) {
        if !self.scheduler.is_empty() {
            self.frame_requested = true;
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Configuration the pipeline was created with.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The frame tree.
    #[must_use]
    pub const fn tree(&self) -> &FrameTree {
        &self.tree
    }

    /// The scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &UiTaskScheduler {
        &self.scheduler
    }

    /// Stage root on page 0.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Node `id`, if it exists.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&FrameNode> {
        self.tree.get(id)
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
