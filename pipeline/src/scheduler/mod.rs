//! Per-page dirty-node scheduling.
//!
//! [`UiTaskScheduler`] collects layout-dirty and render-dirty nodes per page
//! together with idle-time predict tasks and after-layout callbacks, and
//! drains them in dependency order: layout, then render, then after-layout.
//!
//! Every flush drains a snapshot of the dirty sets. Nodes that become dirty
//! while a flush runs land in the live sets and wait for the next call; the
//! driver keeps flushing while [`UiTaskScheduler::is_empty`] is false.

mod dirty_set;

use core::fmt;
use core::mem;
use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

use tracing::{debug, trace, trace_span};

pub use dirty_set::{DirtyNode, DirtyNodeSet};

use crate::tree::{FrameNode, FrameTree};

/// Identifier of an independent root subtree.
pub type PageId = u32;

/// Deferred idle-time work. Receives the deadline and may queue more work.
pub type PredictTask = Box<dyn FnOnce(Instant, &mut UiTaskScheduler)>;

/// Callback run once the current flush has painted.
pub type AfterLayoutTask = Box<dyn FnOnce()>;

/// Orders and drains dirty nodes and deferred tasks for a single UI thread.
#[derive(Default)]
pub struct UiTaskScheduler {
    dirty_layout_nodes: BTreeMap<PageId, DirtyNodeSet>,
    dirty_render_nodes: BTreeMap<PageId, DirtyNodeSet>,
    predict_tasks: VecDeque<PredictTask>,
    after_layout_tasks: Vec<AfterLayoutTask>,
    current_page_id: PageId,
    layout_pass: u64,
}

impl UiTaskScheduler {
    /// Creates an empty scheduler whose current page is 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Queues `node` for measure and layout.
    ///
    /// Nodes that are not mounted are ignored. Queuing a node twice before a
    /// flush has no effect.
    pub fn add_dirty_layout_node(&mut self, node: &FrameNode) {
        let page = self.page_of(node);
        Self::queue(&mut self.dirty_layout_nodes, page, node, "layout");
    }

    /// Queues `node` for painting. Same rules as [`Self::add_dirty_layout_node`].
    pub fn add_dirty_render_node(&mut self, node: &FrameNode) {
        let page = self.page_of(node);
        Self::queue(&mut self.dirty_render_nodes, page, node, "render");
    }

    /// Appends idle-time work.
    pub fn add_predict_task(&mut self, task: impl FnOnce(Instant, &mut Self) + 'static) {
        self.predict_tasks.push_back(Box::new(task));
    }

    /// Appends a callback for the end of the current flush cycle.
    pub fn add_after_layout_task(&mut self, task: impl FnOnce() + 'static) {
        self.after_layout_tasks.push(Box::new(task));
    }

    /// Sets the page used for nodes that do not carry their own page id.
    pub const fn update_current_page_id(&mut self, id: PageId) {
        self.current_page_id = id;
    }

    /// Page used for nodes that do not carry their own page id.
    #[must_use]
    pub const fn current_page_id(&self) -> PageId {
        self.current_page_id
    }

    fn page_of(&self, node: &FrameNode) -> PageId {
        node.page_id().unwrap_or(self.current_page_id)
    }

    fn queue(
        sets: &mut BTreeMap<PageId, DirtyNodeSet>,
        page: PageId,
        node: &FrameNode,
        kind: &'static str,
    ) {
        if !node.is_mounted() {
            trace!(tag = node.tag(), kind, "ignoring detached node");
            return;
        }
        let inserted = sets
            .entry(page)
            .or_default()
            .insert(DirtyNode::new(node.depth(), node.id()));
        trace!(tag = node.tag(), depth = node.depth(), page, kind, inserted, "queued dirty node");
    }

    // ========================================================================
    // Flushing
    // ========================================================================

    /// Measures, lays out and mounts every layout-dirty node, page by page in
    /// ascending depth.
    ///
    /// Removed nodes and nodes already laid out inside an ancestor's wrapper
    /// during this call are skipped. Swap hooks that ask for a repaint put the
    /// node into the render sets. `force_main_thread` is recorded for tracing;
    /// all work runs inline.
    pub fn flush_layout_task(&mut self, tree: &mut FrameTree, force_main_thread: bool) {
        self.layout_pass += 1;
        let pass = self.layout_pass;
        let span = trace_span!("flush_layout_task", pass, force_main_thread);
        let _guard = span.enter();

        for (page, set) in Self::snapshot(&mut self.dirty_layout_nodes) {
            trace!(page, count = set.len(), "layout page");
            for dirty in set {
                let Some(node) = tree.get(dirty.id) else {
                    debug!(id = ?dirty.id, "skipping removed node");
                    continue;
                };
                if !node.is_mounted() {
                    continue;
                }
                if node.layout_pass == pass {
                    trace!(tag = node.tag(), "already laid out in this pass");
                    continue;
                }

                let constraint = tree.layout_constraint(dirty.id);
                let Some(mut wrapper) = tree.create_layout_wrapper(dirty.id, pass, false) else {
                    continue;
                };
                wrapper.set_active(true);
                wrapper.measure(constraint);
                wrapper.layout();
                tree.mount_to_host(&wrapper, self);
            }
        }
    }

    /// Paints every render-dirty node, page by page in ascending depth.
    pub fn flush_render_task(&mut self, tree: &mut FrameTree, force_main_thread: bool) {
        let span = trace_span!("flush_render_task", force_main_thread);
        let _guard = span.enter();

        for (page, set) in Self::snapshot(&mut self.dirty_render_nodes) {
            trace!(page, count = set.len(), "render page");
            for dirty in set {
                if !tree.get(dirty.id).is_some_and(FrameNode::is_mounted) {
                    debug!(id = ?dirty.id, "skipping removed node");
                    continue;
                }
                for wrapper in tree.create_paint_wrappers(dirty.id) {
                    wrapper.flush_render(tree);
                }
            }
        }
    }

    /// Runs one full cycle: layout, render, then after-layout callbacks.
    pub fn flush_task(&mut self, tree: &mut FrameTree) {
        self.flush_layout_task(tree, false);
        self.flush_render_task(tree, false);
        self.flush_after_layout_task();
    }

    /// Runs predict tasks in FIFO order until the queue is empty or
    /// `deadline` has passed.
    ///
    /// The clock is checked before every task. Tasks queued while draining
    /// run in the same call if time allows. A task that overruns the deadline
    /// is not interrupted.
    pub fn flush_predict_task(&mut self, deadline: Instant) {
        let span = trace_span!("flush_predict_task", queued = self.predict_tasks.len());
        let _guard = span.enter();

        let mut ran = 0usize;
        while Instant::now() < deadline {
            let Some(task) = self.predict_tasks.pop_front() else {
                break;
            };
            task(deadline, self);
            ran += 1;
        }
        trace!(ran, remaining = self.predict_tasks.len(), "predict tasks flushed");
    }

    /// Runs the after-layout callbacks queued so far, in FIFO order.
    ///
    /// Callbacks queued by these callbacks wait for the next cycle.
    pub fn flush_after_layout_task(&mut self) {
        let tasks = mem::take(&mut self.after_layout_tasks);
        if tasks.is_empty() {
            return;
        }
        trace!(count = tasks.len(), "after layout tasks");
        for task in tasks {
            task();
        }
    }

    /// Drops every queued node and task.
    ///
    /// The nodes still believe they are queued until
    /// [`FrameTree::clear_dirty_marks`] runs;
    /// [`crate::PipelineContext::clean_up`] does both.
    pub fn clean_up(&mut self) {
        self.dirty_layout_nodes.clear();
        self.dirty_render_nodes.clear();
        self.predict_tasks.clear();
        self.after_layout_tasks.clear();
    }

    /// Returns true when no node is queued for layout or render.
    ///
    /// Predict and after-layout tasks are not taken into account.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirty_layout_nodes.values().all(DirtyNodeSet::is_empty)
            && self.dirty_render_nodes.values().all(DirtyNodeSet::is_empty)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Number of layout-dirty nodes across all pages.
    #[must_use]
    pub fn dirty_layout_count(&self) -> usize {
        self.dirty_layout_nodes.values().map(DirtyNodeSet::len).sum()
    }

    /// Number of render-dirty nodes across all pages.
    #[must_use]
    pub fn dirty_render_count(&self) -> usize {
        self.dirty_render_nodes.values().map(DirtyNodeSet::len).sum()
    }

    /// Number of queued predict tasks.
    #[must_use]
    pub fn predict_task_count(&self) -> usize {
        self.predict_tasks.len()
    }

    /// Number of queued after-layout callbacks.
    #[must_use]
    pub fn after_layout_task_count(&self) -> usize {
        self.after_layout_tasks.len()
    }

    /// Layout-dirty nodes of `page`, in the order they would be processed.
    #[must_use]
    pub fn dirty_layout_nodes(&self, page: PageId) -> Option<&DirtyNodeSet> {
        self.dirty_layout_nodes.get(&page)
    }

    /// Render-dirty nodes of `page`, in the order they would be processed.
    #[must_use]
    pub fn dirty_render_nodes(&self, page: PageId) -> Option<&DirtyNodeSet> {
        self.dirty_render_nodes.get(&page)
    }

    /// Empties every page set in place and returns the previous contents.
    fn snapshot(sets: &mut BTreeMap<PageId, DirtyNodeSet>) -> Vec<(PageId, DirtyNodeSet)> {
        sets.iter_mut()
            .filter(|(_, set)| !set.is_empty())
            .map(|(page, set)| (*page, mem::take(set)))
            .collect()
    }
}

impl fmt::Debug for UiTaskScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiTaskScheduler")
            .field("dirty_layout_nodes", &self.dirty_layout_nodes)
            .field("dirty_render_nodes", &self.dirty_render_nodes)
            .field("predict_tasks", &self.predict_tasks.len())
            .field("after_layout_tasks", &self.after_layout_tasks.len())
            .field("current_page_id", &self.current_page_id)
            .finish_non_exhaustive()
    }
}
