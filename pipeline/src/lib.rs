//! Frame tree, dirty-node scheduling and the layout/paint pipeline.
//!
//! Nodes live in a [`FrameTree`] and get their behavior from a [`Pattern`].
//! Property changes mark nodes dirty; [`UiTaskScheduler`] collects the dirty
//! nodes per page and flushes them once per frame: layout in ascending depth
//! order, then painting, then after-layout callbacks. [`PipelineContext`]
//! owns both and adapts them to vsync and idle callbacks.
//!
//! ```
//! use tideui_pipeline::{PipelineConfig, PipelineContext};
//!
//! let mut pipeline = PipelineContext::new(PipelineConfig::default());
//! pipeline.flush_pipeline_immediately();
//! assert!(pipeline.scheduler().is_empty());
//! ```
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod context;
pub mod layout;
pub mod paint;
pub mod pattern;
pub mod scheduler;
pub mod tree;

#[doc(inline)]
pub use config::PipelineConfig;
#[doc(inline)]
pub use context::{FrameResult, PipelineContext};
pub use layout::{BoxLayoutAlgorithm, LayoutAlgorithm, LayoutWrapper};
pub use paint::{DrawCommand, NodePaintMethod, PaintWrapper, RenderContext, Scene, SceneBuilder};
#[doc(inline)]
pub use pattern::{DirtySwapConfig, Pattern, PatternContext};
#[doc(inline)]
pub use scheduler::{AfterLayoutTask, DirtyNode, DirtyNodeSet, PageId, PredictTask, UiTaskScheduler};
pub use tree::{FrameNode, FrameTree, NodeId, TreeError};
