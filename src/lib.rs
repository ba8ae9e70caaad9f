#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
/// Error types returned by configuration loading and tree building.
pub mod error;
pub mod logging;

#[doc(inline)]
pub use error::{ConfigError, Error};
#[doc(inline)]
pub use tideui_components as components;
#[doc(inline)]
pub use tideui_pipeline as pipeline;

pub use tideui_pipeline::{
    DirtySwapConfig, FrameResult, FrameTree, NodeId, Pattern, PatternContext, PipelineConfig,
    PipelineContext, UiTaskScheduler,
};

pub mod prelude {
    //! Commonly used types for building and driving a frame tree.
    //!
    //! ```
    //! use tideui::prelude::*;
    //!
    //! let mut pipeline = PipelineContext::new(PipelineConfig::default());
    //! let row = pipeline.create_node("row", LinearPattern::row(8.0));
    //! pipeline.mount_to_parent(pipeline.root(), row).unwrap();
    //! pipeline.flush_pipeline_immediately();
    //! ```
    pub use tideui_components::{
        ImageFit, ImageInfo, ImagePattern, LinearPattern, QrCodePattern, SliderPattern,
    };
    pub use tideui_core::{
        Axis, Color, EdgeInsets, OptionalSize, PaintValue, Point, PropertyChangeFlag, Rect, Size,
        Visibility,
    };
    pub use tideui_pipeline::{
        DirtySwapConfig, DrawCommand, FrameResult, LayoutWrapper, NodeId, Pattern,
        PatternContext, PipelineConfig, PipelineContext,
    };
}
