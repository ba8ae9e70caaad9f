//! Tunables for [`PipelineContext`](crate::PipelineContext).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tideui_core::Size;

/// Settings read once when a pipeline is created.
///
/// Every field has a default, so partial configuration files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Width of the surface roots are laid out into.
    pub root_width: f32,
    /// Height of the surface roots are laid out into.
    pub root_height: f32,
    /// Upper bound of flush cycles run by
    /// [`PipelineContext::flush_pipeline_immediately`](crate::PipelineContext::flush_pipeline_immediately).
    pub max_flush_passes: u32,
    /// Time kept free before an idle deadline, in milliseconds.
    pub idle_threshold_ms: u64,
}

impl PipelineConfig {
    /// Surface size built from the configured width and height.
    #[must_use]
    pub const fn root_size(&self) -> Size {
        Size::new(self.root_width, self.root_height)
    }

    /// Idle threshold as a [`Duration`].
    #[must_use]
    pub const fn idle_threshold(&self) -> Duration {
        Duration::from_millis(self.idle_threshold_ms)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root_width: 720.0,
            root_height: 1280.0,
            max_flush_passes: 3,
            idle_threshold_ms: 1,
        }
    }
}
