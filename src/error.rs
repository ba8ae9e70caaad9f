//! Error types of the facade crate.

use std::io;
use std::path::PathBuf;

use tideui_pipeline::TreeError;

/// Failure to load a [`PipelineConfig`](tideui_pipeline::PipelineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The contents are not a valid configuration.
    #[error("failed to parse pipeline configuration")]
    Parse(#[from] serde_json::Error),
}

/// Any error returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A structural tree operation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}
