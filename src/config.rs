//! Loading [`PipelineConfig`] from JSON.
//!
//! ```
//! let config = tideui::config::from_json_str(r#"{ "root_width": 1080.0 }"#).unwrap();
//! assert_eq!(config.root_width, 1080.0);
//! assert_eq!(config.max_flush_passes, 3);
//! ```

use std::fs;
use std::path::Path;

use tideui_pipeline::PipelineConfig;
use tracing::debug;

use crate::error::ConfigError;

/// Parses a configuration. Missing fields take their defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if `json` is not a valid configuration.
pub fn from_json_str(json: &str) -> Result<PipelineConfig, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses the configuration file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if its contents are invalid.
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = from_json_str(&contents)?;
    debug!(path = %path.display(), ?config, "loaded pipeline configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::process;

    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(from_json_str("{}").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = from_json_str(r#"{ "root_height": 640.0, "idle_threshold_ms": 4 }"#).unwrap();
        assert_eq!(config.root_height, 640.0);
        assert_eq!(config.root_width, PipelineConfig::default().root_width);
        assert_eq!(config.idle_threshold().as_millis(), 4);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = from_json_str(r#"{ "max_flush_passes": "many" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let path = env::temp_dir().join(format!("tideui-config-{}.json", process::id()));
        fs::write(&path, r#"{ "max_flush_passes": 5 }"#).unwrap();
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.max_flush_passes, 5);

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("tideui-config"));
    }
}
