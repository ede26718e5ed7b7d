//! TOML configuration for the motion pipeline.
//!
//! Every field is optional; anything left out keeps its default. A file
//! for a 100 Hz recording might look like:
//!
//! ```toml
//! delta = [0.01, 0.01, 0.01]
//! noise_threshold = [0.05, 0.05, 0.05]
//! stationary_run = 10
//! degree = 3
//!
//! [duration]
//! min_duration_frames = 5
//! effective_percentage = 0.2
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::FeatureError;
use crate::pipeline::PipelineConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] FeatureError),
}

/// Parses and validates a pipeline configuration.
pub fn from_toml_str(text: &str) -> Result<PipelineConfig, ConfigError> {
    let config: PipelineConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Loads a pipeline configuration from disk.
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = from_toml_str(&contents)?;
    info!(?path, "Loaded config");
    Ok(config)
}

pub fn to_toml_string(config: &PipelineConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}
