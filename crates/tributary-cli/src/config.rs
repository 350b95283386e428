//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files,
//! either from an explicit path or from the local project directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use tributary::{TributaryError, layout::Engine};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TributaryError {
    fn from(err: ConfigError) -> Self {
        TributaryError::Config(err.to_string())
    }
}

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Layout configuration section
///
/// Every field is optional; unset fields keep the engine's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    /// Edge-to-edge gap between adjacent layers
    #[serde(default)]
    pub layer_gap: Option<f32>,

    /// Minimum gap between node boxes within a layer
    #[serde(default)]
    pub node_gap: Option<f32>,

    /// Margin before the first layer
    #[serde(default)]
    pub margin: Option<f32>,

    /// Upper bound on crossing-reduction sweeps
    #[serde(default)]
    pub max_sweeps: Option<usize>,
}

impl LayoutConfig {
    /// Builds an engine from the configured overrides.
    pub fn engine(&self) -> Engine {
        let mut engine = Engine::new();
        if let Some(gap) = self.layer_gap {
            engine.set_layer_gap(gap);
        }
        if let Some(gap) = self.node_gap {
            engine.set_node_gap(gap);
        }
        if let Some(margin) = self.margin {
            engine.set_margin(margin);
        }
        if let Some(sweeps) = self.max_sweeps {
            engine.set_max_sweeps(sweeps);
        }
        engine
    }
}

/// Find and load configuration
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project file (tributary.toml)
/// 3. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TributaryError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("tributary.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, TributaryError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_engine_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        // Just verify the engine builds from an empty config.
        let _engine = config.layout.engine();
        assert!(config.layout.layer_gap.is_none());
    }

    #[test]
    fn test_partial_layout_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            layer_gap = 120.0
            max_sweeps = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.layout.layer_gap, Some(120.0));
        assert_eq!(config.layout.node_gap, None);
        assert_eq!(config.layout.max_sweeps, Some(8));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[layout\nlayer_gap = ");
        assert!(result.is_err());
    }
}
