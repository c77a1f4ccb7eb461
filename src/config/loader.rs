//! Configuration loading and discovery for `scalecmp.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::ScalecmpConfig;
use crate::scalers::ScalerKind;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up during discovery.
pub const CONFIG_FILE_NAME: &str = "scalecmp.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse scalecmp.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override compare output directory
    pub out: Option<PathBuf>,
    /// Override compare factor
    pub factor: Option<u32>,
    /// Override the compare scaler selection
    pub scalers: Option<Vec<ScalerKind>>,
    /// Override bench iterations
    pub iterations: Option<u32>,
    /// Override bench factor
    pub bench_factor: Option<u32>,
    /// Override DDT edge map smoothing
    pub ddt_smoothing: Option<bool>,
}

/// Find scalecmp.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for scalecmp.toml
/// 2. Check XDG_CONFIG_HOME/scalecmp/scalecmp.toml (or ~/.config/scalecmp/scalecmp.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find scalecmp.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("scalecmp").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find scalecmp.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a scalecmp.toml file.
///
/// If a path is provided, loads from that file (which must exist). Otherwise
/// uses [`find_config`], falling back to [`default_config`] when nothing is
/// found.
pub fn load_config(path: Option<&Path>) -> Result<ScalecmpConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<ScalecmpConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: ScalecmpConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Configuration used when no scalecmp.toml is found.
pub fn default_config() -> ScalecmpConfig {
    ScalecmpConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut ScalecmpConfig, overrides: &CliOverrides) {
    if let Some(ref out) = overrides.out {
        config.compare.out = out.clone();
    }

    if let Some(factor) = overrides.factor {
        config.compare.factor = factor;
    }

    if let Some(ref scalers) = overrides.scalers {
        config.compare.scalers = scalers.clone();
    }

    if let Some(iterations) = overrides.iterations {
        config.bench.iterations = iterations;
    }

    if let Some(factor) = overrides.bench_factor {
        config.bench.factor = factor;
    }

    if let Some(smoothing) = overrides.ddt_smoothing {
        config.ddt.smoothing = smoothing;
    }
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
