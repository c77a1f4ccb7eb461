//! Configuration schema types for `scalecmp.toml`
//!
//! Every section and field is optional; missing values take the defaults
//! below.

use crate::scalers::ScalerKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the `compare` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Integer upscale factor
    #[serde(default = "default_factor")]
    pub factor: u32,
    /// Directory receiving `<stem><Name>.png` outputs
    #[serde(default = "default_out")]
    pub out: PathBuf,
    /// Scalers to run; empty means all of them
    #[serde(default)]
    pub scalers: Vec<ScalerKind>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self { factor: default_factor(), out: default_out(), scalers: Vec::new() }
    }
}

fn default_factor() -> u32 {
    2
}

fn default_out() -> PathBuf {
    PathBuf::from(".")
}

/// Settings for the `bench` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Timed runs per scaler
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Integer upscale factor
    #[serde(default = "default_factor")]
    pub factor: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self { iterations: default_iterations(), factor: default_factor() }
    }
}

fn default_iterations() -> u32 {
    5
}

/// Options for the DDT scaler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DdtConfig {
    /// Apply the majority filter to the edge map
    #[serde(default = "default_true")]
    pub smoothing: bool,
}

impl Default for DdtConfig {
    fn default() -> Self {
        Self { smoothing: true }
    }
}

fn default_true() -> bool {
    true
}

/// Complete scalecmp.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalecmpConfig {
    #[serde(default)]
    pub compare: CompareConfig,
    #[serde(default)]
    pub bench: BenchConfig,
    #[serde(default)]
    pub ddt: DdtConfig,
}

/// Validation error for config fields
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "compare.factor")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scalecmp.toml: '{}' {}", self.field, self.message)
    }
}

impl ScalecmpConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.compare.factor == 0 {
            errors.push(ConfigValidationError {
                field: "compare.factor".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.bench.factor == 0 {
            errors.push(ConfigValidationError {
                field: "bench.factor".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.bench.iterations == 0 {
            errors.push(ConfigValidationError {
                field: "bench.iterations".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        for (i, kind) in self.compare.scalers.iter().enumerate() {
            if self.compare.scalers[..i].contains(kind) {
                errors.push(ConfigValidationError {
                    field: "compare.scalers".to_string(),
                    message: format!("lists '{}' more than once", kind),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config: ScalecmpConfig = toml::from_str("").unwrap();
        assert_eq!(config, ScalecmpConfig::default());
        assert_eq!(config.compare.factor, 2);
        assert_eq!(config.compare.out, PathBuf::from("."));
        assert_eq!(config.bench.iterations, 5);
        assert!(config.ddt.smoothing);
        assert!(config.is_valid());
    }

    #[test]
    fn test_parse_full() {
        let toml_str = r#"
[compare]
factor = 4
out = "results"
scalers = ["ddt", "selfsim", "linear"]

[bench]
iterations = 20
factor = 3

[ddt]
smoothing = false
"#;
        let config: ScalecmpConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.compare.factor, 4);
        assert_eq!(config.compare.out, PathBuf::from("results"));
        assert_eq!(
            config.compare.scalers,
            vec![ScalerKind::Ddt, ScalerKind::SelfSim, ScalerKind::Linear]
        );
        assert_eq!(config.bench.iterations, 20);
        assert_eq!(config.bench.factor, 3);
        assert!(!config.ddt.smoothing);
    }

    #[test]
    fn test_parse_partial_section() {
        let config: ScalecmpConfig = toml::from_str("[bench]\niterations = 1\n").unwrap();
        assert_eq!(config.bench.iterations, 1);
        assert_eq!(config.bench.factor, 2);
    }

    #[test]
    fn test_unknown_scaler_rejected() {
        let result: Result<ScalecmpConfig, _> = toml::from_str("[compare]\nscalers = [\"hqx\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_zero_values() {
        let mut config = ScalecmpConfig::default();
        config.compare.factor = 0;
        config.bench.iterations = 0;

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "compare.factor");
        assert_eq!(errors[1].field, "bench.iterations");
        assert_eq!(errors[1].to_string(), "scalecmp.toml: 'bench.iterations' must be at least 1");
    }

    #[test]
    fn test_validate_duplicate_scalers() {
        let mut config = ScalecmpConfig::default();
        config.compare.scalers = vec![ScalerKind::Eep, ScalerKind::Linear, ScalerKind::Eep];

        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "lists 'eep' more than once");
    }
}
