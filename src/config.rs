use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Boreas configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoreasConfig {
    /// Variable naming for input and output files.
    #[serde(default)]
    pub io: IoToml,

    /// Downscale pipeline settings.
    #[serde(default)]
    pub downscale: DownscaleToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Data variable in the observational reference file.
    #[serde(default = "default_reference_var")]
    pub reference_var: String,
    /// Fallback names for the reference variable.
    #[serde(default)]
    pub reference_aliases: Vec<String>,
    /// Data variable in the model files.
    #[serde(default = "default_model_var")]
    pub model_var: String,
    /// Fallback names for the model variable.
    #[serde(default)]
    pub model_aliases: Vec<String>,
    /// Variable name written on corrected output.
    #[serde(default = "default_output_var")]
    pub output_var: String,
    /// Units attribute written on corrected output.
    #[serde(default)]
    pub output_units: Option<String>,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            reference_var: default_reference_var(),
            reference_aliases: Vec::new(),
            model_var: default_model_var(),
            model_aliases: Vec::new(),
            output_var: default_output_var(),
            output_units: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownscaleToml {
    /// Correction workflow: "per-cell" or "bulk".
    #[serde(default = "default_workflow")]
    pub workflow: String,
    /// Regridding method: "bilinear", "nearest", or "conservative".
    #[serde(default = "default_method")]
    pub method: String,
    /// Minimum finite samples per cell for the per-cell workflow.
    #[serde(default = "default_min_valid")]
    pub min_valid: usize,
}

impl Default for DownscaleToml {
    fn default() -> Self {
        Self {
            workflow: default_workflow(),
            method: default_method(),
            min_valid: default_min_valid(),
        }
    }
}

fn default_reference_var() -> String {
    "evaporation".to_string()
}
fn default_model_var() -> String {
    "evspsbl".to_string()
}
fn default_output_var() -> String {
    "evap".to_string()
}
fn default_workflow() -> String {
    "per-cell".to_string()
}
fn default_method() -> String {
    "bilinear".to_string()
}
fn default_min_valid() -> usize {
    10
}

/// Loads the configuration file, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<BoreasConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(BoreasConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.io.model_var, "evspsbl");
        assert_eq!(config.downscale.workflow, "per-cell");
        assert_eq!(config.downscale.min_valid, 10);
    }

    #[test]
    fn parses_partial_toml() {
        let config: BoreasConfig = toml::from_str(
            r#"
            [io]
            reference_var = "aet"
            output_units = "m"

            [downscale]
            method = "conservative"
            "#,
        )
        .unwrap();
        assert_eq!(config.io.reference_var, "aet");
        assert_eq!(config.io.output_units.as_deref(), Some("m"));
        assert_eq!(config.downscale.method, "conservative");
        assert_eq!(config.downscale.workflow, "per-cell");
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: std::result::Result<BoreasConfig, _> = toml::from_str("[io]\nbogus = 1\n");
        assert!(result.is_err());
    }
}
