//! Pure conversion functions: TOML/CLI strings -> crate API config types.

use anyhow::{Result, bail};

use boreas_io::ReaderConfig;
use boreas_quantile_map::QmConfig;
use boreas_regrid::RegridMethod;

use crate::config::{DownscaleToml, IoToml};

/// The two correction workflows the downscale pipeline supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// Per-cell three-distribution quantile mapping after regridding.
    PerCell,
    /// Bulk rank-transform calibration before scattered interpolation.
    Bulk,
}

/// Parses a workflow name string into the corresponding enum variant.
pub fn parse_workflow(s: &str) -> Result<Workflow> {
    match s.to_lowercase().as_str() {
        "per-cell" | "percell" => Ok(Workflow::PerCell),
        "bulk" => Ok(Workflow::Bulk),
        other => bail!("unknown workflow: {other:?}"),
    }
}

/// Parses a regridding method name string into the corresponding enum variant.
pub fn parse_method(s: &str) -> Result<RegridMethod> {
    match s.to_lowercase().as_str() {
        "bilinear" => Ok(RegridMethod::Bilinear),
        "nearest" => Ok(RegridMethod::NearestNeighbor),
        "conservative" => Ok(RegridMethod::ConservativeArea),
        other => bail!("unknown regridding method: {other:?}"),
    }
}

/// Builds the reader configuration for the observational reference file.
pub fn build_reference_reader(io: &IoToml) -> ReaderConfig {
    let mut config = ReaderConfig::new(&io.reference_var);
    for alias in &io.reference_aliases {
        config = config.with_alias(alias);
    }
    config
}

/// Builds the reader configuration for model files.
pub fn build_model_reader(io: &IoToml) -> ReaderConfig {
    let mut config = ReaderConfig::new(&io.model_var);
    for alias in &io.model_aliases {
        config = config.with_alias(alias);
    }
    config
}

/// Builds a [`QmConfig`] from the TOML downscale configuration.
pub fn build_qm_config(downscale: &DownscaleToml) -> QmConfig {
    QmConfig::new().with_min_valid(downscale.min_valid)
}
