//! Vapor-pressure-deficit derivation from paired NetCDF inputs.

use anyhow::{Context, Result};
use tracing::info;

use boreas_io::{ReaderConfig, WriterConfig, read_grid, write_grid};
use boreas_vpd::derive_vpd;

use crate::cli::VpdArgs;

/// Run the vpd subcommand.
pub fn run(args: VpdArgs) -> Result<()> {
    info!(path = %args.temperature.display(), "reading temperature");
    let temperature = read_grid(&args.temperature, &ReaderConfig::new(&args.temperature_var))
        .with_context(|| format!("failed to read {}", args.temperature.display()))?;

    info!(path = %args.relhum.display(), "reading relative humidity");
    let relhum = read_grid(&args.relhum, &ReaderConfig::new(&args.relhum_var))
        .with_context(|| format!("failed to read {}", args.relhum.display()))?;

    let vpd = derive_vpd(&temperature, &relhum).context("VPD derivation failed")?;

    let writer = WriterConfig::new("VPD")
        .with_units("kPa")
        .with_description(
            "Vapour Pressure Deficit (VPD) calculated using relative humidity and temperature",
        );
    write_grid(&args.output, &vpd, &writer)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(path = %args.output.display(), "VPD saved");
    Ok(())
}
