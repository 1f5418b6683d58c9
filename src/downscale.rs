//! The bias-correction and downscaling pipeline.
//!
//! Two workflows are supported, differing in where the correction happens:
//!
//! - **per-cell**: regrid the model's historical and future epochs onto the
//!   reference grid, then run three-distribution quantile mapping cell by
//!   cell against the reference series.
//! - **bulk**: calibrate the model's historical epoch against the reference
//!   with a whole-field rank transform, apply the same transform to each
//!   future file, then downscale by scattered interpolation.
//!
//! In batch mode (a directory of future files) a failing file is logged
//! and skipped; the batch carries on.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use boreas_grid::Grid;
use boreas_io::{ReaderConfig, WriterConfig, read_grid, write_grid};
use boreas_quantile_map::{QmConfig, correct_grid, rank_transform};
use boreas_regrid::{
    RegridMethod, RegridWeights, normalize_longitudes, restrict_longitudes, scattered,
};

use crate::cli::DownscaleArgs;
use crate::config::load_config;
use crate::convert::{self, Workflow};

/// Run the downscale pipeline.
pub fn run(args: DownscaleArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let workflow = convert::parse_workflow(
        args.workflow
            .as_deref()
            .unwrap_or(config.downscale.workflow.as_str()),
    )?;
    let method = convert::parse_method(
        args.method
            .as_deref()
            .unwrap_or(config.downscale.method.as_str()),
    )?;
    let qm_config = convert::build_qm_config(&config.downscale);

    let reference_reader = convert::build_reference_reader(&config.io);
    let model_reader = convert::build_model_reader(&config.io);

    let mut writer_config = WriterConfig::new(&config.io.output_var);
    if let Some(units) = &config.io.output_units {
        writer_config = writer_config.with_units(units);
    }

    info!(path = %args.reference.display(), "reading reference grid");
    let reference = read_grid(&args.reference, &reference_reader)
        .with_context(|| format!("failed to read reference: {}", args.reference.display()))?;

    info!(path = %args.historical.display(), "reading historical model grid");
    let historical = read_grid(&args.historical, &model_reader)
        .with_context(|| format!("failed to read historical: {}", args.historical.display()))?;

    let batch = args.future.is_dir();
    let future_files = if batch {
        list_netcdf_files(&args.future)?
    } else {
        vec![args.future.clone()]
    };
    if future_files.is_empty() {
        bail!("no NetCDF files found in {}", args.future.display());
    }
    if batch {
        fs::create_dir_all(&args.output)
            .with_context(|| format!("failed to create {}", args.output.display()))?;
    }

    // Workflow-specific preparation shared across all future files.
    let prepared = match workflow {
        Workflow::PerCell => prepare_per_cell(&reference, historical, method)?,
        Workflow::Bulk => prepare_bulk(&reference, historical)?,
    };

    let mut n_ok = 0usize;
    let mut n_failed = 0usize;
    for path in &future_files {
        let out_path = if batch {
            let name = path.file_name().context("future file has no name")?;
            args.output.join(name)
        } else {
            args.output.clone()
        };

        let result = process_file(
            path,
            &out_path,
            &reference,
            &prepared,
            &model_reader,
            &qm_config,
            &writer_config,
            method,
        );
        match result {
            Ok(()) => n_ok += 1,
            Err(e) if batch => {
                warn!(path = %path.display(), error = %format!("{e:#}"), "skipping file");
                n_failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(n_ok, n_failed, "downscaling complete");
    Ok(())
}

/// Per-workflow state prepared once and reused for every future file.
enum Prepared {
    PerCell {
        /// Historical epoch regridded onto the reference coordinates.
        historical_fine: Grid,
        /// Weights for the historical grid pair, reusable when a future
        /// file shares the historical grid's coordinates.
        weights: RegridWeights,
        /// Coordinates the weights were built for.
        model_lat: Vec<f64>,
        model_lon: Vec<f64>,
    },
    Bulk {
        /// Historical epoch calibrated against the reference distribution.
        calibrated: Grid,
    },
}

fn prepare_per_cell(reference: &Grid, historical: Grid, method: RegridMethod) -> Result<Prepared> {
    let historical = normalize_grid_longitudes(historical)?;
    let weights = RegridWeights::build(
        historical.lat(),
        historical.lon(),
        reference.lat(),
        reference.lon(),
        method,
    )?;
    let fine_data = weights.apply_stack(historical.data(), historical.n_time())?;
    let historical_fine = Grid::new(
        fine_data,
        historical.time().clone(),
        reference.lat().to_vec(),
        reference.lon().to_vec(),
    )?;
    info!(
        n_lat = reference.n_lat(),
        n_lon = reference.n_lon(),
        "historical epoch regridded onto reference grid"
    );
    Ok(Prepared::PerCell {
        historical_fine,
        model_lat: historical.lat().to_vec(),
        model_lon: historical.lon().to_vec(),
        weights,
    })
}

fn prepare_bulk(reference: &Grid, historical: Grid) -> Result<Prepared> {
    let corrected = rank_transform(reference.data(), historical.data())
        .context("bulk calibration of the historical epoch failed")?;
    let calibrated = Grid::new(
        corrected,
        historical.time().clone(),
        historical.lat().to_vec(),
        historical.lon().to_vec(),
    )?;
    info!("historical epoch calibrated against reference distribution");
    Ok(Prepared::Bulk { calibrated })
}

#[allow(clippy::too_many_arguments)]
fn process_file(
    path: &Path,
    out_path: &Path,
    reference: &Grid,
    prepared: &Prepared,
    model_reader: &ReaderConfig,
    qm_config: &QmConfig,
    writer_config: &WriterConfig,
    method: RegridMethod,
) -> Result<()> {
    info!(path = %path.display(), "processing future file");
    let future = read_grid(path, model_reader)
        .with_context(|| format!("failed to read future: {}", path.display()))?;
    let future = normalize_grid_longitudes(future)?;

    let corrected = match prepared {
        Prepared::PerCell {
            historical_fine,
            weights,
            model_lat,
            model_lon,
        } => {
            // Reuse the precomputed weights when the future file shares the
            // historical grid; otherwise build a pair-specific mapping.
            let fine_data = if future.lat() == model_lat.as_slice()
                && future.lon() == model_lon.as_slice()
            {
                weights.apply_stack(future.data(), future.n_time())?
            } else {
                warn!(path = %path.display(), "future grid differs from historical; rebuilding weights");
                let w = RegridWeights::build(
                    future.lat(),
                    future.lon(),
                    reference.lat(),
                    reference.lon(),
                    method,
                )?;
                w.apply_stack(future.data(), future.n_time())?
            };
            let future_fine = Grid::new(
                fine_data,
                future.time().clone(),
                reference.lat().to_vec(),
                reference.lon().to_vec(),
            )?;

            let result = correct_grid(reference, historical_fine, &future_fine, qm_config)?;
            info!(
                n_corrected = result.n_corrected(),
                n_skipped = result.n_skipped(),
                "per-cell correction finished"
            );
            result.into_grid()
        }
        Prepared::Bulk { calibrated } => {
            let corrected = rank_transform(calibrated.data(), future.data())
                .with_context(|| format!("rank transform failed for {}", path.display()))?;
            let downscaled = scattered::interpolate_stack(
                future.lat(),
                future.lon(),
                &corrected,
                future.n_time(),
                reference.lat(),
                reference.lon(),
            )?;
            Grid::new(
                downscaled,
                future.time().clone(),
                reference.lat().to_vec(),
                reference.lon().to_vec(),
            )?
        }
    };

    let corrected = restrict_grid_longitudes(corrected)?;
    write_grid(out_path, &corrected, writer_config)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(path = %out_path.display(), "saved");
    Ok(())
}

/// Rewrites a grid's longitude axis into the -180..180 convention,
/// reordering data columns to match.
fn normalize_grid_longitudes(grid: Grid) -> Result<Grid> {
    let (n_time, n_lat) = (grid.n_time(), grid.n_lat());
    let (data, time, lat, lon) = grid.into_parts();
    let (new_lon, new_data) = normalize_longitudes(&lon, &data, n_time, n_lat)?;
    Ok(Grid::new(new_data, time, lat, new_lon)?)
}

/// Drops any output columns outside the canonical -180..180 range.
fn restrict_grid_longitudes(grid: Grid) -> Result<Grid> {
    let (n_time, n_lat) = (grid.n_time(), grid.n_lat());
    let (data, time, lat, lon) = grid.into_parts();
    let (new_lon, new_data) = restrict_longitudes(&lon, &data, n_time, n_lat)?;
    Ok(Grid::new(new_data, time, lat, new_lon)?)
}

/// All `.nc` files directly inside `dir`, sorted by name.
fn list_netcdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "nc"))
        .collect();
    files.sort();
    Ok(files)
}
