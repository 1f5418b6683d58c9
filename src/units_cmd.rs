//! Batch unit conversion: rescale every grid file in a folder.

use std::fs;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use boreas_io::{ReaderConfig, WriterConfig, read_grid, write_grid};

use crate::cli::ConvertUnitsArgs;

/// Run the convert-units subcommand.
pub fn run(args: ConvertUnitsArgs) -> Result<()> {
    let reader = ReaderConfig::new(&args.variable);
    let writer = WriterConfig::new(&args.variable).with_units(&args.units);

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;

    let mut files: Vec<_> = fs::read_dir(&args.input_dir)
        .with_context(|| format!("failed to list {}", args.input_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "nc"))
        .collect();
    files.sort();
    if files.is_empty() {
        bail!("no NetCDF files found in {}", args.input_dir.display());
    }

    let mut n_ok = 0usize;
    let mut n_failed = 0usize;
    for path in &files {
        let result = (|| -> Result<()> {
            let mut grid = read_grid(path, &reader)
                .with_context(|| format!("failed to read {}", path.display()))?;
            grid.scale(args.factor);

            let name = path.file_name().context("input file has no name")?;
            let out_path = args.output_dir.join(name);
            write_grid(&out_path, &grid, &writer)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            info!(path = %out_path.display(), factor = args.factor, "converted");
            Ok(())
        })();

        match result {
            Ok(()) => n_ok += 1,
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{e:#}"), "skipping file");
                n_failed += 1;
            }
        }
    }

    info!(n_ok, n_failed, "conversion complete");
    Ok(())
}
