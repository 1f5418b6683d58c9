//! Time-block extraction: slice one gridded file into per-period files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use boreas_calendar::{group_by_month, group_by_season, monthly_blocks};
use boreas_io::{ReaderConfig, WriterConfig, read_grid, write_grid};

use crate::cli::ExtractArgs;

/// Run the extract subcommand.
pub fn run(args: ExtractArgs) -> Result<()> {
    let reader = ReaderConfig::new(&args.variable);
    let writer = WriterConfig::new(&args.variable);

    info!(path = %args.input.display(), "reading input grid");
    let grid = read_grid(&args.input, &reader)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;

    // Each block is a (file name, time indices) pair.
    let blocks: Vec<(String, Vec<usize>)> = match args.period.to_lowercase().as_str() {
        "monthly" => group_by_month(grid.time())
            .into_iter()
            .map(|((year, month), indices)| {
                (format!("{}_{year}_{month:02}.nc", args.variable), indices)
            })
            .collect(),
        "seasonal" => group_by_season(grid.time())
            .into_iter()
            .map(|((year, season), indices)| {
                (format!("{}_{year}_{season}.nc", args.variable), indices)
            })
            .collect(),
        "annual" => {
            let start_year = match args.start_year.or_else(|| {
                grid.time().year_month(0).map(|(year, _)| year)
            }) {
                Some(year) => year,
                None => bail!("empty time axis; pass --start-year to label blocks"),
            };
            monthly_blocks(grid.n_time(), start_year, args.years_per_block)?
                .into_iter()
                .map(|block| {
                    (
                        format!(
                            "{}_{}CE_{}CE.nc",
                            args.variable, block.start_year, block.end_year
                        ),
                        block.range.collect(),
                    )
                })
                .collect()
        }
        other => bail!("unknown period {other:?} (expected monthly, seasonal, or annual)"),
    };

    let mut n_written = 0usize;
    for (name, indices) in blocks {
        if indices.is_empty() {
            warn!(file = %name, "no time steps in block, skipping");
            continue;
        }
        let block = grid.select_time(&indices)?;
        let out_path: PathBuf = args.output_dir.join(&name);
        write_grid(&out_path, &block, &writer)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        info!(path = %out_path.display(), n_time = block.n_time(), "saved block");
        n_written += 1;
    }

    info!(n_written, "extraction complete");
    Ok(())
}
