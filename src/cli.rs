use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Boreas climate downscaling toolkit.
#[derive(Parser)]
#[command(
    name = "boreas",
    version,
    about = "Bias correction and spatial downscaling of climate projections"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Bias-correct and downscale model projections onto a reference grid.
    Downscale(DownscaleArgs),
    /// Slice a gridded file into monthly/seasonal/annual blocks.
    Extract(ExtractArgs),
    /// Derive vapor pressure deficit from temperature and humidity.
    Vpd(VpdArgs),
    /// Rescale a folder of gridded files to different units.
    ConvertUnits(ConvertUnitsArgs),
}

/// Arguments for the `downscale` subcommand.
#[derive(clap::Args)]
pub struct DownscaleArgs {
    /// Path to TOML configuration file (defaults used if absent).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// High-resolution observational reference NetCDF file.
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Model historical/present-day NetCDF file.
    #[arg(long)]
    pub historical: PathBuf,

    /// Model future NetCDF file, or a directory of them.
    #[arg(short, long)]
    pub future: PathBuf,

    /// Output file (single input) or directory (batch input).
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override correction workflow from config (per-cell or bulk).
    #[arg(short, long)]
    pub workflow: Option<String>,

    /// Override regridding method from config (bilinear, nearest, conservative).
    #[arg(short, long)]
    pub method: Option<String>,
}

/// Arguments for the `extract` subcommand.
#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Input NetCDF file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory for the extracted block files.
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Data variable to read (also used in output file names).
    #[arg(long)]
    pub variable: String,

    /// Block period: monthly, seasonal, or annual.
    #[arg(short, long)]
    pub period: String,

    /// Years per block for the annual period.
    #[arg(long, default_value_t = 1)]
    pub years_per_block: usize,

    /// First calendar year, for annual block labels (defaults to the
    /// file's own first time step).
    #[arg(long)]
    pub start_year: Option<i32>,
}

/// Arguments for the `vpd` subcommand.
#[derive(clap::Args)]
pub struct VpdArgs {
    /// Air temperature NetCDF file (Kelvin).
    #[arg(short, long)]
    pub temperature: PathBuf,

    /// Relative humidity NetCDF file (percent).
    #[arg(short, long)]
    pub relhum: PathBuf,

    /// Output NetCDF file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Temperature variable name.
    #[arg(long, default_value = "tas")]
    pub temperature_var: String,

    /// Relative humidity variable name.
    #[arg(long, default_value = "hur")]
    pub relhum_var: String,
}

/// Arguments for the `convert-units` subcommand.
#[derive(clap::Args)]
pub struct ConvertUnitsArgs {
    /// Directory of input NetCDF files.
    #[arg(short, long)]
    pub input_dir: PathBuf,

    /// Directory for converted output files.
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Data variable to convert.
    #[arg(long)]
    pub variable: String,

    /// Multiplicative conversion factor (mm to m by default).
    #[arg(long, default_value_t = 1e-3)]
    pub factor: f64,

    /// Units string written on the converted variable.
    #[arg(long, default_value = "m")]
    pub units: String,
}
