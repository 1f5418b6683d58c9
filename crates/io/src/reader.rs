//! Reading a [`Grid`] from a NetCDF file.

use std::path::Path;

use tracing::info;

use boreas_grid::Grid;

use crate::error::IoError;
use crate::netcdf_read::{open_file, read_1d_f64, read_data_3d, read_time_axis};

/// Configuration for reading a grid from NetCDF.
///
/// The data variable is looked up by its alias list in order; coordinate
/// variables default to the common `lat`/`latitude`, `lon`/`longitude`,
/// and `time` names.
///
/// # Example
///
/// ```
/// use boreas_io::ReaderConfig;
///
/// let config = ReaderConfig::new("evspsbl").with_alias("evaporation");
/// ```
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    var_aliases: Vec<String>,
    lat_aliases: Vec<String>,
    lon_aliases: Vec<String>,
    time_aliases: Vec<String>,
}

impl ReaderConfig {
    /// Creates a configuration reading the named data variable.
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            var_aliases: vec![variable.into()],
            lat_aliases: vec!["lat".into(), "latitude".into()],
            lon_aliases: vec!["lon".into(), "longitude".into()],
            time_aliases: vec!["time".into()],
        }
    }

    /// Adds a fallback name for the data variable.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.var_aliases.push(alias.into());
        self
    }

    /// Replaces the latitude coordinate alias list.
    pub fn with_lat_aliases(mut self, aliases: &[&str]) -> Self {
        self.lat_aliases = aliases.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Replaces the longitude coordinate alias list.
    pub fn with_lon_aliases(mut self, aliases: &[&str]) -> Self {
        self.lon_aliases = aliases.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Replaces the time coordinate alias list.
    pub fn with_time_aliases(mut self, aliases: &[&str]) -> Self {
        self.time_aliases = aliases.iter().map(|s| s.to_string()).collect();
        self
    }

    /// The data variable alias list.
    pub fn var_aliases(&self) -> &[String] {
        &self.var_aliases
    }
}

/// Reads a gridded variable with its coordinates from a NetCDF file.
///
/// The variable must be `time x lat x lon` (an extra singleton dimension
/// is squeezed), with decodable CF time units; fill values become NaN.
///
/// # Errors
///
/// Returns [`IoError`] for a missing file or variable, undecodable time
/// units, or dimensions that disagree with the coordinate lengths.
pub fn read_grid(path: &Path, config: &ReaderConfig) -> Result<Grid, IoError> {
    let file = open_file(path)?;

    let lat = read_1d_f64(&file, &config.lat_aliases, path)?;
    let lon = read_1d_f64(&file, &config.lon_aliases, path)?;
    let time = read_time_axis(&file, &config.time_aliases, path)?;
    let (data, shape) = read_data_3d(&file, &config.var_aliases, path)?;

    for (name, expected, got) in [
        ("time", time.len(), shape[0]),
        ("lat", lat.len(), shape[1]),
        ("lon", lon.len(), shape[2]),
    ] {
        if expected != got {
            return Err(IoError::DimensionMismatch {
                name: name.to_string(),
                expected,
                got,
            });
        }
    }

    let grid = Grid::new(data, time, lat, lon)?;
    info!(
        path = %path.display(),
        n_time = grid.n_time(),
        n_lat = grid.n_lat(),
        n_lon = grid.n_lon(),
        "grid loaded"
    );
    Ok(grid)
}
