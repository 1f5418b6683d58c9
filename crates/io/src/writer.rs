//! Writing a [`Grid`] to a NetCDF file.

use std::path::Path;

use tracing::info;

use boreas_calendar::TimeAxis;
use boreas_grid::Grid;

use crate::error::IoError;

/// Configuration for writing a grid to NetCDF.
///
/// # Example
///
/// ```
/// use boreas_io::WriterConfig;
///
/// let config = WriterConfig::new("evap").with_units("m");
/// ```
#[derive(Debug, Clone)]
pub struct WriterConfig {
    variable: String,
    units: Option<String>,
    description: Option<String>,
}

impl WriterConfig {
    /// Creates a configuration writing the data under the given variable
    /// name.
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            units: None,
            description: None,
        }
    }

    /// Sets the `units` attribute written on the data variable.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Sets a file-level `description` attribute.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The data variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }
}

/// Encodes a time axis as `(units string, offset values)`.
fn encode_time(time: &TimeAxis) -> (String, Vec<f64>) {
    match time {
        TimeAxis::Dates(dates) => {
            let base = dates.first().copied();
            match base {
                Some(base) => {
                    let units = format!("days since {}", base.format("%Y-%m-%d"));
                    let offsets = dates
                        .iter()
                        .map(|d| (*d - base).num_days() as f64)
                        .collect();
                    (units, offsets)
                }
                None => ("days since 1970-01-01".to_string(), Vec::new()),
            }
        }
        TimeAxis::MonthOffsets {
            base_year,
            base_month,
            offsets,
        } => {
            let units = format!("months since {base_year}-{base_month:02}");
            (units, offsets.iter().map(|&o| o as f64).collect())
        }
    }
}

/// Writes a grid to a NetCDF file with `time`, `lat`, `lon` dimensions in
/// that order, coordinate variables carrying their conventional units, and
/// the data variable named by `config`.
///
/// An existing file at `path` is overwritten.
///
/// # Errors
///
/// Returns [`IoError::Netcdf`] if the file cannot be created or written.
pub fn write_grid(path: &Path, grid: &Grid, config: &WriterConfig) -> Result<(), IoError> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", grid.n_time())?;
    file.add_dimension("lat", grid.n_lat())?;
    file.add_dimension("lon", grid.n_lon())?;

    let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
    lat_var.put_values(grid.lat(), ..)?;
    lat_var.put_attribute("units", "degrees north")?;

    let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
    lon_var.put_values(grid.lon(), ..)?;
    lon_var.put_attribute("units", "degrees east")?;

    let (time_units, time_values) = encode_time(grid.time());
    let mut time_var = file.add_variable::<f64>("time", &["time"])?;
    if !time_values.is_empty() {
        time_var.put_values(&time_values, ..)?;
    }
    time_var.put_attribute("units", time_units.as_str())?;

    let mut data_var = file.add_variable::<f64>(config.variable(), &["time", "lat", "lon"])?;
    if !grid.data().is_empty() {
        data_var.put_values(grid.data(), ..)?;
    }
    if let Some(units) = &config.units {
        data_var.put_attribute("units", units.as_str())?;
    }

    if let Some(description) = &config.description {
        file.add_attribute("description", description.as_str())?;
    }

    info!(
        path = %path.display(),
        variable = config.variable(),
        n_time = grid.n_time(),
        "grid written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn month_offsets_encode_base() {
        let axis = TimeAxis::from_month_offsets(2015, 1, vec![0, 1, 2]).unwrap();
        let (units, values) = encode_time(&axis);
        assert_eq!(units, "months since 2015-01");
        assert_eq!(values, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn dates_encode_days_since_first() {
        let axis = TimeAxis::Dates(vec![
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 15).unwrap(),
        ]);
        let (units, values) = encode_time(&axis);
        assert_eq!(units, "days since 2020-01-15");
        assert_eq!(values, vec![0.0, 31.0]);
    }

    #[test]
    fn empty_axis_encodes_epoch() {
        let (units, values) = encode_time(&TimeAxis::Dates(vec![]));
        assert_eq!(units, "days since 1970-01-01");
        assert!(values.is_empty());
    }
}
