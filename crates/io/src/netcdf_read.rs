//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::NaiveDate;
use netcdf::AttributeValue;

use boreas_calendar::TimeAxis;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Find the first variable matching one of `aliases`.
fn find_variable<'f>(
    file: &'f netcdf::File,
    aliases: &[String],
    path: &Path,
) -> Result<netcdf::Variable<'f>, IoError> {
    for alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var);
        }
    }
    let name = aliases.first().cloned().unwrap_or_else(|| "unknown".into());
    Err(IoError::MissingVariable {
        name,
        path: path.to_path_buf(),
    })
}

/// Read a 1-D `f64` variable, trying each alias in order.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[String],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    let var = find_variable(file, aliases, path)?;
    Ok(var.get_values::<f64, _>(..)?)
}

/// Read the data variable as a flattened `f64` array plus its
/// `[time, lat, lon]` shape.
///
/// Accepts 3-D variables directly, or 4-D variables with exactly one
/// singleton dimension (e.g. a single pressure level on relative
/// humidity), which is squeezed away. Values equal to the variable's
/// `_FillValue` or `missing_value` attribute become NaN.
pub(crate) fn read_data_3d(
    file: &netcdf::File,
    aliases: &[String],
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let var = find_variable(file, aliases, path)?;

    let dims = var.dimensions();
    let lens: Vec<usize> = dims.iter().map(|d| d.len()).collect();
    let shape: [usize; 3] = match lens.len() {
        3 => [lens[0], lens[1], lens[2]],
        4 => {
            let kept: Vec<usize> = lens.iter().copied().filter(|&l| l != 1).collect();
            if kept.len() != 3 {
                return Err(IoError::DimensionMismatch {
                    name: format!("{} dimensions", var.name()),
                    expected: 3,
                    got: lens.len(),
                });
            }
            [kept[0], kept[1], kept[2]]
        }
        n => {
            return Err(IoError::DimensionMismatch {
                name: format!("{} dimensions", var.name()),
                expected: 3,
                got: n,
            });
        }
    };

    // Squeezing a singleton dimension leaves the flat layout untouched.
    let mut data = var.get_values::<f64, _>(..)?;

    if let Some(fill) = fill_value(&var) {
        for v in &mut data {
            if *v == fill {
                *v = f64::NAN;
            }
        }
    }

    Ok((data, shape))
}

/// The variable's declared fill value, if any.
fn fill_value(var: &netcdf::Variable) -> Option<f64> {
    for name in ["_FillValue", "missing_value"] {
        let value = var.attribute_value(name).and_then(|res| res.ok());
        match value {
            Some(AttributeValue::Double(v)) => return Some(v),
            Some(AttributeValue::Float(v)) => return Some(f64::from(v)),
            _ => {}
        }
    }
    None
}

/// Read and decode the time coordinate into a [`TimeAxis`].
///
/// Supports CF-convention `units` strings of the form
/// `"days since YYYY-MM-DD[ HH:MM:SS]"` (decoded to calendar dates,
/// fractional days truncated) and `"months since YYYY-MM[-DD]"` (kept as
/// integer month offsets).
pub(crate) fn read_time_axis(
    file: &netcdf::File,
    aliases: &[String],
    path: &Path,
) -> Result<TimeAxis, IoError> {
    let var = find_variable(file, aliases, path)?;
    let offsets = var.get_values::<f64, _>(..)?;

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{}' has no 'units' attribute", var.name()),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    parse_time_units(&units_str, &offsets)
}

/// Decode `offsets` according to a CF `units` string.
pub(crate) fn parse_time_units(units_str: &str, offsets: &[f64]) -> Result<TimeAxis, IoError> {
    let parts: Vec<&str> = units_str.splitn(3, ' ').collect();
    if parts.len() < 3 || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units_str}'"),
        });
    }

    match parts[0] {
        "days" => {
            let base_date = parse_base_date(parts[2])?;
            let dates = offsets
                .iter()
                .map(|&offset| {
                    let days = offset as i64;
                    base_date
                        .checked_add_signed(chrono::TimeDelta::days(days))
                        .ok_or_else(|| IoError::InvalidTime {
                            reason: format!("date overflow adding {days} days to {base_date}"),
                        })
                })
                .collect::<Result<Vec<NaiveDate>, IoError>>()?;
            Ok(TimeAxis::Dates(dates))
        }
        "months" => {
            let (base_year, base_month) = parse_base_month(parts[2])?;
            let month_offsets: Vec<i64> = offsets.iter().map(|&o| o.round() as i64).collect();
            Ok(TimeAxis::from_month_offsets(
                base_year,
                base_month,
                month_offsets,
            )?)
        }
        other => Err(IoError::InvalidTime {
            reason: format!("unsupported time unit '{other}' in '{units_str}'"),
        }),
    }
}

/// Parse the date portion of a `"... since YYYY-MM-DD[ ...]"` string.
fn parse_base_date(date_part: &str) -> Result<NaiveDate, IoError> {
    let date_str = if date_part.len() >= 10 {
        &date_part[..10]
    } else {
        date_part
    };
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
        reason: format!("failed to parse base date '{date_str}': {e}"),
    })
}

/// Parse the `YYYY-MM` prefix of a month-offset base.
fn parse_base_month(date_part: &str) -> Result<(i32, u8), IoError> {
    let mut fields = date_part.split(['-', ' ']);
    let year = fields
        .next()
        .and_then(|s| s.parse::<i32>().ok())
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("failed to parse base year from '{date_part}'"),
        })?;
    let month = fields
        .next()
        .and_then(|s| s.parse::<u8>().ok())
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("failed to parse base month from '{date_part}'"),
        })?;
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn days_since_decodes_to_dates() {
        let axis = parse_time_units("days since 2000-01-01", &[0.0, 1.0, 31.0]).unwrap();
        let TimeAxis::Dates(dates) = axis else {
            panic!("expected a date axis");
        };
        assert_eq!(dates[0].year(), 2000);
        assert_eq!(dates[1].day(), 2);
        assert_eq!((dates[2].month(), dates[2].day()), (2, 1));
    }

    #[test]
    fn days_since_with_time_of_day_suffix() {
        let axis = parse_time_units("days since 1850-01-01 00:00:00", &[0.0]).unwrap();
        assert_eq!(axis.year_month(0), Some((1850, 1)));
    }

    #[test]
    fn fractional_days_truncate() {
        let axis = parse_time_units("days since 2000-06-15", &[0.5, 1.9]).unwrap();
        let TimeAxis::Dates(dates) = axis else {
            panic!("expected a date axis");
        };
        assert_eq!(dates[0].day(), 15);
        assert_eq!(dates[1].day(), 16);
    }

    #[test]
    fn months_since_keeps_offsets() {
        let axis = parse_time_units("months since 2015-01", &[0.0, 1.0, 12.0]).unwrap();
        assert_eq!(axis.year_month(0), Some((2015, 1)));
        assert_eq!(axis.year_month(2), Some((2016, 1)));
    }

    #[test]
    fn months_since_full_date_base() {
        let axis = parse_time_units("months since 1850-01-15", &[0.0, 6.0]).unwrap();
        assert_eq!(axis.year_month(1), Some((1850, 7)));
    }

    #[test]
    fn unsupported_unit_rejected() {
        assert!(parse_time_units("hours since 2000-01-01", &[0.0]).is_err());
    }

    #[test]
    fn malformed_units_rejected() {
        assert!(parse_time_units("days", &[0.0]).is_err());
        assert!(parse_time_units("days until 2000-01-01", &[0.0]).is_err());
        assert!(parse_time_units("days since someday", &[0.0]).is_err());
    }
}
