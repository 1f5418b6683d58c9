use chrono::NaiveDate;
use tempfile::TempDir;

use boreas_calendar::TimeAxis;
use boreas_grid::Grid;
use boreas_io::{IoError, ReaderConfig, WriterConfig, read_grid, write_grid};

fn sample_grid(time: TimeAxis) -> Grid {
    let n_time = time.len();
    let lat = vec![40.0, 41.0, 42.0];
    let lon = vec![-5.0, -4.0];
    let mut data = Vec::with_capacity(n_time * 6);
    for t in 0..n_time {
        for c in 0..6 {
            data.push(t as f64 * 10.0 + c as f64);
        }
    }
    Grid::new(data, time, lat, lon).expect("valid grid")
}

#[test]
fn round_trip_month_offset_axis() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("monthly.nc");

    let time = TimeAxis::from_month_offsets(2015, 1, vec![0, 1, 2, 3]).unwrap();
    let grid = sample_grid(time);

    write_grid(&path, &grid, &WriterConfig::new("evspsbl").with_units("m")).unwrap();
    let back = read_grid(&path, &ReaderConfig::new("evspsbl")).unwrap();

    assert_eq!(back.n_time(), 4);
    assert_eq!(back.lat(), grid.lat());
    assert_eq!(back.lon(), grid.lon());
    assert_eq!(back.data(), grid.data());
    assert_eq!(back.time().year_month(3), Some((2015, 4)));
}

#[test]
fn round_trip_date_axis() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("daily.nc");

    let dates: Vec<NaiveDate> = (0..5)
        .map(|d| NaiveDate::from_ymd_opt(2020, 6, 1 + d).unwrap())
        .collect();
    let grid = sample_grid(TimeAxis::Dates(dates.clone()));

    write_grid(&path, &grid, &WriterConfig::new("tas").with_units("K")).unwrap();
    let back = read_grid(&path, &ReaderConfig::new("tas")).unwrap();

    assert_eq!(back.time(), &TimeAxis::Dates(dates));
    assert_eq!(back.data(), grid.data());
}

#[test]
fn nan_survives_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("gappy.nc");

    let time = TimeAxis::from_month_offsets(2015, 1, vec![0]).unwrap();
    let mut grid = sample_grid(time);
    let mut data = grid.data().to_vec();
    data[2] = f64::NAN;
    grid = Grid::new(data, grid.time().clone(), grid.lat().to_vec(), grid.lon().to_vec()).unwrap();

    write_grid(&path, &grid, &WriterConfig::new("pr")).unwrap();
    let back = read_grid(&path, &ReaderConfig::new("pr")).unwrap();

    assert!(back.data()[2].is_nan());
    assert_eq!(back.data()[3], grid.data()[3]);
}

#[test]
fn variable_alias_fallback() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("aliased.nc");

    let time = TimeAxis::from_month_offsets(2015, 1, vec![0]).unwrap();
    let grid = sample_grid(time);
    write_grid(&path, &grid, &WriterConfig::new("evaporation")).unwrap();

    // Primary name absent, alias present.
    let config = ReaderConfig::new("evspsbl").with_alias("evaporation");
    let back = read_grid(&path, &config).unwrap();
    assert_eq!(back.data(), grid.data());
}

#[test]
fn missing_variable_reports_name_and_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("wrongvar.nc");

    let time = TimeAxis::from_month_offsets(2015, 1, vec![0]).unwrap();
    write_grid(&path, &sample_grid(time), &WriterConfig::new("pr")).unwrap();

    let err = read_grid(&path, &ReaderConfig::new("tas")).expect_err("variable is absent");
    match err {
        IoError::MissingVariable { name, path: p } => {
            assert_eq!(name, "tas");
            assert!(p.ends_with("wrongvar.nc"));
        }
        other => panic!("expected MissingVariable, got {other:?}"),
    }
}

#[test]
fn singleton_level_dimension_is_squeezed() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("hur.nc");

    // Write a 4-D humidity variable (time, plev=1, lat, lon) by hand.
    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("time", 2).unwrap();
        file.add_dimension("plev", 1).unwrap();
        file.add_dimension("lat", 2).unwrap();
        file.add_dimension("lon", 2).unwrap();

        let mut lat = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        lat.put_values(&[10.0, 20.0], ..).unwrap();
        let mut lon = file.add_variable::<f64>("lon", &["lon"]).unwrap();
        lon.put_values(&[100.0, 110.0], ..).unwrap();
        let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
        time.put_values(&[0.0, 1.0], ..).unwrap();
        time.put_attribute("units", "months since 2015-01").unwrap();

        let mut hur = file
            .add_variable::<f64>("hur", &["time", "plev", "lat", "lon"])
            .unwrap();
        hur.put_values(&[50.0, 55.0, 60.0, 65.0, 70.0, 75.0, 80.0, 85.0], ..)
            .unwrap();
    }

    let grid = read_grid(&path, &ReaderConfig::new("hur")).unwrap();
    assert_eq!(grid.n_time(), 2);
    assert_eq!(grid.spatial_shape(), (2, 2));
    assert_eq!(grid.value(1, 1, 0), 80.0);
}

#[test]
fn fill_value_attribute_becomes_nan() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("filled.nc");

    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("time", 1).unwrap();
        file.add_dimension("lat", 2).unwrap();
        file.add_dimension("lon", 2).unwrap();

        let mut lat = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        lat.put_values(&[0.0, 1.0], ..).unwrap();
        let mut lon = file.add_variable::<f64>("lon", &["lon"]).unwrap();
        lon.put_values(&[0.0, 1.0], ..).unwrap();
        let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
        time.put_values(&[0.0], ..).unwrap();
        time.put_attribute("units", "months since 2015-01").unwrap();

        let mut var = file.add_variable::<f64>("aet", &["time", "lat", "lon"]).unwrap();
        var.put_attribute("_FillValue", -9999.0).unwrap();
        var.put_values(&[1.0, -9999.0, 3.0, 4.0], ..).unwrap();
    }

    let grid = read_grid(&path, &ReaderConfig::new("aet")).unwrap();
    assert!(grid.data()[1].is_nan());
    assert_eq!(grid.data()[2], 3.0);
}
