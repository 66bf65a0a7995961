//! CSV persistence of the two lattices through polars.
//!
//! `grid_points.csv` holds `name,lat,lon` for every cell vertex and
//! `actual_points.csv` holds `name,lat,lon,rainfall,status` for every cell
//! centre. The map reads the first four columns; `status` tells a provider
//! failure (`unavailable`, rainfall written as 0) apart from a measured zero.

use crate::dataset::error::DatasetError;
use crate::types::grid_point::{GridPoint, RainfallPoint, RainfallReading, ReadingStatus};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const GRID_POINTS_FILE: &str = "grid_points.csv";
pub const ACTUAL_POINTS_FILE: &str = "actual_points.csv";

/// Locations of the two tables inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub grid_points: PathBuf,
    pub actual_points: PathBuf,
}

impl DatasetPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            grid_points: dir.join(GRID_POINTS_FILE),
            actual_points: dir.join(ACTUAL_POINTS_FILE),
        }
    }
}

pub fn grid_points_frame(points: &[GridPoint]) -> PolarsResult<DataFrame> {
    df!(
        "name" => points.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        "lat" => points.iter().map(|p| p.lat).collect::<Vec<_>>(),
        "lon" => points.iter().map(|p| p.lon).collect::<Vec<_>>()
    )
}

pub fn actual_points_frame(points: &[RainfallPoint]) -> PolarsResult<DataFrame> {
    df!(
        "name" => points.iter().map(|p| p.point.name.as_str()).collect::<Vec<_>>(),
        "lat" => points.iter().map(|p| p.point.lat).collect::<Vec<_>>(),
        "lon" => points.iter().map(|p| p.point.lon).collect::<Vec<_>>(),
        "rainfall" => points.iter().map(|p| p.rainfall.millimetres()).collect::<Vec<_>>(),
        "status" => points.iter().map(|p| p.rainfall.status().as_str()).collect::<Vec<_>>()
    )
}

pub fn write_grid_points(path: &Path, points: &[GridPoint]) -> Result<(), DatasetError> {
    write_csv(grid_points_frame(points)?, path)
}

pub fn write_actual_points(path: &Path, points: &[RainfallPoint]) -> Result<(), DatasetError> {
    write_csv(actual_points_frame(points)?, path)
}

fn write_csv(mut df: DataFrame, path: &Path) -> Result<(), DatasetError> {
    let file =
        File::create(path).map_err(|e| DatasetError::TableWriteIo(path.to_path_buf(), e))?;
    CsvWriter::new(file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)
        .map_err(|e| DatasetError::TableWritePolars(path.to_path_buf(), e))
}

/// Reads a table written by this module (or any CSV with a header row).
pub fn read_frame(path: &Path) -> Result<DataFrame, DatasetError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DatasetError::TableRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| DatasetError::TableRead(path.to_path_buf(), e))
}

pub fn read_grid_points(path: &Path) -> Result<Vec<GridPoint>, DatasetError> {
    grid_points_from_frame(&read_frame(path)?, path)
}

/// Reads the cell centres with their readings. Tables without a `status`
/// column treat every row as measured.
pub fn read_actual_points(path: &Path) -> Result<Vec<RainfallPoint>, DatasetError> {
    let df = read_frame(path)?;
    let points = grid_points_from_frame(&df, path)?;
    let rainfall = float_column(&df, path, "rainfall")?;
    let statuses = match df.column("status") {
        Ok(_) => Some(string_column(&df, path, "status")?),
        Err(_) => None,
    };

    points
        .into_iter()
        .zip(rainfall)
        .enumerate()
        .map(|(row, (point, mm))| -> Result<RainfallPoint, DatasetError> {
            let status = match &statuses {
                Some(statuses) => ReadingStatus::parse(&statuses[row]).ok_or_else(|| {
                    DatasetError::UnknownStatus {
                        path: path.to_path_buf(),
                        row,
                        value: statuses[row].clone(),
                    }
                })?,
                None => ReadingStatus::Ok,
            };
            let rainfall = match status {
                ReadingStatus::Ok => RainfallReading::Measured(mm),
                ReadingStatus::Unavailable => RainfallReading::Unavailable,
            };
            Ok(RainfallPoint { point, rainfall })
        })
        .collect()
}

pub(crate) fn grid_points_from_frame(
    df: &DataFrame,
    path: &Path,
) -> Result<Vec<GridPoint>, DatasetError> {
    let names = string_column(df, path, "name")?;
    let lats = float_column(df, path, "lat")?;
    let lons = float_column(df, path, "lon")?;
    Ok(names
        .into_iter()
        .zip(lats)
        .zip(lons)
        .map(|((name, lat), lon)| GridPoint { name, lat, lon })
        .collect())
}

fn typed_column(
    df: &DataFrame,
    path: &Path,
    column: &'static str,
    dtype: &DataType,
) -> Result<Column, DatasetError> {
    df.column(column)
        .and_then(|c| c.cast(dtype))
        .map_err(|source| DatasetError::Column {
            path: path.to_path_buf(),
            column,
            source,
        })
}

fn float_column(
    df: &DataFrame,
    path: &Path,
    column: &'static str,
) -> Result<Vec<f64>, DatasetError> {
    let values = typed_column(df, path, column, &DataType::Float64)?;
    let ca = values.f64().map_err(|source| DatasetError::Column {
        path: path.to_path_buf(),
        column,
        source,
    })?;
    ca.into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| DatasetError::MissingValue {
                path: path.to_path_buf(),
                row,
                column,
            })
        })
        .collect()
}

fn string_column(
    df: &DataFrame,
    path: &Path,
    column: &'static str,
) -> Result<Vec<String>, DatasetError> {
    let values = typed_column(df, path, column, &DataType::String)?;
    let ca = values.str().map_err(|source| DatasetError::Column {
        path: path.to_path_buf(),
        column,
        source,
    })?;
    ca.into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.map(str::to_string)
                .ok_or_else(|| DatasetError::MissingValue {
                    path: path.to_path_buf(),
                    row,
                    column,
                })
        })
        .collect()
}
