//! Renders the two tables as an HTML page with plotly `scattermapbox`
//! traces on OpenStreetMap tiles.
//!
//! Cell vertices are drawn as fixed red markers; cell centres as blue markers
//! whose diameter grows linearly with rainfall.

use crate::dataset::error::DatasetError;
use crate::dataset::tables::{grid_points_from_frame, read_actual_points, read_frame, DatasetPaths};
use crate::types::grid_point::{GridPoint, RainfallPoint, RainfallReading};
use bon::builder;
use log::info;
use plotly::color::NamedColor;
use plotly::common::{Marker, Mode, SizeMode};
use plotly::layout::{Center, Mapbox, MapboxStyle, Margin};
use plotly::{Layout, Plot, ScatterMapbox};
use polars::prelude::*;
use std::path::{Path, PathBuf};

pub const DEFAULT_ZOOM: u8 = 7;
pub const DEFAULT_TRACE_NAME: &str = "Rainfall (mm)";
pub const DEFAULT_MAP_FILE: &str = "map.html";

const VERTEX_MARKER_SIZE: usize = 10;
const RAINFALL_SIZE_MIN: usize = 10;
const RAINFALL_SIZE_REF: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

/// Mean coordinate of a `name,lat,lon` frame.
pub fn map_center(border: &DataFrame, path: &Path) -> Result<MapCenter, DatasetError> {
    let means = border
        .clone()
        .lazy()
        .select([col("lat").mean(), col("lon").mean()])
        .collect()?;
    let mean_of = |name: &str| -> Result<Option<f64>, DatasetError> {
        Ok(means.column(name)?.cast(&DataType::Float64)?.f64()?.get(0))
    };
    match (mean_of("lat")?, mean_of("lon")?) {
        (Some(lat), Some(lon)) => Ok(MapCenter { lat, lon }),
        _ => Err(DatasetError::EmptyTable(path.to_path_buf())),
    }
}

/// The map figure for the given points.
///
/// Marker diameters are whole pixels, so rainfall is rounded to the nearest
/// millimetre for sizing; the hover text keeps one decimal.
pub fn figure(
    border: &[GridPoint],
    actual: &[RainfallPoint],
    center: MapCenter,
    zoom: u8,
    trace_name: &str,
) -> Plot {
    let vertices = ScatterMapbox::new(
        border.iter().map(|p| p.lat).collect::<Vec<f64>>(),
        border.iter().map(|p| p.lon).collect::<Vec<f64>>(),
    )
    .mode(Mode::Markers)
    .name("Grid point")
    .show_legend(false)
    .hover_text_array(border.iter().map(|p| p.name.clone()).collect::<Vec<String>>())
    .marker(
        Marker::new()
            .size(VERTEX_MARKER_SIZE)
            .color(NamedColor::Red),
    );

    let hover: Vec<String> = actual
        .iter()
        .map(|p| match p.rainfall {
            RainfallReading::Measured(mm) => format!("{}: {mm:.1} mm", p.point.name),
            RainfallReading::Unavailable => format!("{}: unavailable", p.point.name),
        })
        .collect();
    let sizes: Vec<usize> = actual
        .iter()
        .map(|p| p.rainfall.millimetres().max(0.0).round() as usize)
        .collect();
    let centres = ScatterMapbox::new(
        actual.iter().map(|p| p.point.lat).collect::<Vec<f64>>(),
        actual.iter().map(|p| p.point.lon).collect::<Vec<f64>>(),
    )
    .mode(Mode::Markers)
    .name(trace_name)
    .hover_text_array(hover)
    .marker(
        Marker::new()
            .size_array(sizes)
            .size_mode(SizeMode::Diameter)
            .size_min(RAINFALL_SIZE_MIN)
            .size_ref(RAINFALL_SIZE_REF)
            .color(NamedColor::Blue),
    );

    let layout = Layout::new()
        .mapbox(
            Mapbox::new()
                .bearing(0.0)
                .center(Center::new(center.lat, center.lon))
                .pitch(0.0)
                .zoom(zoom)
                .style(MapboxStyle::OpenStreetMap),
        )
        .margin(Margin::new().left(0).right(0).top(0).bottom(0));

    let mut plot = Plot::new();
    plot.add_trace(vertices);
    plot.add_trace(centres);
    plot.set_layout(layout);
    plot
}

/// Reads both tables from `input_dir` and writes the map to `output`.
///
/// # Errors
///
/// Returns a [`DatasetError`] if a table cannot be read, the grid table is
/// empty, or the page cannot be written.
#[builder]
pub fn plot_map(
    input_dir: &Path,
    output: &Path,
    zoom: Option<u8>,
    trace_name: Option<&str>,
) -> Result<PathBuf, DatasetError> {
    let paths = DatasetPaths::in_dir(input_dir);
    let border_df = read_frame(&paths.grid_points)?;
    let border = grid_points_from_frame(&border_df, &paths.grid_points)?;
    let center = map_center(&border_df, &paths.grid_points)?;
    let actual = read_actual_points(&paths.actual_points)?;

    let plot = figure(
        &border,
        &actual,
        center,
        zoom.unwrap_or(DEFAULT_ZOOM),
        trace_name.unwrap_or(DEFAULT_TRACE_NAME),
    );
    std::fs::write(output, plot.to_html())
        .map_err(|e| DatasetError::MapWrite(output.to_path_buf(), e))?;
    info!(
        "Map with {} grid points and {} rainfall points written to {}",
        border.len(),
        actual.len(),
        output.display()
    );
    Ok(output.to_path_buf())
}
