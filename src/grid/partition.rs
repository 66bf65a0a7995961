//! Splits a bounding box into equal-area cells and lays out the two lattices:
//! the cell vertices (border set) and the cell centres (inner set).

use crate::grid::error::GridError;
use crate::grid::longitude::{normalized_longitudes, wrap_longitude, LonStep};
use crate::types::bounding_box::BoundingBox;
use crate::types::grid_point::GridPoint;
use log::info;

pub const DEFAULT_CELL_AREA_KM2: f64 = 5.0;

/// Upper bound on the number of vertices in the border lattice.
pub const MAX_LATTICE_POINTS: usize = 10_000_000;

/// Target area of a single grid cell, in square kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpec {
    pub area_km2: f64,
}

impl CellSpec {
    pub fn new(area_km2: f64) -> Self {
        Self { area_km2 }
    }
}

impl Default for CellSpec {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_AREA_KM2)
    }
}

/// Result of partitioning a [`BoundingBox`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridPartition {
    /// Number of rows of cells (V).
    pub vertical_divisions: usize,
    /// Number of columns of cells (H).
    pub horizontal_divisions: usize,
    pub horizontal_distance_km: f64,
    pub vertical_distance_km: f64,
    /// Latitude step between rows; negative, rows move south.
    pub lat_increment: f64,
    /// Longitude step subtracted per column, taken from the normalized longitudes.
    pub lon_increment: f64,
    /// `(V + 1) * (H + 1)` cell vertices.
    pub border: Vec<GridPoint>,
    /// `V * H` cell centres.
    pub inner: Vec<GridPoint>,
}

/// Partitions `bbox` into cells of roughly `cell.area_km2` with the same
/// aspect ratio as the box itself.
///
/// Division counts are truncated, so cells end up at least as large as the
/// target area. Points are named `LatLon{i}-{j}`; within a set, latitude
/// follows `j` and longitude follows `i`.
///
/// # Errors
///
/// Returns a [`GridError`] when the box fails [`BoundingBox::validate`], the
/// cell area is not a positive finite number, the cell does not fit into
/// the box at least once in each direction, or the border lattice would
/// exceed [`MAX_LATTICE_POINTS`].
///
/// # Examples
///
/// ```
/// use rainfall_grid::{partition, BoundingBox, CellSpec};
///
/// let bbox = BoundingBox::new(19.5, 73.5, 18.5, 72.5);
/// let grid = partition(&bbox, CellSpec::new(100.0)).unwrap();
/// let (v, h) = (grid.vertical_divisions, grid.horizontal_divisions);
/// assert_eq!(grid.border.len(), (v + 1) * (h + 1));
/// assert_eq!(grid.inner.len(), v * h);
/// ```
pub fn partition(bbox: &BoundingBox, cell: CellSpec) -> Result<GridPartition, GridError> {
    bbox.validate()?;
    if !cell.area_km2.is_finite() || cell.area_km2 <= 0.0 {
        return Err(GridError::InvalidCellArea(cell.area_km2));
    }

    let horizontal_distance_km = bbox.horizontal_distance_km();
    let vertical_distance_km = bbox.vertical_distance_km();
    if horizontal_distance_km <= 0.0 || vertical_distance_km <= 0.0 {
        return Err(GridError::ZeroSide {
            horizontal_km: horizontal_distance_km,
            vertical_km: vertical_distance_km,
        });
    }

    let side_ratio = horizontal_distance_km / vertical_distance_km;
    let required_vertical_side = (cell.area_km2 / side_ratio).sqrt();
    let required_horizontal_side = cell.area_km2 / required_vertical_side;

    let horizontal_cells = (horizontal_distance_km / required_horizontal_side).floor();
    let vertical_cells = (vertical_distance_km / required_vertical_side).floor();
    let border_points = (horizontal_cells + 1.0) * (vertical_cells + 1.0);
    if !border_points.is_finite() || border_points > MAX_LATTICE_POINTS as f64 {
        return Err(GridError::TooManyCells {
            sq_km: cell.area_km2,
            cells: horizontal_cells * vertical_cells,
            limit: MAX_LATTICE_POINTS,
        });
    }

    let horizontal_divisions = horizontal_cells as usize;
    let vertical_divisions = vertical_cells as usize;
    info!(
        "Box is {:.3} km x {:.3} km, {} km² cells give {} horizontal x {} vertical divisions",
        horizontal_distance_km,
        vertical_distance_km,
        cell.area_km2,
        horizontal_divisions,
        vertical_divisions
    );
    if horizontal_divisions == 0 || vertical_divisions == 0 {
        return Err(GridError::CellLargerThanBox {
            sq_km: cell.area_km2,
            horizontal_divisions,
            vertical_divisions,
        });
    }

    let (east_lon, west_lon) = normalized_longitudes(bbox);
    let lat_increment = (bbox.south_lat - bbox.north_lat) / vertical_divisions as f64;
    let lon_increment = (west_lon - east_lon) / horizontal_divisions as f64;
    info!(
        "Lattice increments: lat {} per row, lon {} per column",
        lat_increment, lon_increment
    );

    let border = lattice(
        bbox.north_lat,
        bbox.west_lon,
        lat_increment,
        lon_increment,
        vertical_divisions + 1,
        horizontal_divisions + 1,
    );
    let inner = lattice(
        bbox.north_lat + lat_increment / 2.0,
        bbox.west_lon - lon_increment / 2.0,
        lat_increment,
        lon_increment,
        vertical_divisions,
        horizontal_divisions,
    );

    Ok(GridPartition {
        vertical_divisions,
        horizontal_divisions,
        horizontal_distance_km,
        vertical_distance_km,
        lat_increment,
        lon_increment,
        border,
        inner,
    })
}

// Latitude steps with the inner index and longitude with the outer one; the
// resulting lattice is what the persisted tables and the map are built from.
fn lattice(
    origin_lat: f64,
    origin_lon: f64,
    lat_increment: f64,
    lon_increment: f64,
    rows: usize,
    columns: usize,
) -> Vec<GridPoint> {
    let mut points = Vec::with_capacity(rows * columns);
    for i in 0..rows {
        let lon = wrap_longitude(origin_lon, lon_increment, i, LonStep::Subtract);
        for j in 0..columns {
            points.push(GridPoint::new(
                format!("LatLon{i}-{j}"),
                origin_lat + lat_increment * j as f64,
                lon,
            ));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const EPS: f64 = 1e-9;

    fn mumbai() -> BoundingBox {
        BoundingBox::new(19.5, 73.5, 18.5, 72.5)
    }

    #[test]
    fn lattice_sizes_follow_division_counts() {
        for sq_km in [5.0, 25.0, 100.0, 1000.0] {
            let grid = partition(&mumbai(), CellSpec::new(sq_km)).unwrap();
            let (v, h) = (grid.vertical_divisions, grid.horizontal_divisions);
            assert!(v > 0 && h > 0);
            assert_eq!(grid.border.len(), (v + 1) * (h + 1), "sq_km {sq_km}");
            assert_eq!(grid.inner.len(), v * h, "sq_km {sq_km}");
        }
    }

    #[test]
    fn mumbai_scenario_stays_inside_its_meridians() {
        let bbox = mumbai();
        let grid = partition(&bbox, CellSpec::default()).unwrap();
        assert!((grid.vertical_distance_km - 111.2).abs() < 1.0);
        assert!((grid.horizontal_distance_km - 104.8).abs() < 1.5);
        // Both counts derive from sqrt(h * v / area), roughly 48 here.
        assert!((40..=55).contains(&grid.vertical_divisions));
        assert!((40..=55).contains(&grid.horizontal_divisions));
        assert!(grid.lat_increment < 0.0);
        assert!(grid.lon_increment < 0.0);

        for p in grid.border.iter().chain(grid.inner.iter()) {
            assert!(
                p.lon >= bbox.west_lon - EPS && p.lon <= bbox.east_lon + EPS,
                "{} has lon {}",
                p.name,
                p.lon
            );
        }
    }

    // Rows step longitude and columns step latitude, so this only holds while
    // V == H. Both counts come from sqrt(h * v / area) and agree for these
    // areas; if rounding ever splits them, centres leave the box (see the
    // row/column coupling question in DESIGN.md).
    #[test]
    fn cell_centres_lie_strictly_inside_the_box() {
        let bbox = mumbai();
        for sq_km in [5.0, 40.0, 500.0] {
            let grid = partition(&bbox, CellSpec::new(sq_km)).unwrap();
            assert_eq!(grid.vertical_divisions, grid.horizontal_divisions);
            for p in &grid.inner {
                assert!(p.lat < bbox.north_lat && p.lat > bbox.south_lat, "{p:?}");
                assert!(p.lon > bbox.west_lon && p.lon < bbox.east_lon, "{p:?}");
            }
        }
    }

    #[test]
    fn centres_sit_half_a_step_from_the_matching_vertex() {
        let grid = partition(&mumbai(), CellSpec::new(50.0)).unwrap();
        let first_vertex = &grid.border[0];
        let first_centre = &grid.inner[0];
        assert_eq!(first_vertex.name, "LatLon0-0");
        assert_eq!(first_centre.name, "LatLon0-0");
        assert!((first_centre.lat - (first_vertex.lat + grid.lat_increment / 2.0)).abs() < EPS);
        assert!((first_centre.lon - (first_vertex.lon - grid.lon_increment / 2.0)).abs() < EPS);
    }

    #[test]
    fn latitude_follows_column_and_longitude_follows_row() {
        let bbox = mumbai();
        let grid = partition(&bbox, CellSpec::new(100.0)).unwrap();
        let columns = grid.horizontal_divisions + 1;
        let p = &grid.border[columns + 2];
        assert_eq!(p.name, "LatLon1-2");
        assert!((p.lat - (bbox.north_lat + grid.lat_increment * 2.0)).abs() < EPS);
        assert!((p.lon - (bbox.west_lon - grid.lon_increment)).abs() < EPS);
    }

    #[test]
    fn names_are_unique_within_each_set() {
        let grid = partition(&mumbai(), CellSpec::new(20.0)).unwrap();
        let border: HashSet<_> = grid.border.iter().map(|p| p.name.as_str()).collect();
        let inner: HashSet<_> = grid.inner.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(border.len(), grid.border.len());
        assert_eq!(inner.len(), grid.inner.len());
    }

    #[test]
    fn partitioning_is_deterministic() {
        let a = partition(&mumbai(), CellSpec::new(7.5)).unwrap();
        let b = partition(&mumbai(), CellSpec::new(7.5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn antimeridian_box_wraps_with_even_spacing() {
        let bbox = BoundingBox::new(10.0, 179.0, 9.0, -179.0);
        let grid = partition(&bbox, CellSpec::new(25.0)).unwrap();
        assert!(grid.lon_increment > 0.0);

        let columns = grid.horizontal_divisions + 1;
        let row_lons: Vec<f64> = grid.border.iter().step_by(columns).map(|p| p.lon).collect();
        assert_eq!(row_lons.len(), grid.vertical_divisions + 1);
        assert!(row_lons.iter().any(|lon| *lon > 0.0));
        assert!(row_lons.iter().any(|lon| *lon < 0.0));

        for lon in grid.border.iter().chain(grid.inner.iter()).map(|p| p.lon) {
            assert!((-180.0..=180.0).contains(&lon), "{lon}");
        }
        for pair in row_lons.windows(2) {
            let gap = (pair[0] - pair[1]).rem_euclid(360.0);
            assert!((gap - grid.lon_increment).abs() < 1e-6, "gap {gap}");
        }
    }

    #[test]
    fn cell_larger_than_box_is_rejected() {
        let err = partition(&mumbai(), CellSpec::new(50_000.0)).unwrap_err();
        assert!(matches!(err, GridError::CellLargerThanBox { .. }), "{err:?}");
    }

    #[test]
    fn tiny_cell_area_is_rejected_instead_of_overflowing() {
        for sq_km in [1e-300, f64::MIN_POSITIVE, 1e-6] {
            let err = partition(&mumbai(), CellSpec::new(sq_km)).unwrap_err();
            assert!(
                matches!(err, GridError::TooManyCells { limit: MAX_LATTICE_POINTS, .. }),
                "{err:?}"
            );
        }
    }

    #[test]
    fn invalid_cell_area_is_rejected() {
        for sq_km in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = partition(&mumbai(), CellSpec::new(sq_km)).unwrap_err();
            assert!(matches!(err, GridError::InvalidCellArea(_)), "{err:?}");
        }
    }

    #[test]
    fn degenerate_box_is_rejected_before_partitioning() {
        let flat = BoundingBox::new(18.5, 73.5, 18.5, 72.5);
        assert!(matches!(
            partition(&flat, CellSpec::default()),
            Err(GridError::InvertedLatitudes { .. })
        ));

        let mirrored = BoundingBox::new(19.5, 72.5, 18.5, 73.5);
        assert!(matches!(
            partition(&mirrored, CellSpec::default()),
            Err(GridError::InvertedLongitudes { .. })
        ));
    }
}
