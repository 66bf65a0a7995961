use thiserror::Error;

/// Reasons a bounding box and cell area cannot be turned into a lattice.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("Degenerate bounding box: {field} is not a finite number ({value})")]
    NonFiniteCoordinate { field: &'static str, value: f64 },

    #[error("Degenerate bounding box: {field} = {value} is outside [-90, 90]")]
    LatitudeOutOfRange { field: &'static str, value: f64 },

    #[error("Degenerate bounding box: {field} = {value} is outside [-180, 180]")]
    LongitudeOutOfRange { field: &'static str, value: f64 },

    #[error("Degenerate bounding box: north_lat ({north_lat}) must be greater than south_lat ({south_lat})")]
    InvertedLatitudes { north_lat: f64, south_lat: f64 },

    #[error("Degenerate bounding box: east_lon and west_lon are both {lon}")]
    ZeroWidth { lon: f64 },

    #[error("Degenerate bounding box: east_lon ({east_lon}) is west of west_lon ({west_lon})")]
    InvertedLongitudes { east_lon: f64, west_lon: f64 },

    #[error("Cell area must be a positive number of square kilometres, got {0}")]
    InvalidCellArea(f64),

    #[error("Degenerate bounding box: side lengths are {horizontal_km} km by {vertical_km} km")]
    ZeroSide { horizontal_km: f64, vertical_km: f64 },

    #[error("Cell area of {sq_km} km² does not fit the bounding box ({horizontal_divisions} horizontal x {vertical_divisions} vertical divisions)")]
    CellLargerThanBox {
        sq_km: f64,
        horizontal_divisions: usize,
        vertical_divisions: usize,
    },

    #[error("Cell area of {sq_km} km² needs {cells} cells, more than the limit of {limit}")]
    TooManyCells { sq_km: f64, cells: f64, limit: usize },
}
