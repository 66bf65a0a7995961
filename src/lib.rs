mod config;
mod dataset;
mod error;
mod grid;
mod map;
mod rainfall;
mod rainfall_grid;
mod types;
mod utils;

pub use config::*;
pub use error::RainfallGridError;
pub use rainfall_grid::*;

pub use grid::error::GridError;
pub use grid::longitude::{wrap_longitude, LonStep};
pub use grid::partition::{
    partition, CellSpec, GridPartition, DEFAULT_CELL_AREA_KM2, MAX_LATTICE_POINTS,
};

pub use types::bounding_box::BoundingBox;
pub use types::date_range::DateRange;
pub use types::grid_point::{GridPoint, RainfallPoint, RainfallReading};
pub use types::provider::Provider;

pub use rainfall::error::ProviderError;
pub use rainfall::source::RainfallSource;
pub use rainfall::source_for;
pub use rainfall::visual_crossing::VisualCrossing;
pub use rainfall::world_weather_online::WorldWeatherOnline;

pub use dataset::assembler::DatasetAssembler;
pub use dataset::error::DatasetError;
pub use dataset::tables::{
    read_actual_points, read_grid_points, write_actual_points, write_grid_points, DatasetPaths,
    ACTUAL_POINTS_FILE, GRID_POINTS_FILE,
};

pub use map::render::{
    figure, map_center, plot_map, MapCenter, DEFAULT_MAP_FILE, DEFAULT_TRACE_NAME, DEFAULT_ZOOM,
};
