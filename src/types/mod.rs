pub mod bounding_box;
pub mod date_range;
pub mod grid_point;
pub mod provider;
