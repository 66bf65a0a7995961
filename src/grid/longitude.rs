//! Longitude stepping and wraparound across the ±180° meridian.

use crate::types::bounding_box::BoundingBox;

/// How a longitude offset is applied to the starting meridian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LonStep {
    Add,
    Subtract,
}

impl LonStep {
    fn apply(self, lon: f64, offset: f64) -> f64 {
        match self {
            LonStep::Add => lon + offset,
            LonStep::Subtract => lon - offset,
        }
    }
}

/// Steps `lon` by `increment * iteration` and folds the result back into [-180, 180].
///
/// A single fold is applied, which covers every offset up to one full turn.
/// The antimeridian is always reported as `+180`.
///
/// # Examples
///
/// ```
/// use rainfall_grid::{wrap_longitude, LonStep};
///
/// assert_eq!(wrap_longitude(179.0, 1.0, 2, LonStep::Add), -179.0);
/// assert_eq!(wrap_longitude(-179.0, 1.0, 1, LonStep::Subtract), 180.0);
/// assert_eq!(wrap_longitude(72.5, -0.5, 1, LonStep::Subtract), 73.0);
/// ```
pub fn wrap_longitude(lon: f64, increment: f64, iteration: usize, step: LonStep) -> f64 {
    let val = step.apply(lon, increment * iteration as f64);
    if val > 180.0 {
        return val - 360.0;
    }
    if val < -180.0 {
        return val + 360.0;
    }
    if val == -180.0 {
        return 180.0;
    }
    val
}

/// East and west longitudes used to derive the column increment.
///
/// Boxes matched by [`BoundingBox::straddles_antimeridian`] have longitudes
/// beyond ±90° folded by 180° so the increment walks the short way across the
/// antimeridian. Other boxes are returned unchanged.
pub(crate) fn normalized_longitudes(bbox: &BoundingBox) -> (f64, f64) {
    if !bbox.straddles_antimeridian() {
        return (bbox.east_lon, bbox.west_lon);
    }
    let east = if bbox.east_lon <= 90.0 {
        bbox.east_lon
    } else {
        bbox.east_lon - 180.0
    };
    let west = if bbox.west_lon >= -90.0 {
        bbox.west_lon
    } else {
        180.0 + bbox.west_lon
    };
    (east, west)
}
