//! The rectangular region that gets split into rainfall cells.

use crate::grid::error::GridError;
use haversine::{distance, Location as HaversineLocation, Units};

/// A rectangular region bounded by two parallels and two meridians, in decimal degrees.
///
/// The argument order of [`BoundingBox::new`] follows the command line:
/// north, east, south, west.
///
/// # Examples
///
/// ```
/// use rainfall_grid::BoundingBox;
///
/// let mumbai = BoundingBox::new(19.5, 73.5, 18.5, 72.5);
/// assert!(mumbai.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north_lat: f64,
    pub east_lon: f64,
    pub south_lat: f64,
    pub west_lon: f64,
}

impl BoundingBox {
    pub fn new(north_lat: f64, east_lon: f64, south_lat: f64, west_lon: f64) -> Self {
        Self {
            north_lat,
            east_lon,
            south_lat,
            west_lon,
        }
    }

    /// Rejects boxes that cannot produce a lattice: non-finite or out of range
    /// coordinates, `north_lat <= south_lat`, or a box with zero or negative
    /// width.
    ///
    /// Width is negative when `east_lon < west_lon`. Boxes matched by
    /// [`BoundingBox::straddles_antimeridian`] always have `east_lon > west_lon`,
    /// so this never rejects one of them.
    ///
    /// # Errors
    ///
    /// Returns the matching [`GridError`] variant for the first violated constraint.
    pub fn validate(&self) -> Result<(), GridError> {
        for (field, value) in [("north_lat", self.north_lat), ("south_lat", self.south_lat)] {
            if !value.is_finite() {
                return Err(GridError::NonFiniteCoordinate { field, value });
            }
            if !(-90.0..=90.0).contains(&value) {
                return Err(GridError::LatitudeOutOfRange { field, value });
            }
        }
        for (field, value) in [("east_lon", self.east_lon), ("west_lon", self.west_lon)] {
            if !value.is_finite() {
                return Err(GridError::NonFiniteCoordinate { field, value });
            }
            if !(-180.0..=180.0).contains(&value) {
                return Err(GridError::LongitudeOutOfRange { field, value });
            }
        }
        if self.north_lat <= self.south_lat {
            return Err(GridError::InvertedLatitudes {
                north_lat: self.north_lat,
                south_lat: self.south_lat,
            });
        }
        if self.east_lon == self.west_lon {
            return Err(GridError::ZeroWidth { lon: self.east_lon });
        }
        if self.east_lon < self.west_lon {
            return Err(GridError::InvertedLongitudes {
                east_lon: self.east_lon,
                west_lon: self.west_lon,
            });
        }
        Ok(())
    }

    /// Great-circle length of the northern edge, in kilometres.
    pub fn horizontal_distance_km(&self) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.north_lat,
                longitude: self.west_lon,
            },
            HaversineLocation {
                latitude: self.north_lat,
                longitude: self.east_lon,
            },
            Units::Kilometers,
        )
    }

    /// Great-circle length of the western edge, in kilometres.
    pub fn vertical_distance_km(&self) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.north_lat,
                longitude: self.west_lon,
            },
            HaversineLocation {
                latitude: self.south_lat,
                longitude: self.west_lon,
            },
            Units::Kilometers,
        )
    }

    /// Whether the box is treated as crossing the antimeridian.
    ///
    /// This is the `east_lon > 0 && west_lon < 0` heuristic, which also matches
    /// boxes that merely span the prime meridian (e.g. west -10, east 10).
    pub fn straddles_antimeridian(&self) -> bool {
        self.east_lon > 0.0 && self.west_lon < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_box_passes() {
        assert!(BoundingBox::new(19.5, 73.5, 18.5, 72.5).validate().is_ok());
    }

    #[test]
    fn inverted_latitudes_are_rejected() {
        let err = BoundingBox::new(18.5, 73.5, 19.5, 72.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GridError::InvertedLatitudes { .. }), "{err:?}");
    }

    #[test]
    fn equal_latitudes_are_rejected() {
        let err = BoundingBox::new(10.0, 73.5, 10.0, 72.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GridError::InvertedLatitudes { .. }), "{err:?}");
    }

    #[test]
    fn zero_width_is_rejected() {
        let err = BoundingBox::new(19.5, 72.5, 18.5, 72.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GridError::ZeroWidth { .. }), "{err:?}");
    }

    #[test]
    fn east_of_west_is_rejected() {
        let err = BoundingBox::new(19.5, 72.5, 18.5, 73.5)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            GridError::InvertedLongitudes {
                east_lon: 72.5,
                west_lon: 73.5
            }
        );
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let err = BoundingBox::new(95.0, 10.0, 80.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, GridError::LatitudeOutOfRange { field: "north_lat", .. }));

        let err = BoundingBox::new(10.0, 190.0, 0.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, GridError::LongitudeOutOfRange { field: "east_lon", .. }));

        let err = BoundingBox::new(f64::NAN, 10.0, 0.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, GridError::NonFiniteCoordinate { field: "north_lat", .. }));
    }

    #[test]
    fn side_lengths_match_expected_magnitudes() {
        let bbox = BoundingBox::new(19.5, 73.5, 18.5, 72.5);
        let vertical = bbox.vertical_distance_km();
        let horizontal = bbox.horizontal_distance_km();
        assert!((vertical - 111.2).abs() < 1.0, "vertical {vertical}");
        assert!((horizontal - 104.8).abs() < 1.5, "horizontal {horizontal}");
    }

    #[test]
    fn straddle_heuristic_matches_prime_meridian_boxes_too() {
        assert!(BoundingBox::new(10.0, 179.0, 9.0, -179.0).straddles_antimeridian());
        assert!(BoundingBox::new(10.0, 10.0, 9.0, -10.0).straddles_antimeridian());
        assert!(!BoundingBox::new(19.5, 73.5, 18.5, 72.5).straddles_antimeridian());
    }
}
