//! Lattice points and the rainfall readings attached to them.

use std::fmt;

/// A named lattice coordinate.
///
/// Names follow the `LatLon{row}-{column}` scheme and are unique within the
/// set a point belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl GridPoint {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// The `lat,lon` string the weather providers take as a location query.
    pub fn query_location(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// Outcome of a rainfall lookup for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RainfallReading {
    /// Total precipitation over the requested period, in millimetres.
    Measured(f64),
    /// The provider failed for this point; the value is unknown.
    Unavailable,
}

impl RainfallReading {
    /// Millimetres to plot and persist; unavailable readings count as zero.
    pub fn millimetres(&self) -> f64 {
        match self {
            RainfallReading::Measured(mm) => *mm,
            RainfallReading::Unavailable => 0.0,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RainfallReading::Measured(_))
    }

    pub(crate) fn status(&self) -> ReadingStatus {
        match self {
            RainfallReading::Measured(_) => ReadingStatus::Ok,
            RainfallReading::Unavailable => ReadingStatus::Unavailable,
        }
    }
}

/// Value of the `status` column in the actual points table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadingStatus {
    Ok,
    Unavailable,
}

impl ReadingStatus {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Ok => "ok",
            ReadingStatus::Unavailable => "unavailable",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "ok" => Some(ReadingStatus::Ok),
            "unavailable" => Some(ReadingStatus::Unavailable),
            _ => None,
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cell centre together with its rainfall reading.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallPoint {
    pub point: GridPoint,
    pub rainfall: RainfallReading,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_location_joins_lat_and_lon() {
        let p = GridPoint::new("LatLon0-0", 19.25, 72.75);
        assert_eq!(p.query_location(), "19.25,72.75");
    }

    #[test]
    fn unavailable_reading_persists_as_zero_but_keeps_status() {
        let reading = RainfallReading::Unavailable;
        assert_eq!(reading.millimetres(), 0.0);
        assert!(!reading.is_available());
        assert_eq!(reading.status().as_str(), "unavailable");

        let measured = RainfallReading::Measured(0.0);
        assert!(measured.is_available());
        assert_eq!(measured.status(), ReadingStatus::Ok);
    }

    #[test]
    fn status_parses_its_own_output() {
        for status in [ReadingStatus::Ok, ReadingStatus::Unavailable] {
            assert_eq!(ReadingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ReadingStatus::parse("maybe"), None);
    }
}
