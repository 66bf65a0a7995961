//! Run configuration, built once at startup and passed by value.

use crate::grid::partition::{CellSpec, DEFAULT_CELL_AREA_KM2};
use crate::types::bounding_box::BoundingBox;
use crate::types::date_range::DateRange;
use crate::types::provider::Provider;
use bon::Builder;
use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_OUTPUT_DIR: &str = "resources/datasets";
pub const DEFAULT_CONCURRENCY: usize = 1;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("End date {end} is before start date {start}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Everything a dataset generation run needs.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rainfall_grid::{BoundingBox, DateRange, Provider, RunConfig};
///
/// let period = DateRange::new(
///     NaiveDate::from_ymd_opt(2022, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2022, 7, 31).unwrap(),
/// )
/// .unwrap();
/// let config = RunConfig::builder()
///     .bounding_box(BoundingBox::new(19.5, 73.5, 18.5, 72.5))
///     .period(period)
///     .api_key("my-key")
///     .build();
///
/// assert_eq!(config.sq_km, 5.0);
/// assert_eq!(config.provider, Provider::WorldWeatherOnline);
/// assert_eq!(config.concurrency, 1);
/// ```
#[derive(Clone, Builder)]
pub struct RunConfig {
    pub bounding_box: BoundingBox,
    pub period: DateRange,
    #[builder(into)]
    pub api_key: String,
    /// Target cell area in km².
    #[builder(default = DEFAULT_CELL_AREA_KM2)]
    pub sq_km: f64,
    #[builder(default)]
    pub provider: Provider,
    /// Directory the two tables are written to.
    #[builder(default = PathBuf::from(DEFAULT_OUTPUT_DIR), into)]
    pub output_dir: PathBuf,
    /// Maximum number of provider requests in flight.
    #[builder(default = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
    /// Replaces the provider's host, e.g. for a proxy or a mock server.
    #[builder(into)]
    pub base_url: Option<String>,
}

impl RunConfig {
    pub fn cell_spec(&self) -> CellSpec {
        CellSpec::new(self.sq_km)
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("bounding_box", &self.bounding_box)
            .field("period", &self.period)
            .field("api_key", &"<redacted>")
            .field("sq_km", &self.sq_km)
            .field("provider", &self.provider)
            .field("output_dir", &self.output_dir)
            .field("concurrency", &self.concurrency)
            .field("request_timeout", &self.request_timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}
