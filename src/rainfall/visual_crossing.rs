//! Visual Crossing `weatherdata/history` client, queried with daily aggregation.

use crate::config::ConfigError;
use crate::rainfall::error::ProviderError;
use crate::rainfall::http::{build_client, get_json};
use crate::rainfall::source::RainfallSource;
use crate::types::date_range::DateRange;
use crate::types::grid_point::GridPoint;
use crate::types::provider::Provider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    locations: HashMap<String, HistoryLocation>,
}

#[derive(Debug, Deserialize)]
struct HistoryLocation {
    #[serde(default)]
    values: Vec<HistoryValue>,
}

#[derive(Debug, Deserialize)]
struct HistoryValue {
    #[serde(default)]
    precip: Option<f64>,
}

pub struct VisualCrossing {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl VisualCrossing {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        Self::with_base_url(api_key, Provider::VisualCrossing.default_base_url(), timeout)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: format!(
                "{}{}",
                base_url.as_ref().trim_end_matches('/'),
                Provider::VisualCrossing.path()
            ),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl RainfallSource for VisualCrossing {
    fn provider(&self) -> Provider {
        Provider::VisualCrossing
    }

    async fn total_rainfall(
        &self,
        point: &GridPoint,
        period: &DateRange,
    ) -> Result<f64, ProviderError> {
        let location = point.query_location();
        let params = [
            ("aggregateHours", "24".to_string()),
            ("startDateTime", DateRange::format_day(period.start)),
            ("endDateTime", DateRange::format_day(period.end)),
            ("unitGroup", "uk".to_string()),
            ("contentType", "json".to_string()),
            ("dayStartTime", "0:0:00".to_string()),
            ("dayEndTime", "0:0:00".to_string()),
            ("location", location.clone()),
            ("key", self.api_key.clone()),
        ];
        let mut response: HistoryResponse =
            get_json(&self.client, &self.endpoint, &params).await?;

        // The payload is keyed by the location string as sent; a lone entry is
        // accepted even if the provider reformatted the key.
        let entry = match response.locations.remove(&location) {
            Some(entry) => entry,
            None if response.locations.len() == 1 => response
                .locations
                .into_values()
                .next()
                .ok_or_else(|| ProviderError::MissingField {
                    location: location.clone(),
                    field: "locations",
                })?,
            None => {
                return Err(ProviderError::MissingField {
                    location,
                    field: "locations",
                })
            }
        };

        Ok(entry.values.iter().filter_map(|v| v.precip).sum())
    }
}
