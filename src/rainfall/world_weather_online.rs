//! World Weather Online `past-weather` client.
//!
//! The API answers with one entry per day, each holding hourly rows whose
//! `precipMM` is usually a string. Errors such as an unknown key come back
//! with status 200 and a `data.error` list instead of weather.

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
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct PastWeatherResponse {
    data: PastWeatherData,
}

#[derive(Debug, Deserialize)]
struct PastWeatherData {
    #[serde(default)]
    weather: Option<Vec<WeatherDay>>,
    #[serde(default)]
    error: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct WeatherDay {
    #[serde(default)]
    hourly: Vec<HourlyRow>,
}

#[derive(Debug, Deserialize)]
struct HourlyRow {
    #[serde(rename = "precipMM")]
    precip_mm: Millimetres,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Millimetres {
    Number(f64),
    Text(String),
}

impl Millimetres {
    fn value(&self, location: &str) -> Result<f64, ProviderError> {
        match self {
            Millimetres::Number(mm) => Ok(*mm),
            Millimetres::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|_| ProviderError::InvalidPrecipitation {
                        location: location.to_string(),
                        value: text.clone(),
                    })
            }
        }
    }
}

pub struct WorldWeatherOnline {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl WorldWeatherOnline {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        Self::with_base_url(
            api_key,
            Provider::WorldWeatherOnline.default_base_url(),
            timeout,
        )
    }

    /// Same as [`WorldWeatherOnline::new`] but against another host, e.g. a mock server.
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
                Provider::WorldWeatherOnline.path()
            ),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl RainfallSource for WorldWeatherOnline {
    fn provider(&self) -> Provider {
        Provider::WorldWeatherOnline
    }

    async fn total_rainfall(
        &self,
        point: &GridPoint,
        period: &DateRange,
    ) -> Result<f64, ProviderError> {
        let location = point.query_location();
        let params = [
            ("date", DateRange::format_day(period.start)),
            ("enddate", DateRange::format_day(period.end)),
            ("includelocation", "yes".to_string()),
            ("format", "json".to_string()),
            ("q", location.clone()),
            ("key", self.api_key.clone()),
        ];
        let response: PastWeatherResponse = get_json(&self.client, &self.endpoint, &params).await?;

        if let Some(first) = response.data.error.first() {
            return Err(ProviderError::Api {
                location,
                message: first.msg.clone(),
            });
        }
        let days = response.data.weather.ok_or_else(|| ProviderError::MissingField {
            location: location.clone(),
            field: "data.weather",
        })?;

        let mut total = 0.0;
        for day in &days {
            for hour in &day.hourly {
                total += hour.precip_mm.value(&location)?;
            }
        }
        Ok(total)
    }
}
