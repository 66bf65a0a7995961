pub mod error;
pub(crate) mod http;
pub mod source;
pub mod visual_crossing;
pub mod world_weather_online;

use crate::config::ConfigError;
use crate::types::provider::Provider;
use source::RainfallSource;
use std::time::Duration;
use visual_crossing::VisualCrossing;
use world_weather_online::WorldWeatherOnline;

/// Builds the HTTP client for `provider`, optionally against another base URL.
pub fn source_for(
    provider: Provider,
    api_key: &str,
    base_url: Option<&str>,
    timeout: Duration,
) -> Result<Box<dyn RainfallSource>, ConfigError> {
    let base_url = base_url.unwrap_or(provider.default_base_url());
    let source: Box<dyn RainfallSource> = match provider {
        Provider::WorldWeatherOnline => Box::new(WorldWeatherOnline::with_base_url(
            api_key, base_url, timeout,
        )?),
        Provider::VisualCrossing => {
            Box::new(VisualCrossing::with_base_url(api_key, base_url, timeout)?)
        }
    };
    Ok(source)
}
