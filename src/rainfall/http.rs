use crate::config::ConfigError;
use crate::rainfall::error::ProviderError;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub(crate) fn build_client(timeout: Duration) -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ConfigError::HttpClient)
}

/// GETs `url` with `params` and decodes the JSON body.
///
/// `url` carries no query string, so it is safe to log and to put in errors;
/// the API key only travels in `params`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    params: &[(&str, String)],
) -> Result<T, ProviderError> {
    debug!(
        "Requesting {} for {}",
        url,
        params
            .iter()
            .filter(|(name, _)| *name != "key")
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    );

    let response = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| ProviderError::NetworkRequest(url.to_string(), e.without_url()))?;

    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e.status());
            return Err(if let Some(status) = e.status() {
                ProviderError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e.without_url(),
                }
            } else {
                ProviderError::NetworkRequest(url.to_string(), e.without_url())
            });
        }
    };

    let body = response
        .bytes()
        .await
        .map_err(|e| ProviderError::Body(url.to_string(), e.without_url()))?;
    serde_json::from_slice(&body).map_err(|source| ProviderError::JsonParse {
        url: url.to_string(),
        source,
    })
}
