use thiserror::Error;

/// Failure to obtain a rainfall total for a single point.
///
/// These never abort a run: the assembler records the point as unavailable
/// and moves on.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {0}")]
    Body(String, #[source] reqwest::Error),

    #[error("Failed to parse JSON response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Provider reported an error for location {location}: {message}")]
    Api { location: String, message: String },

    #[error("Response for location {location} is missing '{field}'")]
    MissingField {
        location: String,
        field: &'static str,
    },

    #[error("Invalid precipitation value '{value}' for location {location}")]
    InvalidPrecipitation { location: String, value: String },
}
