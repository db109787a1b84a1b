use thiserror::Error;

/// The primary error type for all fallible provider operations in this crate.
#[derive(Debug, Error)]
pub enum YfError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response body could not be parsed as JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The cookie/crumb handshake failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Yahoo answered with an error object inside an otherwise valid envelope.
    #[error("Yahoo API error: {0}")]
    Api(String),

    /// The envelope was valid but the expected payload was absent.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// The data received from the API was in an unexpected format.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// An invalid date range was provided for a historical data request (start must be before end).
    #[error("invalid date range: start must be before end")]
    InvalidDates,
}
