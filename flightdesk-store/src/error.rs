use thiserror::Error;

/// Why a flight snapshot could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, TLS failure, timeout and the like.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Flights service at {url} answered with status {status}")]
    Status { status: u16, url: String },

    /// The body was not a JSON array of flight records.
    #[error("Malformed flights payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
