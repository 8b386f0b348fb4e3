use thiserror::Error;

/// Errors that can occur while looking up recipes
#[derive(Error, Debug)]
pub enum LookupError {
    /// The remote API could not be reached or answered with a non-success status
    #[error("Failed to fetch from recipe API: {0}")]
    RemoteFetch(String),

    /// The remote API answered with a body that is not the expected JSON
    #[error("Failed to parse recipe API response: {0}")]
    RemoteParse(String),

    /// The bundled fallback dataset is missing or malformed
    #[error("Failed to read local recipe dataset: {0}")]
    LocalDatasetRead(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LookupError::RemoteParse(err.to_string())
        } else {
            LookupError::RemoteFetch(err.to_string())
        }
    }
}
