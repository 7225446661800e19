use thiserror::Error;

/// Errors returned by the spreadsheet client.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Network or TLS failure, or a non-2xx status from the values API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service-account credential could not be loaded or exchanged.
    #[error("spreadsheet auth error: {0}")]
    Auth(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
