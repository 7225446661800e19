//! HTTP client for the Google Sheets `values` endpoint.
//!
//! Reads one range of the roster spreadsheet. Authentication is a
//! service-account OAuth token, a plain API key, or nothing at all (for
//! mock servers in tests).

use std::sync::Arc;
use std::time::Duration;

use gcp_auth::TokenProvider;
use reqwest::{Client, Url};
use rentcollect_core::SheetsCredentials;

use crate::error::SheetsError;
use crate::types::ValueRange;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";
const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Credential attached to each values request.
#[derive(Clone)]
pub enum SheetsAuth {
    ServiceAccount(Arc<dyn TokenProvider>),
    ApiKey(String),
    Anonymous,
}

impl SheetsAuth {
    /// Load the configured credential.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Auth`] if the service-account key file cannot
    /// be read or parsed.
    pub fn from_credentials(credentials: &SheetsCredentials) -> Result<Self, SheetsError> {
        match credentials {
            SheetsCredentials::ServiceAccountFile(path) => {
                let account = gcp_auth::CustomServiceAccount::from_file(path).map_err(|e| {
                    SheetsError::Auth(format!(
                        "failed to load service account key {}: {e}",
                        path.display()
                    ))
                })?;
                Ok(Self::ServiceAccount(Arc::new(account)))
            }
            SheetsCredentials::ApiKey(key) => Ok(Self::ApiKey(key.clone())),
        }
    }
}

impl std::fmt::Debug for SheetsAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsAuth::ServiceAccount(_) => write!(f, "ServiceAccount(<TokenProvider>)"),
            SheetsAuth::ApiKey(_) => write!(f, "ApiKey([redacted])"),
            SheetsAuth::Anonymous => write!(f, "Anonymous"),
        }
    }
}

/// Read-only client for one spreadsheet range.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    range: String,
    auth: SheetsAuth,
}

impl SheetsClient {
    /// Creates a client pointed at the production Sheets API.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        spreadsheet_id: &str,
        range: &str,
        auth: SheetsAuth,
        timeout_secs: u64,
    ) -> Result<Self, SheetsError> {
        Self::with_base_url(DEFAULT_BASE_URL, spreadsheet_id, range, auth, timeout_secs)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`SheetsError::InvalidBaseUrl`] if `base_url` does
    /// not parse or cannot carry a path.
    pub fn with_base_url(
        base_url: &str,
        spreadsheet_id: &str,
        range: &str,
        auth: SheetsAuth,
        timeout_secs: u64,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("rentcollect/0.1 (roster)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| SheetsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(SheetsError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            spreadsheet_id: spreadsheet_id.to_owned(),
            range: range.to_owned(),
            auth,
        })
    }

    /// Fetches every row of the configured range, header row first.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Auth`] if an access token cannot be obtained.
    /// - [`SheetsError::Http`] on network failure or non-2xx status.
    /// - [`SheetsError::Deserialize`] if the body is not a `ValueRange`.
    pub async fn fetch_values(&self) -> Result<ValueRange, SheetsError> {
        let url = self.values_url();
        let mut request = self.client.get(url.clone());
        request = match &self.auth {
            SheetsAuth::ServiceAccount(provider) => {
                let token = provider
                    .token(&[READONLY_SCOPE])
                    .await
                    .map_err(|e| SheetsError::Auth(format!("failed to get access token: {e}")))?;
                request.bearer_auth(token.as_str())
            }
            SheetsAuth::ApiKey(key) => request.query(&[("key", key.as_str())]),
            SheetsAuth::Anonymous => request,
        };

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
            context: format!("values({})", self.range),
            source: e,
        })
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}` with each segment
    /// percent-encoded.
    fn values_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([
                    "v4",
                    "spreadsheets",
                    self.spreadsheet_id.as_str(),
                    "values",
                    self.range.as_str(),
                ]);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str, range: &str) -> SheetsClient {
        SheetsClient::with_base_url(base_url, "sheet-123", range, SheetsAuth::Anonymous, 30)
            .expect("client construction should not fail")
    }

    #[test]
    fn values_url_joins_segments() {
        let client = test_client("https://sheets.googleapis.com", "A:Z");
        assert_eq!(
            client.values_url().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/A:Z"
        );
    }

    #[test]
    fn values_url_keeps_base_path_and_encodes_range() {
        let client = test_client("http://localhost:9000/proxy/", "Clientes Ativos!A:C");
        assert_eq!(
            client.values_url().as_str(),
            "http://localhost:9000/proxy/v4/spreadsheets/sheet-123/values/Clientes%20Ativos!A:C"
        );
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let result =
            SheetsClient::with_base_url("not a url", "id", "A:Z", SheetsAuth::Anonymous, 30);
        assert!(matches!(result, Err(SheetsError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn debug_redacts_api_key() {
        let rendered = format!("{:?}", SheetsAuth::ApiKey("secret".to_string()));
        assert!(!rendered.contains("secret"));
    }
}
