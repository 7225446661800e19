//! HTTP client for the Evolution WhatsApp gateway.
//!
//! Each call is a single attempt; there is no retry here. Sends count as
//! delivered only on HTTP 200 or 201, which is what the gateway returns when
//! it queued the message. Media downloads accept any 2xx.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{Client, Response, StatusCode, Url};

use crate::error::GatewayError;
use crate::types::{SendMediaRequest, SendTextRequest};

/// Body excerpt kept in [`GatewayError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Clone)]
pub struct EvolutionClient {
    client: Client,
    base_url: Url,
    api_key: String,
    instance: String,
}

impl std::fmt::Debug for EvolutionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolutionClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .field("instance", &self.instance)
            .finish_non_exhaustive()
    }
}

impl EvolutionClient {
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GatewayError::InvalidUrl`] if `base_url` does
    /// not parse.
    pub fn new(
        base_url: &str,
        api_key: &str,
        instance: &str,
        timeout_secs: u64,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("rentcollect/0.1 (gateway)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| GatewayError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            api_key: api_key.to_owned(),
            instance: instance.to_owned(),
        })
    }

    /// Sends a plain text message to `number`.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Http`] on transport failure.
    /// - [`GatewayError::UnexpectedStatus`] if the status is not 200/201.
    pub async fn send_text(&self, number: &str, text: &str) -> Result<(), GatewayError> {
        let url = self.endpoint("sendText");
        let response = self
            .client
            .post(url)
            .header("apikey", self.api_key.as_str())
            .json(&SendTextRequest { number, text })
            .send()
            .await?;
        ensure_delivered("sendText", response).await
    }

    /// Sends an image with a caption to `number`.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Http`] on transport failure.
    /// - [`GatewayError::UnexpectedStatus`] if the status is not 200/201.
    pub async fn send_media(
        &self,
        number: &str,
        image: &[u8],
        caption: &str,
    ) -> Result<(), GatewayError> {
        let url = self.endpoint("sendMedia");
        let response = self
            .client
            .post(url)
            .header("apikey", self.api_key.as_str())
            .json(&SendMediaRequest {
                number,
                mediatype: "image",
                media: STANDARD.encode(image),
                caption,
            })
            .send()
            .await?;
        ensure_delivered("sendMedia", response).await
    }

    /// Downloads an inbound media reference using the gateway credential.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::InvalidUrl`] if `media_url` does not parse.
    /// - [`GatewayError::Http`] on transport failure.
    /// - [`GatewayError::UnexpectedStatus`] on any non-2xx status.
    pub async fn fetch_media(&self, media_url: &str) -> Result<Vec<u8>, GatewayError> {
        let url = Url::parse(media_url).map_err(|e| GatewayError::InvalidUrl {
            url: media_url.to_string(),
            reason: e.to_string(),
        })?;
        let response = self
            .client
            .get(url)
            .header("apikey", self.api_key.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(unexpected("fetchMedia", status, response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// `{base}/message/{operation}/{instance}`.
    fn endpoint(&self, operation: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["message", operation, self.instance.as_str()]);
        }
        url
    }
}

/// Whether the gateway accepted a send.
#[must_use]
pub fn is_delivered(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201)
}

async fn ensure_delivered(operation: &'static str, response: Response) -> Result<(), GatewayError> {
    let status = response.status();
    if is_delivered(status) {
        Ok(())
    } else {
        Err(unexpected(operation, status, response).await)
    }
}

async fn unexpected(
    operation: &'static str,
    status: StatusCode,
    response: Response,
) -> GatewayError {
    let body: String = response
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect();
    GatewayError::UnexpectedStatus {
        operation,
        status: status.as_u16(),
        body,
    }
}
