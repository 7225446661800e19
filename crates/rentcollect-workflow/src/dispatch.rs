//! Outbound sends as the workflows see them: one attempt, a yes/no answer,
//! and an operator log line either way.

use std::time::Duration;

use rentcollect_gateway::EvolutionClient;

#[derive(Debug, Clone)]
pub struct Dispatcher {
    gateway: EvolutionClient,
}

impl Dispatcher {
    #[must_use]
    pub fn new(gateway: EvolutionClient) -> Self {
        Self { gateway }
    }

    /// Returns `true` if the gateway accepted the message.
    pub async fn send_text(&self, identity: &str, body: &str) -> bool {
        match self.gateway.send_text(identity, body).await {
            Ok(()) => {
                tracing::info!(identity, "dispatch: text sent");
                true
            }
            Err(e) => {
                tracing::error!(identity, error = %e, "dispatch: text send failed");
                false
            }
        }
    }

    /// Returns `true` if the gateway accepted the image.
    pub async fn send_media(&self, identity: &str, image: &[u8], caption: &str) -> bool {
        match self.gateway.send_media(identity, image, caption).await {
            Ok(()) => {
                tracing::info!(identity, bytes = image.len(), "dispatch: image sent");
                true
            }
            Err(e) => {
                tracing::error!(identity, error = %e, "dispatch: image send failed");
                false
            }
        }
    }

    pub(crate) fn gateway(&self) -> &EvolutionClient {
        &self.gateway
    }
}

/// Wait between two sends to different recipients.
///
/// The gateway flags accounts that burst many messages; every multi-recipient
/// loop goes through here.
pub(crate) async fn pace(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
