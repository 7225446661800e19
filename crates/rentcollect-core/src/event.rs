//! Typed decoding of the gateway's inbound webhook envelope.
//!
//! The envelope is `{event, data: {key: {remoteJid}, message: {messageType,
//! imageMessage?: {url}, conversation?, extendedTextMessage?: {text}}}}`.
//! Events whose kind is not `messages.upsert` decode to [`EventKind::Other`]
//! without inspecting `data`; for message events a missing `remoteJid` is a
//! [`EventError::Malformed`].

use serde::Deserialize;
use thiserror::Error;

const MESSAGE_RECEIVED: &str = "messages.upsert";

#[derive(Debug, Error)]
pub enum EventError {
    #[error("malformed webhook event: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    MessageReceived,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Text,
    Image,
    Other,
}

impl PayloadKind {
    fn from_message_type(message_type: &str) -> Self {
        match message_type {
            "imageMessage" => PayloadKind::Image,
            "conversation" | "extendedTextMessage" => PayloadKind::Text,
            _ => PayloadKind::Other,
        }
    }
}

/// One decoded webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub event_kind: EventKind,
    pub sender_identity: String,
    pub payload_kind: PayloadKind,
    pub media_reference: Option<String>,
    pub raw_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    event: String,
    data: Option<RawData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawData {
    key: Option<RawKey>,
    message: Option<RawMessage>,
    /// Some gateway versions report the type beside `message` instead of inside it.
    message_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKey {
    remote_jid: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    message_type: Option<String>,
    image_message: Option<RawImage>,
    conversation: Option<String>,
    extended_text_message: Option<RawExtendedText>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExtendedText {
    text: Option<String>,
}

impl InboundEvent {
    /// Decode a raw webhook body.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Malformed`] if the body is not a JSON object of
    /// the expected shape, or a message event carries no sender.
    pub fn decode(body: &serde_json::Value) -> Result<Self, EventError> {
        let envelope = RawEnvelope::deserialize(body)
            .map_err(|e| EventError::Malformed(format!("envelope: {e}")))?;

        if envelope.event != MESSAGE_RECEIVED {
            return Ok(Self {
                event_kind: EventKind::Other,
                sender_identity: String::new(),
                payload_kind: PayloadKind::Other,
                media_reference: None,
                raw_text: None,
            });
        }

        let data = envelope
            .data
            .ok_or_else(|| EventError::Malformed("missing data".to_string()))?;

        let sender_identity = data
            .key
            .and_then(|k| k.remote_jid)
            .filter(|jid| !jid.trim().is_empty())
            .ok_or_else(|| EventError::Malformed("missing data.key.remoteJid".to_string()))?;

        let message_type = data
            .message
            .as_ref()
            .and_then(|m| m.message_type.clone())
            .or(data.message_type)
            .unwrap_or_default();

        let (media_reference, raw_text) = match data.message {
            Some(message) => {
                let media = message
                    .image_message
                    .and_then(|img| img.url)
                    .filter(|u| !u.is_empty());
                let text = message
                    .conversation
                    .or_else(|| message.extended_text_message.and_then(|ext| ext.text));
                (media, text)
            }
            None => (None, None),
        };

        Ok(Self {
            event_kind: EventKind::MessageReceived,
            sender_identity,
            payload_kind: PayloadKind::from_message_type(&message_type),
            media_reference,
            raw_text,
        })
    }
}
