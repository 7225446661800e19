//! Push target for gateway events.
//!
//! Always answers 200 so the gateway never redelivers. Decoded events are
//! handled on a spawned task; events from different senders carry no
//! ordering relative to each other.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Extension, Json};
use rentcollect_core::InboundEvent;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct WebhookReceipt {
    status: &'static str,
}

pub(super) async fn receive_event(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Json<ApiResponse<WebhookReceipt>> {
    let status = match decode(&body) {
        Ok(event) => {
            let ctx = Arc::clone(&state.ctx);
            let request_id = req_id.0.clone();
            tokio::spawn(async move {
                let action = rentcollect_workflow::handle_event(&ctx, &event).await;
                tracing::debug!(request_id = %request_id, ?action, "webhook: event handled");
            });
            "accepted"
        }
        Err(reason) => {
            tracing::warn!(request_id = %req_id.0, %reason, "webhook: dropped malformed event");
            "dropped"
        }
    };

    Json(ApiResponse {
        data: WebhookReceipt { status },
        meta: ResponseMeta::new(req_id.0),
    })
}

fn decode(body: &[u8]) -> Result<InboundEvent, String> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| format!("invalid JSON: {e}"))?;
    InboundEvent::decode(&value).map_err(|e| e.to_string())
}
