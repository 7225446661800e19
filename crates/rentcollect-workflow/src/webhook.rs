//! Classification and handling of inbound gateway events.

use rentcollect_core::{
    match_customer, messages, normalize_sender, Customer, EventKind, InboundEvent, PayloadKind,
};

use crate::context::AppContext;
use crate::proof::reconcile_proof;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotAMessage,
    UnregisteredSender,
    UnsupportedPayload,
}

/// What to do with one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Ignore(IgnoreReason),
    PromptForProof(Customer),
    ProcessProof(Customer),
}

/// Decide the action for `event` against an already-fetched roster.
///
/// Rules apply in order: non-message events are ignored, then unknown
/// senders, then images become proofs and texts get the proof prompt.
#[must_use]
pub fn classify(event: &InboundEvent, roster: &[Customer]) -> Action {
    if event.event_kind != EventKind::MessageReceived {
        return Action::Ignore(IgnoreReason::NotAMessage);
    }

    let Some(customer) = match_customer(&event.sender_identity, roster) else {
        return Action::Ignore(IgnoreReason::UnregisteredSender);
    };

    match event.payload_kind {
        PayloadKind::Image => Action::ProcessProof(customer.clone()),
        PayloadKind::Text => Action::PromptForProof(customer.clone()),
        PayloadKind::Other => Action::Ignore(IgnoreReason::UnsupportedPayload),
    }
}

/// Classify `event` against a fresh roster and carry out the result.
///
/// Returns the action taken. Failures inside proof handling are logged and
/// do not change the returned action.
pub async fn handle_event(ctx: &AppContext, event: &InboundEvent) -> Action {
    if event.event_kind != EventKind::MessageReceived {
        return Action::Ignore(IgnoreReason::NotAMessage);
    }

    let roster = ctx.roster.fetch_customers().await;
    let action = classify(event, &roster);
    let sender = normalize_sender(&event.sender_identity);

    match &action {
        Action::Ignore(IgnoreReason::UnregisteredSender) => {
            tracing::warn!(identity = %sender, "webhook: message from unregistered number");
        }
        Action::Ignore(reason) => {
            tracing::debug!(identity = %sender, ?reason, "webhook: event ignored");
        }
        Action::PromptForProof(customer) => {
            tracing::info!(customer = %customer.name, "webhook: text message, prompting for proof");
            ctx.dispatcher.send_text(&sender, messages::PROOF_PROMPT).await;
        }
        Action::ProcessProof(customer) => {
            tracing::info!(customer = %customer.name, "webhook: proof image received");
            if let Err(e) =
                reconcile_proof(ctx, customer, &sender, event.media_reference.as_deref()).await
            {
                tracing::error!(
                    customer = %customer.name,
                    error = %e,
                    "webhook: proof not forwarded"
                );
            }
        }
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Customer> {
        vec![Customer {
            name: "Ana".to_string(),
            phone_identity: "5511999999999".to_string(),
            amount: "50".to_string(),
        }]
    }

    fn event(sender: &str, payload_kind: PayloadKind) -> InboundEvent {
        InboundEvent {
            event_kind: EventKind::MessageReceived,
            sender_identity: sender.to_string(),
            payload_kind,
            media_reference: None,
            raw_text: None,
        }
    }

    #[test]
    fn image_from_known_sender_is_a_proof() {
        let ev = event("5511999999999@s.whatsapp.net", PayloadKind::Image);
        let action = classify(&ev, &roster());
        assert_eq!(action, Action::ProcessProof(roster()[0].clone()));
    }

    #[test]
    fn text_from_known_sender_prompts_for_proof() {
        let action = classify(&event("5511999999999@s.whatsapp.net", PayloadKind::Text), &roster());
        assert_eq!(action, Action::PromptForProof(roster()[0].clone()));
    }

    #[test]
    fn unknown_sender_is_ignored_for_any_payload() {
        for kind in [PayloadKind::Image, PayloadKind::Text, PayloadKind::Other] {
            let action = classify(&event("5511000000000@s.whatsapp.net", kind), &roster());
            assert_eq!(action, Action::Ignore(IgnoreReason::UnregisteredSender));
        }
    }

    #[test]
    fn other_payload_from_known_sender_is_ignored() {
        let ev = event("5511999999999@s.whatsapp.net", PayloadKind::Other);
        let action = classify(&ev, &roster());
        assert_eq!(action, Action::Ignore(IgnoreReason::UnsupportedPayload));
    }

    #[test]
    fn non_message_event_is_ignored_before_matching() {
        let mut ev = event("5511999999999@s.whatsapp.net", PayloadKind::Image);
        ev.event_kind = EventKind::Other;
        assert_eq!(classify(&ev, &roster()), Action::Ignore(IgnoreReason::NotAMessage));
    }
}
