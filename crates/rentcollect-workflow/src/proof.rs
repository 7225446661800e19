//! Proof-of-payment reconciliation.
//!
//! A proof is downloaded, written to the proofs directory, forwarded to
//! every approver and acknowledged to the customer. Forwarding is
//! best-effort: individual approver failures are logged and nothing records
//! which approvers actually received the image.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rentcollect_core::{messages, Customer, ProofRecord};

use crate::context::AppContext;
use crate::dispatch::pace;
use crate::error::ProofError;

/// Download, store, forward and acknowledge one proof image.
///
/// Download or storage failures abort before any message is sent, so the
/// customer gets no confirmation and is expected to resend.
///
/// # Errors
///
/// - [`ProofError::MissingMedia`] if `media_reference` is absent.
/// - [`ProofError::Download`] if the gateway fetch fails or is non-2xx.
/// - [`ProofError::Persist`] if the image cannot be written.
pub async fn reconcile_proof(
    ctx: &AppContext,
    customer: &Customer,
    sender_identity: &str,
    media_reference: Option<&str>,
) -> Result<ProofRecord, ProofError> {
    let media_url = media_reference.ok_or_else(|| ProofError::MissingMedia {
        customer: customer.name.clone(),
    })?;

    let image = ctx.dispatcher.gateway().fetch_media(media_url).await?;

    let received_at = Local::now();
    let local_path = store_proof(&ctx.proofs_dir, &customer.name, received_at, &image).await?;
    tracing::info!(
        customer = %customer.name,
        path = %local_path.display(),
        bytes = image.len(),
        "proof: stored"
    );

    let caption = messages::proof_caption(customer, sender_identity, received_at);
    let mut forwarded = 0usize;
    for (idx, approver) in ctx.approvers.iter().enumerate() {
        if idx > 0 {
            pace(ctx.approver_delay).await;
        }
        if ctx.dispatcher.send_media(approver, &image, &caption).await {
            forwarded += 1;
        }
    }
    if forwarded < ctx.approvers.len() {
        tracing::warn!(
            customer = %customer.name,
            forwarded,
            approvers = ctx.approvers.len(),
            "proof: not every approver was reached"
        );
    }

    ctx.dispatcher
        .send_text(sender_identity, &messages::proof_confirmation(customer))
        .await;

    Ok(ProofRecord {
        customer_name: customer.name.clone(),
        sender_identity: sender_identity.to_string(),
        amount: customer.amount.clone(),
        received_at,
        local_path,
    })
}

/// File name for a proof: `comprovante_{name}_{YYYYmmdd_HHMMSS}.jpg`.
///
/// Two proofs from the same customer within one second share a name and the
/// later one overwrites the earlier.
#[must_use]
pub fn proof_file_name(customer_name: &str, received_at: DateTime<Local>) -> String {
    format!(
        "comprovante_{}_{}.jpg",
        sanitize_file_component(customer_name),
        received_at.format("%Y%m%d_%H%M%S")
    )
}

fn sanitize_file_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

async fn store_proof(
    dir: &Path,
    customer_name: &str,
    received_at: DateTime<Local>,
    image: &[u8],
) -> Result<PathBuf, ProofError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ProofError::Persist {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(proof_file_name(customer_name, received_at));
    tokio::fs::write(&path, image)
        .await
        .map_err(|source| ProofError::Persist {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn file_name_has_second_precision_timestamp() {
        let at = Local.with_ymd_and_hms(2026, 3, 9, 22, 41, 7).unwrap();
        assert_eq!(
            proof_file_name("Ana Souza", at),
            "comprovante_Ana Souza_20260309_224107.jpg"
        );
    }

    #[test]
    fn file_name_neutralizes_path_separators() {
        let at = Local.with_ymd_and_hms(2026, 3, 9, 22, 41, 7).unwrap();
        let name = proof_file_name("../etc/passwd", at);
        assert!(!name.contains('/'), "{name}");
        assert!(name.starts_with("comprovante_"));
    }

    #[test]
    fn file_name_keeps_accented_letters() {
        let at = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            proof_file_name("João", at),
            "comprovante_João_20260102_030405.jpg"
        );
    }
}
