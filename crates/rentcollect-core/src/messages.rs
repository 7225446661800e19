//! Outbound message texts.

use chrono::{DateTime, Local, NaiveTime};

use crate::customer::Customer;

pub const PROOF_PROMPT: &str =
    "📸 Por favor, envie a foto do comprovante para que os responsáveis possam validar seu pagamento.";

/// Daily reminder embedding name, amount, due time and payment address.
#[must_use]
pub fn reminder(customer: &Customer, pix_key: &str, due_time: NaiveTime) -> String {
    format!(
        "Olá {name},\n\n\
         O vencimento da sua diária de R$ {amount} é às {due}.\n\n\
         💳 Segue a chave Pix para pagamento:\n{pix_key}\n\n\
         📸 Por favor, envie o comprovante aqui após o pagamento.\n\n\
         Obrigado! 🏍️",
        name = customer.name,
        amount = customer.amount,
        due = due_time.format("%H:%M"),
    )
}

/// Caption attached to a proof forwarded to approvers.
#[must_use]
pub fn proof_caption(
    customer: &Customer,
    sender_identity: &str,
    received_at: DateTime<Local>,
) -> String {
    format!(
        "✅ Comprovante recebido de {name}\n\n\
         📱 WhatsApp: {sender_identity}\n\
         💰 Valor: R$ {amount}\n\
         🕐 Recebido em: {received}\n\n\
         Por favor, dar baixa no sistema.",
        name = customer.name,
        amount = customer.amount,
        received = received_at.format("%d/%m/%Y às %H:%M"),
    )
}

/// Acknowledgment sent back to the customer once a proof is stored.
#[must_use]
pub fn proof_confirmation(customer: &Customer) -> String {
    format!(
        "✅ Comprovante recebido, {}! Obrigado. \
         Os responsáveis já foram notificados e vão validar o pagamento.",
        customer.name
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ana() -> Customer {
        Customer {
            name: "Ana".to_string(),
            phone_identity: "5511111111111".to_string(),
            amount: "50".to_string(),
        }
    }

    #[test]
    fn reminder_embeds_name_amount_due_time_and_pix_key() {
        let due = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        let text = reminder(&ana(), "pix@example.com", due);
        assert!(text.starts_with("Olá Ana,"));
        assert!(text.contains("R$ 50"));
        assert!(text.contains("às 23:00"));
        assert!(text.contains("pix@example.com"));
    }

    #[test]
    fn caption_carries_identity_amount_and_timestamp() {
        let at = Local.with_ymd_and_hms(2026, 3, 9, 22, 41, 7).unwrap();
        let caption = proof_caption(&ana(), "5511111111111", at);
        assert!(caption.contains("Comprovante recebido de Ana"));
        assert!(caption.contains("WhatsApp: 5511111111111"));
        assert!(caption.contains("R$ 50"));
        assert!(caption.contains("09/03/2026 às 22:41"));
    }

    #[test]
    fn confirmation_addresses_customer_by_name() {
        assert!(proof_confirmation(&ana()).contains("Ana"));
    }
}
