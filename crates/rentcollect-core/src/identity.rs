//! Resolving an inbound sender identity to a roster entry.

use crate::customer::Customer;

/// Reduce a phone number as typed into the roster to its digits.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Strip the channel suffix (`@s.whatsapp.net`, `@c.us`, ...) from a raw
/// sender identity and keep only its digits.
#[must_use]
pub fn normalize_sender(raw: &str) -> String {
    let local = raw.split_once('@').map_or(raw, |(local, _)| local);
    // Multi-device senders arrive as `<number>:<device>@...`.
    let local = local.split_once(':').map_or(local, |(number, _)| number);
    normalize_phone(local)
}

/// Group chats (`...@g.us`) never belong to a single customer.
#[must_use]
pub fn is_group_sender(raw: &str) -> bool {
    raw.trim_end().ends_with("@g.us")
}

/// Find the roster entry for `sender_identity`.
///
/// Group senders never match.
///
/// An entry whose phone equals the normalized sender wins outright. Failing
/// that, the first entry whose phone is contained in the sender matches, so
/// roster numbers stored without the country code still resolve.
#[must_use]
pub fn match_customer<'a>(sender_identity: &str, roster: &'a [Customer]) -> Option<&'a Customer> {
    if is_group_sender(sender_identity) {
        return None;
    }
    let sender = normalize_sender(sender_identity);
    if sender.is_empty() {
        return None;
    }

    roster
        .iter()
        .find(|c| c.phone_identity == sender)
        .or_else(|| {
            roster
                .iter()
                .filter(|c| !c.phone_identity.is_empty())
                .find(|c| sender.contains(c.phone_identity.as_str()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(name: &str, phone: &str) -> Customer {
        Customer {
            name: name.to_string(),
            phone_identity: phone.to_string(),
            amount: "50".to_string(),
        }
    }

    #[test]
    fn normalize_sender_strips_channel_suffix() {
        assert_eq!(
            normalize_sender("5511999999999@s.whatsapp.net"),
            "5511999999999"
        );
        assert_eq!(normalize_sender("5511999999999:12@s.whatsapp.net"), "5511999999999");
        assert_eq!(normalize_sender("5511999999999"), "5511999999999");
    }

    #[test]
    fn normalize_phone_keeps_digits_only() {
        assert_eq!(normalize_phone("+55 (11) 99999-9999"), "5511999999999");
    }

    #[test]
    fn matches_exact_identity_with_suffix() {
        let roster = vec![customer("Ana", "5511999999999")];
        let found = match_customer("5511999999999@suffix", &roster);
        assert_eq!(found.map(|c| c.name.as_str()), Some("Ana"));
    }

    #[test]
    fn unknown_sender_matches_nothing() {
        let roster = vec![customer("Ana", "5511999999999")];
        assert!(match_customer("5511000000000@suffix", &roster).is_none());
    }

    #[test]
    fn roster_number_without_country_code_matches_by_containment() {
        let roster = vec![customer("Bruno", "11988887777")];
        let found = match_customer("5511988887777@s.whatsapp.net", &roster);
        assert_eq!(found.map(|c| c.name.as_str()), Some("Bruno"));
    }

    #[test]
    fn exact_match_beats_earlier_containment_match() {
        let roster = vec![
            customer("Short", "11988887777"),
            customer("Full", "5511988887777"),
        ];
        let found = match_customer("5511988887777@s.whatsapp.net", &roster);
        assert_eq!(found.map(|c| c.name.as_str()), Some("Full"));
    }

    #[test]
    fn first_containment_match_wins_for_duplicates() {
        let roster = vec![customer("First", "988887777"), customer("Second", "988887777")];
        let found = match_customer("5511988887777@s.whatsapp.net", &roster);
        assert_eq!(found.map(|c| c.name.as_str()), Some("First"));
    }

    #[test]
    fn group_sender_never_matches_a_member() {
        let roster = vec![customer("Ana", "5511999999999")];
        assert!(is_group_sender("5511999999999-1612345678@g.us"));
        assert!(match_customer("5511999999999-1612345678@g.us", &roster).is_none());
        assert!(match_customer("120363012345678901@g.us", &roster).is_none());
        assert!(!is_group_sender("5511999999999@s.whatsapp.net"));
    }

    #[test]
    fn empty_sender_or_empty_phone_never_matches() {
        let roster = vec![customer("Blank", "")];
        assert!(match_customer("@s.whatsapp.net", &roster).is_none());
        assert!(match_customer("5511999999999@s.whatsapp.net", &roster).is_none());
    }
}
