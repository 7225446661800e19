//! Conversion from raw spreadsheet rows to [`Customer`] records.

use rentcollect_core::{normalize_phone, Customer};

use crate::types::SheetRecord;

pub const NAME_COLUMN: &str = "Nome";
pub const PHONE_COLUMN: &str = "WhatsApp";
pub const AMOUNT_COLUMN: &str = "Valor";

/// Turn a header-first grid into records keyed by header name.
///
/// Rows shorter than the header read missing cells as empty strings; cells
/// beyond the header are ignored. Fully blank rows are skipped.
#[must_use]
pub fn records_from_values(values: &[Vec<serde_json::Value>]) -> Vec<SheetRecord> {
    let Some((header, rows)) = values.split_first() else {
        return Vec::new();
    };
    let header: Vec<String> = header.iter().map(|h| cell_text(h).trim().to_string()).collect();

    rows.iter()
        .filter(|row| row.iter().any(|cell| !cell_text(cell).trim().is_empty()))
        .map(|row| {
            header
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(idx, name)| {
                    let value = row.get(idx).map(cell_text).unwrap_or_default();
                    (name.clone(), value)
                })
                .collect()
        })
        .collect()
}

/// Build a [`Customer`] from one record, or `None` if name or phone is blank.
#[must_use]
pub fn customer_from_record(record: &SheetRecord) -> Option<Customer> {
    let field = |column: &str| record.get(column).map_or("", String::as_str);

    let name = field(NAME_COLUMN).trim().to_string();
    let phone_identity = normalize_phone(field(PHONE_COLUMN));
    if name.is_empty() || phone_identity.is_empty() {
        return None;
    }

    let amount = match field(AMOUNT_COLUMN) {
        "" => "0".to_string(),
        raw => clean_amount(raw),
    };

    Some(Customer {
        name,
        phone_identity,
        amount,
    })
}

/// Strip currency markers and surrounding whitespace from an amount cell.
fn clean_amount(raw: &str) -> String {
    raw.replace("R$", "").replace('$', "").trim().to_string()
}

fn cell_text(cell: &serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
