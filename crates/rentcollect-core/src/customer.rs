use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A roster entry eligible for billing.
///
/// `phone_identity` is digits only, as the gateway expects it for sends.
/// `amount` is a display string; spreadsheet formatting is too loose to
/// parse reliably and nothing here does arithmetic on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone_identity: String,
    pub amount: String,
}

/// Outcome tally for one collection cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionCycleResult {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl CollectionCycleResult {
    pub fn record(&mut self, delivered: bool) {
        self.attempted += 1;
        if delivered {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// A proof-of-payment image that was downloaded and stored.
#[derive(Debug, Clone)]
pub struct ProofRecord {
    pub customer_name: String,
    pub sender_identity: String,
    pub amount: String,
    pub received_at: DateTime<Local>,
    pub local_path: PathBuf,
}
