//! Roster lookup: the customer list as the rest of the system sees it.

use rentcollect_core::Customer;

use crate::client::SheetsClient;
use crate::error::SheetsError;
use crate::normalize::{customer_from_record, records_from_values};

/// Fresh, uncached view of the customer spreadsheet.
#[derive(Debug, Clone)]
pub struct Roster {
    client: SheetsClient,
}

impl Roster {
    #[must_use]
    pub fn new(client: SheetsClient) -> Self {
        Self { client }
    }

    /// Fetches and normalizes every valid customer row.
    ///
    /// Store failures are logged and yield an empty roster; callers treat
    /// that as "nothing to do".
    pub async fn fetch_customers(&self) -> Vec<Customer> {
        match self.try_fetch_customers().await {
            Ok(customers) => {
                tracing::info!(count = customers.len(), "roster: customers loaded");
                customers
            }
            Err(e) => {
                tracing::error!(error = %e, "roster: failed to read customer spreadsheet");
                Vec::new()
            }
        }
    }

    /// Like [`Roster::fetch_customers`] but surfaces the store error.
    ///
    /// # Errors
    ///
    /// Propagates any [`SheetsError`] from the underlying client.
    pub async fn try_fetch_customers(&self) -> Result<Vec<Customer>, SheetsError> {
        let range = self.client.fetch_values().await?;
        let records = records_from_values(&range.values);
        let total = records.len();
        let customers: Vec<Customer> = records.iter().filter_map(customer_from_record).collect();

        let dropped = total - customers.len();
        if dropped > 0 {
            tracing::debug!(dropped, "roster: skipped rows missing name or phone");
        }
        Ok(customers)
    }
}
