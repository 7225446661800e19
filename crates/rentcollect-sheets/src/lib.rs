pub mod client;
pub mod error;
pub mod normalize;
pub mod roster;
pub mod types;

pub use client::{SheetsAuth, SheetsClient};
pub use error::SheetsError;
pub use normalize::{customer_from_record, records_from_values};
pub use roster::Roster;
pub use types::{SheetRecord, ValueRange};
