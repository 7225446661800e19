//! Payment-cycle workflows: daily reminders and proof-of-payment handling.

pub mod context;
pub mod cycle;
pub mod dispatch;
pub mod error;
pub mod proof;
pub mod webhook;

pub use context::AppContext;
pub use cycle::run_collection_cycle;
pub use dispatch::Dispatcher;
pub use error::{ProofError, WorkflowError};
pub use proof::reconcile_proof;
pub use webhook::{classify, handle_event, Action, IgnoreReason};
