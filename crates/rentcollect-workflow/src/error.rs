use std::path::PathBuf;

use rentcollect_gateway::GatewayError;
use rentcollect_sheets::SheetsError;
use thiserror::Error;

/// Failures while wiring collaborators at startup.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("roster client: {0}")]
    Sheets(#[from] SheetsError),

    #[error("gateway client: {0}")]
    Gateway(#[from] GatewayError),
}

/// Reasons a proof was not forwarded.
#[derive(Debug, Error)]
pub enum ProofError {
    #[error("image message from {customer} carries no media URL")]
    MissingMedia { customer: String },

    #[error("failed to download proof: {0}")]
    Download(#[from] GatewayError),

    #[error("failed to store proof at {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
