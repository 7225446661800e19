pub mod app_config;
pub mod config;
pub mod customer;
pub mod event;
pub mod identity;
pub mod messages;

pub use app_config::{AppConfig, SheetsCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use customer::{CollectionCycleResult, Customer, ProofRecord};
pub use event::{EventError, EventKind, InboundEvent, PayloadKind};
pub use identity::{is_group_sender, match_customer, normalize_phone, normalize_sender};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
