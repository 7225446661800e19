pub mod client;
pub mod error;
pub mod types;

pub use client::{is_delivered, EvolutionClient};
pub use error::GatewayError;
