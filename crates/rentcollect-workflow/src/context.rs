use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveTime;
use rentcollect_core::AppConfig;
use rentcollect_gateway::EvolutionClient;
use rentcollect_sheets::{Roster, SheetsAuth, SheetsClient};

use crate::dispatch::Dispatcher;
use crate::error::WorkflowError;

/// Everything a workflow needs, built once at startup and shared by
/// reference between the scheduler and the webhook handler.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub roster: Roster,
    pub dispatcher: Dispatcher,
    pub approvers: Vec<String>,
    pub pix_key: String,
    pub due_time: NaiveTime,
    pub reminder_delay: Duration,
    pub approver_delay: Duration,
    pub proofs_dir: PathBuf,
}

impl AppContext {
    /// # Errors
    ///
    /// Returns [`WorkflowError`] if the spreadsheet credential cannot be
    /// loaded or either HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, WorkflowError> {
        let auth = SheetsAuth::from_credentials(&config.sheets_credentials)?;
        let sheets = SheetsClient::with_base_url(
            &config.sheets_base_url,
            &config.sheets_spreadsheet_id,
            &config.sheets_range,
            auth,
            config.http_timeout_secs,
        )?;
        let gateway = EvolutionClient::new(
            &config.evolution_api_url,
            &config.evolution_api_key,
            &config.evolution_instance,
            config.http_timeout_secs,
        )?;

        Ok(Self {
            roster: Roster::new(sheets),
            dispatcher: Dispatcher::new(gateway),
            approvers: config.approvers.clone(),
            pix_key: config.pix_key.clone(),
            due_time: config.due_time,
            reminder_delay: Duration::from_millis(config.reminder_delay_ms),
            approver_delay: Duration::from_millis(config.approver_delay_ms),
            proofs_dir: config.proofs_dir.clone(),
        })
    }
}
