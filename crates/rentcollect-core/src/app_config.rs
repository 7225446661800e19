use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::NaiveTime;

/// How the roster client authenticates against the spreadsheet API.
#[derive(Clone, PartialEq, Eq)]
pub enum SheetsCredentials {
    /// Google service-account key file; exchanged for an OAuth bearer token.
    ServiceAccountFile(PathBuf),
    /// Plain API key, only usable for spreadsheets shared by link.
    ApiKey(String),
}

impl std::fmt::Debug for SheetsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsCredentials::ServiceAccountFile(path) => {
                f.debug_tuple("ServiceAccountFile").field(path).finish()
            }
            SheetsCredentials::ApiKey(_) => f.debug_tuple("ApiKey").field(&"[redacted]").finish(),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub evolution_api_url: String,
    pub evolution_api_key: String,
    pub evolution_instance: String,
    pub approvers: Vec<String>,
    pub pix_key: String,
    pub sheets_spreadsheet_id: String,
    pub sheets_range: String,
    pub sheets_base_url: String,
    pub sheets_credentials: SheetsCredentials,
    pub billing_time: NaiveTime,
    pub due_time: NaiveTime,
    pub wake_interval_secs: u64,
    pub reminder_delay_ms: u64,
    pub approver_delay_ms: u64,
    pub proofs_dir: PathBuf,
    pub http_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("evolution_api_url", &self.evolution_api_url)
            .field("evolution_api_key", &"[redacted]")
            .field("evolution_instance", &self.evolution_instance)
            .field("approvers", &self.approvers)
            .field("pix_key", &self.pix_key)
            .field("sheets_spreadsheet_id", &self.sheets_spreadsheet_id)
            .field("sheets_range", &self.sheets_range)
            .field("sheets_base_url", &self.sheets_base_url)
            .field("sheets_credentials", &self.sheets_credentials)
            .field("billing_time", &self.billing_time)
            .field("due_time", &self.due_time)
            .field("wake_interval_secs", &self.wake_interval_secs)
            .field("reminder_delay_ms", &self.reminder_delay_ms)
            .field("approver_delay_ms", &self.approver_delay_ms)
            .field("proofs_dir", &self.proofs_dir)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}
