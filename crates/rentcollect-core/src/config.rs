use crate::app_config::{AppConfig, SheetsCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Values are validated for presence and basic shape only (socket address,
/// `HH:MM` times, integers). Phone identities and the payment address are
/// taken as-is.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_time = |var: &str, default: &str| -> Result<chrono::NaiveTime, ConfigError> {
        let raw = or_default(var, default);
        parse_time_of_day(&raw).map_err(|reason| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason,
        })
    };

    let evolution_api_url = require("EVOLUTION_API_URL")?;
    let evolution_api_key = require("EVOLUTION_API_KEY")?;
    let evolution_instance = require("EVOLUTION_INSTANCE")?;

    let approvers = parse_identity_list(&require("RENTCOLLECT_APPROVERS")?);
    if approvers.is_empty() {
        return Err(ConfigError::MissingEnvVar(
            "RENTCOLLECT_APPROVERS".to_string(),
        ));
    }
    let pix_key = require("RENTCOLLECT_PIX_KEY")?;

    let sheets_spreadsheet_id = require("GOOGLE_SHEETS_SPREADSHEET_ID")?;
    let sheets_credentials = match (
        optional("GOOGLE_SHEETS_CREDENTIALS_FILE"),
        optional("GOOGLE_SHEETS_API_KEY"),
    ) {
        (Some(path), _) => SheetsCredentials::ServiceAccountFile(PathBuf::from(path)),
        (None, Some(key)) => SheetsCredentials::ApiKey(key),
        (None, None) => {
            return Err(ConfigError::MissingEnvVar(
                "GOOGLE_SHEETS_CREDENTIALS_FILE".to_string(),
            ))
        }
    };
    let sheets_range = or_default("GOOGLE_SHEETS_RANGE", "A:Z");
    let sheets_base_url = or_default("GOOGLE_SHEETS_BASE_URL", "https://sheets.googleapis.com/");

    let bind_addr = parse_addr("RENTCOLLECT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("RENTCOLLECT_LOG_LEVEL", "info");

    let billing_time = parse_time("RENTCOLLECT_BILLING_TIME", "22:30")?;
    let due_time = parse_time("RENTCOLLECT_DUE_TIME", "23:00")?;
    let wake_interval_secs = parse_u64("RENTCOLLECT_WAKE_INTERVAL_SECS", "60")?;
    if wake_interval_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RENTCOLLECT_WAKE_INTERVAL_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let reminder_delay_ms = parse_u64("RENTCOLLECT_REMINDER_DELAY_MS", "2000")?;
    let approver_delay_ms = parse_u64("RENTCOLLECT_APPROVER_DELAY_MS", "1000")?;
    let proofs_dir = PathBuf::from(or_default("RENTCOLLECT_PROOFS_DIR", "./comprovantes"));
    let http_timeout_secs = parse_u64("RENTCOLLECT_HTTP_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        evolution_api_url,
        evolution_api_key,
        evolution_instance,
        approvers,
        pix_key,
        sheets_spreadsheet_id,
        sheets_range,
        sheets_base_url,
        sheets_credentials,
        billing_time,
        due_time,
        wake_interval_secs,
        reminder_delay_ms,
        approver_delay_ms,
        proofs_dir,
        http_timeout_secs,
    })
}

/// Split a comma-separated list of identities, dropping blanks.
fn parse_identity_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Parse a wall-clock `HH:MM` time of day.
fn parse_time_of_day(raw: &str) -> Result<chrono::NaiveTime, String> {
    chrono::NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|e| format!("expected HH:MM, got '{raw}': {e}"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
