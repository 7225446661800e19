//! Shared fixtures: one wiremock server plays both the spreadsheet API and
//! the messaging gateway.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveTime;
use rentcollect_gateway::EvolutionClient;
use rentcollect_sheets::{Roster, SheetsAuth, SheetsClient};
use rentcollect_workflow::{AppContext, Dispatcher};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const VALUES_PATH: &str = "/v4/spreadsheets/sheet-123/values/A:Z";
pub const SEND_TEXT_PATH: &str = "/message/sendText/rentals";
pub const SEND_MEDIA_PATH: &str = "/message/sendMedia/rentals";
pub const PIX_KEY: &str = "pix@example.com";
pub const APPROVERS: [&str; 2] = ["5511900000001", "5511900000002"];

pub fn test_context(server: &MockServer, proofs_dir: PathBuf) -> AppContext {
    let sheets = SheetsClient::with_base_url(
        &server.uri(),
        "sheet-123",
        "A:Z",
        SheetsAuth::Anonymous,
        5,
    )
    .expect("sheets client");
    let gateway =
        EvolutionClient::new(&server.uri(), "test-key", "rentals", 5).expect("gateway client");

    AppContext {
        roster: Roster::new(sheets),
        dispatcher: Dispatcher::new(gateway),
        approvers: APPROVERS.iter().map(ToString::to_string).collect(),
        pix_key: PIX_KEY.to_string(),
        due_time: NaiveTime::from_hms_opt(23, 0, 0).expect("valid time"),
        reminder_delay: Duration::ZERO,
        approver_delay: Duration::ZERO,
        proofs_dir,
    }
}

/// Fresh, empty directory under the system temp dir for one test.
pub fn scratch_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "rentcollect-{test_name}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

pub async fn mount_roster(server: &MockServer, rows: serde_json::Value) {
    let mut values = vec![json!(["Nome", "WhatsApp", "Valor"])];
    values.extend(rows.as_array().cloned().unwrap_or_default());
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "values": values })))
        .mount(server)
        .await;
}

/// JSON bodies of every request the server received on `request_path`.
pub async fn bodies_for(server: &MockServer, request_path: &str) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == request_path)
        .map(|r| serde_json::from_slice(&r.body).expect("json body"))
        .collect()
}
