use std::collections::HashMap;

use serde::Deserialize;

/// Response body of `GET /v4/spreadsheets/{id}/values/{range}`.
///
/// `values` is omitted by the API when the range is empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// One data row keyed by the header row's column names.
pub type SheetRecord = HashMap<String, String>;
