//! REST implementation of the remote range boundary.
//!
//! Talks to the Google Sheets v4 values endpoints:
//! `GET  /v4/spreadsheets/{id}/values/{range}` and
//! `PUT  /v4/spreadsheets/{id}/values/{range}?valueInputOption=RAW`.
//! Authentication is a bearer token supplied by the configuration layer;
//! this client neither acquires nor refreshes it. Transport failures are
//! fatal for the invocation — there is no retry or backoff.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use sheetclip_core::{CoreError, Grid, Patch, Range, RangeService, Result};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Blocking HTTP client for one spreadsheet service.
pub struct SheetsClient {
    http: Client,
    base_url: String,
    token: String,
}

/// Wire shape of a values range, shared by reads and writes.
#[derive(Debug, Serialize, Deserialize)]
struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    #[serde(rename = "majorDimension", skip_serializing_if = "Option::is_none")]
    major_dimension: Option<String>,
    #[serde(default)]
    values: Option<Vec<Vec<serde_json::Value>>>,
}

impl SheetsClient {
    pub fn new(token: String) -> SheetsClient {
        Self::with_base_url(token, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(token: String, base_url: String) -> SheetsClient {
        SheetsClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn values_url(&self, spreadsheet_id: &str, range: &Range) -> String {
        format!("{}/{}/values/{}", self.base_url, spreadsheet_id, range)
    }

    fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let detail = body.lines().next().unwrap_or("").trim();
        Err(CoreError::Transport(format!(
            "remote returned HTTP {}{}{}",
            status.as_u16(),
            if detail.is_empty() { "" } else { ": " },
            detail
        )))
    }
}

impl RangeService for SheetsClient {
    fn get_range(&self, spreadsheet_id: &str, range: &Range) -> Result<Grid> {
        let response = self
            .http
            .get(self.values_url(spreadsheet_id, range))
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| CoreError::Transport(e.to_string()))?;

        let body: ValueRange = Self::check_status(response)?
            .json()
            .map_err(|e| CoreError::Transport(format!("malformed response: {}", e)))?;

        let rows = body
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(json_to_cell).collect())
            .collect();

        Ok(Grid::from_rows(rows))
    }

    fn set_range(&self, spreadsheet_id: &str, range: &Range, values: &Patch) -> Result<()> {
        let body = ValueRange {
            range: Some(range.to_string()),
            major_dimension: Some("ROWS".to_string()),
            values: Some(
                values
                    .rows()
                    .iter()
                    .map(|row| row.iter().map(cell_to_json).collect())
                    .collect(),
            ),
        };

        let response = self
            .http
            .put(self.values_url(spreadsheet_id, range))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| CoreError::Transport(e.to_string()))?;

        Self::check_status(response)?;
        Ok(())
    }
}

/// Under `valueInputOption=RAW` an empty JSON string clears the remote cell
/// while JSON `null` leaves it as-is, so an absent patch cell must go out as
/// `null`.
fn cell_to_json(cell: &Option<String>) -> serde_json::Value {
    match cell {
        Some(text) => serde_json::Value::String(text.clone()),
        None => serde_json::Value::Null,
    }
}

/// The API renders cells as strings with the default value render option,
/// but numbers and booleans can still appear; normalize everything to text.
fn json_to_cell(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        serde_json::Value::Bool(b) => if b { "TRUE" } else { "FALSE" }.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_to_cell_normalization() {
        assert_eq!(json_to_cell(serde_json::json!("text")), "text");
        assert_eq!(json_to_cell(serde_json::json!(42)), "42");
        assert_eq!(json_to_cell(serde_json::json!(true)), "TRUE");
        assert_eq!(json_to_cell(serde_json::Value::Null), "");
    }

    #[test]
    fn test_values_url_includes_worksheet() {
        let client = SheetsClient::with_base_url("t".into(), "https://api.test/v4".into());
        let range = Range::new("A1:B2", Some("Tests".into())).unwrap();
        assert_eq!(
            client.values_url("sheet-id", &range),
            "https://api.test/v4/sheet-id/values/Tests!A1:B2"
        );
    }

    #[test]
    fn test_value_range_read_shape() {
        let parsed: ValueRange = serde_json::from_str(
            r#"{"range":"Sheet1!A1:B2","majorDimension":"ROWS","values":[["2+2","4"],["1",true]]}"#,
        )
        .unwrap();
        let values = parsed.values.unwrap();
        assert_eq!(values[0][0], serde_json::json!("2+2"));
        assert_eq!(json_to_cell(values[1][1].clone()), "TRUE");
    }

    #[test]
    fn test_value_range_write_shape() {
        let body = ValueRange {
            range: Some("C1:D1".to_string()),
            major_dimension: Some("ROWS".to_string()),
            values: Some(vec![vec![serde_json::json!("4"), serde_json::json!("PASS")]]),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"majorDimension\":\"ROWS\""));
        assert!(json.contains("\"values\":[[\"4\",\"PASS\"]]"));
    }

    #[test]
    fn test_absent_patch_cells_serialize_as_null() {
        let mut patch = Patch::new();
        patch.push_row(vec![Some("4".to_string()), Some("PASS".to_string())]);
        patch.push_row(vec![None, None]);

        let values: Vec<Vec<serde_json::Value>> = patch
            .rows()
            .iter()
            .map(|row| row.iter().map(cell_to_json).collect())
            .collect();

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[["4","PASS"],[null,null]]"#);
    }
}
