//! Spreadsheet access over the Google Sheets v4 REST API.
//!
//! The spreadsheet is the bot's only store. Every call reads fresh values;
//! nothing is cached apart from the OAuth access token.

pub mod auth;
mod error;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use error::SheetsError;

use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Base URL of the Sheets values API.
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Read and write access to cell values, addressed by A1 ranges.
pub trait SheetStore: Send + Sync {
    /// Reads a range as rows of formatted cell strings. Rows may be ragged;
    /// an empty range yields no rows.
    fn read_range(&self, range: &str)
        -> impl Future<Output = Result<Vec<Vec<String>>, SheetsError>> + Send;

    /// Appends one row after the last row of the table in `range`.
    fn append_row(&self, range: &str, row: Vec<String>)
        -> impl Future<Output = Result<(), SheetsError>> + Send;

    /// Overwrites the single cell `range` with `value`.
    fn write_cell(&self, range: &str, value: &str)
        -> impl Future<Output = Result<(), SheetsError>> + Send;
}

/// Builds an A1 range on a named tab, quoting the tab name.
///
/// ```text
/// a1_range("DC 使用者名單", "A2:C") == "'DC 使用者名單'!A2:C"
/// ```
pub fn a1_range(sheet: &str, cells: &str) -> String {
    format!("'{}'!{}", sheet.replace('\'', "''"), cells)
}

/// Converts a 0-based column index to its A1 letters (0 → A, 26 → AA).
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
struct ValueInput<'a> {
    values: &'a [Vec<String>],
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Client for one spreadsheet.
pub struct SheetsClient {
    client: Client,
    spreadsheet_id: String,
    tokens: TokenProvider,
}

impl SheetsClient {
    /// Creates a client for `spreadsheet_id`, authenticating as `key`.
    pub fn new(spreadsheet_id: impl Into<String>, key: ServiceAccountKey) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SheetsError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            tokens: TokenProvider::new(key, client.clone()),
            client,
            spreadsheet_id: spreadsheet_id.into(),
        })
    }

    /// `.../spreadsheets/{id}/values/{range}{suffix}` with the range
    /// percent-encoded as one path segment.
    fn values_url(&self, range: &str, suffix: &str) -> Result<Url, SheetsError> {
        let mut url = Url::parse(SHEETS_API_BASE)?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::Url {
                message: format!("{SHEETS_API_BASE} cannot be a base URL"),
            })?
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&format!("{range}{suffix}"));
        Ok(url)
    }

    async fn authorized(&self, method: Method, url: Url) -> Result<RequestBuilder, SheetsError> {
        let token = self.tokens.access_token().await?;
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, SheetsError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Status { status, body });
        }
        Ok(response)
    }
}

impl SheetStore for SheetsClient {
    async fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.values_url(range, "")?;
        debug!(range = %range, "Reading sheet range");

        let request = self.authorized(Method::GET, url).await?;
        let response = self.send(request).await?;
        let value_range: ValueRange = response.json().await?;

        Ok(value_range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn append_row(&self, range: &str, row: Vec<String>) -> Result<(), SheetsError> {
        let mut url = self.values_url(range, ":append")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let rows = [row];
        let request = self
            .authorized(Method::POST, url)
            .await?
            .json(&ValueInput { values: &rows });
        self.send(request).await?;

        info!(range = %range, "Appended row");
        Ok(())
    }

    async fn write_cell(&self, range: &str, value: &str) -> Result<(), SheetsError> {
        let mut url = self.values_url(range, "")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        let rows = [vec![value.to_string()]];
        let request = self
            .authorized(Method::PUT, url)
            .await?
            .json(&ValueInput { values: &rows });
        self.send(request).await?;

        info!(range = %range, value = %value, "Wrote cell");
        Ok(())
    }
}
