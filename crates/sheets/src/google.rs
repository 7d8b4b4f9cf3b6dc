//! Google Sheets v4 REST implementation of [`SheetStore`].
//!
//! Reads use `GET /v4/spreadsheets/{id}/values/{range}`; appends use
//! `POST .../values/{range}:append` with `valueInputOption=RAW` so the
//! timestamp column stays text.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::TokenProvider;
use crate::error::SheetsError;
use crate::store::{display_value, SheetStore};

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Default worksheet name of a new spreadsheet.
pub const DEFAULT_WORKSHEET: &str = "Sheet1";

#[derive(Debug, Clone)]
pub struct GoogleSheetsConfig {
    pub spreadsheet_id: String,
    pub worksheet: String,
    /// Overridable for tests; normally [`SHEETS_API_BASE`].
    pub api_base: String,
}

impl GoogleSheetsConfig {
    pub fn new(spreadsheet_id: impl Into<String>, worksheet: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
            api_base: SHEETS_API_BASE.to_string(),
        }
    }
}

/// Body of a `values` read.
#[derive(Debug, Deserialize)]
struct ValueRange {
    /// Omitted by the API when the range is empty.
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl ValueRange {
    fn into_strings(self) -> Vec<Vec<String>> {
        self.values
            .iter()
            .map(|row| row.iter().map(display_value).collect())
            .collect()
    }
}

/// Spreadsheet column letters for a 0-based index: `0 -> A`, `26 -> AA`.
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A1 range covering the whole worksheet, or one column of it.
pub fn a1_range(worksheet: &str, column: Option<usize>) -> String {
    let quoted = format!("'{}'", worksheet.replace('\'', "''"));
    match column {
        Some(index) => {
            let letter = column_letter(index);
            format!("{quoted}!{letter}:{letter}")
        }
        None => quoted,
    }
}

pub struct GoogleSheetsStore {
    client: reqwest::Client,
    config: GoogleSheetsConfig,
    tokens: TokenProvider,
}

impl GoogleSheetsStore {
    pub fn new(client: reqwest::Client, config: GoogleSheetsConfig, tokens: TokenProvider) -> Self {
        tracing::info!(
            spreadsheet_id = %config.spreadsheet_id,
            worksheet = %config.worksheet,
            client_email = %tokens.client_email(),
            "Using Google Sheets store"
        );
        Self {
            client,
            config,
            tokens,
        }
    }

    /// `{base}/v4/spreadsheets/{id}` followed by `extra` path segments.
    fn spreadsheet_url(&self, extra: &[&str]) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| SheetsError::Config(format!("api base '{}': {e}", self.config.api_base)))?;
        url.path_segments_mut()
            .map_err(|()| SheetsError::Config("api base cannot carry a path".into()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.config.spreadsheet_id.as_str()])
            .extend(extra);
        Ok(url)
    }

    fn values_url(&self, range: &str) -> Result<Url, SheetsError> {
        self.spreadsheet_url(&["values", range])
    }

    fn append_url(&self, range: &str) -> Result<Url, SheetsError> {
        let segment = format!("{range}:append");
        let mut url = self.spreadsheet_url(&["values", segment.as_str()])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");
        Ok(url)
    }

    async fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.values_url(range)?;
        let token = self.tokens.access_token().await?;

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let body: ValueRange = Self::ensure_success(response).await?.json().await?;
        Ok(body.into_strings())
    }

    /// Pass through 2xx responses; turn anything else into [`SheetsError::Api`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    async fn read_column(&self, column: usize) -> Result<Vec<String>, SheetsError> {
        let range = a1_range(&self.config.worksheet, Some(column));
        let rows = self.read_range(&range).await?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_iter().next().unwrap_or_default())
            .collect())
    }

    async fn read_rows(&self) -> Result<Vec<Vec<String>>, SheetsError> {
        let range = a1_range(&self.config.worksheet, None);
        self.read_range(&range).await
    }

    async fn append_row(&self, row: &[Value]) -> Result<(), SheetsError> {
        let range = a1_range(&self.config.worksheet, None);
        let url = self.append_url(&range)?;
        let token = self.tokens.access_token().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "values": [row] }))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), SheetsError> {
        let mut url = self.spreadsheet_url(&[])?;
        url.query_pairs_mut().append_pair("fields", "spreadsheetId");
        let token = self.tokens.access_token().await?;

        let response = self.client.get(url).bearer_auth(token).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
