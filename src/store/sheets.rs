// Google Sheets v4 REST client, blocking.
use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{Row, StoreError, TableStore};
use crate::config::SheetsConfig;

pub struct SheetsStore {
    client: Client,
    api_base: Url,
    spreadsheet_id: String,
    access_token: String,
    sheet_ids: HashMap<String, i64>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsStore {
    pub fn new(config: &SheetsConfig) -> Result<Self, StoreError> {
        if config.spreadsheet_id.is_empty() {
            return Err(StoreError::MissingSpreadsheetId);
        }
        if config.access_token.is_empty() {
            return Err(StoreError::MissingCredentials);
        }
        let api_base = Url::parse(&config.api_base)
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", config.api_base, e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base,
            spreadsheet_id: config.spreadsheet_id.clone(),
            access_token: config.access_token.clone(),
            sheet_ids: config.sheet_ids.clone(),
        })
    }

    fn url(&self, tail: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(tail);
        Ok(url)
    }

    fn values_url(&self, table: &str) -> Result<Url, StoreError> {
        self.url(&[self.spreadsheet_id.as_str(), "values", table])
    }

    fn append_url(&self, table: &str) -> Result<Url, StoreError> {
        let range = format!("{}:append", table);
        let mut url = self.url(&[self.spreadsheet_id.as_str(), "values", range.as_str()])?;
        url.query_pairs_mut().append_pair("valueInputOption", "USER_ENTERED");
        Ok(url)
    }

    fn batch_update_url(&self) -> Result<Url, StoreError> {
        self.url(&[format!("{}:batchUpdate", self.spreadsheet_id).as_str()])
    }

    fn sheet_id(&self, table: &str) -> Result<i64, StoreError> {
        self.sheet_ids
            .get(table)
            .copied()
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))
    }

    fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn append_body(row: &[String]) -> Value {
    json!({ "values": [row] })
}

fn delete_body(sheet_id: i64, row_index: usize) -> Value {
    json!({
        "requests": [{
            "deleteDimension": {
                "range": {
                    "sheetId": sheet_id,
                    "dimension": "ROWS",
                    "startIndex": row_index,
                    "endIndex": row_index + 1,
                }
            }
        }]
    })
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl TableStore for SheetsStore {
    fn read_rows(&self, table: &str) -> Result<Vec<Row>, StoreError> {
        let response = self
            .client
            .get(self.values_url(table)?)
            .bearer_auth(&self.access_token)
            .send()?;
        let range: ValueRange = Self::check(response)?.json()?;
        let rows: Vec<Row> = range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        debug!(table, rows = rows.len(), "read sheet");
        Ok(rows)
    }

    fn append_row(&self, table: &str, row: &[String]) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.append_url(table)?)
            .bearer_auth(&self.access_token)
            .json(&append_body(row))
            .send()?;
        Self::check(response)?;
        debug!(table, "appended row");
        Ok(())
    }

    fn delete_row(&self, table: &str, row_index: usize) -> Result<(), StoreError> {
        let sheet_id = self.sheet_id(table)?;
        let response = self
            .client
            .post(self.batch_update_url()?)
            .bearer_auth(&self.access_token)
            .json(&delete_body(sheet_id, row_index))
            .send()?;
        Self::check(response)?;
        debug!(table, sheet_id, row_index, "deleted row");
        Ok(())
    }
}
