//! Tabular data sources.
//!
//! The record builder only needs `fetch_range`. Production reads the Google
//! Sheets values API with an API key; `CsvDirSource` reads a directory of
//! per-tab CSV exports for offline runs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SourceError;
use crate::models::RawTable;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch `range` (A1 notation, optionally prefixed with `Tab!`).
    async fn fetch_range(&self, range: &str) -> Result<RawTable, SourceError>;
}

// ============================================================================
// Google Sheets
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    api_key: String,
}

impl SheetsClient {
    pub fn new(spreadsheet_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: SHEETS_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            api_key: api_key.into(),
        }
    }

    fn values_url(&self, range: &str) -> Result<reqwest::Url, SourceError> {
        if range.trim().is_empty() {
            return Err(SourceError::InvalidRange(range.to_string()));
        }

        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|err| SourceError::InvalidRange(format!("{}: {err}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidRange(self.base_url.clone()))?
            .extend([self.spreadsheet_id.as_str(), "values", range]);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl TableSource for SheetsClient {
    async fn fetch_range(&self, range: &str) -> Result<RawTable, SourceError> {
        let url = self.values_url(range)?;
        tracing::debug!(range, "fetching sheet range");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ValueRange = response.json().await?;
        let rows = body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        Ok(RawTable::new(rows))
    }
}

// ============================================================================
// CSV exports
// ============================================================================

/// One `<Tab>.csv` per sheet tab. Ranges without a tab read `default_sheet`.
pub struct CsvDirSource {
    dir: PathBuf,
    default_sheet: String,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>, default_sheet: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_sheet: default_sheet.into(),
        }
    }

    fn sheet_path(&self, range: &str) -> Result<PathBuf, SourceError> {
        if range.trim().is_empty() {
            return Err(SourceError::InvalidRange(range.to_string()));
        }

        let sheet = match range.rsplit_once('!') {
            Some((tab, _)) => tab.trim().trim_matches('\''),
            None => self.default_sheet.as_str(),
        };
        if sheet.is_empty() || sheet.contains(['/', '\\']) {
            return Err(SourceError::InvalidRange(range.to_string()));
        }

        Ok(self.dir.join(format!("{sheet}.csv")))
    }
}

fn read_csv(path: &Path) -> Result<RawTable, SourceError> {
    if !path.exists() {
        return Err(SourceError::SheetNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(rows))
}

#[async_trait]
impl TableSource for CsvDirSource {
    async fn fetch_range(&self, range: &str) -> Result<RawTable, SourceError> {
        let path = self.sheet_path(range)?;
        tracing::debug!(range, path = %path.display(), "reading sheet export");
        read_csv(&path)
    }
}

// ============================================================================
// In-memory fixtures
// ============================================================================

#[cfg(test)]
#[derive(Default)]
pub struct MemorySource {
    tables: std::collections::HashMap<String, RawTable>,
    failing: std::collections::HashSet<String>,
}

#[cfg(test)]
impl MemorySource {
    pub fn with_table(mut self, range: &str, rows: Vec<Vec<&str>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        self.tables.insert(range.to_string(), RawTable::new(rows));
        self
    }

    pub fn failing(mut self, range: &str) -> Self {
        self.failing.insert(range.to_string());
        self
    }
}

#[cfg(test)]
#[async_trait]
impl TableSource for MemorySource {
    async fn fetch_range(&self, range: &str) -> Result<RawTable, SourceError> {
        if self.failing.contains(range) {
            return Err(SourceError::Api {
                status: 503,
                message: "backend unavailable".to_string(),
            });
        }
        self.tables
            .get(range)
            .cloned()
            .ok_or_else(|| SourceError::InvalidRange(range.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_url_escapes_range() {
        let client = SheetsClient::new("sheet-123", "secret");
        let url = client.values_url("Fireside Chats!A:ZZ").unwrap();
        assert_eq!(url.host_str(), Some("sheets.googleapis.com"));
        assert!(url.path().starts_with("/v4/spreadsheets/sheet-123/values/"));
        assert!(url.path().contains("Fireside%20Chats"));
        assert_eq!(url.query(), Some("key=secret"));
    }

    #[test]
    fn blank_range_is_rejected() {
        let client = SheetsClient::new("sheet-123", "secret");
        assert!(matches!(
            client.values_url("  "),
            Err(SourceError::InvalidRange(_))
        ));
    }

    #[test]
    fn non_string_cells_become_text() {
        assert_eq!(cell_text(serde_json::json!("P")), "P");
        assert_eq!(cell_text(serde_json::json!(85.5)), "85.5");
        assert_eq!(cell_text(serde_json::Value::Null), "");
    }

    #[test]
    fn value_range_without_values_is_empty() {
        let body: ValueRange = serde_json::from_str(r#"{"range":"Events!A1:ZZ1000"}"#).unwrap();
        assert!(body.values.is_empty());
    }

    #[test]
    fn csv_paths_follow_tab_names() {
        let source = CsvDirSource::new("/data", "Events");
        assert_eq!(
            source.sheet_path("'Fireside Chats'!A:ZZ").unwrap(),
            PathBuf::from("/data/Fireside Chats.csv")
        );
        assert_eq!(source.sheet_path("A:ZZ").unwrap(), PathBuf::from("/data/Events.csv"));
        assert!(source.sheet_path("../x!A:ZZ").is_err());
    }

    #[tokio::test]
    async fn reads_ragged_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Project.csv"),
            "Name,Status\nJane Doe,P\nAvery Lee\n",
        )
        .unwrap();

        let source = CsvDirSource::new(dir.path(), "Events");
        let table = source.fetch_range("Project!A:ZZ").await.unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1], vec!["Jane Doe", "P"]);
        assert_eq!(table.rows[2], vec!["Avery Lee"]);
    }

    #[tokio::test]
    async fn missing_export_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvDirSource::new(dir.path(), "Events");
        let result = source.fetch_range("Events!A:ZZ").await;
        assert!(matches!(result, Err(SourceError::SheetNotFound(_))));
    }
}
