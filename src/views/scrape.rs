use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use thiserror::Error;

use super::dashboard::{unwrap_data, DEFAULT_AVATAR};
use crate::api::{endpoints, Gateway};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("Please provide a link.")]
    MissingLink,

    #[error("Scraping failed: {0}")]
    Failed(String),

    #[error("Please select at least one item to upload.")]
    NothingSelected,
}

/// One listing returned by the scraping backend, with display fallbacks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapedRow {
    pub property: String,
    pub description: String,
    pub link: String,
    pub listed_by: String,
    pub avatar: String,
    /// Everything the backend sent (rent, deposit, images...), uploaded as-is
    #[serde(skip)]
    pub raw: Map<String, Value>,
}

impl ScrapedRow {
    pub fn from_value(value: &Value) -> Self {
        let raw = value.as_object().cloned().unwrap_or_default();
        let text = |key: &str, fallback: &str| {
            raw.get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            property: text("property", "N/A"),
            description: text("description", "No description"),
            link: text("facebookUrl", "N/A"),
            listed_by: text("listedBy", "Unknown"),
            avatar: text("avatar", DEFAULT_AVATAR),
            raw: raw.clone(),
        }
    }

    /// Body sent to the save endpoint: the raw record plus the filled-in fields
    pub fn upload_body(&self) -> Value {
        let mut body = self.raw.clone();
        body.insert("property".into(), Value::String(self.property.clone()));
        body.insert("description".into(), Value::String(self.description.clone()));
        body.insert("link".into(), Value::String(self.link.clone()));
        body.insert("listedBy".into(), Value::String(self.listed_by.clone()));
        body.insert("avatar".into(), Value::String(self.avatar.clone()));
        Value::Object(body)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl UploadReport {
    pub fn summary(&self) -> String {
        format!("Upload Complete.\nSuccess: {}\nFailed: {}", self.succeeded, self.failed)
    }
}

/// Ask the backend to scrape a Facebook listing URL
pub async fn scrape(gw: &Gateway, link: &str, limit: u32) -> Result<Vec<ScrapedRow>, ScrapeError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(ScrapeError::MissingLink);
    }

    tracing::info!("Sending scrape request for {}", link);
    let body = endpoints::scrape_facebook(gw, link, limit)
        .await
        .map_err(|e| ScrapeError::Failed(e.message()))?;

    rows_from_response(&body)
}

pub fn rows_from_response(body: &Value) -> Result<Vec<ScrapedRow>, ScrapeError> {
    let items = unwrap_data(body)
        .as_array()
        .ok_or_else(|| ScrapeError::Failed("unexpected response shape".to_string()))?;
    Ok(items.iter().map(ScrapedRow::from_value).collect())
}

/// Scraped rows plus the user's selection
#[derive(Debug, Clone, Default)]
pub struct ScrapeResults {
    rows: Vec<ScrapedRow>,
    selected: BTreeSet<usize>,
}

impl ScrapeResults {
    pub fn new(rows: Vec<ScrapedRow>) -> Self {
        Self { rows, selected: BTreeSet::new() }
    }

    pub fn rows(&self) -> &[ScrapedRow] {
        &self.rows
    }

    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Flip one row; indices past the end are ignored
    pub fn toggle(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    /// Add one row to the selection; repeats and indices past the end are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.rows.len() {
            self.selected.insert(index);
        }
    }

    pub fn select_all(&mut self, on: bool) {
        self.selected = if on { (0..self.rows.len()).collect() } else { BTreeSet::new() };
    }

    /// Save each selected row, one request at a time. The selection is
    /// cleared when at least one row saved.
    pub async fn upload_selected(&mut self, gw: &Gateway) -> Result<UploadReport, ScrapeError> {
        if self.selected.is_empty() {
            return Err(ScrapeError::NothingSelected);
        }

        let mut report = UploadReport::default();
        for index in self.selected.iter().copied() {
            let row = &self.rows[index];
            match endpoints::save_scraped_property(gw, row.upload_body()).await {
                Ok(_) => report.succeeded += 1,
                Err(e) => {
                    tracing::error!("Failed to upload item {}: {}", row.property, e);
                    report.failed += 1;
                }
            }
        }

        if report.succeeded > 0 {
            self.selected.clear();
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_get_fallbacks() {
        let body = json!({"data": [
            {"property": "2BHK in Baner", "facebookUrl": "https://fb.com/x", "rent": 22000},
            {"description": ""}
        ]});
        let rows = rows_from_response(&body).unwrap();
        assert_eq!(rows[0].property, "2BHK in Baner");
        assert_eq!(rows[0].link, "https://fb.com/x");
        assert_eq!(rows[0].listed_by, "Unknown");
        assert_eq!(rows[1].property, "N/A");
        assert_eq!(rows[1].description, "No description");
        assert_eq!(rows[1].avatar, DEFAULT_AVATAR);
        assert_eq!(rows[0].upload_body()["rent"], 22000);
    }

    #[test]
    fn bare_array_is_accepted() {
        let rows = rows_from_response(&json!([{"property": "Loft"}])).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows_from_response(&json!({"data": {"x": 1}})).is_err());
    }

    #[test]
    fn selection_toggles_and_bounds() {
        let rows = rows_from_response(&json!([{}, {}, {}])).unwrap();
        let mut results = ScrapeResults::new(rows);
        results.toggle(1);
        results.toggle(7);
        assert_eq!(results.selected().collect::<Vec<_>>(), vec![1]);
        results.toggle(1);
        assert_eq!(results.selected().count(), 0);
        results.select_all(true);
        assert_eq!(results.selected().count(), 3);
        results.select_all(false);
        assert_eq!(results.selected().count(), 0);
    }

    #[test]
    fn select_is_idempotent() {
        let rows = rows_from_response(&json!([{}, {}, {}])).unwrap();
        let mut results = ScrapeResults::new(rows);
        results.select(0);
        results.select(0);
        results.select(3);
        assert_eq!(results.selected().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn report_summary() {
        let report = UploadReport { succeeded: 2, failed: 1 };
        assert_eq!(report.summary(), "Upload Complete.\nSuccess: 2\nFailed: 1");
        assert_eq!(ScrapeError::Failed("timeout".into()).to_string(), "Scraping failed: timeout");
    }
}
