use crate::core::moderation::{NewReport, Report, ReportStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

const REPORTS_TABLE: &str = "community_reports";

/// Report store backed by the hosted database's REST gateway (PostgREST).
///
/// Authenticates with the service-role key, which bypasses row-level security.
/// System reports have no reporter, so no per-user policy would admit them.
pub struct PostgrestReportStore {
    client: Client,
    base_url: String,
}

impl PostgrestReportStore {
    pub fn new(base_url: &str, service_key: &str) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(service_key).map_err(|e| StoreError::Request(e.to_string()))?,
        );
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", service_key))
                .map_err(|e| StoreError::Request(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, REPORTS_TABLE)
    }

    /// Ids come back as uuid strings, but bigint keys are tolerated too.
    fn id_to_string(id: Value) -> Option<String> {
        match id {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct InsertedRow {
    id: Value,
    #[serde(default)]
    created_at: Option<String>,
}

#[async_trait]
impl ReportStore for PostgrestReportStore {
    async fn create_report(&self, report: NewReport) -> Result<Report, StoreError> {
        let resp = self
            .client
            .post(self.table_url())
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(&[&report])
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        let rows: Vec<InsertedRow> = resp
            .json()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let row = rows.into_iter().next().ok_or(StoreError::MissingReport)?;
        let id = Self::id_to_string(row.id).ok_or(StoreError::MissingReport)?;
        let created_at = row
            .created_at
            .as_deref()
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(Report {
            id,
            created_at,
            fields: report,
        })
    }
}
