// In-memory implementation of ReportStore.
//
// Used for dry runs (`SUPABASE_URL=memory:`) and as the store behind tests.
// Clones share the same underlying map, so a test can keep a handle while
// the service owns another.

use crate::core::moderation::{NewReport, Report, ReportStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryReportStore {
    /// Maps report id -> report
    reports: Arc<DashMap<String, Report>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored report, oldest first.
    #[cfg(test)]
    pub fn reports(&self) -> Vec<Report> {
        let mut reports: Vec<Report> = self
            .reports
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        reports.sort_by_key(|report| report.created_at);
        reports
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn create_report(&self, report: NewReport) -> Result<Report, StoreError> {
        let stored = Report {
            id: Uuid::new_v4().to_string(),
            created_at: Some(Utc::now()),
            fields: report,
        };
        self.reports.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }
}
