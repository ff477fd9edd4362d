// SQLite-backed report store for local development.
//
// Tables:
// - community_reports: one row per system report, same columns as the hosted table

use crate::core::moderation::{NewReport, Report, ReportStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use uuid::Uuid;

pub struct SqliteReportStore {
    pool: Pool<Sqlite>,
}

impl SqliteReportStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at a `sqlite:` URL.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self::new(pool))
    }

    /// Run database migrations to create required tables.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS community_reports (
                id TEXT PRIMARY KEY,
                community_id TEXT NOT NULL,
                reporter_id TEXT,
                accused_id TEXT NOT NULL,
                post_id TEXT,
                comment_id TEXT,
                reason TEXT NOT NULL,
                description TEXT NOT NULL,
                priority TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL,
                CHECK ((post_id IS NULL) <> (comment_id IS NULL))
            );
            CREATE INDEX IF NOT EXISTS idx_community_reports_community
                ON community_reports(community_id, status);
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ReportStore for SqliteReportStore {
    async fn create_report(&self, report: NewReport) -> Result<Report, StoreError> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO community_reports (
                id, community_id, reporter_id, accused_id, post_id, comment_id,
                reason, description, priority, status, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&report.community_id)
        .bind(&report.reporter_id)
        .bind(&report.accused_id)
        .bind(&report.post_id)
        .bind(&report.comment_id)
        .bind(&report.reason)
        .bind(&report.description)
        .bind(report.priority.as_str())
        .bind(report.status.as_str())
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Report {
            id,
            created_at: Some(created_at),
            fields: report,
        })
    }
}
