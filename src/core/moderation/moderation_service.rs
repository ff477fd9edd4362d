// Moderation service - core business logic for AI content moderation.
//
// This service handles:
// - Asking the classifier for a verdict on one piece of content
// - Deriving priority and reason from the flagged categories
// - Opening a system report when the content is flagged
//
// NO HTTP dependencies here - just pure domain logic behind two ports.

use super::decision::{extract_flagged, format_description, format_reason, priority};
use super::moderation_models::{
    ClassificationResult, ModerationOutcome, ModerationRequest, NewReport, Report,
};
use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// The caller's request is malformed. Never retried.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid entity_type. Must be 'post' or 'comment'")]
    InvalidEntityType,

    #[error("Invalid field type: {0}")]
    InvalidFieldType(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Moderation API request failed: {0}")]
    Request(String),

    #[error("Moderation API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Moderation API returned an unexpected response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database request failed: {0}")]
    Request(String),

    #[error("Database error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Database did not return the created report")]
    MissingReport,
}

/// Failure after validation: either outbound call went wrong.
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// PORTS
// ============================================================================

/// Classifies one piece of text. A single attempt, no retries.
#[async_trait]
pub trait ContentClassifier: Send + Sync {
    async fn classify(&self, content: &str) -> Result<ClassificationResult, ClassifierError>;
}

/// Persists moderation reports.
///
/// Inserts are not deduplicated: creating the same report twice stores two rows.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn create_report(&self, report: NewReport) -> Result<Report, StoreError>;
}

// Blanket implementations for boxed trait objects so the composition root
// can pick the concrete classifier and store at runtime.
#[async_trait]
impl ContentClassifier for Box<dyn ContentClassifier> {
    async fn classify(&self, content: &str) -> Result<ClassificationResult, ClassifierError> {
        (**self).classify(content).await
    }
}

#[async_trait]
impl ReportStore for Box<dyn ReportStore> {
    async fn create_report(&self, report: NewReport) -> Result<Report, StoreError> {
        (**self).create_report(report).await
    }
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Runs one moderation pass: classify, decide, and report if flagged.
pub struct ModerationService<C: ContentClassifier, S: ReportStore> {
    classifier: C,
    store: S,
}

impl<C: ContentClassifier, S: ReportStore> ModerationService<C, S> {
    pub fn new(classifier: C, store: S) -> Self {
        Self { classifier, store }
    }

    /// Moderate a validated request.
    ///
    /// The store is only touched when the classifier flags the content.
    /// Any failure ends the pass; nothing is queued for later.
    pub async fn moderate(
        &self,
        request: &ModerationRequest,
    ) -> Result<ModerationOutcome, ModerationError> {
        tracing::info!(
            entity_type = %request.entity_type,
            entity_id = %request.entity_id,
            "Analyzing content"
        );

        let result = self.classifier.classify(&request.content).await?;

        tracing::info!(
            entity_id = %request.entity_id,
            flagged = result.flagged,
            "Classifier verdict"
        );
        tracing::debug!(scores = ?result.category_scores, "Category scores");

        if !result.flagged {
            tracing::info!(entity_id = %request.entity_id, "Content approved");
            return Ok(ModerationOutcome::Approved);
        }

        let categories = extract_flagged(&result.categories);
        let priority = priority(&result.categories);

        if categories.is_empty() {
            tracing::warn!(
                entity_id = %request.entity_id,
                "Classifier flagged content without any flagged category"
            );
        }

        tracing::info!(
            entity_id = %request.entity_id,
            "Creating {} priority report for categories: {}",
            priority,
            categories.join(", ")
        );

        let report = NewReport::system(
            request,
            format_reason(&categories),
            format_description(request.entity_type, &categories),
            priority,
        );
        let created = self.store.create_report(report).await?;

        tracing::info!(
            report_id = %created.id,
            entity_id = %request.entity_id,
            created_at = ?created.created_at,
            "Report created"
        );

        Ok(ModerationOutcome::ReportCreated {
            report_id: created.id,
            categories,
            priority: created.fields.priority,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
