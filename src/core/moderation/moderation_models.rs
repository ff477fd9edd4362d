// Moderation domain models - data structures for AI content moderation.
//
// These are pure domain types with no HTTP dependencies.
// The HTTP layer converts outcomes into JSON responses.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of user-generated content being moderated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Post,
    Comment,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Post => "post",
            EntityType::Comment => "comment",
        }
    }

    /// Parse the wire value. Only the exact lowercase names are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "post" => Some(EntityType::Post),
            "comment" => Some(EntityType::Comment),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request to moderate one piece of content.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationRequest {
    pub content: String,
    pub author_id: String,
    pub entity_id: String,
    pub entity_type: EntityType,
    pub community_id: String,
}

/// Verdict returned by the classifier for a single text.
///
/// `categories` keeps the classifier's key order so flagged category lists
/// come out in the same order the service reported them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClassificationResult {
    pub flagged: bool,
    #[serde(default)]
    pub categories: IndexMap<String, bool>,
    #[serde(default)]
    pub category_scores: IndexMap<String, f64>,
}

/// Report priority derived from the flagged categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status of a report. System reports always start out pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
        }
    }
}

/// The row written to the `community_reports` table.
///
/// `reporter_id` is always `None`: a null reporter marks the report as
/// system/AI generated. Exactly one of `post_id`/`comment_id` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReport {
    pub community_id: String,
    pub reporter_id: Option<String>,
    pub accused_id: String,
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
    pub reason: String,
    pub description: String,
    pub priority: Priority,
    pub status: ReportStatus,
}

impl NewReport {
    /// Build a system report against the author of the moderated entity.
    pub fn system(
        request: &ModerationRequest,
        reason: String,
        description: String,
        priority: Priority,
    ) -> Self {
        let (post_id, comment_id) = match request.entity_type {
            EntityType::Post => (Some(request.entity_id.clone()), None),
            EntityType::Comment => (None, Some(request.entity_id.clone())),
        };

        Self {
            community_id: request.community_id.clone(),
            reporter_id: None,
            accused_id: request.author_id.clone(),
            post_id,
            comment_id,
            reason,
            description,
            priority,
            status: ReportStatus::Pending,
        }
    }
}

/// A report after the store accepted it.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub fields: NewReport,
}

/// Terminal result of a successful moderation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ModerationOutcome {
    /// Content passed moderation, nothing was stored.
    Approved,
    /// Content was flagged and a report was opened.
    ReportCreated {
        report_id: String,
        categories: Vec<String>,
        priority: Priority,
    },
}
