//! Engagement types: scheduled, time-stamped units of work tied to a deal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    Call,
    Meeting,
    Email,
    Task,
    Note,
    StatusChange,
}

impl EngagementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Meeting => "meeting",
            Self::Email => "email",
            Self::Task => "task",
            Self::Note => "note",
            Self::StatusChange => "status_change",
        }
    }

    /// Calls and meetings block a time slot; everything else is desk work.
    pub fn is_meeting_like(&self) -> bool {
        matches!(self, Self::Call | Self::Meeting)
    }
}

/// A scheduled unit of work, owned by the external Activity Store.
///
/// The inbox never constructs an `id` for these -- it only reads snapshots
/// and requests mutations through [`EngagementDraft`] / [`EngagementPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub id: String,
    /// Deal this engagement relates to, when there is one. Derived tasks
    /// (birthday outreach) are contact-driven and carry no deal.
    #[serde(default)]
    pub deal_id: Option<String>,
    #[serde(default)]
    pub deal_title: Option<String>,
    pub kind: EngagementKind,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

/// Payload for `ActivityStore::create`. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementDraft {
    #[serde(default)]
    pub deal_id: Option<String>,
    #[serde(default)]
    pub deal_title: Option<String>,
    pub kind: EngagementKind,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
}

/// Partial update for `ActivityStore::update`. Unset fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl EngagementPatch {
    /// Patch that sets only the completed flag.
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Self::default()
        }
    }

    /// Patch that moves the engagement to a new time.
    pub fn reschedule(at: DateTime<Utc>) -> Self {
        Self {
            scheduled_at: Some(at),
            ..Self::default()
        }
    }
}
