//! Deal snapshot and mutation payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only projection of a deal, owned by the external Deal Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealSnapshot {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub value: f64,
    pub lifecycle_status: String,
    pub is_won: bool,
    pub is_lost: bool,
    pub last_updated_at: DateTime<Utc>,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
}

impl DealSnapshot {
    /// A deal still being worked: neither won nor lost.
    pub fn is_open(&self) -> bool {
        !self.is_won && !self.is_lost
    }

    /// Whole days since the deal was last touched.
    pub fn idle_days(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.last_updated_at).num_days()
    }
}

/// Payload for `DealStore::create`. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealDraft {
    pub title: String,
    pub company_name: String,
    pub value: f64,
    /// Win probability in percent, if the caller wants to seed one.
    #[serde(default)]
    pub probability: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
}

/// Partial update for `DealStore::update`. Unset fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl DealPatch {
    /// Patch that only bumps the last-touched timestamp.
    pub fn touch(now: DateTime<Utc>) -> Self {
        Self {
            last_updated_at: Some(now),
            ..Self::default()
        }
    }
}
