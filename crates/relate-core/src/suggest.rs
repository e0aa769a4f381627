//! Suggestion derivation.
//!
//! Scans deal and contact snapshots and produces candidate suggestions:
//! - **Stalled** (high): an open deal with no activity past the idle threshold
//! - **Upsell** (medium): a won deal untouched past the renewal threshold
//! - **Birthday** (low): a contact whose birthday falls in the current month
//!
//! Suggestion ids are a pure function of `(kind, source entity id)`, so the
//! same underlying condition always re-derives the same id. That is what
//! makes the [`DismissalSet`] meaningful: once an id is dismissed, every
//! later derivation run suppresses it.
//!
//! Pure function of `(deals, contacts, now, dismissed, config)`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TriageConfig;
use crate::model::{ContactSnapshot, DealSnapshot};

/// Urgency tier of a suggestion. Lower weight sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Sort weight: high < medium < low.
    pub fn weight(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Kind of derived suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Upsell,
    Stalled,
    Birthday,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upsell => "upsell",
            Self::Stalled => "stalled",
            Self::Birthday => "birthday",
        }
    }

    /// Deterministic suggestion id for a source entity.
    pub fn id_for(&self, source_id: &str) -> String {
        format!("{}-{}", self.as_str(), source_id)
    }
}

/// A derived, ephemeral recommendation. Never persisted by this crate;
/// recomputed from snapshots on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// `"{kind}-{source_entity_id}"`.
    pub id: String,
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub tier: PriorityTier,
    /// Source deal, for upsell and stalled suggestions.
    #[serde(default)]
    pub deal: Option<DealSnapshot>,
    /// Source contact, for birthday suggestions.
    #[serde(default)]
    pub contact: Option<ContactSnapshot>,
    pub created_at: DateTime<Utc>,
}

/// Suggestion ids the user has already resolved or deferred this session.
///
/// Grows monotonically via explicit user action; inserting an id twice is a
/// no-op. Not persisted here -- a durable store may mirror it if it wants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DismissalSet(BTreeSet<String>);

impl DismissalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the id was not already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Derive suggestions from snapshots.
///
/// Encounter order is deals (stalled or upsell per deal) then contacts
/// (birthdays); the result is stably sorted by tier, so within one tier the
/// encounter order is preserved.
pub fn derive(
    deals: &[DealSnapshot],
    contacts: &[ContactSnapshot],
    now: DateTime<Utc>,
    dismissed: &DismissalSet,
    config: &TriageConfig,
) -> Vec<Suggestion> {
    let mut out = Vec::new();

    for deal in deals {
        let idle = deal.idle_days(now);
        if deal.is_open() && idle > config.stalled_idle_days {
            out.push(Suggestion {
                id: SuggestionKind::Stalled.id_for(&deal.id),
                kind: SuggestionKind::Stalled,
                title: format!("Revive \"{}\"", deal.title),
                description: format!(
                    "No activity on {} for {} days. Reach out before it goes cold.",
                    deal.company_name, idle
                ),
                tier: PriorityTier::High,
                deal: Some(deal.clone()),
                contact: None,
                created_at: now,
            });
        } else if deal.is_won && idle > config.upsell_idle_days {
            out.push(Suggestion {
                id: SuggestionKind::Upsell.id_for(&deal.id),
                kind: SuggestionKind::Upsell,
                title: format!("Renewal window for \"{}\"", deal.title),
                description: format!(
                    "{} closed {} days ago. Good moment to open an upsell conversation.",
                    deal.company_name, idle
                ),
                tier: PriorityTier::Medium,
                deal: Some(deal.clone()),
                contact: None,
                created_at: now,
            });
        }
    }

    for contact in contacts {
        if contact.birthday.is_some_and(|b| b.in_month_of(now)) {
            out.push(Suggestion {
                id: SuggestionKind::Birthday.id_for(&contact.id),
                kind: SuggestionKind::Birthday,
                title: format!("{} has a birthday this month", contact.name),
                description: format!("Send {} a birthday note.", contact.name),
                tier: PriorityTier::Low,
                deal: None,
                contact: Some(contact.clone()),
                created_at: now,
            });
        }
    }

    out.retain(|s| !dismissed.contains(&s.id));
    // Stable sort: within a tier the encounter order stands.
    out.sort_by_key(|s| s.tier.weight());
    out
}
