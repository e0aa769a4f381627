//! Effect dispatch: turning focus decisions into store mutations.
//!
//! The dispatcher is the only impure part of the engine. Every mutation is
//! optimistic: the caller's queue and cursor advance regardless of the
//! store's answer, a rejection produces exactly one notification (plus a
//! [`InboxEvent::DispatchFailed`]) and is never rolled back. That is a
//! deliberate availability-over-consistency choice for a personal queue.
//!
//! The dispatcher also owns the session [`DismissalSet`]: accepting,
//! dismissing, or snoozing a suggestion records its id so derivation stops
//! re-surfacing it.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::config::InboxConfig;
use crate::events::InboxEvent;
use crate::model::{DealDraft, DealPatch, Engagement, EngagementDraft, EngagementKind, EngagementPatch};
use crate::stores::Stores;
use crate::suggest::{DismissalSet, Suggestion, SuggestionKind};

/// Executes the side effects of accept/dismiss/complete/snooze decisions.
pub struct EffectDispatcher {
    stores: Stores,
    config: InboxConfig,
    dismissed: DismissalSet,
}

impl EffectDispatcher {
    pub fn new(stores: Stores, config: InboxConfig) -> Self {
        Self {
            stores,
            config,
            dismissed: DismissalSet::new(),
        }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn config(&self) -> &InboxConfig {
        &self.config
    }

    /// Suggestion ids resolved or deferred this session.
    pub fn dismissals(&self) -> &DismissalSet {
        &self.dismissed
    }

    /// Accept a suggestion: upsells seed a new deal, stalled deals get a
    /// reactivation update, birthdays become an outreach task for now.
    /// The suggestion id enters the dismissal set either way.
    pub fn accept_suggestion(&mut self, suggestion: &Suggestion, now: DateTime<Utc>) -> InboxEvent {
        self.dismissed.insert(&suggestion.id);
        debug!(id = %suggestion.id, kind = suggestion.kind.as_str(), "accepting suggestion");

        let outcome = match suggestion.kind {
            SuggestionKind::Upsell => self.create_upsell_deal(suggestion),
            SuggestionKind::Stalled => self.reactivate_deal(suggestion, now),
            SuggestionKind::Birthday => self.create_birthday_task(suggestion, now),
        };

        match outcome {
            Ok(()) => InboxEvent::SuggestionAccepted {
                id: suggestion.id.clone(),
                kind: suggestion.kind,
                at: now,
            },
            Err(message) => self.report_failure("accept", &suggestion.id, message, now),
        }
    }

    /// Dismiss or snooze a suggestion: only the dismissal set changes, no
    /// entity mutation is requested.
    pub fn dismiss_suggestion(&mut self, suggestion: &Suggestion, now: DateTime<Utc>) -> InboxEvent {
        self.dismissed.insert(&suggestion.id);
        self.stores
            .notifications
            .notify(&format!("Dismissed: {}", suggestion.title));
        InboxEvent::SuggestionDismissed {
            id: suggestion.id.clone(),
            at: now,
        }
    }

    /// Toggle an engagement's completed flag. Completing an already
    /// completed engagement reopens it.
    pub fn toggle_engagement(&self, engagement: &Engagement, now: DateTime<Utc>) -> InboxEvent {
        let next = !engagement.completed;
        debug!(id = %engagement.id, completed = next, "toggling engagement");
        match self
            .stores
            .activity
            .update(&engagement.id, EngagementPatch::completed(next))
        {
            Ok(()) if next => InboxEvent::EngagementCompleted {
                id: engagement.id.clone(),
                at: now,
            },
            Ok(()) => InboxEvent::EngagementReopened {
                id: engagement.id.clone(),
                at: now,
            },
            Err(err) => self.report_failure("complete", &engagement.id, err.to_string(), now),
        }
    }

    /// Push an engagement out by the configured number of days.
    pub fn snooze_engagement(&self, engagement: &Engagement, now: DateTime<Utc>) -> InboxEvent {
        let until = engagement.scheduled_at + Duration::days(self.config.focus.snooze_days);
        match self
            .stores
            .activity
            .update(&engagement.id, EngagementPatch::reschedule(until))
        {
            Ok(()) => {
                self.stores
                    .notifications
                    .notify(&format!("Snoozed: {}", engagement.title));
                InboxEvent::EngagementSnoozed {
                    id: engagement.id.clone(),
                    until,
                    at: now,
                }
            }
            Err(err) => self.report_failure("snooze", &engagement.id, err.to_string(), now),
        }
    }

    fn create_upsell_deal(&self, suggestion: &Suggestion) -> Result<(), String> {
        let deal = suggestion
            .deal
            .as_ref()
            .ok_or_else(|| "upsell suggestion has no source deal".to_string())?;
        let upsell = &self.config.upsell;
        let draft = DealDraft {
            title: format!("{} {}", upsell.title_prefix, deal.title),
            company_name: deal.company_name.clone(),
            value: (deal.value * upsell.value_factor).round(),
            probability: Some(upsell.reset_probability),
            tags: vec![upsell.tag.clone()],
            contact_id: deal.contact_id.clone(),
            company_id: deal.company_id.clone(),
        };
        self.stores
            .deals
            .create(draft)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    fn reactivate_deal(&self, suggestion: &Suggestion, now: DateTime<Utc>) -> Result<(), String> {
        let deal = suggestion
            .deal
            .as_ref()
            .ok_or_else(|| "stalled suggestion has no source deal".to_string())?;
        // What "reactivation" touches is the store's call; the contract here
        // is only that an update for this deal id goes out.
        self.stores
            .deals
            .update(&deal.id, DealPatch::touch(now))
            .map_err(|e| e.to_string())
    }

    fn create_birthday_task(&self, suggestion: &Suggestion, now: DateTime<Utc>) -> Result<(), String> {
        let contact = suggestion
            .contact
            .as_ref()
            .ok_or_else(|| "birthday suggestion has no source contact".to_string())?;
        let draft = EngagementDraft {
            deal_id: None,
            deal_title: None,
            kind: EngagementKind::Task,
            title: format!("Wish {} a happy birthday", contact.name),
            description: None,
            scheduled_at: now,
        };
        self.stores
            .activity
            .create(draft)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    /// One warning, one sink notification, one event. No rollback.
    fn report_failure(
        &self,
        action: &str,
        id: &str,
        message: String,
        now: DateTime<Utc>,
    ) -> InboxEvent {
        warn!(action, id, %message, "store rejected dispatch");
        self.stores
            .notifications
            .notify(&format!("Could not {action} {id}: {message}"));
        InboxEvent::DispatchFailed {
            action: action.to_string(),
            id: id.to_string(),
            message,
            at: now,
        }
    }
}
