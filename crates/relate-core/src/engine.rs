//! Inbox session engine.
//!
//! Ties the pure stages together and owns the session state: snapshot
//! copies of the store data, the dismissal set (inside the dispatcher), and
//! the focus cursor. The pipeline is classify + derive + compose, re-run
//! whenever the inputs change; the cursor survives recomposition through
//! its reconciliation rules.
//!
//! One logical actor (the user session) drives this type, so every method
//! is synchronous and there is no locking anywhere.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::classify::{classify, EngagementBuckets};
use crate::config::InboxConfig;
use crate::cursor::FocusCursor;
use crate::dispatch::EffectDispatcher;
use crate::error::CoreError;
use crate::events::InboxEvent;
use crate::model::{ContactSnapshot, DealSnapshot, Engagement};
use crate::queue::{compose, FocusItem, FocusPayload};
use crate::stores::Stores;
use crate::suggest::{derive, DismissalSet, Suggestion};
use crate::summary::{self, DailySummary};

/// The categorized list view of the inbox.
///
/// Unlike the focus queue this includes `upcoming`, which is browsable but
/// never interrupts a focus session.
#[derive(Debug, Clone)]
pub struct InboxOverview {
    pub overdue: Vec<Engagement>,
    pub today_meetings: Vec<Engagement>,
    pub today_tasks: Vec<Engagement>,
    pub upcoming: Vec<Engagement>,
    pub suggestions: Vec<Suggestion>,
}

/// One user's inbox session.
pub struct Inbox {
    engagements: Vec<Engagement>,
    deals: Vec<DealSnapshot>,
    contacts: Vec<ContactSnapshot>,
    dispatcher: EffectDispatcher,
    cursor: FocusCursor,
}

impl Inbox {
    pub fn new(config: InboxConfig, stores: Stores) -> Self {
        Self {
            engagements: Vec::new(),
            deals: Vec::new(),
            contacts: Vec::new(),
            dispatcher: EffectDispatcher::new(stores, config),
            cursor: FocusCursor::new(),
        }
    }

    // ── Snapshots ────────────────────────────────────────────────────

    /// Re-pull snapshots from the stores and recompose the queue.
    ///
    /// # Errors
    ///
    /// Read failures propagate; unlike mutations, the engine cannot proceed
    /// optimistically without data.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Result<(), CoreError> {
        let stores = self.dispatcher.stores();
        self.engagements = stores.activity.list().map_err(|e| CoreError::Store {
            store: "activity",
            operation: "list",
            message: e.to_string(),
        })?;
        self.deals = stores.deals.list().map_err(|e| CoreError::Store {
            store: "deal",
            operation: "list",
            message: e.to_string(),
        })?;
        self.contacts = stores.contacts.list().map_err(|e| CoreError::Store {
            store: "contact",
            operation: "list",
            message: e.to_string(),
        })?;
        debug!(
            engagements = self.engagements.len(),
            deals = self.deals.len(),
            contacts = self.contacts.len(),
            "snapshots refreshed"
        );
        let queue = self.composed_queue(now);
        self.cursor.sync(queue);
        Ok(())
    }

    /// Replace the snapshots directly, for embedders that already hold the
    /// data, and recompose.
    pub fn set_snapshots(
        &mut self,
        engagements: Vec<Engagement>,
        deals: Vec<DealSnapshot>,
        contacts: Vec<ContactSnapshot>,
        now: DateTime<Utc>,
    ) {
        self.engagements = engagements;
        self.deals = deals;
        self.contacts = contacts;
        let queue = self.composed_queue(now);
        self.cursor.sync(queue);
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn buckets(&self, now: DateTime<Utc>) -> EngagementBuckets {
        classify(&self.engagements, now)
    }

    pub fn suggestions(&self, now: DateTime<Utc>) -> Vec<Suggestion> {
        derive(
            &self.deals,
            &self.contacts,
            now,
            self.dispatcher.dismissals(),
            &self.dispatcher.config().triage,
        )
    }

    /// The categorized list view.
    pub fn overview(&self, now: DateTime<Utc>) -> InboxOverview {
        let buckets = self.buckets(now);
        let suggestions = self.suggestions(now);
        InboxOverview {
            overdue: buckets.overdue,
            today_meetings: buckets.today_meetings,
            today_tasks: buckets.today_tasks,
            upcoming: buckets.upcoming,
            suggestions,
        }
    }

    /// The daily digest, with text-generation fallback baked in.
    pub fn daily_summary(&self, now: DateTime<Utc>) -> DailySummary {
        let buckets = self.buckets(now);
        let suggestions = self.suggestions(now);
        let writer = self.dispatcher.stores().summary.clone();
        summary::build(&buckets, &suggestions, now, writer.as_deref())
    }

    pub fn queue(&self) -> &[FocusItem] {
        self.cursor.queue()
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn current(&self) -> Option<&FocusItem> {
        self.cursor.current()
    }

    pub fn dismissals(&self) -> &DismissalSet {
        self.dispatcher.dismissals()
    }

    // ── Focus navigation ─────────────────────────────────────────────

    pub fn next(&mut self) -> bool {
        self.cursor.next()
    }

    pub fn prev(&mut self) -> bool {
        self.cursor.prev()
    }

    /// Move past the current item without resolving it.
    pub fn skip(&mut self, now: DateTime<Utc>) -> Option<InboxEvent> {
        let item = self.cursor.current()?;
        let id = item.id.clone();
        let title = item.title().to_string();
        self.cursor.next();
        self.dispatcher
            .stores()
            .notifications
            .notify(&format!("Skipped: {title}"));
        Some(InboxEvent::Skipped { id, at: now })
    }

    /// Resolve the current item: complete an engagement or accept a
    /// suggestion, then let the next pending item slide into view.
    pub fn done(&mut self, now: DateTime<Utc>) -> Option<InboxEvent> {
        let item = self.cursor.current()?.clone();
        let event = match &item.payload {
            FocusPayload::Engagement(e) => {
                let event = self.dispatcher.toggle_engagement(e, now);
                self.toggle_local(&e.id);
                event
            }
            FocusPayload::Suggestion(s) => self.dispatcher.accept_suggestion(s, now),
        };
        let queue = self.composed_queue(now);
        self.cursor.sync_after_resolve(queue);
        Some(event)
    }

    /// Defer the current item: push an engagement out by the configured
    /// days, or dismiss a suggestion for this session.
    pub fn snooze(&mut self, now: DateTime<Utc>) -> Option<InboxEvent> {
        let item = self.cursor.current()?.clone();
        let event = match &item.payload {
            FocusPayload::Engagement(e) => {
                let event = self.dispatcher.snooze_engagement(e, now);
                let days = self.dispatcher.config().focus.snooze_days;
                if let Some(local) = self.engagements.iter_mut().find(|x| x.id == e.id) {
                    local.scheduled_at += chrono::Duration::days(days);
                }
                event
            }
            FocusPayload::Suggestion(s) => self.dispatcher.dismiss_suggestion(s, now),
        };
        let queue = self.composed_queue(now);
        self.cursor.sync_after_resolve(queue);
        Some(event)
    }

    /// Toggle any engagement from the list view (not just the one under the
    /// cursor). Completing an already-completed engagement reopens it.
    pub fn toggle_engagement(&mut self, id: &str, now: DateTime<Utc>) -> Option<InboxEvent> {
        let engagement = self.engagements.iter().find(|e| e.id == id)?.clone();
        let event = self.dispatcher.toggle_engagement(&engagement, now);
        self.toggle_local(id);
        let queue = self.composed_queue(now);
        self.cursor.sync(queue);
        Some(event)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn composed_queue(&self, now: DateTime<Utc>) -> Vec<FocusItem> {
        let buckets = self.buckets(now);
        let suggestions = self.suggestions(now);
        compose(&buckets, &suggestions)
    }

    /// Optimistic local flip; stands even if the store rejected the update.
    fn toggle_local(&mut self, id: &str) {
        if let Some(local) = self.engagements.iter_mut().find(|e| e.id == id) {
            local.completed = !local.completed;
        }
    }
}
