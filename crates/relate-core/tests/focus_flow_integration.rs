//! Integration tests for the full inbox loop: snapshot refresh,
//! classification, derivation, queue composition, and focus navigation
//! against in-memory stores.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use relate_core::{
    ActivityStore, ContactSnapshot, ContactStore, DealDraft, DealPatch, DealSnapshot, DealStore,
    Engagement, EngagementDraft, EngagementKind, EngagementPatch, FocusPayload, Inbox, InboxConfig,
    InboxEvent, MonthDay, NotificationSink, StoreResult, Stores,
};

#[derive(Default)]
struct InMemoryActivityStore {
    engagements: Mutex<Vec<Engagement>>,
    next_id: Mutex<u32>,
}

impl InMemoryActivityStore {
    fn seed(engagements: Vec<Engagement>) -> Self {
        Self {
            engagements: Mutex::new(engagements),
            next_id: Mutex::new(0),
        }
    }
}

impl ActivityStore for InMemoryActivityStore {
    fn list(&self) -> StoreResult<Vec<Engagement>> {
        Ok(self.engagements.lock().unwrap().clone())
    }

    fn create(&self, draft: EngagementDraft) -> StoreResult<Engagement> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let engagement = Engagement {
            id: format!("created-{}", *next_id),
            deal_id: draft.deal_id,
            deal_title: draft.deal_title,
            kind: draft.kind,
            title: draft.title,
            description: draft.description,
            scheduled_at: draft.scheduled_at,
            completed: false,
        };
        self.engagements.lock().unwrap().push(engagement.clone());
        Ok(engagement)
    }

    fn update(&self, id: &str, patch: EngagementPatch) -> StoreResult<()> {
        let mut engagements = self.engagements.lock().unwrap();
        let engagement = engagements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| format!("no engagement {id}"))?;
        if let Some(title) = patch.title {
            engagement.title = title;
        }
        if let Some(at) = patch.scheduled_at {
            engagement.scheduled_at = at;
        }
        if let Some(completed) = patch.completed {
            engagement.completed = completed;
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.engagements.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryDealStore {
    deals: Mutex<Vec<DealSnapshot>>,
    created: Mutex<Vec<DealDraft>>,
    updated: Mutex<Vec<(String, DealPatch)>>,
}

impl InMemoryDealStore {
    fn seed(deals: Vec<DealSnapshot>) -> Self {
        Self {
            deals: Mutex::new(deals),
            ..Self::default()
        }
    }
}

impl DealStore for InMemoryDealStore {
    fn list(&self) -> StoreResult<Vec<DealSnapshot>> {
        Ok(self.deals.lock().unwrap().clone())
    }

    fn create(&self, draft: DealDraft) -> StoreResult<DealSnapshot> {
        let snapshot = DealSnapshot {
            id: format!("deal-created-{}", self.created.lock().unwrap().len() + 1),
            title: draft.title.clone(),
            company_name: draft.company_name.clone(),
            value: draft.value,
            lifecycle_status: "open".into(),
            is_won: false,
            is_lost: false,
            last_updated_at: Utc::now(),
            contact_id: draft.contact_id.clone(),
            company_id: draft.company_id.clone(),
        };
        self.created.lock().unwrap().push(draft);
        self.deals.lock().unwrap().push(snapshot.clone());
        Ok(snapshot)
    }

    fn update(&self, id: &str, patch: DealPatch) -> StoreResult<()> {
        let mut deals = self.deals.lock().unwrap();
        if let Some(deal) = deals.iter_mut().find(|d| d.id == id) {
            if let Some(at) = patch.last_updated_at {
                deal.last_updated_at = at;
            }
        }
        self.updated.lock().unwrap().push((id.to_string(), patch));
        Ok(())
    }
}

struct FixedContactStore(Vec<ContactSnapshot>);

impl ContactStore for FixedContactStore {
    fn list(&self) -> StoreResult<Vec<ContactSnapshot>> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
struct RecordingSink(Mutex<Vec<String>>);

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap()
}

fn engagement(id: &str, kind: EngagementKind, at: DateTime<Utc>) -> Engagement {
    Engagement {
        id: id.into(),
        deal_id: Some("deal-1".into()),
        deal_title: Some("Acme".into()),
        kind,
        title: format!("Engagement {id}"),
        description: None,
        scheduled_at: at,
        completed: false,
    }
}

fn deal(id: &str, is_won: bool, is_lost: bool, idle_days: i64, value: f64) -> DealSnapshot {
    DealSnapshot {
        id: id.into(),
        title: format!("Deal {id}"),
        company_name: "Acme".into(),
        value,
        lifecycle_status: "open".into(),
        is_won,
        is_lost,
        last_updated_at: now() - Duration::days(idle_days),
        contact_id: None,
        company_id: None,
    }
}

struct Fixture {
    activity: Arc<InMemoryActivityStore>,
    deals: Arc<InMemoryDealStore>,
    sink: Arc<RecordingSink>,
    inbox: Inbox,
}

fn fixture(
    engagements: Vec<Engagement>,
    deals: Vec<DealSnapshot>,
    contacts: Vec<ContactSnapshot>,
) -> Fixture {
    let activity = Arc::new(InMemoryActivityStore::seed(engagements));
    let deal_store = Arc::new(InMemoryDealStore::seed(deals));
    let sink = Arc::new(RecordingSink::default());
    let stores = Stores {
        activity: activity.clone(),
        deals: deal_store.clone(),
        contacts: Arc::new(FixedContactStore(contacts)),
        notifications: sink.clone(),
        summary: None,
    };
    let mut inbox = Inbox::new(InboxConfig::default(), stores);
    inbox.refresh(now()).unwrap();
    Fixture {
        activity,
        deals: deal_store,
        sink,
        inbox,
    }
}

#[test]
fn mixed_queue_follows_the_band_order() {
    let fx = fixture(
        vec![
            engagement("overdue", EngagementKind::Task, now() - Duration::days(1)),
            engagement("meeting", EngagementKind::Meeting, now() + Duration::hours(2)),
            engagement("task", EngagementKind::Email, now() + Duration::hours(3)),
            engagement("upcoming", EngagementKind::Call, now() + Duration::days(5)),
        ],
        vec![
            deal("stalled", false, false, 10, 5_000.0),
            deal("won", true, false, 45, 10_000.0),
        ],
        vec![ContactSnapshot {
            id: "c1".into(),
            name: "Dana".into(),
            birthday: Some(MonthDay { month: 8, day: 30 }),
        }],
    );

    let ranked: Vec<(&str, u32)> = fx
        .inbox
        .queue()
        .iter()
        .map(|item| (item.id.as_str(), item.rank))
        .collect();
    assert_eq!(
        ranked,
        [
            ("overdue", 0),
            ("stalled-stalled", 100),
            ("meeting", 200),
            ("task", 300),
            ("upsell-won", 400),
            ("birthday-c1", 401),
        ]
    );
    // Upcoming is browsable in the overview but never in the queue.
    let overview = fx.inbox.overview(now());
    assert_eq!(overview.upcoming.len(), 1);
}

#[test]
fn skip_advances_without_resolving() {
    let mut fx = fixture(
        vec![
            engagement("a", EngagementKind::Task, now() - Duration::days(1)),
            engagement("b", EngagementKind::Task, now() - Duration::hours(20)),
        ],
        Vec::new(),
        Vec::new(),
    );

    let event = fx.inbox.skip(now()).unwrap();
    assert!(matches!(event, InboxEvent::Skipped { .. }));
    assert_eq!(fx.inbox.cursor_index(), 1);
    assert_eq!(fx.inbox.queue().len(), 2); // nothing resolved
    assert_eq!(fx.sink.0.lock().unwrap().len(), 1);
}

#[test]
fn done_on_engagement_completes_and_slides_next_into_view() {
    let mut fx = fixture(
        vec![
            engagement("a", EngagementKind::Task, now() - Duration::days(2)),
            engagement("b", EngagementKind::Task, now() - Duration::days(1)),
            engagement("c", EngagementKind::Task, now() - Duration::hours(15)),
        ],
        Vec::new(),
        Vec::new(),
    );

    let event = fx.inbox.done(now()).unwrap();
    assert!(matches!(event, InboxEvent::EngagementCompleted { .. }));
    assert_eq!(fx.inbox.queue().len(), 2);
    assert_eq!(fx.inbox.cursor_index(), 0);
    assert_eq!(fx.inbox.current().unwrap().id, "b");

    // The store saw the completion; a refresh agrees with the local view.
    fx.inbox.refresh(now()).unwrap();
    assert_eq!(fx.inbox.queue().len(), 2);
}

#[test]
fn done_at_the_tail_reconciles_to_the_head() {
    let mut fx = fixture(
        vec![
            engagement("a", EngagementKind::Task, now() - Duration::days(3)),
            engagement("b", EngagementKind::Task, now() - Duration::days(2)),
            engagement("c", EngagementKind::Task, now() - Duration::days(1)),
        ],
        Vec::new(),
        Vec::new(),
    );

    fx.inbox.next();
    fx.inbox.next();
    assert_eq!(fx.inbox.cursor_index(), 2);

    fx.inbox.done(now()).unwrap();
    assert_eq!(fx.inbox.queue().len(), 2);
    assert_eq!(fx.inbox.cursor_index(), 0);
}

#[test]
fn accepting_an_upsell_requests_a_seeded_deal() {
    let mut fx = fixture(Vec::new(), vec![deal("won", true, false, 45, 10_000.0)], Vec::new());

    assert_eq!(fx.inbox.current().unwrap().id, "upsell-won");
    let event = fx.inbox.done(now()).unwrap();
    assert!(matches!(event, InboxEvent::SuggestionAccepted { .. }));

    let created = fx.deals.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].value, 12_000.0);
    assert_eq!(created[0].probability, Some(30));
    assert!(created[0].title.starts_with("Upsell:"));
    drop(created);

    // Accepted suggestions never re-derive.
    assert!(fx.inbox.queue().is_empty());
    assert!(fx.inbox.dismissals().contains("upsell-won"));
}

#[test]
fn snoozed_suggestion_is_excluded_from_rederivation() {
    let mut fx = fixture(
        Vec::new(),
        Vec::new(),
        vec![ContactSnapshot {
            id: "c1".into(),
            name: "Dana".into(),
            birthday: Some(MonthDay { month: 8, day: 12 }),
        }],
    );

    assert_eq!(fx.inbox.current().unwrap().id, "birthday-c1");
    let event = fx.inbox.snooze(now()).unwrap();
    assert!(matches!(event, InboxEvent::SuggestionDismissed { .. }));
    assert!(fx.inbox.dismissals().contains("birthday-c1"));
    assert!(fx.inbox.queue().is_empty());

    // A second derivation pass stays quiet.
    fx.inbox.refresh(now()).unwrap();
    assert!(fx.inbox.queue().is_empty());
}

#[test]
fn snoozing_an_engagement_reschedules_it_a_day_out() {
    let mut fx = fixture(
        vec![engagement("today", EngagementKind::Task, now() + Duration::hours(1))],
        Vec::new(),
        Vec::new(),
    );

    let event = fx.inbox.snooze(now()).unwrap();
    match event {
        InboxEvent::EngagementSnoozed { until, .. } => {
            assert_eq!(until, now() + Duration::hours(1) + Duration::days(1));
        }
        other => panic!("unexpected event: {other:?}"),
    }
    // Tomorrow is upcoming, so the focus queue empties.
    assert!(fx.inbox.queue().is_empty());
    let stored = fx.activity.engagements.lock().unwrap();
    assert_eq!(
        stored[0].scheduled_at,
        now() + Duration::hours(1) + Duration::days(1)
    );
}

#[test]
fn stalled_acceptance_reactivates_the_source_deal() {
    let mut fx = fixture(Vec::new(), vec![deal("cold", false, false, 12, 4_000.0)], Vec::new());

    assert_eq!(fx.inbox.current().unwrap().id, "stalled-cold");
    fx.inbox.done(now()).unwrap();

    let updated = fx.deals.updated.lock().unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].0, "cold");
    drop(updated);

    // The reactivation bumped last_updated_at, so the rule stays quiet
    // even without the dismissal set.
    fx.inbox.refresh(now()).unwrap();
    assert!(fx.inbox.queue().is_empty());
}

#[test]
fn accepting_a_birthday_creates_an_outreach_task_in_todays_queue() {
    let mut fx = fixture(
        Vec::new(),
        Vec::new(),
        vec![ContactSnapshot {
            id: "c1".into(),
            name: "Dana".into(),
            birthday: Some(MonthDay { month: 8, day: 1 }),
        }],
    );

    fx.inbox.done(now()).unwrap();
    fx.inbox.refresh(now()).unwrap();

    // The created task is scheduled at `now`, so it lands in today's tasks.
    let queue = fx.inbox.queue();
    assert_eq!(queue.len(), 1);
    match &queue[0].payload {
        FocusPayload::Engagement(e) => {
            assert_eq!(e.kind, EngagementKind::Task);
            assert!(e.title.contains("Dana"));
        }
        other => panic!("expected engagement, got {other:?}"),
    }
}

#[test]
fn inbox_zero_is_just_an_empty_queue() {
    let mut fx = fixture(
        vec![engagement("only", EngagementKind::Task, now() - Duration::days(1))],
        Vec::new(),
        Vec::new(),
    );

    fx.inbox.done(now()).unwrap();
    assert!(fx.inbox.queue().is_empty());
    assert!(fx.inbox.current().is_none());
    assert_eq!(fx.inbox.cursor_index(), 0);
    assert!(fx.inbox.done(now()).is_none());
    assert!(fx.inbox.snooze(now()).is_none());
    assert!(fx.inbox.skip(now()).is_none());
}

#[test]
fn daily_summary_counts_and_falls_back_without_a_writer() {
    let fx = fixture(
        vec![
            engagement("overdue", EngagementKind::Task, now() - Duration::days(1)),
            engagement("meeting", EngagementKind::Call, now() + Duration::hours(1)),
            engagement("later", EngagementKind::Task, now() + Duration::days(2)),
        ],
        vec![deal("cold", false, false, 30, 1_000.0)],
        Vec::new(),
    );

    let summary = fx.inbox.daily_summary(now());
    assert_eq!(summary.stats.overdue, 1);
    assert_eq!(summary.stats.meetings, 1);
    assert_eq!(summary.stats.tasks, 0);
    assert_eq!(summary.stats.upcoming, 1);
    assert_eq!(summary.stats.suggestions, 1);
    assert!(!summary.description.is_empty());
}
