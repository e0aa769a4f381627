//! External collaborator traits.
//!
//! The inbox engine is an in-process library; persistence, transport, and
//! text generation live behind these seams. All stores are expected to
//! provide their own serialization; this crate requires nothing from them
//! beyond "eventually applied".

use std::sync::Arc;

use crate::model::{
    ContactSnapshot, DealDraft, DealPatch, DealSnapshot, Engagement, EngagementDraft,
    EngagementPatch,
};
use crate::summary::DayStats;

pub type StoreResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Owns engagement records. The engine reads snapshots via `list` and
/// requests mutations; it never fabricates engagement ids.
pub trait ActivityStore: Send + Sync {
    fn list(&self) -> StoreResult<Vec<Engagement>>;
    fn create(&self, draft: EngagementDraft) -> StoreResult<Engagement>;
    fn update(&self, id: &str, patch: EngagementPatch) -> StoreResult<()>;
    fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Owns deal records.
pub trait DealStore: Send + Sync {
    fn list(&self) -> StoreResult<Vec<DealSnapshot>>;
    fn create(&self, draft: DealDraft) -> StoreResult<DealSnapshot>;
    fn update(&self, id: &str, patch: DealPatch) -> StoreResult<()>;
}

/// Owns contact records. Read-only from the engine's side.
pub trait ContactStore: Send + Sync {
    fn list(&self) -> StoreResult<Vec<ContactSnapshot>>;
}

/// Receives short human-readable status strings on skip/snooze/dismiss and
/// on dispatch failures. Fire-and-forget: no result, no backpressure.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str);
}

/// Optional natural-language source for the daily summary description.
/// When absent or failing, the engine falls back to a static string.
pub trait SummaryWriter: Send + Sync {
    fn describe_day(&self, stats: &DayStats) -> StoreResult<String>;
}

/// Handle bundle for everything the engine talks to.
#[derive(Clone)]
pub struct Stores {
    pub activity: Arc<dyn ActivityStore>,
    pub deals: Arc<dyn DealStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub notifications: Arc<dyn NotificationSink>,
    pub summary: Option<Arc<dyn SummaryWriter>>,
}

/// Sink that drops every message. Useful for embedders that have no
/// notification surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _message: &str) {}
}
