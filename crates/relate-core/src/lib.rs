//! # Relate Core Library
//!
//! This library provides the inbox engine for Relate: it unifies scheduled
//! engagements and rule-derived suggestions into a single ranked work queue
//! with a one-item-at-a-time focus flow. It is an in-process library; a
//! presentation layer drives it and external stores own all persistence.
//!
//! ## Architecture
//!
//! - **Classification**: pure bucketing of engagements into overdue / today
//!   (meetings vs tasks) / upcoming around a caller-supplied `now`
//! - **Derivation**: business rules over deal and contact snapshots produce
//!   stalled / upsell / birthday suggestions, filtered by the session's
//!   dismissal set
//! - **Composition**: one ranked queue with wide priority bands
//! - **Focus cursor**: bounded index navigation with reconciliation as the
//!   queue shrinks or grows
//! - **Effect dispatch**: optimistic, never-rolled-back mutations against
//!   external store traits, with failures surfaced once via notifications
//!
//! ## Key Components
//!
//! - [`Inbox`]: session engine tying the stages together
//! - [`classify::classify`] / [`suggest::derive`] / [`queue::compose`]:
//!   the pure pipeline stages
//! - [`FocusCursor`]: navigation state machine
//! - [`EffectDispatcher`]: side effects against the store traits
//! - [`InboxConfig`]: thresholds and focus behavior, stored as TOML

pub mod classify;
pub mod config;
pub mod cursor;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod events;
pub mod model;
pub mod queue;
pub mod stores;
pub mod suggest;
pub mod summary;

pub use classify::{classify, EngagementBuckets};
pub use config::{FocusConfig, InboxConfig, TriageConfig, UpsellConfig};
pub use cursor::FocusCursor;
pub use dispatch::EffectDispatcher;
pub use engine::{Inbox, InboxOverview};
pub use error::{ConfigError, CoreError};
pub use events::InboxEvent;
pub use model::{
    ContactSnapshot, DealDraft, DealPatch, DealSnapshot, Engagement, EngagementDraft,
    EngagementKind, EngagementPatch, MonthDay,
};
pub use queue::{compose, FocusItem, FocusPayload};
pub use stores::{
    ActivityStore, ContactStore, DealStore, NotificationSink, NullSink, StoreResult, Stores,
    SummaryWriter,
};
pub use suggest::{derive, DismissalSet, PriorityTier, Suggestion, SuggestionKind};
pub use summary::{DailySummary, DayStats};
