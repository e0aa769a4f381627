use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::suggest::SuggestionKind;

/// Every focus operation that touches an item produces an InboxEvent.
/// The presentation layer renders these; the engine never blocks on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboxEvent {
    EngagementCompleted {
        id: String,
        at: DateTime<Utc>,
    },
    /// `done()` on an already-completed engagement toggles it back open.
    EngagementReopened {
        id: String,
        at: DateTime<Utc>,
    },
    EngagementSnoozed {
        id: String,
        until: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    SuggestionAccepted {
        id: String,
        kind: SuggestionKind,
        at: DateTime<Utc>,
    },
    SuggestionDismissed {
        id: String,
        at: DateTime<Utc>,
    },
    /// Cursor moved past an item without resolving it.
    Skipped {
        id: String,
        at: DateTime<Utc>,
    },
    /// An external store rejected a mutation. The optimistic local change
    /// stands; this event and one sink notification are the only traces.
    DispatchFailed {
        action: String,
        id: String,
        message: String,
        at: DateTime<Utc>,
    },
}
