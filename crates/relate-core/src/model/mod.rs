//! Read models and mutation payloads for the entities the inbox works over.
//!
//! Everything here is externally owned: the Activity, Deal, and Contact
//! stores create and persist these records, the inbox only reads snapshots
//! and requests mutations via drafts (create) and patches (partial update).

mod contact;
mod deal;
mod engagement;

pub use contact::{ContactSnapshot, MonthDay};
pub use deal::{DealDraft, DealPatch, DealSnapshot};
pub use engagement::{Engagement, EngagementDraft, EngagementKind, EngagementPatch};
