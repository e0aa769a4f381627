//! Focus queue composition.
//!
//! Merges classified engagements and derived suggestions into one ranked
//! sequence. Ranks are assigned per band, each band reserving a wide integer
//! range so within-band order never collides across bands:
//!
//! ```text
//! 0..    overdue engagements (oldest first)
//! 100..  high-tier suggestions
//! 200..  today's meetings and calls
//! 300..  today's tasks
//! 400..  medium- and low-tier suggestions
//! ```
//!
//! `upcoming` engagements are deliberately left out: they belong in the
//! categorized overview but are not urgent enough to interrupt a focus
//! session.

use serde::{Deserialize, Serialize};

use crate::classify::EngagementBuckets;
use crate::model::Engagement;
use crate::suggest::{PriorityTier, Suggestion};

/// First rank of each band.
pub const BAND_OVERDUE: u32 = 0;
pub const BAND_URGENT_SUGGESTIONS: u32 = 100;
pub const BAND_TODAY_MEETINGS: u32 = 200;
pub const BAND_TODAY_TASKS: u32 = 300;
pub const BAND_BACKLOG_SUGGESTIONS: u32 = 400;

/// Width of one band. Per-band cardinality must stay below this.
pub const BAND_WIDTH: u32 = 100;

/// Payload of a focus queue element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum FocusPayload {
    Engagement(Engagement),
    Suggestion(Suggestion),
}

/// One element of the focus queue.
///
/// `rank` is the sole sort key; lower means more urgent. Within one composed
/// queue all ranks are distinct and ascending rank equals queue order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusItem {
    pub id: String,
    pub rank: u32,
    pub payload: FocusPayload,
}

impl FocusItem {
    pub fn title(&self) -> &str {
        match &self.payload {
            FocusPayload::Engagement(e) => &e.title,
            FocusPayload::Suggestion(s) => &s.title,
        }
    }

    pub fn is_suggestion(&self) -> bool {
        matches!(self.payload, FocusPayload::Suggestion(_))
    }
}

/// Compose the focus queue from classifier and deriver output.
///
/// Construction order matches rank order; the final sort is defensive and a
/// no-op on well-formed input. Composing the same inputs twice yields
/// structurally identical queues.
pub fn compose(buckets: &EngagementBuckets, suggestions: &[Suggestion]) -> Vec<FocusItem> {
    let mut queue = Vec::new();

    push_engagements(&mut queue, &buckets.overdue, BAND_OVERDUE);

    let urgent: Vec<&Suggestion> = suggestions
        .iter()
        .filter(|s| s.tier == PriorityTier::High)
        .collect();
    push_suggestions(&mut queue, &urgent, BAND_URGENT_SUGGESTIONS);

    push_engagements(&mut queue, &buckets.today_meetings, BAND_TODAY_MEETINGS);
    push_engagements(&mut queue, &buckets.today_tasks, BAND_TODAY_TASKS);

    let backlog: Vec<&Suggestion> = suggestions
        .iter()
        .filter(|s| s.tier != PriorityTier::High)
        .collect();
    push_suggestions(&mut queue, &backlog, BAND_BACKLOG_SUGGESTIONS);

    queue.sort_by_key(|item| item.rank);
    debug_assert!(queue.windows(2).all(|w| w[0].rank < w[1].rank));
    queue
}

fn push_engagements(queue: &mut Vec<FocusItem>, engagements: &[Engagement], band: u32) {
    debug_assert!(engagements.len() < BAND_WIDTH as usize);
    for (i, e) in engagements.iter().enumerate() {
        queue.push(FocusItem {
            id: e.id.clone(),
            rank: band + i as u32,
            payload: FocusPayload::Engagement(e.clone()),
        });
    }
}

fn push_suggestions(queue: &mut Vec<FocusItem>, suggestions: &[&Suggestion], band: u32) {
    debug_assert!(suggestions.len() < BAND_WIDTH as usize);
    for (i, s) in suggestions.iter().enumerate() {
        queue.push(FocusItem {
            id: s.id.clone(),
            rank: band + i as u32,
            payload: FocusPayload::Suggestion((*s).clone()),
        });
    }
}
