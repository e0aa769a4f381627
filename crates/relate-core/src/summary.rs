//! Daily digest of the inbox.
//!
//! The counts come straight from the classifier and deriver; the prose
//! description comes from an optional [`SummaryWriter`] collaborator and
//! degrades to a static fallback when the writer is absent or fails.
//! Building a summary is total: it never returns an error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::EngagementBuckets;
use crate::stores::SummaryWriter;
use crate::suggest::Suggestion;

/// Description used when no summary writer is configured or it fails.
pub const FALLBACK_DESCRIPTION: &str =
    "Your inbox for today: clear overdue items first, then today's meetings and tasks.";

/// Headline counts for one day of the inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStats {
    pub date: NaiveDate,
    pub overdue: usize,
    pub meetings: usize,
    pub tasks: usize,
    pub upcoming: usize,
    pub suggestions: usize,
}

impl DayStats {
    pub fn total_pending(&self) -> usize {
        self.overdue + self.meetings + self.tasks + self.suggestions
    }
}

/// The daily digest shown at the top of the inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub stats: DayStats,
    pub description: String,
}

/// Build the daily summary for `now`.
pub fn build(
    buckets: &EngagementBuckets,
    suggestions: &[Suggestion],
    now: DateTime<Utc>,
    writer: Option<&dyn SummaryWriter>,
) -> DailySummary {
    let stats = DayStats {
        date: now.date_naive(),
        overdue: buckets.overdue.len(),
        meetings: buckets.today_meetings.len(),
        tasks: buckets.today_tasks.len(),
        upcoming: buckets.upcoming.len(),
        suggestions: suggestions.len(),
    };

    let description = match writer {
        Some(w) => match w.describe_day(&stats) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(error = %err, "summary writer failed, using fallback");
                FALLBACK_DESCRIPTION.to_string()
            }
        },
        None => FALLBACK_DESCRIPTION.to_string(),
    };

    DailySummary { stats, description }
}
