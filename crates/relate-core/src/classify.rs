//! Temporal classification of engagements.
//!
//! Buckets incomplete engagements into overdue / today / upcoming relative
//! to a caller-supplied reference instant. "Today" is further split into
//! meeting-like engagements (calls, meetings) and desk work (everything
//! else), both in chronological order.
//!
//! Pure function of `(engagements, now)` -- re-run it whenever engagement
//! data changes or the wall-clock day rolls over.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Engagement;

/// Engagements bucketed by urgency relative to a reference instant.
///
/// Completed engagements appear in no bucket. Every incomplete engagement
/// appears in exactly one of `overdue`, today (meetings or tasks), or
/// `upcoming`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementBuckets {
    /// Scheduled before midnight of the reference day, oldest first.
    pub overdue: Vec<Engagement>,
    /// Due today with kind call or meeting, earliest first.
    pub today_meetings: Vec<Engagement>,
    /// Due today with any other kind, earliest first.
    pub today_tasks: Vec<Engagement>,
    /// Scheduled tomorrow or later, earliest first.
    pub upcoming: Vec<Engagement>,
}

impl EngagementBuckets {
    /// Everything due today, meetings and tasks interleaved chronologically.
    pub fn today_all(&self) -> Vec<&Engagement> {
        let mut all: Vec<&Engagement> = self
            .today_meetings
            .iter()
            .chain(self.today_tasks.iter())
            .collect();
        all.sort_by_key(|e| e.scheduled_at);
        all
    }

    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty()
            && self.today_meetings.is_empty()
            && self.today_tasks.is_empty()
            && self.upcoming.is_empty()
    }
}

/// Midnight (00:00 UTC) of the day containing `now`.
pub fn midnight_of(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Classify engagements into [`EngagementBuckets`] relative to `now`.
pub fn classify(engagements: &[Engagement], now: DateTime<Utc>) -> EngagementBuckets {
    let today = midnight_of(now);
    let tomorrow = today + Duration::days(1);

    let mut buckets = EngagementBuckets::default();
    for e in engagements.iter().filter(|e| !e.completed) {
        if e.scheduled_at < today {
            buckets.overdue.push(e.clone());
        } else if e.scheduled_at < tomorrow {
            if e.kind.is_meeting_like() {
                buckets.today_meetings.push(e.clone());
            } else {
                buckets.today_tasks.push(e.clone());
            }
        } else {
            buckets.upcoming.push(e.clone());
        }
    }

    buckets.overdue.sort_by_key(|e| e.scheduled_at);
    buckets.today_meetings.sort_by_key(|e| e.scheduled_at);
    buckets.today_tasks.sort_by_key(|e| e.scheduled_at);
    buckets.upcoming.sort_by_key(|e| e.scheduled_at);
    buckets
}
