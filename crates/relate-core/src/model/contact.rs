//! Contact snapshot.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A calendar month/day without a year, for recurring dates like birthdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    /// 1-12.
    pub month: u32,
    /// 1-31.
    pub day: u32,
}

impl MonthDay {
    /// Returns `None` if the month/day pair is not a calendar date.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(Self { month, day })
    }

    /// Whether this date falls in the same month as `now`.
    pub fn in_month_of(&self, now: DateTime<Utc>) -> bool {
        self.month == now.month()
    }
}

/// Read-only projection of a contact, owned by the external Contact Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub birthday: Option<MonthDay>,
}
