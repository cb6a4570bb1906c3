//! Common types used throughout OpenProject RS

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DECIMAL_HOURS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:[.,]\d+)?)h?$").expect("valid regex"));
static CLOCK_HOURS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d+)$").expect("valid regex"));
static UNIT_HOURS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(\d+)\s*(?:h|hours?))?\s*(?:(\d+)\s*(?:m|min)?)?$").expect("valid regex")
});

/// Parse a user supplied amount of hours.
///
/// Accepts `"1.5"`, `"1,5"`, `"1:30"`, `"1h30"`, `"1h 30m"`, `"2h"` and
/// `"45m"`. Returns `None` for blank or unparsable input.
pub fn parse_hours(input: &str) -> Option<f64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = DECIMAL_HOURS.captures(s) {
        return caps[1].replace(',', ".").parse().ok();
    }

    if let Some(caps) = CLOCK_HOURS.captures(s) {
        let hours: f64 = caps[1].parse().ok()?;
        let minutes: f64 = caps[2].parse().ok()?;
        return Some(hours + minutes / 60.0);
    }

    let caps = UNIT_HOURS.captures(s)?;
    let hours = caps.get(1).map(|m| m.as_str().parse::<f64>());
    let minutes = caps.get(2).map(|m| m.as_str().parse::<f64>());
    match (hours, minutes) {
        (None, None) => None,
        (h, m) => {
            let h = h.transpose().ok()?.unwrap_or(0.0);
            let m = m.transpose().ok()?.unwrap_or(0.0);
            Some(h + m / 60.0)
        }
    }
}

/// Date range (start_date to due_date)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, due: Option<NaiveDate>) -> Self {
        Self {
            start_date: start,
            due_date: due,
        }
    }

    /// Number of calendar days covered, both ends included.
    ///
    /// A range with only one (or no) bound covers a single day.
    pub fn duration_days(&self) -> i64 {
        match (self.start_date, self.due_date) {
            (Some(start), Some(due)) => (due - start).num_days() + 1,
            _ => 1,
        }
    }

    /// Whether the due date lies before the start date
    pub fn is_inverted(&self) -> bool {
        matches!((self.start_date, self.due_date), (Some(start), Some(due)) if due < start)
    }
}

/// User status enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Registered,
    Locked,
}

impl UserStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Mail notification option of a user (`users.mail_notification`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MailNotification {
    /// Every event in every project the user is a member of
    All,
    /// Events in the projects flagged on the membership
    Selected,
    /// Only what the user authored or is assigned to
    #[default]
    OnlyMyEvents,
    OnlyAssigned,
    OnlyOwner,
    None,
}

impl MailNotification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Selected => "selected",
            Self::OnlyMyEvents => "only_my_events",
            Self::OnlyAssigned => "only_assigned",
            Self::OnlyOwner => "only_owner",
            Self::None => "none",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "selected" => Some(Self::Selected),
            "only_my_events" => Some(Self::OnlyMyEvents),
            "only_assigned" => Some(Self::OnlyAssigned),
            "only_owner" => Some(Self::OnlyOwner),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}
