/// Reminder classification
///
/// Derives the display bucket of a reminder from its due timestamp and
/// completion flag, relative to a caller-supplied "now". Nothing here is
/// stored or cached: callers pass the current wall clock on every render, so
/// a reminder due in a few seconds moves from upcoming to overdue between two
/// renders.
///
/// # Rules
///
/// | Bucket | Condition |
/// |---|---|
/// | completed | `is_completed` (due date ignored) |
/// | upcoming | not completed and `due_date >= now` |
/// | overdue | not completed and `due_date < now` |
///
/// A reminder due exactly at `now` is upcoming.
///
/// # Example
///
/// ```
/// use pawminder_shared::classify::{filter_reminders, ReminderFilter};
/// # use pawminder_shared::models::reminder::Reminder;
/// # fn example(reminders: &[Reminder]) {
/// let now = chrono::Local::now().naive_local();
/// let overdue = filter_reminders(reminders, ReminderFilter::Overdue, now);
/// println!("{} overdue", overdue.len());
/// # }
/// ```

use crate::models::reminder::Reminder;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The bucket a single reminder falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Upcoming,
    Overdue,
    Completed,
}

/// A list view over reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFilter {
    #[default]
    All,
    Upcoming,
    Overdue,
    Completed,
}

impl ReminderFilter {
    /// Filters in the order they're offered to users
    pub const ALL: [ReminderFilter; 4] = [
        ReminderFilter::All,
        ReminderFilter::Upcoming,
        ReminderFilter::Overdue,
        ReminderFilter::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderFilter::All => "all",
            ReminderFilter::Upcoming => "upcoming",
            ReminderFilter::Overdue => "overdue",
            ReminderFilter::Completed => "completed",
        }
    }

    /// Whether a reminder in `bucket` shows up under this filter
    pub fn admits(&self, bucket: Bucket) -> bool {
        match self {
            ReminderFilter::All => true,
            ReminderFilter::Upcoming => bucket == Bucket::Upcoming,
            ReminderFilter::Overdue => bucket == Bucket::Overdue,
            ReminderFilter::Completed => bucket == Bucket::Completed,
        }
    }
}

impl fmt::Display for ReminderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ReminderFilter::All),
            "upcoming" => Ok(ReminderFilter::Upcoming),
            "overdue" => Ok(ReminderFilter::Overdue),
            "completed" => Ok(ReminderFilter::Completed),
            other => Err(format!(
                "unknown filter '{other}' (expected all, upcoming, overdue or completed)"
            )),
        }
    }
}

/// Classifies one reminder
pub fn bucket(reminder: &Reminder, now: NaiveDateTime) -> Bucket {
    if reminder.is_completed {
        Bucket::Completed
    } else if reminder.due_date >= now {
        Bucket::Upcoming
    } else {
        Bucket::Overdue
    }
}

/// True when the reminder is incomplete and past due
pub fn is_overdue(reminder: &Reminder, now: NaiveDateTime) -> bool {
    bucket(reminder, now) == Bucket::Overdue
}

/// Returns the reminders visible under `filter`, preserving input order
pub fn filter_reminders(
    reminders: &[Reminder],
    filter: ReminderFilter,
    now: NaiveDateTime,
) -> Vec<&Reminder> {
    reminders
        .iter()
        .filter(|reminder| filter.admits(bucket(reminder, now)))
        .collect()
}

/// Number of reminders under each filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCounts {
    pub all: usize,
    pub upcoming: usize,
    pub overdue: usize,
    pub completed: usize,
}

impl FilterCounts {
    pub fn get(&self, filter: ReminderFilter) -> usize {
        match filter {
            ReminderFilter::All => self.all,
            ReminderFilter::Upcoming => self.upcoming,
            ReminderFilter::Overdue => self.overdue,
            ReminderFilter::Completed => self.completed,
        }
    }
}

/// Tallies reminders per filter in a single pass
pub fn counts(reminders: &[Reminder], now: NaiveDateTime) -> FilterCounts {
    reminders
        .iter()
        .fold(FilterCounts::default(), |mut counts, reminder| {
            counts.all += 1;
            match bucket(reminder, now) {
                Bucket::Upcoming => counts.upcoming += 1,
                Bucket::Overdue => counts.overdue += 1,
                Bucket::Completed => counts.completed += 1,
            }
            counts
        })
}
