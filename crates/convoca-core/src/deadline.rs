//! Deadline bucketing and human-readable countdown text.
//!
//! Both "today" and the end date are calendar dates, so the day difference
//! is already midnight-normalised. The policy is:
//!
//! | days left | status     |
//! |-----------|------------|
//! | `< 0`     | `Overdue`  |
//! | `0..=3`   | `Critical` |
//! | `4..=7`   | `Warning`  |
//! | `> 7`     | `Safe`     |
//!
//! A collection without an end date is `Safe`.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Urgency bucket of a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineStatus {
    Safe,
    Warning,
    Critical,
    Overdue,
}

impl DeadlineStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Overdue => "overdue",
        }
    }

    /// Bucket a day difference.
    #[must_use]
    pub const fn from_days_left(days_left: i64) -> Self {
        match days_left {
            i64::MIN..=-1 => Self::Overdue,
            0..=3 => Self::Critical,
            4..=7 => Self::Warning,
            _ => Self::Safe,
        }
    }
}

/// Evaluated deadline of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    /// `None` when there is no end date
    pub days_left: Option<i64>,
    pub status: DeadlineStatus,
    pub text: String,
}

/// Current local calendar date.
#[must_use]
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from `today` to `end_date`; negative once the date has passed.
#[must_use]
pub fn days_remaining(end_date: NaiveDate, today: NaiveDate) -> i64 {
    (end_date - today).num_days()
}

#[must_use]
pub fn deadline_status(end_date: Option<NaiveDate>, today: NaiveDate) -> DeadlineStatus {
    end_date.map_or(DeadlineStatus::Safe, |end| {
        DeadlineStatus::from_days_left(days_remaining(end, today))
    })
}

#[must_use]
pub fn deadline_text(end_date: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(end) = end_date else {
        return "Sin fecha límite".to_string();
    };

    match days_remaining(end, today) {
        -1 => "Vencida hace 1 día".to_string(),
        days if days < 0 => format!("Vencida hace {} días", days.unsigned_abs()),
        0 => "Hoy es la fecha límite".to_string(),
        1 => "Mañana es la fecha límite".to_string(),
        days => format!("Faltan {days} días"),
    }
}

#[must_use]
pub fn evaluate_deadline(end_date: Option<NaiveDate>, today: NaiveDate) -> Deadline {
    Deadline {
        days_left: end_date.map(|end| days_remaining(end, today)),
        status: deadline_status(end_date, today),
        text: deadline_text(end_date, today),
    }
}
