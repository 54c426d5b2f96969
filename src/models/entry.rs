use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::calories::Calories;

/// A single logged food item. Entries are never edited, only deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub calories: Calories,
    pub timestamp: DateTime<Utc>,
}

impl Entry {
    /// Creates an entry stamped with `timestamp`, truncated to milliseconds.
    pub fn new(name: impl Into<String>, calories: Calories, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            calories,
            timestamp: timestamp.trunc_subsecs(3),
        }
    }

    /// The UTC calendar date this entry is filed under.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} kcal) at {}",
            self.name,
            self.calories,
            self.timestamp.format("%Y-%m-%d %H:%M")
        )
    }
}
