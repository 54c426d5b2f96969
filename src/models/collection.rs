use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::calories::Calories;
use super::entry::Entry;
use super::new_entry::NewEntry;

/// All logged entries, keyed by the UTC date they were created on.
///
/// Each date holds its entries in insertion order. A date with no entries
/// has no key at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection(BTreeMap<NaiveDate, Vec<Entry>>);

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries logged on `date`, oldest first.
    pub fn list_for_date(&self, date: NaiveDate) -> &[Entry] {
        self.0.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn total_for_date(&self, date: NaiveDate) -> Calories {
        self.list_for_date(date).iter().map(|e| e.calories).sum()
    }

    /// Files `entry` under the date of its timestamp.
    pub fn insert(&mut self, entry: Entry) {
        self.0.entry(entry.date()).or_default().push(entry);
    }

    /// Builds a new entry stamped with `now` and appends it.
    pub fn create(&mut self, new_entry: NewEntry, now: DateTime<Utc>) -> Entry {
        let entry = Entry::new(new_entry.name, new_entry.calories, now);
        self.insert(entry.clone());
        entry
    }

    /// Removes the entry with `id`, whatever date it is filed under.
    ///
    /// Returns `false` if no entry matched.
    pub fn delete_by_id(&mut self, id: &str) -> bool {
        let found = self.0.iter().find_map(|(date, entries)| {
            entries
                .iter()
                .position(|e| e.id == id)
                .map(|index| (*date, index))
        });

        let Some((date, index)) = found else {
            return false;
        };

        if let Some(entries) = self.0.get_mut(&date) {
            entries.remove(index);
            if entries.is_empty() {
                self.0.remove(&date);
            }
        }
        true
    }

    /// Drops every entry on `date`, returning how many were removed.
    pub fn clear_date(&mut self, date: NaiveDate) -> usize {
        self.0.remove(&date).map_or(0, |entries| entries.len())
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
