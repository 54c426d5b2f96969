use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use super::store::{JsonStore, Mutation, StoreError};
use crate::models::{Calories, Entry, NewEntry};

/// Source of the current instant. "Today" is always the UTC date of it.
pub type Clock = fn() -> DateTime<Utc>;

pub fn system_clock() -> DateTime<Utc> {
    Utc::now()
}

/// Entry operations, each run as one locked store cycle.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    store: Arc<JsonStore>,
    clock: Clock,
}

impl EntryRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self::with_clock(store, system_clock)
    }

    pub fn with_clock(store: Arc<JsonStore>, clock: Clock) -> Self {
        Self { store, clock }
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)().date_naive()
    }

    pub fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Entry>, StoreError> {
        self.store.read(|entries| entries.list_for_date(date).to_vec())
    }

    pub fn total_for_date(&self, date: NaiveDate) -> Result<Calories, StoreError> {
        self.store.read(|entries| entries.total_for_date(date))
    }

    pub fn create(&self, new_entry: NewEntry) -> Result<Entry, StoreError> {
        let now = (self.clock)();
        let entry = self
            .store
            .update(|entries| Mutation::Save(entries.create(new_entry, now)))?;

        tracing::info!(id = %entry.id, "Logged {}", entry);
        Ok(entry)
    }

    /// Returns `false` if no entry has `id`; the store is left untouched.
    pub fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.store.update(|entries| {
            if entries.delete_by_id(id) {
                Mutation::Save(true)
            } else {
                Mutation::Skip(false)
            }
        })?;

        if deleted {
            tracing::info!(id, "Deleted entry");
        }
        Ok(deleted)
    }

    /// Removes every entry on `date`. Always rewrites the store.
    pub fn clear_date(&self, date: NaiveDate) -> Result<usize, StoreError> {
        let removed = self
            .store
            .update(|entries| Mutation::Save(entries.clear_date(date)))?;

        tracing::info!(%date, removed, "Cleared entries");
        Ok(removed)
    }
}
