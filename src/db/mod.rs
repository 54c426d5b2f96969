mod entry_repo;
mod store;

pub use entry_repo::{system_clock, Clock, EntryRepository};
pub use store::{JsonStore, Mutation, StoreError};

use std::path::Path;
use std::sync::Arc;

/// Open the store file and build the repository over it
pub fn init_repository(data_file: &Path) -> Result<EntryRepository, StoreError> {
    let store = JsonStore::open(data_file)?;
    Ok(EntryRepository::new(Arc::new(store)))
}
