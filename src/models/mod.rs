mod calories;
mod collection;
mod entry;
mod new_entry;

pub use calories::Calories;
pub use collection::Collection;
pub use entry::Entry;
pub use new_entry::{NewEntry, ValidationError};
