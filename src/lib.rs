//! Calorie Tracker
//!
//! A single-user daily calorie log: a JSON HTTP API over one JSON file, plus
//! a static front end.

pub mod config;
pub mod db;
pub mod models;
pub mod server;

pub use config::{Config, ConfigError};
pub use db::{init_repository, EntryRepository, JsonStore, StoreError};
pub use models::{Calories, Collection, Entry, NewEntry, ValidationError};
pub use server::{router, ApiError, AppState};
