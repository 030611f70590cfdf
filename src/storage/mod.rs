//! Storage module for the workout slot and configuration.

pub mod config;
pub mod kv;
pub mod workout_store;

pub use config::{AppConfig, GeolocationSource, Theme, UiSettings};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use workout_store::{DecodeError, WorkoutStore, DEFAULT_SLOT_KEY};
