//! Mapty - Workout Map Tracker
//!
//! Log running and cycling workouts by clicking on a map. Each workout is
//! shown as a marker with a popup and as an entry in the sidebar list, and
//! the whole list is persisted in a local key-value slot.

pub mod location;
pub mod storage;
pub mod tracker;
pub mod ui;
pub mod workouts;

// Re-export commonly used types
pub use storage::config::AppConfig;
pub use storage::workout_store::WorkoutStore;
pub use tracker::{MapStatus, Tracker};
pub use workouts::{Workout, WorkoutForm};
