//! Workout model: running and cycling entries pinned to a map position.

pub mod display;
pub mod form;
pub mod types;

pub use display::{popup_text, workout_rows, WorkoutRow};
pub use form::WorkoutForm;
pub use types::{ActivityType, Coordinates, Workout, WorkoutError, WorkoutKind, MONTHS};
