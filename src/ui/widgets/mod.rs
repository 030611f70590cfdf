//! UI widgets for reusable components.

pub mod workout_card;

pub use workout_card::WorkoutCard;
