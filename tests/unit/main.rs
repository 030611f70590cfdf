//! Unit test modules.

mod workout_display_test;
mod workout_model_test;
