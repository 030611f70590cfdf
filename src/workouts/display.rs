//! Display model for workouts: list rows and map popup text.

use super::types::{Workout, WorkoutKind};

/// One "icon value unit" row of a workout list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRow {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl WorkoutRow {
    fn new(icon: &'static str, value: impl Into<String>, unit: &'static str) -> Self {
        Self {
            icon,
            value: value.into(),
            unit,
        }
    }
}

/// Rows shown for a workout in the list: distance, duration and the two
/// variant-specific stats.
pub fn workout_rows(workout: &Workout) -> Vec<WorkoutRow> {
    let mut rows = vec![
        WorkoutRow::new(
            workout.activity_type().icon(),
            workout.distance().to_string(),
            "km",
        ),
        WorkoutRow::new("⏱", workout.duration().to_string(), "min"),
    ];

    match workout.kind() {
        WorkoutKind::Running { cadence } => {
            rows.push(WorkoutRow::new("⚡", workout.metric_display(), "min/km"));
            rows.push(WorkoutRow::new("🦶", cadence.to_string(), "spm"));
        }
        WorkoutKind::Cycling { elevation_gain } => {
            rows.push(WorkoutRow::new("⚡", workout.metric_display(), "km/h"));
            rows.push(WorkoutRow::new("⛰", elevation_gain.to_string(), "m"));
        }
    }

    rows
}

/// Text of the marker popup.
pub fn popup_text(workout: &Workout) -> String {
    format!("{} {}", workout.activity_type().icon(), workout.description())
}

/// Short summary for log lines.
pub fn summary(workout: &Workout) -> String {
    format!(
        "{} ({} km, {} min, {})",
        workout.description(),
        workout.distance(),
        workout.duration(),
        workout.metric_display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workouts::types::Coordinates;
    use chrono::{Local, TimeZone};

    fn workout(kind: WorkoutKind, distance: f64, duration: f64) -> Workout {
        let date = Local.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap();
        let coords = Coordinates::new(40.4168, -3.7038).unwrap();
        Workout::new_at(kind, distance, duration, coords, date).unwrap()
    }

    #[test]
    fn test_running_rows() {
        let run = workout(WorkoutKind::Running { cadence: 150.0 }, 5.0, 30.0);
        let rows = workout_rows(&run);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], WorkoutRow::new("🏃", "5", "km"));
        assert_eq!(rows[1], WorkoutRow::new("⏱", "30", "min"));
        assert_eq!(rows[2], WorkoutRow::new("⚡", "6.00", "min/km"));
        assert_eq!(rows[3], WorkoutRow::new("🦶", "150", "spm"));
    }

    #[test]
    fn test_cycling_rows() {
        let ride = workout(
            WorkoutKind::Cycling {
                elevation_gain: 523.5,
            },
            27.5,
            95.0,
        );
        let rows = workout_rows(&ride);

        assert_eq!(rows[0], WorkoutRow::new("🚴", "27.5", "km"));
        assert_eq!(rows[2], WorkoutRow::new("⚡", "0.29", "km/h"));
        assert_eq!(rows[3], WorkoutRow::new("⛰", "523.5", "m"));
    }

    #[test]
    fn test_popup_text() {
        let run = workout(WorkoutKind::Running { cadence: 178.0 }, 10.0, 52.0);
        assert_eq!(popup_text(&run), "🏃 Running on October 14");
    }
}
