//! Unit tests for list rows and marker popups.

use chrono::{Local, TimeZone};
use mapty::workouts::{popup_text, workout_rows, Coordinates, Workout, WorkoutKind};

fn workout(kind: WorkoutKind, distance: f64, duration: f64) -> Workout {
    let date = Local.with_ymd_and_hms(2026, 10, 14, 8, 30, 0).unwrap();
    Workout::new_at(
        kind,
        distance,
        duration,
        Coordinates::new(19.07, 72.87).unwrap(),
        date,
    )
    .unwrap()
}

#[test]
fn test_running_rows() {
    let run = workout(WorkoutKind::Running { cadence: 178.0 }, 5.2, 24.0);
    let rows = workout_rows(&run);

    let units: Vec<&str> = rows.iter().map(|r| r.unit).collect();
    assert_eq!(units, ["km", "min", "min/km", "spm"]);
    assert_eq!(rows[2].value, "4.62");
    assert_eq!(rows[3].value, "178");
}

#[test]
fn test_cycling_rows() {
    let ride = workout(
        WorkoutKind::Cycling {
            elevation_gain: 523.0,
        },
        27.0,
        95.0,
    );
    let rows = workout_rows(&ride);

    let units: Vec<&str> = rows.iter().map(|r| r.unit).collect();
    assert_eq!(units, ["km", "min", "km/h", "m"]);
    assert_eq!(rows[2].value, "0.28");
    assert_eq!(rows[3].value, "523");
}

#[test]
fn test_popup_text() {
    let run = workout(WorkoutKind::Running { cadence: 160.0 }, 5.0, 30.0);
    assert_eq!(popup_text(&run), "🏃 Running on October 14");

    let ride = workout(
        WorkoutKind::Cycling {
            elevation_gain: 10.0,
        },
        5.0,
        30.0,
    );
    assert_eq!(popup_text(&ride), "🚴 Cycling on October 14");
}
