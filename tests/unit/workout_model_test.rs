//! Unit tests for workout construction and derived values.

use chrono::{Local, TimeZone};
use mapty::workouts::{ActivityType, Coordinates, Workout, WorkoutError, WorkoutKind};

fn lisbon() -> Coordinates {
    Coordinates::new(38.7223, -9.1393).unwrap()
}

#[test]
fn test_running_pace() {
    let workout = Workout::running(5.0, 30.0, lisbon(), 150.0).unwrap();
    assert_eq!(workout.activity_type(), ActivityType::Running);
    assert!((workout.pace().unwrap() - 6.0).abs() < f64::EPSILON);
    assert!(workout.speed().is_none());
    assert_eq!(workout.metric_display(), "6.00");
}

#[test]
fn test_cycling_speed() {
    let workout = Workout::cycling(10.0, 40.0, lisbon(), 200.0).unwrap();
    assert!((workout.speed().unwrap() - 0.25).abs() < f64::EPSILON);
    assert!(workout.pace().is_none());
    assert_eq!(workout.metric_display(), "0.25");
}

#[test]
fn test_zero_distance_rejected() {
    let result = Workout::running(0.0, 30.0, lisbon(), 150.0);
    assert!(matches!(
        result,
        Err(WorkoutError::InvalidInput {
            field: "distance",
            ..
        })
    ));
}

#[test]
fn test_zero_elevation_accepted() {
    let flat = Workout::cycling(10.0, 40.0, lisbon(), 0.0).unwrap();
    assert_eq!(flat.metric_display(), "0.25");
}

#[test]
fn test_infinite_elevation_rejected() {
    assert!(Workout::cycling(10.0, 40.0, lisbon(), f64::INFINITY).is_err());
}

#[test]
fn test_description_and_id_from_date() {
    let date = Local.with_ymd_and_hms(2026, 12, 31, 23, 59, 0).unwrap();
    let workout = Workout::new_at(
        WorkoutKind::Cycling {
            elevation_gain: 12.0,
        },
        20.0,
        60.0,
        lisbon(),
        date,
    )
    .unwrap();

    assert_eq!(workout.description(), "Cycling on December 31");
    assert_eq!(workout.id().len(), 10);
    assert!(date.timestamp_millis().to_string().ends_with(workout.id()));
    assert_eq!(workout.clicks(), 0);
}

#[test]
fn test_coordinates_out_of_range() {
    assert!(Coordinates::new(91.0, 0.0).is_err());
    assert!(Coordinates::new(0.0, -181.0).is_err());
    assert!(Coordinates::new(-90.0, 180.0).is_ok());
}
