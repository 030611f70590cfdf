//! Integration tests for the log-workout flow against a file-backed slot.

use mapty::location::GeolocationError;
use mapty::storage::kv::{FileStore, KeyValueStore};
use mapty::storage::workout_store::{WorkoutStore, DEFAULT_SLOT_KEY};
use mapty::tracker::{MapStatus, Tracker, POSITION_ALERT};
use mapty::workouts::{ActivityType, Coordinates, WorkoutKind};
use tempfile::TempDir;

fn open_tracker(dir: &TempDir) -> Tracker<FileStore> {
    let storage = FileStore::open(dir.path()).unwrap();
    let mut tracker = Tracker::new(WorkoutStore::open(storage, DEFAULT_SLOT_KEY), 13.0);
    tracker.handle_position(Ok(Coordinates::new(38.72, -9.14).unwrap()));
    tracker
}

fn log_running(tracker: &mut Tracker<FileStore>, at: Coordinates, distance: &str) {
    tracker.handle_map_click(at);
    let form = tracker.form_mut();
    form.set_activity(ActivityType::Running);
    form.distance = distance.into();
    form.duration = "30".into();
    form.cadence = "160".into();
    tracker.submit_form().unwrap();
}

fn log_cycling(tracker: &mut Tracker<FileStore>, at: Coordinates) {
    tracker.handle_map_click(at);
    let form = tracker.form_mut();
    form.set_activity(ActivityType::Cycling);
    form.distance = "10".into();
    form.duration = "40".into();
    form.elevation_gain = "200".into();
    tracker.submit_form().unwrap();
}

#[test]
fn test_workouts_survive_restart() {
    let dir = TempDir::new().unwrap();
    let first = Coordinates::new(38.73, -9.15).unwrap();
    let second = Coordinates::new(38.70, -9.20).unwrap();

    {
        let mut tracker = open_tracker(&dir);
        log_running(&mut tracker, first, "5");
        log_cycling(&mut tracker, second);
        assert_eq!(tracker.workouts().len(), 2);
    }

    assert!(dir.path().join("workout.json").exists());

    let tracker = open_tracker(&dir);
    let workouts = tracker.workouts();
    assert_eq!(workouts.len(), 2);

    assert_eq!(workouts[0].activity_type(), ActivityType::Running);
    assert_eq!(workouts[0].coordinates(), first);
    assert_eq!(workouts[0].metric_display(), "6.00");

    assert_eq!(
        workouts[1].kind(),
        WorkoutKind::Cycling {
            elevation_gain: 200.0
        }
    );
    assert_eq!(workouts[1].metric_display(), "0.25");
}

#[test]
fn test_invalid_submit_leaves_slot_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open_tracker(&dir);
    log_running(&mut tracker, Coordinates::new(38.73, -9.15).unwrap(), "5");

    let before = tracker.store().storage().get(DEFAULT_SLOT_KEY).unwrap();

    tracker.handle_map_click(Coordinates::new(38.74, -9.16).unwrap());
    tracker.form_mut().distance = "-1".into();
    tracker.form_mut().duration = "30".into();
    tracker.form_mut().cadence = "160".into();
    assert!(tracker.submit_form().is_err());

    assert_eq!(tracker.workouts().len(), 1);
    assert_eq!(tracker.store().storage().get(DEFAULT_SLOT_KEY).unwrap(), before);
    assert!(tracker.alert().is_some());
}

#[test]
fn test_reset_then_reload_is_empty() {
    let dir = TempDir::new().unwrap();
    {
        let mut tracker = open_tracker(&dir);
        log_running(&mut tracker, Coordinates::new(38.73, -9.15).unwrap(), "5");
        tracker.reset();
        assert_eq!(tracker.map_status(), MapStatus::Locating);
    }

    assert!(!dir.path().join("workout.json").exists());
    assert!(open_tracker(&dir).workouts().is_empty());
}

#[test]
fn test_corrupt_slot_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("workout.json"), "{not json").unwrap();

    let mut tracker = open_tracker(&dir);
    assert!(tracker.workouts().is_empty());

    // The next save overwrites the corrupt slot
    log_running(&mut tracker, Coordinates::new(38.73, -9.15).unwrap(), "3");
    assert_eq!(open_tracker(&dir).workouts().len(), 1);
}

#[test]
fn test_saved_workouts_listed_without_map() {
    let dir = TempDir::new().unwrap();
    {
        let mut tracker = open_tracker(&dir);
        log_running(&mut tracker, Coordinates::new(38.73, -9.15).unwrap(), "5");
    }

    let storage = FileStore::open(dir.path()).unwrap();
    let mut tracker = Tracker::new(WorkoutStore::open(storage, DEFAULT_SLOT_KEY), 13.0);
    tracker.handle_position(Err(GeolocationError::Denied("blocked".into())));

    assert_eq!(tracker.map_status(), MapStatus::Unavailable);
    assert_eq!(tracker.alert(), Some(POSITION_ALERT));
    assert_eq!(tracker.workouts().len(), 1);
}
