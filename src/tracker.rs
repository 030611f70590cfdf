//! Tracker state shared by all UI handlers.
//!
//! Holds the workout store, the entry form, and the map status. Handlers
//! receive it explicitly; UI code never keeps its own copy of the list.

use chrono::{DateTime, Local};

use crate::location::PositionResult;
use crate::storage::kv::KeyValueStore;
use crate::storage::workout_store::WorkoutStore;
use crate::workouts::display;
use crate::workouts::types::{Coordinates, Workout, WorkoutError};
use crate::workouts::WorkoutForm;

/// Map availability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapStatus {
    /// Waiting for the position request
    Locating,
    /// Map initialized around the user's position
    Ready { home: Coordinates },
    /// Position could not be determined; no map this session
    Unavailable,
}

/// Alert text shown when the position request fails.
pub const POSITION_ALERT: &str = "Could not get your current position";

/// Application context for the workout map.
pub struct Tracker<S: KeyValueStore> {
    store: WorkoutStore<S>,
    form: WorkoutForm,
    map: MapStatus,
    zoom: f64,
    view_request: Option<Coordinates>,
    selected: Option<String>,
    alert: Option<String>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Create a tracker around an already loaded store.
    pub fn new(store: WorkoutStore<S>, zoom: f64) -> Self {
        Self {
            store,
            form: WorkoutForm::new(),
            map: MapStatus::Locating,
            zoom,
            view_request: None,
            selected: None,
            alert: None,
        }
    }

    /// Apply the result of the startup position request.
    pub fn handle_position(&mut self, result: PositionResult) {
        match result {
            Ok(home) => {
                tracing::info!("Position acquired: {}", home);
                self.map = MapStatus::Ready { home };
                self.view_request = Some(home);
            }
            Err(e) => {
                tracing::warn!("Geolocation failed: {}", e);
                self.map = MapStatus::Unavailable;
                self.alert = Some(POSITION_ALERT.to_string());
            }
        }
    }

    /// A click on the map picks the position for the next workout.
    pub fn handle_map_click(&mut self, position: Coordinates) {
        if !matches!(self.map, MapStatus::Ready { .. }) {
            return;
        }
        tracing::debug!("Map clicked at {}", position);
        self.form.open_at(position);
    }

    /// Submit the form, stamping the workout with the current time.
    pub fn submit_form(&mut self) -> Result<String, WorkoutError> {
        self.submit_form_at(Local::now())
    }

    /// Submit the form with an explicit creation time.
    ///
    /// Invalid input leaves the list, the slot and the form untouched and
    /// raises an alert. On success the workout is appended, the list is
    /// saved, and the form is cleared and hidden. Returns the new id.
    pub fn submit_form_at(&mut self, date: DateTime<Local>) -> Result<String, WorkoutError> {
        let workout = match self.form.submit_at(date) {
            Ok(workout) => workout,
            Err(e) => {
                tracing::debug!("Rejected workout input: {}", e);
                self.alert = Some(e.user_message().to_string());
                return Err(e);
            }
        };

        let id = workout.id().to_string();
        tracing::info!("New workout: {}", display::summary(&workout));

        if let Err(e) = self.store.push(workout) {
            tracing::error!("Failed to save workouts: {}", e);
            self.alert = Some(format!("Could not save workouts: {}", e));
        }

        self.form.clear();
        Ok(id)
    }

    /// Hide the form without creating anything.
    pub fn cancel_form(&mut self) {
        self.form.clear();
    }

    /// Select a workout from the list and move the map to it.
    ///
    /// The updated click count is saved right away. Returns the coordinates
    /// the map should center on.
    pub fn select_workout(&mut self, id: &str) -> Option<Coordinates> {
        let workout = self.store.get_mut(id)?;
        workout.click();
        let coords = workout.coordinates();

        tracing::debug!("Selected workout {} at {}", id, coords);
        if let Err(e) = self.store.save() {
            tracing::warn!("Failed to save click count: {}", e);
        }
        self.selected = Some(id.to_string());
        if matches!(self.map, MapStatus::Ready { .. }) {
            self.view_request = Some(coords);
        }
        Some(coords)
    }

    /// Take the pending map recenter request, if any.
    pub fn take_view_request(&mut self) -> Option<Coordinates> {
        self.view_request.take()
    }

    /// Clear the persisted slot and start over as on a fresh launch.
    ///
    /// The map returns to [`MapStatus::Locating`]; the caller issues a new
    /// position request.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.reset() {
            tracing::error!("Failed to clear workout slot: {}", e);
            self.alert = Some(format!("Could not clear saved workouts: {}", e));
        }
        self.store.load();

        self.form = WorkoutForm::new();
        self.map = MapStatus::Locating;
        self.view_request = None;
        self.selected = None;
        tracing::info!("Tracker reset");
    }

    /// Workouts in creation order.
    pub fn workouts(&self) -> &[Workout] {
        self.store.workouts()
    }

    pub fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }

    pub fn form(&self) -> &WorkoutForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut WorkoutForm {
        &mut self.form
    }

    pub fn map_status(&self) -> MapStatus {
        self.map
    }

    /// Zoom used when centering the map.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Id of the last selected workout.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Current alert message.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Whether Enter and Escape should act on the form.
    ///
    /// Keys belong to the alert while one is shown.
    pub fn form_keys_active(&self) -> bool {
        self.form.is_visible() && self.alert.is_none()
    }

    /// Show an alert raised outside the tracker's own handlers.
    pub fn raise_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::GeolocationError;
    use crate::storage::kv::{MemoryStore, StorageError};
    use crate::storage::workout_store::DEFAULT_SLOT_KEY;
    use crate::workouts::ActivityType;
    use chrono::TimeZone;

    fn home() -> Coordinates {
        Coordinates::new(52.52, 13.405).unwrap()
    }

    fn ready_tracker() -> Tracker<MemoryStore> {
        let store = WorkoutStore::open(MemoryStore::new(), DEFAULT_SLOT_KEY);
        let mut tracker = Tracker::new(store, 13.0);
        tracker.handle_position(Ok(home()));
        tracker
    }

    fn fill_running(tracker: &mut Tracker<MemoryStore>, distance: &str) {
        tracker.handle_map_click(Coordinates::new(52.53, 13.41).unwrap());
        let form = tracker.form_mut();
        form.set_activity(ActivityType::Running);
        form.distance = distance.into();
        form.duration = "30".into();
        form.cadence = "150".into();
    }

    #[test]
    fn test_position_success_readies_map() {
        let mut tracker = ready_tracker();
        assert_eq!(tracker.map_status(), MapStatus::Ready { home: home() });
        assert_eq!(tracker.take_view_request(), Some(home()));
        assert_eq!(tracker.take_view_request(), None);
        assert!(tracker.alert().is_none());
    }

    #[test]
    fn test_position_failure_disables_map() {
        let store = WorkoutStore::open(MemoryStore::new(), DEFAULT_SLOT_KEY);
        let mut tracker = Tracker::new(store, 13.0);
        tracker.handle_position(Err(GeolocationError::Denied("no".into())));

        assert_eq!(tracker.map_status(), MapStatus::Unavailable);
        assert_eq!(tracker.alert(), Some(POSITION_ALERT));

        tracker.handle_map_click(home());
        assert!(!tracker.form().is_visible());
    }

    #[test]
    fn test_submit_appends_and_persists() {
        let mut tracker = ready_tracker();
        fill_running(&mut tracker, "5");

        let date = Local.with_ymd_and_hms(2026, 6, 21, 18, 0, 0).unwrap();
        let id = tracker.submit_form_at(date).unwrap();

        assert_eq!(tracker.workouts().len(), 1);
        assert_eq!(tracker.workouts()[0].id(), id);
        assert_eq!(tracker.workouts()[0].description(), "Running on June 21");
        assert!(!tracker.form().is_visible());
        assert!(tracker.form().distance.is_empty());

        let stored = tracker.store().storage().get(DEFAULT_SLOT_KEY).unwrap();
        assert!(stored.unwrap().contains("\"type\":\"running\""));
    }

    #[test]
    fn test_invalid_submit_changes_nothing() {
        let mut tracker = ready_tracker();
        fill_running(&mut tracker, "0");

        let err = tracker.submit_form().unwrap_err();
        assert!(matches!(err, WorkoutError::InvalidInput { .. }));
        assert!(tracker.workouts().is_empty());
        assert_eq!(tracker.store().storage().get(DEFAULT_SLOT_KEY).unwrap(), None);
        assert!(tracker.form().is_visible());
        assert_eq!(tracker.form().distance, "0");
        assert_eq!(tracker.alert(), Some("Inputs must be positive numbers"));

        tracker.dismiss_alert();
        assert!(tracker.alert().is_none());
    }

    /// Store that accepts reads but fails every write.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::IoError("disk full".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_save_failure_keeps_workout() {
        let store = WorkoutStore::open(ReadOnlyStore, DEFAULT_SLOT_KEY);
        let mut tracker = Tracker::new(store, 13.0);
        tracker.handle_position(Ok(home()));

        tracker.handle_map_click(Coordinates::new(52.53, 13.41).unwrap());
        let form = tracker.form_mut();
        form.set_activity(ActivityType::Cycling);
        form.distance = "10".into();
        form.duration = "40".into();
        form.elevation_gain = "200".into();

        let id = tracker.submit_form().unwrap();

        assert_eq!(tracker.workouts().len(), 1);
        assert_eq!(tracker.workouts()[0].id(), id);
        assert!(tracker.alert().unwrap().starts_with("Could not save workouts"));
        assert!(!tracker.form().is_visible());
    }

    #[test]
    fn test_select_workout_saves_clicks() {
        let mut tracker = ready_tracker();
        fill_running(&mut tracker, "5");
        let id = tracker.submit_form().unwrap();

        tracker.select_workout(&id);
        tracker.select_workout(&id);

        let mut reloaded = WorkoutStore::new(tracker.store().storage().clone(), DEFAULT_SLOT_KEY);
        reloaded.load();
        assert_eq!(reloaded.workouts()[0].clicks(), 2);
    }

    #[test]
    fn test_select_workout_recenters() {
        let mut tracker = ready_tracker();
        tracker.take_view_request();
        fill_running(&mut tracker, "5");
        let id = tracker.submit_form().unwrap();

        let coords = tracker.select_workout(&id).unwrap();
        assert_eq!(coords, Coordinates::new(52.53, 13.41).unwrap());
        assert_eq!(tracker.take_view_request(), Some(coords));
        assert_eq!(tracker.selected(), Some(id.as_str()));
        assert_eq!(tracker.workouts()[0].clicks(), 1);

        assert!(tracker.select_workout("unknown").is_none());
    }

    #[test]
    fn test_reset_starts_over() {
        let mut tracker = ready_tracker();
        fill_running(&mut tracker, "5");
        tracker.submit_form().unwrap();

        tracker.reset();

        assert!(tracker.workouts().is_empty());
        assert_eq!(tracker.map_status(), MapStatus::Locating);
        assert_eq!(tracker.store().storage().get(DEFAULT_SLOT_KEY).unwrap(), None);
    }

    #[test]
    fn test_form_keys_inactive_while_alert_shown() {
        let mut tracker = ready_tracker();
        assert!(!tracker.form_keys_active());

        fill_running(&mut tracker, "0");
        assert!(tracker.form_keys_active());

        assert!(tracker.submit_form().is_err());
        assert!(!tracker.form_keys_active());

        tracker.dismiss_alert();
        assert!(tracker.form_keys_active());
    }

    #[test]
    fn test_raise_alert() {
        let mut tracker = ready_tracker();
        tracker.raise_alert("Workouts will not be saved");
        assert_eq!(tracker.alert(), Some("Workouts will not be saved"));
    }

    #[test]
    fn test_cancel_form() {
        let mut tracker = ready_tracker();
        fill_running(&mut tracker, "5");
        tracker.cancel_form();
        assert!(!tracker.form().is_visible());
        assert!(tracker.workouts().is_empty());
    }
}
