//! Workout entry form state and validation.

use chrono::{DateTime, Local};

use super::types::{ActivityType, Coordinates, Workout, WorkoutError, WorkoutKind};

/// Raw form input for a new workout.
///
/// Fields hold the text as typed; nothing is parsed until [`WorkoutForm::submit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutForm {
    /// Selected activity type
    pub activity: ActivityType,
    /// Distance in km
    pub distance: String,
    /// Duration in minutes
    pub duration: String,
    /// Cadence in steps/min (running only)
    pub cadence: String,
    /// Elevation gain in meters (cycling only)
    pub elevation_gain: String,
    position: Option<Coordinates>,
    visible: bool,
    focus_pending: bool,
}

impl WorkoutForm {
    /// Create an empty, hidden form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the form for a workout at the given map position.
    pub fn open_at(&mut self, position: Coordinates) {
        self.position = Some(position);
        self.visible = true;
        self.focus_pending = true;
    }

    /// True once after the form opens, so the first field can grab focus.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_pending)
    }

    /// Whether the form is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Position picked on the map, if any.
    pub fn position(&self) -> Option<Coordinates> {
        self.position
    }

    /// Switch the activity type. Typed values are kept.
    pub fn set_activity(&mut self, activity: ActivityType) {
        self.activity = activity;
    }

    /// Validate the fields and build a workout stamped with the current time.
    pub fn submit(&self) -> Result<Workout, WorkoutError> {
        self.submit_at(Local::now())
    }

    /// Validate the fields and build a workout with the given creation time.
    ///
    /// The form itself is left untouched; on error nothing is created.
    pub fn submit_at(&self, date: DateTime<Local>) -> Result<Workout, WorkoutError> {
        let distance = parse_positive("distance", &self.distance)?;
        let duration = parse_positive("duration", &self.duration)?;

        let kind = match self.activity {
            ActivityType::Running => WorkoutKind::Running {
                cadence: parse_positive("cadence", &self.cadence)?,
            },
            ActivityType::Cycling => WorkoutKind::Cycling {
                elevation_gain: parse_positive("elevation gain", &self.elevation_gain)?,
            },
        };

        let position = self.position.ok_or(WorkoutError::MissingPosition)?;

        Workout::new_at(kind, distance, duration, position, date)
    }

    /// Clear all inputs and hide the form. The activity type is kept.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation_gain.clear();
        self.position = None;
        self.visible = false;
        self.focus_pending = false;
    }
}

/// Parse a numeric input; empty, non-numeric, non-finite and non-positive
/// values are all rejected.
fn parse_positive(field: &'static str, raw: &str) -> Result<f64, WorkoutError> {
    let invalid = || WorkoutError::InvalidInput {
        field,
        value: raw.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid())
    }
}
