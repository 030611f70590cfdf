//! Workout types and enums.
//!
//! A workout is one recorded activity pinned to a map position. Only the
//! inputs are stored; pace, speed and the description are computed from them.

use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Month names used in workout descriptions.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Kind of activity selectable in the workout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Running (tracks cadence and pace)
    #[default]
    Running,
    /// Cycling (tracks elevation gain and speed)
    Cycling,
}

impl ActivityType {
    /// Lowercase identifier, also used as the persisted discriminator.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Running => "running",
            ActivityType::Cycling => "cycling",
        }
    }

    /// Capitalized display name.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::Cycling => "Cycling",
        }
    }

    /// Icon shown in the list and on map popups.
    pub fn icon(&self) -> &'static str {
        match self {
            ActivityType::Running => "🏃",
            ActivityType::Cycling => "🚴",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude (-90 to 90)
    pub latitude: f64,
    /// Longitude (-180 to 180)
    pub longitude: f64,
}

impl Coordinates {
    /// Create validated coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WorkoutError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(WorkoutError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Variant-specific workout data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutKind {
    /// Running with cadence in steps per minute
    Running { cadence: f64 },
    /// Cycling with elevation gain in meters
    Cycling { elevation_gain: f64 },
}

impl WorkoutKind {
    /// Activity type of this variant.
    pub fn activity_type(&self) -> ActivityType {
        match self {
            WorkoutKind::Running { .. } => ActivityType::Running,
            WorkoutKind::Cycling { .. } => ActivityType::Cycling,
        }
    }

    fn validate(self) -> Result<Self, WorkoutError> {
        match self {
            WorkoutKind::Running { cadence } => Ok(WorkoutKind::Running {
                cadence: require_positive("cadence", cadence)?,
            }),
            // Flat rides are valid; the form alone asks for a positive gain
            WorkoutKind::Cycling { elevation_gain } => Ok(WorkoutKind::Cycling {
                elevation_gain: require_finite("elevation gain", elevation_gain)?,
            }),
        }
    }
}

/// A recorded workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    date: DateTime<Local>,
    distance: f64,
    duration: f64,
    coordinates: Coordinates,
    clicks: u32,
    kind: WorkoutKind,
}

impl Workout {
    /// Create a running workout stamped with the current time.
    pub fn running(
        distance: f64,
        duration: f64,
        coordinates: Coordinates,
        cadence: f64,
    ) -> Result<Self, WorkoutError> {
        Self::new_at(
            WorkoutKind::Running { cadence },
            distance,
            duration,
            coordinates,
            Local::now(),
        )
    }

    /// Create a cycling workout stamped with the current time.
    pub fn cycling(
        distance: f64,
        duration: f64,
        coordinates: Coordinates,
        elevation_gain: f64,
    ) -> Result<Self, WorkoutError> {
        Self::new_at(
            WorkoutKind::Cycling { elevation_gain },
            distance,
            duration,
            coordinates,
            Local::now(),
        )
    }

    /// Create a workout with an explicit creation time.
    ///
    /// Distance, duration and the variant field must be positive and finite.
    pub fn new_at(
        kind: WorkoutKind,
        distance: f64,
        duration: f64,
        coordinates: Coordinates,
        date: DateTime<Local>,
    ) -> Result<Self, WorkoutError> {
        Self::restore(id_from_timestamp(&date), date, distance, duration, coordinates, 0, kind)
    }

    /// Rebuild a workout from persisted inputs, re-running validation.
    pub(crate) fn restore(
        id: String,
        date: DateTime<Local>,
        distance: f64,
        duration: f64,
        coordinates: Coordinates,
        clicks: u32,
        kind: WorkoutKind,
    ) -> Result<Self, WorkoutError> {
        let distance = require_positive("distance", distance)?;
        let duration = require_positive("duration", duration)?;
        let coordinates = Coordinates::new(coordinates.latitude, coordinates.longitude)?;
        let kind = kind.validate()?;

        Ok(Self {
            id,
            date,
            distance,
            duration,
            coordinates,
            clicks,
            kind,
        })
    }

    /// Identifier derived from the creation timestamp.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creation time.
    pub fn date(&self) -> DateTime<Local> {
        self.date
    }

    /// Distance in kilometers.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Duration in minutes.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Map position where the workout was recorded.
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Number of times the workout was selected in the list.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Variant-specific data.
    pub fn kind(&self) -> WorkoutKind {
        self.kind
    }

    pub fn activity_type(&self) -> ActivityType {
        self.kind.activity_type()
    }

    /// Pace in min/km. Only defined for running.
    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { .. } => Some(self.duration / self.distance),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    /// Speed as distance over duration. Only defined for cycling.
    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { .. } => Some(self.distance / self.duration),
            WorkoutKind::Running { .. } => None,
        }
    }

    /// Pace or speed, whichever applies, rounded to 2 decimals.
    pub fn metric_display(&self) -> String {
        let value = self.pace().or_else(|| self.speed()).unwrap_or_default();
        format_decimal(value)
    }

    /// "Running on April 14" style description.
    pub fn description(&self) -> String {
        let month = MONTHS[self.date.month0() as usize];
        format!("{} on {} {}", self.activity_type().label(), month, self.date.day())
    }

    /// Register a selection of this workout.
    pub fn click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }
}

/// Format a derived metric with 2 decimals.
pub fn format_decimal(value: f64) -> String {
    format!("{:.2}", value)
}

/// Last 10 digits of the Unix timestamp in milliseconds.
fn id_from_timestamp(date: &DateTime<Local>) -> String {
    let millis = date.timestamp_millis().to_string();
    let start = millis.len().saturating_sub(10);
    millis[start..].to_string()
}

fn require_finite(field: &'static str, value: f64) -> Result<f64, WorkoutError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WorkoutError::InvalidInput {
            field,
            value: value.to_string(),
        })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<f64, WorkoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WorkoutError::InvalidInput {
            field,
            value: value.to_string(),
        })
    }
}

/// Errors creating a workout.
#[derive(Debug, Error, PartialEq)]
pub enum WorkoutError {
    /// A numeric field is missing, not a number, or not positive
    #[error("Invalid {field}: {value:?} is not a positive number")]
    InvalidInput { field: &'static str, value: String },

    /// Position outside the valid latitude/longitude range
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Form submitted before a position was picked on the map
    #[error("No map position selected")]
    MissingPosition,
}

impl WorkoutError {
    /// Message suitable for an alert dialog.
    pub fn user_message(&self) -> &'static str {
        match self {
            WorkoutError::InvalidInput { .. } => "Inputs must be positive numbers",
            WorkoutError::InvalidCoordinates { .. } => "The selected position is not a valid location",
            WorkoutError::MissingPosition => "Click on the map to choose where the workout happened",
        }
    }
}
