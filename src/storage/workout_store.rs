//! Ordered workout list persisted as a single JSON slot.
//!
//! Every record carries a `type` discriminator and is rebuilt through the
//! validating constructors on load. Derived values (pace, speed,
//! description) are written alongside the inputs but never read back.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::kv::{KeyValueStore, StorageError};
use crate::workouts::types::{Coordinates, Workout, WorkoutError, WorkoutKind};

/// Default slot key for the workout list.
pub const DEFAULT_SLOT_KEY: &str = "workout";

/// Persisted form of a workout.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkoutRecord {
    id: String,
    date: DateTime<Local>,
    distance: f64,
    duration: f64,
    /// `[latitude, longitude]`
    coords: [f64; 2],
    #[serde(default)]
    clicks: u32,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(flatten)]
    kind: KindRecord,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum KindRecord {
    Running {
        cadence: f64,
        #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
        pace: Option<String>,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
        speed: Option<String>,
    },
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let coords = workout.coordinates();
        let kind = match workout.kind() {
            WorkoutKind::Running { cadence } => KindRecord::Running {
                cadence,
                pace: Some(workout.metric_display()),
            },
            WorkoutKind::Cycling { elevation_gain } => KindRecord::Cycling {
                elevation_gain,
                speed: Some(workout.metric_display()),
            },
        };

        Self {
            id: workout.id().to_string(),
            date: workout.date(),
            distance: workout.distance(),
            duration: workout.duration(),
            coords: [coords.latitude, coords.longitude],
            clicks: workout.clicks(),
            description: Some(workout.description()),
            kind,
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = WorkoutError;

    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        let kind = match record.kind {
            KindRecord::Running { cadence, .. } => WorkoutKind::Running { cadence },
            KindRecord::Cycling { elevation_gain, .. } => WorkoutKind::Cycling { elevation_gain },
        };
        let [latitude, longitude] = record.coords;

        Workout::restore(
            record.id,
            record.date,
            record.distance,
            record.duration,
            Coordinates::new(latitude, longitude)?,
            record.clicks,
            kind,
        )
    }
}

/// Serialize a workout list to the slot format.
pub fn encode_workouts(workouts: &[Workout]) -> Result<String, StorageError> {
    let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
    serde_json::to_string(&records).map_err(|e| StorageError::SerializeError(e.to_string()))
}

/// Parse the slot format back into workouts.
///
/// A JSON `null` decodes to an empty list. Any record that fails to parse or
/// validate rejects the whole slot.
pub fn decode_workouts(raw: &str) -> Result<Vec<Workout>, DecodeError> {
    let records: Option<Vec<WorkoutRecord>> = serde_json::from_str(raw)?;

    records
        .unwrap_or_default()
        .into_iter()
        .map(|record| Workout::try_from(record).map_err(DecodeError::from))
        .collect()
}

/// Reasons a stored slot could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed workout data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid workout record: {0}")]
    InvalidRecord(#[from] WorkoutError),
}

/// In-memory workout list backed by one key-value slot.
pub struct WorkoutStore<S: KeyValueStore> {
    storage: S,
    key: String,
    workouts: Vec<Workout>,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    /// Create an empty store without reading the slot.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            workouts: Vec::new(),
        }
    }

    /// Create a store and load whatever the slot holds.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::new(storage, key);
        store.load();
        store
    }

    /// Replace the in-memory list with the slot contents.
    ///
    /// Missing, unreadable or corrupt data yields an empty list.
    /// Returns the number of workouts loaded.
    pub fn load(&mut self) -> usize {
        self.workouts = match self.storage.get(&self.key) {
            Ok(Some(raw)) => match decode_workouts(&raw) {
                Ok(workouts) => workouts,
                Err(e) => {
                    tracing::warn!("Ignoring stored workouts in slot '{}': {}", self.key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read workout slot '{}': {}", self.key, e);
                Vec::new()
            }
        };

        tracing::info!("Loaded {} workouts", self.workouts.len());
        self.workouts.len()
    }

    /// Overwrite the slot with the entire list.
    pub fn save(&mut self) -> Result<(), StorageError> {
        let encoded = encode_workouts(&self.workouts)?;
        self.storage.set(&self.key, &encoded)
    }

    /// Append a workout and persist the list.
    ///
    /// The workout stays in memory even if saving fails.
    pub fn push(&mut self, workout: Workout) -> Result<(), StorageError> {
        self.workouts.push(workout);
        self.save()
    }

    /// Remove the slot and clear the in-memory list.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.workouts.clear();
        self.storage.remove(&self.key)
    }

    /// Workouts in creation order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Find a workout by id.
    pub fn get(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// Find a workout by id for mutation.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id() == id)
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Slot key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying key-value storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
