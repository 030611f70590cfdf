//! Geolocation
//!
//! Resolves the user's position once at startup. The lookup runs on a
//! background thread and the result comes back over a channel that the UI
//! polls each frame.

pub mod provider;

use crossbeam::channel::{self, Receiver};
use thiserror::Error;

use crate::storage::config::GeolocationSettings;
use crate::workouts::types::Coordinates;

pub use provider::{ConfiguredLocator, FixedLocation, Geolocator, IpLocator};

/// Geolocation errors
#[derive(Debug, Clone, Error)]
pub enum GeolocationError {
    #[error("Geolocation is disabled")]
    Disabled,

    #[error("Fixed location not configured")]
    LocationMissing,

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Location lookup refused: {0}")]
    Denied(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Outcome of a position request.
pub type PositionResult = Result<Coordinates, GeolocationError>;

/// Start a one-shot position request in the background.
///
/// Exactly one result is sent on the returned channel.
pub fn request_position<G>(locator: G) -> Receiver<PositionResult>
where
    G: Geolocator + 'static,
{
    let (tx, rx) = channel::bounded(1);

    let spawned = std::thread::Builder::new()
        .name("geolocation".to_string())
        .spawn({
            let tx = tx.clone();
            move || {
                let result = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime.block_on(locator.locate()),
                    Err(e) => Err(GeolocationError::RequestFailed(e.to_string())),
                };

                if tx.send(result).is_err() {
                    tracing::debug!("Position result dropped, receiver gone");
                }
            }
        });

    if let Err(e) = spawned {
        tracing::error!("Failed to spawn geolocation thread: {}", e);
        let _ = tx.send(Err(GeolocationError::RequestFailed(e.to_string())));
    }

    rx
}

/// Start a position request using the configured source.
pub fn request_configured_position(settings: &GeolocationSettings) -> Receiver<PositionResult> {
    request_position(ConfiguredLocator::from_settings(settings))
}
