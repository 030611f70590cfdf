//! Position providers.

use serde::Deserialize;
use std::time::Duration;

use super::{GeolocationError, PositionResult};
use crate::storage::config::{GeolocationSettings, GeolocationSource};
use crate::workouts::types::Coordinates;

/// Trait for position providers
pub trait Geolocator: Send + Sync {
    /// Resolve the current position once
    fn locate(&self) -> impl std::future::Future<Output = PositionResult> + Send;
}

/// Position taken from the configuration file
#[derive(Debug, Clone)]
pub struct FixedLocation {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl FixedLocation {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn resolve(&self) -> PositionResult {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(GeolocationError::LocationMissing);
        };

        Coordinates::new(latitude, longitude)
            .map_err(|e| GeolocationError::InvalidLocation(e.to_string()))
    }
}

impl Geolocator for FixedLocation {
    async fn locate(&self) -> PositionResult {
        self.resolve()
    }
}

/// ip-api.com style lookup response (also accepts ipapi.co field names)
#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(alias = "latitude")]
    lat: Option<f64>,
    #[serde(alias = "longitude")]
    lon: Option<f64>,
}

/// Approximate position from the public IP address
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
}

impl IpLocator {
    /// Create a locator for the given lookup endpoint
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, GeolocationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeolocationError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn fetch(&self) -> PositionResult {
        tracing::debug!("Looking up position from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeolocationError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeolocationError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeolocationError::InvalidResponse(e.to_string()))?;

        parse_lookup_response(&body)
    }
}

impl Geolocator for IpLocator {
    async fn locate(&self) -> PositionResult {
        self.fetch().await
    }
}

/// Parse a lookup response body into coordinates.
pub fn parse_lookup_response(body: &str) -> PositionResult {
    let response: LookupResponse = serde_json::from_str(body)
        .map_err(|e| GeolocationError::InvalidResponse(e.to_string()))?;

    if let Some(status) = response.status.as_deref() {
        if status != "success" {
            let reason = response.message.unwrap_or_else(|| status.to_string());
            return Err(GeolocationError::Denied(reason));
        }
    }

    match (response.lat, response.lon) {
        (Some(lat), Some(lon)) => Coordinates::new(lat, lon)
            .map_err(|e| GeolocationError::InvalidLocation(e.to_string())),
        _ => Err(GeolocationError::InvalidResponse(
            "missing latitude/longitude".to_string(),
        )),
    }
}

/// Locator selected by the configured source
pub enum ConfiguredLocator {
    Fixed(FixedLocation),
    Ip(IpLocator),
    Unavailable(GeolocationError),
}

impl ConfiguredLocator {
    pub fn from_settings(settings: &GeolocationSettings) -> Self {
        match settings.source {
            GeolocationSource::Fixed => ConfiguredLocator::Fixed(FixedLocation::new(
                settings.latitude,
                settings.longitude,
            )),
            GeolocationSource::Ip => {
                let timeout = Duration::from_secs(settings.timeout_secs.max(1));
                match IpLocator::new(settings.lookup_url.clone(), timeout) {
                    Ok(locator) => ConfiguredLocator::Ip(locator),
                    Err(e) => ConfiguredLocator::Unavailable(e),
                }
            }
            GeolocationSource::Disabled => {
                ConfiguredLocator::Unavailable(GeolocationError::Disabled)
            }
        }
    }
}

impl Geolocator for ConfiguredLocator {
    async fn locate(&self) -> PositionResult {
        match self {
            ConfiguredLocator::Fixed(fixed) => fixed.locate().await,
            ConfiguredLocator::Ip(ip) => ip.locate().await,
            ConfiguredLocator::Unavailable(e) => Err(e.clone()),
        }
    }
}
