//! Integration tests for the background position request.

use mapty::location::{request_configured_position, GeolocationError};
use mapty::storage::config::{GeolocationSource, GeolocationSettings};
use std::time::Duration;

fn settings(source: GeolocationSource) -> GeolocationSettings {
    GeolocationSettings {
        source,
        ..GeolocationSettings::default()
    }
}

#[test]
fn test_fixed_source_resolves() {
    let mut fixed = settings(GeolocationSource::Fixed);
    fixed.latitude = Some(46.95);
    fixed.longitude = Some(7.45);

    let rx = request_configured_position(&fixed);
    let coords = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
    assert_eq!(coords.latitude, 46.95);
    assert_eq!(coords.longitude, 7.45);
}

#[test]
fn test_fixed_source_without_coordinates_fails() {
    let rx = request_configured_position(&settings(GeolocationSource::Fixed));
    let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(result, Err(GeolocationError::LocationMissing)));
}

#[test]
fn test_disabled_source_reports_once() {
    let rx = request_configured_position(&settings(GeolocationSource::Disabled));
    let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(result, Err(GeolocationError::Disabled)));

    // Exactly one result per request
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}
