//! Application configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::workout_store::DEFAULT_SLOT_KEY;

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (default)
    #[default]
    Dark,
    /// Light theme
    Light,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "Dark"),
            Theme::Light => write!(f, "Light"),
        }
    }
}

/// Where the startup position comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeolocationSource {
    /// Look up the approximate position from the public IP address
    #[default]
    Ip,
    /// Use the fixed latitude/longitude from the config file
    Fixed,
    /// Never locate; the map stays unavailable
    Disabled,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Persistence settings
    pub storage: StorageSettings,
    /// Map settings
    pub map: MapSettings,
    /// Geolocation settings
    pub geolocation: GeolocationSettings,
    /// UI settings
    pub ui: UiSettings,
}

/// Persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Name of the slot holding the workout list
    pub slot_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

/// Map-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Zoom level used on startup and when jumping to a workout
    pub zoom: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self { zoom: 13.0 }
    }
}

/// Geolocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationSettings {
    /// Position source
    pub source: GeolocationSource,
    /// Latitude for the fixed source
    pub latitude: Option<f64>,
    /// Longitude for the fixed source
    pub longitude: Option<f64>,
    /// Lookup endpoint for the IP source
    pub lookup_url: String,
    /// HTTP timeout for the lookup in seconds
    pub timeout_secs: u64,
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            source: GeolocationSource::Ip,
            latitude: None,
            longitude: None,
            lookup_url: "http://ip-api.com/json".to_string(),
            timeout_secs: 10,
        }
    }
}

/// UI-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Theme preference
    pub theme: Theme,
    /// Font scale multiplier
    pub font_scale: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            font_scale: 1.0,
        }
    }
}

impl UiSettings {
    /// Supported font scale range
    pub const FONT_SCALE_RANGE: (f32, f32) = (0.5, 3.0);

    /// Font scale limited to [`Self::FONT_SCALE_RANGE`]; non-finite values
    /// fall back to 1.0.
    pub fn clamped_font_scale(&self) -> f32 {
        let (min, max) = Self::FONT_SCALE_RANGE;
        if self.font_scale.is_finite() {
            self.font_scale.clamp(min, max)
        } else {
            1.0
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "mapty", "Mapty")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path(), get_data_dir())
}

/// Load configuration from `path`; a missing file yields defaults.
pub fn load_config_from(path: &Path, data_dir: PathBuf) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig {
            data_dir,
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir;

    let font_scale = config.ui.clamped_font_scale();
    if font_scale != config.ui.font_scale {
        tracing::warn!(
            "Font scale {} out of range, using {}",
            config.ui.font_scale,
            font_scale
        );
        config.ui.font_scale = font_scale;
    }

    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save application configuration to `path`.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
