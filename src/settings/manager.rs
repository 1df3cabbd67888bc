use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::error::AppError;
use crate::poi::nominatim_provider::{DEFAULT_ENDPOINT, DEFAULT_ZOOM};

/// Main settings structure containing all application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub caption: CaptionSettings,
    #[serde(default)]
    pub location: LocationSettings,
    #[serde(default)]
    pub share: ShareSettings,
}

/// Reverse geocoding settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingSettings {
    pub endpoint: String,
    pub zoom: u8,
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Caption generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionSettings {
    pub delay_ms: u64,
}

/// One-shot geolocation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

/// Share link settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    pub origin: String,
    pub title: String,
}

fn default_user_agent() -> String {
    format!("vistagram/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            zoom: DEFAULT_ZOOM,
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self { delay_ms: 1500 }
    }
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: 10_000,
            maximum_age_ms: 300_000,
        }
    }
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            origin: "http://localhost:3000".to_string(),
            title: "Check out this post!".to_string(),
        }
    }
}

/// Manages settings persistence and provides thread-safe access
pub struct SettingsManager {
    settings_path: PathBuf,
    current_settings: Arc<RwLock<Settings>>,
}

impl SettingsManager {
    /// Creates a new SettingsManager and loads settings from disk
    ///
    /// Settings live at `<data_dir>/com.vistagram.app/settings.json`. If the
    /// file doesn't exist, it is created with default values.
    pub fn new() -> Result<Self, AppError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AppError::Settings("Failed to get data directory".to_string()))?;

        Self::new_with_path(data_dir.join("com.vistagram.app").join("settings.json"))
    }

    /// Creates a new SettingsManager with a custom settings path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The settings directory cannot be created
    /// - The settings file cannot be read or written
    pub fn new_with_path(settings_path: PathBuf) -> Result<Self, AppError> {
        if let Some(parent) = settings_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::Settings(format!("Failed to create settings directory: {}", e)))?;
            }
        }

        let manager = Self {
            settings_path: settings_path.clone(),
            current_settings: Arc::new(RwLock::new(Settings::default())),
        };

        let settings = if settings_path.exists() {
            manager.load_from_file()?
        } else {
            let defaults = Settings::default();
            manager.save_to_file(&defaults)?;
            defaults
        };

        *manager.current_settings.write()
            .map_err(|e| AppError::Settings(format!("Failed to acquire write lock: {}", e)))? = settings;

        Ok(manager)
    }

    /// Returns a clone of the current settings
    pub fn get(&self) -> Settings {
        self.current_settings
            .read()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Updates settings (validates, persists to disk, then updates in-memory)
    ///
    /// If validation or the disk write fails, in-memory state remains unchanged.
    pub fn update(&self, settings: Settings) -> Result<(), AppError> {
        Self::validate(&settings)?;

        self.save_to_file(&settings)?;

        *self.current_settings.write()
            .map_err(|e| AppError::Settings(format!("Failed to acquire write lock: {}", e)))? = settings;

        tracing::info!(path = %self.settings_path.display(), "Settings updated");
        Ok(())
    }

    /// Validates settings schema and constraints
    pub fn validate(settings: &Settings) -> Result<(), AppError> {
        let geocoding = &settings.geocoding;
        if !is_http_url(&geocoding.endpoint) {
            return Err(AppError::Settings(format!(
                "Geocoding endpoint must be an http(s) URL, got '{}'",
                geocoding.endpoint
            )));
        }

        if geocoding.zoom > 18 {
            return Err(AppError::Settings(format!(
                "Geocoding zoom must be between 0 and 18, got {}",
                geocoding.zoom
            )));
        }

        if geocoding.user_agent.trim().is_empty() {
            return Err(AppError::Settings("Geocoding user agent cannot be empty".to_string()));
        }

        if geocoding.timeout_secs == 0 || geocoding.timeout_secs > 60 {
            return Err(AppError::Settings(format!(
                "Geocoding timeout must be between 1 and 60 seconds, got {}",
                geocoding.timeout_secs
            )));
        }

        if settings.caption.delay_ms > 10_000 {
            return Err(AppError::Settings(format!(
                "Caption delay must be at most 10000 ms, got {}",
                settings.caption.delay_ms
            )));
        }

        if settings.location.timeout_ms == 0 {
            return Err(AppError::Settings("Location timeout must be greater than zero".to_string()));
        }

        if !is_http_url(&settings.share.origin) {
            return Err(AppError::Settings(format!(
                "Share origin must be an http(s) URL, got '{}'",
                settings.share.origin
            )));
        }

        Ok(())
    }

    /// Loads settings from disk
    ///
    /// If the file contains invalid JSON, logs an error and returns defaults.
    fn load_from_file(&self) -> Result<Settings, AppError> {
        let contents = std::fs::read_to_string(&self.settings_path)
            .map_err(|e| AppError::Settings(format!("Failed to read settings file: {}", e)))?;

        match serde_json::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::error!(error = %e, "Failed to parse settings JSON, using defaults");
                Ok(Settings::default())
            }
        }
    }

    /// Saves settings to disk atomically via a temporary file and rename
    fn save_to_file(&self, settings: &Settings) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(settings)?;

        let temp_path = self.settings_path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)
            .map_err(|e| AppError::Settings(format!("Failed to write temporary settings file: {}", e)))?;

        std::fs::rename(&temp_path, &self.settings_path)
            .map_err(|e| AppError::Settings(format!("Failed to rename settings file: {}", e)))?;

        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}
