use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_CENTER, DEFAULT_ZOOM, OSM_ATTRIBUTION, OSM_TILE_URL};

const CONFIG_STORAGE_KEY: &str = "safe_route_config";

/// Runtime settings, persisted as JSON in `localStorage`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scheme and host of the routing backend, without a trailing path
    pub api_base_url: String,
    /// Fetch routes as soon as both endpoints are set or moved
    pub auto_fetch: bool,
    /// `[lat, lon]`
    pub initial_center: [f64; 2],
    pub initial_zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auto_fetch: false,
            initial_center: DEFAULT_CENTER,
            initial_zoom: DEFAULT_ZOOM,
            tile_url: OSM_TILE_URL.to_string(),
            tile_attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a stored configuration; unknown fields are ignored and missing
    /// ones take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of the expected shape.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse config: {e}"))
    }

    /// Load the saved configuration, falling back to defaults
    #[must_use]
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else { return Self::default() };
        let Ok(Some(storage)) = window.local_storage() else { return Self::default() };
        let Ok(Some(json)) = storage.get_item(CONFIG_STORAGE_KEY) else { return Self::default() };

        Self::from_json(&json).unwrap_or_else(|e| {
            leptos::logging::warn!("{e}; using defaults");
            Self::default()
        })
    }

    /// Persist to `localStorage`
    ///
    /// # Errors
    ///
    /// Returns an error if storage is unavailable or the write fails.
    pub fn save(&self) -> Result<(), String> {
        let window = web_sys::window().ok_or("No window available")?;
        let storage = window
            .local_storage()
            .map_err(|_| "Local storage not supported")?
            .ok_or("Local storage not available")?;

        let json = serde_json::to_string(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        storage
            .set_item(CONFIG_STORAGE_KEY, &json)
            .map_err(|_| "Failed to write config".to_string())
    }
}
