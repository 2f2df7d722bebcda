//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web, read from a JSON file on native.
//! Preferences only: sessions themselves are never saved.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PLAYFIELD_HEIGHT, DEFAULT_PLAYFIELD_WIDTH};
use crate::error::SettingsError;
use crate::sim::{Difficulty, GameState, Playfield};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tier used when a session starts without an explicit choice
    pub difficulty: Difficulty,
    /// Particle bursts on hits
    pub particles: bool,
    /// Show the speed multiplier in the HUD
    pub show_speed: bool,
    /// Playfield size in canvas pixels
    pub playfield_width: f32,
    pub playfield_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            particles: true,
            show_speed: true,
            playfield_width: DEFAULT_PLAYFIELD_WIDTH,
            playfield_height: DEFAULT_PLAYFIELD_HEIGHT,
        }
    }
}

impl Settings {
    /// Create settings for a tier (other fields default)
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.playfield_width, self.playfield_height)
    }

    /// Check the playfield can host every tier the player might pick
    pub fn validate(&self) -> Result<(), SettingsError> {
        for difficulty in Difficulty::ALL {
            self.playfield().validate(difficulty)?;
        }
        Ok(())
    }

    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a menu-mode session configured by these settings
    pub fn new_session(&self, seed: u64) -> Result<GameState, SettingsError> {
        let mut state = GameState::new(self.difficulty, self.playfield(), seed)?;
        state.particles_enabled = self.particles;
        Ok(state)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "shape_catch_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Read and validate a JSON settings file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
