//! Game settings
//!
//! Playfield geometry and speeds. Defaults mirror `consts`; a JSON file (native)
//! or LocalStorage entry (web) can override them. Every load is validated so a
//! bad value fails at startup instead of misbehaving mid-rally.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Frame pacer target
    pub target_fps: u32,

    // === Entities ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Paddle travel per tick while a key is held
    pub paddle_velocity: f32,
    pub ball_width: f32,
    /// Initial horizontal ball speed per tick
    pub ball_velocity: f32,

    // === Menus ===
    pub button_width: f32,
    pub button_height: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    /// Fixed RNG seed for reproducible deflections (clock-derived when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            target_fps: FPS,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_velocity: BALL_VELOCITY,
            ball_width: BALL_WIDTH,
            ball_velocity: BALL_VELOCITY,

            button_width: BUTTON_WIDTH,
            button_height: BUTTON_HEIGHT,

            show_fps: true,
            seed: None,
        }
    }
}

fn positive(v: f32) -> bool {
    // Also rejects NaN
    v > 0.0
}

impl Settings {
    /// Check every dimension and speed
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("playfield", self.playfield_width, self.playfield_height),
            ("paddle", self.paddle_width, self.paddle_height),
            ("ball", self.ball_width, self.ball_width),
            ("button", self.button_width, self.button_height),
        ];
        for (what, width, height) in sizes {
            if !positive(width) || !positive(height) {
                return Err(ConfigError::NonPositiveSize { what, width, height });
            }
        }

        for (what, velocity) in [("paddle", self.paddle_velocity), ("ball", self.ball_velocity)] {
            if !positive(velocity) {
                return Err(ConfigError::NonPositiveVelocity { what, velocity });
            }
        }

        if self.target_fps == 0 {
            return Err(ConfigError::ZeroFps);
        }

        if self.paddle_height > self.playfield_height
            || self.paddle_width * 2.0 >= self.playfield_width
        {
            return Err(ConfigError::PlayfieldTooSmall {
                what: "paddle",
                width: self.playfield_width,
                height: self.playfield_height,
                size: self.paddle_height,
            });
        }

        if self.ball_width >= self.playfield_height || self.ball_width >= self.playfield_width {
            return Err(ConfigError::PlayfieldTooSmall {
                what: "ball",
                width: self.playfield_width,
                height: self.playfield_height,
                size: self.ball_width,
            });
        }

        Ok(())
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        // Plain data with no maps keyed by non-strings; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Settings file looked up in the working directory (native)
    pub const FILE_NAME: &'static str = "scene-pong.json";

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "scene_pong_settings";

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `FILE_NAME` if present, otherwise defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::path::Path::new(Self::FILE_NAME);
        if path.exists() {
            Self::load_from(path)
        } else {
            log::info!("Using default settings");
            Ok(Self::default())
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, ConfigError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from LocalStorage");
                return Ok(settings);
            }
        }

        log::info!("Using default settings");
        Ok(Self::default())
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_velocity() {
        let settings = Settings {
            ball_velocity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NonPositiveVelocity { what: "ball", .. })
        ));

        let settings = Settings {
            paddle_velocity: -3.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NonPositiveVelocity { what: "paddle", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let settings = Settings {
            paddle_height: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NonPositiveSize { what: "paddle", .. })
        ));

        let settings = Settings {
            ball_width: f32::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            paddle_height: 700.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::PlayfieldTooSmall { what: "paddle", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_fps() {
        let settings = Settings {
            target_fps: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::ZeroFps)));
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let settings = Settings::from_json(r#"{ "ball_velocity": 7.5, "seed": 42 }"#).unwrap();
        assert_eq!(settings.ball_velocity, 7.5);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.playfield_width, PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(Settings::from_json(r#"{ "paddle_velocity": 0 }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(7),
            show_fps: false,
            ..Default::default()
        };
        let restored = Settings::from_json(&settings.to_json()).unwrap();
        assert_eq!(restored, settings);
    }
}
