//! Game settings and preferences
//!
//! Persisted separately from the high score: a JSON file on native,
//! LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PARTICLES, PLAYER_MOVE_DELAY};

/// Enemy speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Slow, Difficulty::Normal, Difficulty::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Slow => "Slow",
            Difficulty::Normal => "Normal",
            Difficulty::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" | "1" => Some(Difficulty::Slow),
            "normal" | "2" => Some(Difficulty::Normal),
            "fast" | "3" => Some(Difficulty::Fast),
            _ => None,
        }
    }

    /// Frames between enemy moves
    pub fn enemy_move_delay(&self) -> u32 {
        match self {
            // Half the player's speed
            Difficulty::Slow => PLAYER_MOVE_DELAY * 2,
            // 70% of the player's speed
            Difficulty::Normal => (PLAYER_MOVE_DELAY as f32 / 0.7).floor() as u32,
            // Same speed as the player
            Difficulty::Fast => PLAYER_MOVE_DELAY,
        }
    }

    /// Next preset to the left on the menu (saturating)
    pub fn prev(&self) -> Self {
        match self {
            Difficulty::Slow | Difficulty::Normal => Difficulty::Slow,
            Difficulty::Fast => Difficulty::Normal,
        }
    }

    /// Next preset to the right on the menu (saturating)
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Slow => Difficulty::Normal,
            Difficulty::Normal | Difficulty::Fast => Difficulty::Fast,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty preselected on the menu
    pub difficulty: Difficulty,
    /// Particle pool capacity (0 disables effects)
    pub max_particles: usize,
    /// High score file (native only)
    pub high_score_path: String,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            max_particles: MAX_PARTICLES,
            high_score_path: format!("{}.json", crate::highscores::STORAGE_KEY),
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key / native file stem
    const STORAGE_KEY: &'static str = "tile_dash_settings";

    /// Env var naming the native settings file
    pub const PATH_ENV: &'static str = "TILE_DASH_SETTINGS";

    /// Largest particle pool a settings file may ask for
    pub const PARTICLE_LIMIT: usize = MAX_PARTICLES * 20;

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Clamp values that would make the game unplayable
    fn sanitized(mut self) -> Self {
        if self.max_particles > Self::PARTICLE_LIMIT {
            log::warn!(
                "max_particles {} too large, clamped to {}",
                self.max_particles,
                Self::PARTICLE_LIMIT
            );
            self.max_particles = Self::PARTICLE_LIMIT;
        }
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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

    /// Load settings from the file named by `TILE_DASH_SETTINGS`
    /// (default `tile_dash_settings.json`)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(&Self::native_path())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        self.save_to(&Self::native_path());
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save_to(&self, path: &std::path::Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Failed to save settings: {}", e),
            },
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn native_path() -> std::path::PathBuf {
        std::env::var(Self::PATH_ENV)
            .unwrap_or_else(|_| format!("{}.json", Self::STORAGE_KEY))
            .into()
    }
}
