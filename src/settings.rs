//! Game settings and preferences
//!
//! Persisted separately from the leaderboard. Gameplay constants are not
//! settings; see [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceError};
use crate::platform::Storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show FPS counter
    pub show_fps: bool,
    /// Pre-fills the name entry after a game over
    pub last_player_name: String,
    /// Let the demo controller drive the paddle
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: true,
            last_player_name: String::new(),
            autopilot: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "brickout_settings";

    /// Load settings from storage
    pub fn load(storage: &dyn Storage) -> Self {
        persistence::load_or_default(storage, Self::STORAGE_KEY)
    }

    /// Save settings to storage
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), PersistenceError> {
        persistence::save(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Remember the name used for the last saved score
    pub fn remember_player(&mut self, name: &str) {
        self.last_player_name = name.trim().to_string();
    }
}
