//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! title = Dokutsu
//!
//! [assets]
//! root = .
//! map_dir = map
//!
//! [game]
//! seed = 7
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::error::ConfigError;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_TITLE: &str = "Dokutsu";
const DEFAULT_ASSETS_ROOT: &str = ".";
const DEFAULT_MAP_DIR: &str = "map";
const DEFAULT_SEED: u64 = 7;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores window settings, asset locations and the RNG seed used for grass
/// variants.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in pixels. Also the camera view width.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Simulation ticks per second.
    pub target_fps: u32,
    pub title: String,
    /// Directory containing `graphics/` and the map directory.
    pub assets_root: PathBuf,
    /// Map directory, relative to `assets_root`.
    pub map_dir: PathBuf,
    pub seed: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            title: DEFAULT_TITLE.to_string(),
            assets_root: PathBuf::from(DEFAULT_ASSETS_ROOT),
            map_dir: PathBuf::from(DEFAULT_MAP_DIR),
            seed: DEFAULT_SEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|reason| ConfigError::Load {
                path: self.config_path.clone(),
                reason,
            })?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = (fps as u32).max(1);
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.assets_root = PathBuf::from(root);
        }
        if let Some(map_dir) = config.get("assets", "map_dir") {
            self.map_dir = PathBuf::from(map_dir);
        }

        // [game] section
        if let Some(seed) = config.getuint("game", "seed").ok().flatten() {
            self.seed = seed;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, assets={:?}, map={:?}, seed={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.assets_root,
            self.map_dir,
            self.seed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "title", Some(self.title.clone()));

        // [assets] section
        config.set(
            "assets",
            "root",
            Some(self.assets_root.to_string_lossy().into_owned()),
        );
        config.set(
            "assets",
            "map_dir",
            Some(self.map_dir.to_string_lossy().into_owned()),
        );

        // [game] section
        config.set("game", "seed", Some(self.seed.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::Save {
                path: self.config_path.clone(),
                reason: e.to_string(),
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Fixed simulation step in seconds.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Path of an asset relative to the assets root.
    pub fn asset_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.assets_root.join(relative)
    }

    pub fn map_path(&self) -> PathBuf {
        self.assets_root.join(&self.map_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_window() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (1280, 720));
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.map_path(), PathBuf::from("./map"));
    }

    #[test]
    fn ini_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let mut saved = GameConfig::with_path(&path);
        saved.window_width = 800;
        saved.window_height = 600;
        saved.target_fps = 30;
        saved.title = "Cave".to_string();
        saved.assets_root = PathBuf::from("/opt/game");
        saved.seed = 42;
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.frame_delta(), 1.0 / 30.0);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[window]\nwidth = 640\n").unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GameConfig::with_path(dir.path().join("absent.ini"));
        assert!(matches!(
            config.load_from_file(),
            Err(ConfigError::Load { .. })
        ));
        assert_eq!(config.window_width, DEFAULT_WINDOW_WIDTH);
    }
}
