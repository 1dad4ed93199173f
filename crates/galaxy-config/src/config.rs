//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the per-user configuration directory.
pub const APP_DIR_NAME: &str = "galaxy";

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Half-open `(min, max)` sampling range as written in `config.ron`.
pub type RangeConfig = (f32, f32);

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Scene population and attribute ranges.
    pub scene: SceneConfig,
    /// Presentation settings.
    pub render: RenderConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels. Also the headless frame width.
    pub width: u32,
    /// Window height in logical pixels. Also the headless frame height.
    pub height: u32,
    /// Start in borderless fullscreen.
    pub fullscreen: bool,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Everything needed to populate the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed seed for reproducible scenes. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Background stars.
    pub stars: StarConfig,
    /// Planets orbiting the surface center.
    pub planets: PlanetConfig,
    /// Static nebula glows.
    pub nebulae: NebulaConfig,
    /// Shooting stars crossing right to left.
    pub shooting_stars: ShootingStarConfig,
}

/// Star population settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarConfig {
    pub count: usize,
    pub radius: RangeConfig,
    /// Drift speed. Sampled and stored, never applied when drawing.
    pub speed: RangeConfig,
}

/// Planet population settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    pub count: usize,
    pub radius: RangeConfig,
    /// Orbital angular speed in radians per frame. The sign picks the direction.
    pub speed: RangeConfig,
    /// Inner bound of the orbit radius. The outer bound is half the surface width.
    pub min_orbit_radius: f32,
    pub rotation_speed: RangeConfig,
    /// CSS hex colors, e.g. `"#f0a"` or `"#ff00aa"`.
    pub palette: Vec<String>,
}

/// Nebula population settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NebulaConfig {
    pub count: usize,
    pub radius: RangeConfig,
    pub opacity: RangeConfig,
    pub palette: Vec<String>,
}

/// Shooting star population settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShootingStarConfig {
    pub count: usize,
    /// Horizontal pixels travelled per frame.
    pub speed: RangeConfig,
    /// Trail length in pixels.
    pub length: RangeConfig,
    /// Trail stroke width, re-sampled every frame.
    pub stroke_width: RangeConfig,
    /// Maximum per-frame change of the travel angle, in radians.
    pub angle_jitter: f32,
}

/// Presentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Color shown wherever nothing was drawn.
    pub background: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log frame statistics every N frames (0 = never).
    pub stats_interval_frames: u64,
    /// Append the measured FPS to the window title.
    pub show_fps: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            title: "Galaxy".to_string(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            stars: StarConfig::default(),
            planets: PlanetConfig::default(),
            nebulae: NebulaConfig::default(),
            shooting_stars: ShootingStarConfig::default(),
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 3000,
            radius: (1.0, 3.0),
            speed: (0.1, 0.5),
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            count: 10,
            radius: (20.0, 50.0),
            speed: (0.01, 0.05),
            min_orbit_radius: 100.0,
            rotation_speed: (-0.01, 0.01),
            palette: [
                "#f0a", "#a0f", "#0af", "#fa0", "#0fa", "#ff0", "#0ff", "#f80", "#8f0", "#0f8",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            count: 7,
            radius: (100.0, 300.0),
            opacity: (0.5, 0.9),
            palette: ["#f0a", "#a0f", "#0af", "#fa0", "#0fa", "#f80", "#ff0"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl Default for ShootingStarConfig {
    fn default() -> Self {
        Self {
            count: 20,
            speed: (2.0, 5.0),
            length: (50.0, 100.0),
            stroke_width: (1.0, 3.0),
            angle_jitter: 0.005,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "#000".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            stats_interval_frames: 300,
            show_fps: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// The per-user config directory, e.g. `~/.config/galaxy` on Linux.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|base| base.join(APP_DIR_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(false)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read `config.ron` and compare it with `self`.
    ///
    /// `self` should be the config as last read from disk, before CLI
    /// overrides. Returns `None` when the file still matches it.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(4))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("count: 3000"));
        assert!(ron_str.contains("\"#f0a\""));
    }

    #[test]
    fn test_defaults_match_scene_constants() {
        let scene = SceneConfig::default();
        assert_eq!(scene.stars.count, 3000);
        assert_eq!(scene.planets.count, 10);
        assert_eq!(scene.nebulae.count, 7);
        assert_eq!(scene.shooting_stars.count, 20);
        assert_eq!(scene.planets.palette.len(), 10);
        assert_eq!(scene.nebulae.palette.len(), 7);
        assert_eq!(scene.shooting_stars.length, (50.0, 100.0));
        assert!(scene.seed.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.scene.seed = Some(7);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.scene, SceneConfig::default());
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_partial_scene_section() {
        let ron_str = "(scene: (seed: Some(42), stars: (count: 5)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.scene.seed, Some(42));
        assert_eq!(config.scene.stars.count, 5);
        assert_eq!(config.scene.stars.radius, (1.0, 3.0));
        assert_eq!(config.scene.planets, PlanetConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.scene.planets.palette = vec!["#123456".to_string()];

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.scene.shooting_stars.count = 50;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().scene.shooting_stars.count, 50);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// scene tuning\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
