//! Configuration system for Galaxy.
//!
//! Runtime settings persist to disk as RON, can be overridden from the command
//! line via clap, and tolerate missing or unknown fields.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    APP_DIR_NAME, CONFIG_FILE_NAME, Config, DebugConfig, NebulaConfig, PlanetConfig, RangeConfig,
    RenderConfig, SceneConfig, ShootingStarConfig, StarConfig, WindowConfig,
};
pub use error::ConfigError;
