//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Galaxy command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "galaxy", about = "Animated procedural starfield")]
pub struct CliArgs {
    /// Window (or headless frame) width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window (or headless frame) height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Seed for a reproducible scene.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of background stars.
    #[arg(long)]
    pub stars: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render without a window and write the last frame as PNG.
    #[arg(long)]
    pub headless: bool,

    /// Frames to simulate in headless mode.
    #[arg(long, default_value_t = 1)]
    pub frames: u64,

    /// Output image for headless mode.
    #[arg(long, default_value = "galaxy.png")]
    pub output: PathBuf,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(seed) = args.seed {
            self.scene.seed = Some(seed);
        }
        if let Some(count) = args.stars {
            self.scene.stars.count = count;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            seed: Some(99),
            stars: Some(10),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.scene.seed, Some(99));
        assert_eq!(config.scene.stars.count, 10);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.scene.planets.count, 10);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_headless_flags() {
        let args = CliArgs::parse_from([
            "galaxy",
            "--headless",
            "--frames",
            "120",
            "--output",
            "out.png",
            "--width",
            "800",
        ]);
        assert!(args.headless);
        assert_eq!(args.frames, 120);
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.width, Some(800));
    }

    #[test]
    fn test_cli_headless_defaults() {
        let args = CliArgs::parse_from(["galaxy"]);
        assert!(!args.headless);
        assert_eq!(args.frames, 1);
        assert_eq!(args.output, PathBuf::from("galaxy.png"));
    }
}
