//! `galaxy`: an animated procedural starfield.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! `galaxy --headless --frames 120 --output shot.png` renders without a window.
//! In the window, F5 reloads `config.ron`.

use std::process::ExitCode;

use clap::Parser;
use galaxy_app::window::{self, ConfigSource};
use galaxy_app::{AppError, PlatformDirs, SceneSettings, run_headless};
use galaxy_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve platform directories: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
    }

    let file_config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    let mut config = file_config.clone();
    config.apply_cli_overrides(&args);

    galaxy_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config directory: {}", dirs.config_dir.display());

    let source = ConfigSource {
        dir: dirs.config_dir,
        file: file_config,
        overrides: args,
    };
    match run(config, source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config, source: ConfigSource) -> Result<(), AppError> {
    let settings = SceneSettings::from_config(&config)?;

    let args = &source.overrides;
    if args.headless {
        let report = run_headless(&config, &settings, args.frames, &args.output)?;
        info!(
            "Headless run complete: {} frames, {} respawns",
            report.frames, report.respawns
        );
        return Ok(());
    }

    window::run(config, settings, source)
}
