//! Windowless rendering: run the scene for a number of frames and save the
//! last one as a PNG.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use galaxy_config::Config;
use galaxy_scene::{Pixmap, Scene, Viewport};
use tracing::info;

use crate::error::AppError;
use crate::settings::SceneSettings;

/// Summary of a headless run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeadlessReport {
    pub frames: u64,
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub respawns: u64,
}

/// Render `frames` frames (at least one) at the configured window size and
/// write the final frame to `output`.
pub fn run_headless(
    config: &Config,
    settings: &SceneSettings,
    frames: u64,
    output: &Path,
) -> Result<HeadlessReport, AppError> {
    let mut pixmap = Pixmap::new(config.window.width, config.window.height);
    let (width, height) = (pixmap.width_px(), pixmap.height_px());
    let mut scene = Scene::new(&settings.params, Viewport::from((width, height)));

    let frames = frames.max(1);
    scene.run_frames(&mut pixmap, frames);

    let rgba = pixmap.to_rgba8(settings.background);
    write_png(output, width, height, &rgba)?;
    info!(
        "Wrote frame {} ({}x{}, seed {}) to {}",
        frames,
        width,
        height,
        scene.seed(),
        output.display()
    );

    Ok(HeadlessReport {
        frames,
        seed: scene.seed(),
        width,
        height,
        respawns: scene.respawn_count(),
    })
}

/// Encode tightly packed RGBA8 pixels as an 8-bit RGBA PNG.
pub fn write_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    writer.finish()?;
    Ok(())
}
