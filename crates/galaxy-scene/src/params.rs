//! Validated, typed scene parameters built from [`SceneConfig`].

use galaxy_config::SceneConfig;

use crate::error::SceneError;
use crate::nebula::NebulaParams;
use crate::planet::PlanetParams;
use crate::sampling::Palette;
use crate::shooting_star::ShootingStarParams;
use crate::star::StarParams;

/// Everything the factories need, with palettes parsed into colors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneParams {
    pub seed: Option<u64>,
    pub stars: StarParams,
    pub planets: PlanetParams,
    pub nebulae: NebulaParams,
    pub shooting_stars: ShootingStarParams,
}

impl SceneParams {
    /// Parse palettes and convert ranges.
    ///
    /// Fails on a malformed hex color, or when a kind asks for entities but has
    /// no colors to give them.
    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        let planet_palette = Palette::from_hex(&config.planets.palette)?;
        require_colors("planet", config.planets.count, &planet_palette)?;
        let nebula_palette = Palette::from_hex(&config.nebulae.palette)?;
        require_colors("nebula", config.nebulae.count, &nebula_palette)?;

        Ok(Self {
            seed: config.seed,
            stars: StarParams {
                count: config.stars.count,
                radius: config.stars.radius.into(),
                speed: config.stars.speed.into(),
            },
            planets: PlanetParams {
                count: config.planets.count,
                radius: config.planets.radius.into(),
                speed: config.planets.speed.into(),
                min_orbit_radius: config.planets.min_orbit_radius,
                rotation_speed: config.planets.rotation_speed.into(),
                palette: planet_palette,
            },
            nebulae: NebulaParams {
                count: config.nebulae.count,
                radius: config.nebulae.radius.into(),
                opacity: config.nebulae.opacity.into(),
                palette: nebula_palette,
            },
            shooting_stars: ShootingStarParams {
                count: config.shooting_stars.count,
                speed: config.shooting_stars.speed.into(),
                length: config.shooting_stars.length.into(),
                stroke_width: config.shooting_stars.stroke_width.into(),
                angle_jitter: config.shooting_stars.angle_jitter,
            },
        })
    }
}

fn require_colors(kind: &'static str, count: usize, palette: &Palette) -> Result<(), SceneError> {
    if count > 0 && palette.is_empty() {
        return Err(SceneError::EmptyPalette { kind, count });
    }
    Ok(())
}
