//! Resolve the parts of [`Config`] that need parsing before anything runs.

use galaxy_config::Config;
use galaxy_scene::{Rgba, SceneError, SceneParams};

/// Scene parameters and background color, validated up front so a bad palette
/// or color fails at startup instead of mid-frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSettings {
    pub params: SceneParams,
    pub background: Rgba,
}

impl SceneSettings {
    pub fn from_config(config: &Config) -> Result<Self, SceneError> {
        Ok(Self {
            params: SceneParams::from_config(&config.scene)?,
            background: Rgba::from_hex(&config.render.background)?,
        })
    }
}
