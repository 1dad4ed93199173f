//! Procedural animated starfield: stars, orbiting planets, nebula glows and shooting stars,
//! drawn onto any [`Canvas`].

pub mod canvas;
pub mod color;
pub mod error;
pub mod nebula;
pub mod params;
pub mod pixmap;
pub mod planet;
pub mod recording;
pub mod sampling;
pub mod scene;
pub mod shooting_star;
pub mod star;
pub mod viewport;

pub use canvas::{Canvas, CanvasState, RadialGradient, Rect};
pub use color::Rgba;
pub use error::SceneError;
pub use nebula::{Nebula, NebulaParams};
pub use params::SceneParams;
pub use pixmap::Pixmap;
pub use planet::{Planet, PlanetParams, wrap_angle};
pub use recording::{DrawCommand, RecordingCanvas};
pub use sampling::{Palette, SampleRange};
pub use scene::{Scene, SceneEntities};
pub use shooting_star::{ShootingStar, ShootingStarParams};
pub use star::{Star, StarParams};
pub use viewport::Viewport;
