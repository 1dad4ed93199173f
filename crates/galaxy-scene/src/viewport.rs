//! Surface dimensions as seen by the scene: center and random placement.

use glam::Vec2;
use rand::Rng;

/// Pixel dimensions of the drawing surface the scene is laid out against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the surface, the point planets orbit.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// A point uniform over `[0, width) × [0, height)`.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let x = rng.random::<f32>() * self.width;
        let y = rng.random::<f32>() * self.height;
        Vec2::new(x, y)
    }
}

impl From<(u32, u32)> for Viewport {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }
}
