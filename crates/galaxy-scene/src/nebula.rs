//! Static nebula glows: radial gradients fading to transparent.

use glam::Vec2;
use rand::Rng;

use crate::canvas::{Canvas, RadialGradient, Rect};
use crate::color::Rgba;
use crate::sampling::{Palette, SampleRange};
use crate::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub struct Nebula {
    pub position: Vec2,
    pub radius: f32,
    pub color: Rgba,
    /// Global alpha the glow is composited at.
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NebulaParams {
    pub count: usize,
    pub radius: SampleRange,
    pub opacity: SampleRange,
    pub palette: Palette,
}

impl Default for NebulaParams {
    fn default() -> Self {
        Self {
            count: 7,
            radius: SampleRange::new(100.0, 300.0),
            opacity: SampleRange::new(0.5, 0.9),
            palette: Palette::new(
                [
                    (255, 0, 170),
                    (170, 0, 255),
                    (0, 170, 255),
                    (255, 170, 0),
                    (0, 255, 170),
                    (255, 136, 0),
                    (255, 255, 0),
                ]
                .map(|(r, g, b)| Rgba::from_rgb8(r as f32, g as f32, b as f32, 1.0))
                .to_vec(),
            ),
        }
    }
}

impl Nebula {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, params: &NebulaParams, viewport: Viewport) -> Self {
        let position = viewport.random_point(rng);
        let radius = params.radius.sample(rng);
        let color = params.palette.pick(rng).unwrap_or(Rgba::WHITE);
        let opacity = params.opacity.sample(rng);
        Self {
            position,
            radius,
            color,
            opacity,
        }
    }

    pub fn gradient(&self) -> RadialGradient {
        RadialGradient {
            center: self.position,
            radius: self.radius,
            inner: self.color,
            outer: Rgba::TRANSPARENT,
        }
    }

    /// Fill the bounding square at `opacity`, then put global alpha back to 1.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.set_global_alpha(self.opacity);
        canvas.fill_rect_gradient(
            Rect::centered_square(self.position, self.radius),
            &self.gradient(),
        );
        canvas.set_global_alpha(1.0);
    }
}

pub fn spawn_nebulae<R: Rng + ?Sized>(
    rng: &mut R,
    params: &NebulaParams,
    viewport: Viewport,
) -> Vec<Nebula> {
    (0..params.count)
        .map(|_| Nebula::spawn(rng, params, viewport))
        .collect()
}

pub fn draw_nebulae<C: Canvas + ?Sized>(nebulae: &[Nebula], canvas: &mut C) {
    for nebula in nebulae {
        nebula.draw(canvas);
    }
}
