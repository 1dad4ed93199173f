//! Background stars: static white dots scattered over the surface.

use glam::Vec2;
use rand::Rng;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::sampling::SampleRange;
use crate::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub radius: f32,
    /// Drift speed. Carried with the star but never applied.
    pub speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StarParams {
    pub count: usize,
    pub radius: SampleRange,
    pub speed: SampleRange,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            count: 3000,
            radius: SampleRange::new(1.0, 3.0),
            speed: SampleRange::new(0.1, 0.5),
        }
    }
}

impl Star {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, params: &StarParams, viewport: Viewport) -> Self {
        let position = viewport.random_point(rng);
        let radius = params.radius.sample(rng);
        let speed = params.speed.sample(rng);
        Self {
            position,
            radius,
            speed,
        }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.fill_circle(self.position, self.radius, Rgba::WHITE);
    }
}

/// Populate `params.count` stars over `viewport`.
pub fn spawn_stars<R: Rng + ?Sized>(
    rng: &mut R,
    params: &StarParams,
    viewport: Viewport,
) -> Vec<Star> {
    (0..params.count)
        .map(|_| Star::spawn(rng, params, viewport))
        .collect()
}

/// Stars never move, so their pass is draw-only.
pub fn draw_stars<C: Canvas + ?Sized>(stars: &[Star], canvas: &mut C) {
    for star in stars {
        star.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingCanvas};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_spawn_respects_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let params = StarParams::default();
        let stars = spawn_stars(&mut rng, &params, Viewport::new(640.0, 480.0));
        assert_eq!(stars.len(), 3000);
        for star in &stars {
            assert!(params.radius.contains(star.radius));
            assert!(params.speed.contains(star.speed));
            assert!(star.position.x >= 0.0 && star.position.x < 640.0);
            assert!(star.position.y >= 0.0 && star.position.y < 480.0);
        }
    }

    #[test]
    fn test_draw_is_white_circle_at_position() {
        let star = Star {
            position: Vec2::new(3.0, 4.0),
            radius: 2.0,
            speed: 0.3,
        };
        let mut canvas = RecordingCanvas::new(10.0, 10.0);
        draw_stars(std::slice::from_ref(&star), &mut canvas);
        draw_stars(std::slice::from_ref(&star), &mut canvas);

        // Drawing twice paints the same circle: speed is never applied.
        let expected = DrawCommand::FillCircle {
            center: Vec2::new(3.0, 4.0),
            radius: 2.0,
            color: Rgba::WHITE,
            alpha: 1.0,
        };
        assert_eq!(canvas.commands(), &[expected.clone(), expected]);
    }
}
