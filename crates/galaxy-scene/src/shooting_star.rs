//! Shooting stars: streaks crossing right to left that wrap back in once they
//! leave the surface.
//!
//! Vertical motion is `speed * tan(angle)`, which grows without bound as the
//! angle nears ±π/2. Non-finite positions simply fail to draw until the respawn
//! check sends the star back in.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::sampling::SampleRange;
use crate::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub struct ShootingStar {
    pub position: Vec2,
    /// Pixels moved left per frame.
    pub speed: f32,
    /// Trail length in pixels.
    pub length: f32,
    /// Travel angle in radians. Random-walks every frame, never wrapped.
    pub angle: f32,
    pub color: Rgba,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShootingStarParams {
    pub count: usize,
    pub speed: SampleRange,
    pub length: SampleRange,
    /// Trail width, drawn fresh every frame.
    pub stroke_width: SampleRange,
    /// Per-frame angle change is uniform in `[-angle_jitter, angle_jitter)`.
    pub angle_jitter: f32,
}

impl Default for ShootingStarParams {
    fn default() -> Self {
        Self {
            count: 20,
            speed: SampleRange::new(2.0, 5.0),
            length: SampleRange::new(50.0, 100.0),
            stroke_width: SampleRange::new(1.0, 3.0),
            angle_jitter: 0.005,
        }
    }
}

impl ShootingStar {
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        params: &ShootingStarParams,
        viewport: Viewport,
    ) -> Self {
        let position = viewport.random_point(rng);
        let speed = params.speed.sample(rng);
        let length = params.length.sample(rng);
        let angle = rng.random::<f32>() * TAU;
        let color = Rgba::random_translucent(rng);
        Self {
            position,
            speed,
            length,
            angle,
            color,
        }
    }

    /// Far end of the trail.
    pub fn trail_end(&self) -> Vec2 {
        self.position + Vec2::from_angle(self.angle) * self.length
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, width: f32) {
        canvas.stroke_line(self.position, self.trail_end(), width, self.color);
    }

    /// Whether the star has left the surface and must re-enter.
    pub fn is_off_surface(&self, viewport: Viewport) -> bool {
        self.position.x < -self.length || self.position.y > viewport.height + self.length
    }

    /// Move one frame, drift the angle and respawn if off-surface.
    ///
    /// Returns `true` when the star was respawned.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Viewport,
        angle_jitter: f32,
    ) -> bool {
        self.position.x -= self.speed;
        self.position.y += self.speed * self.angle.tan();
        self.angle += rng.random::<f32>() * 2.0 * angle_jitter - angle_jitter;

        if self.is_off_surface(viewport) {
            self.respawn(rng, viewport);
            true
        } else {
            false
        }
    }

    /// Re-enter just past the right edge at a random height. Speed, length,
    /// color and angle are kept.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: Viewport) {
        self.position = Vec2::new(
            viewport.width + self.length,
            rng.random::<f32>() * viewport.height,
        );
        log::debug!(
            "Shooting star respawned at ({:.1}, {:.1}), angle {:.3}",
            self.position.x,
            self.position.y,
            self.angle
        );
    }
}

pub fn spawn_shooting_stars<R: Rng + ?Sized>(
    rng: &mut R,
    params: &ShootingStarParams,
    viewport: Viewport,
) -> Vec<ShootingStar> {
    (0..params.count)
        .map(|_| ShootingStar::spawn(rng, params, viewport))
        .collect()
}

/// Draw each streak with a freshly sampled width, then advance it.
///
/// Returns how many stars respawned this frame.
pub fn render_shooting_stars<C: Canvas + ?Sized, R: Rng + ?Sized>(
    stars: &mut [ShootingStar],
    canvas: &mut C,
    rng: &mut R,
    params: &ShootingStarParams,
    viewport: Viewport,
) -> usize {
    let mut respawned = 0;
    for star in stars {
        let width = params.stroke_width.sample(rng);
        star.draw(canvas, width);
        if star.advance(rng, viewport, params.angle_jitter) {
            respawned += 1;
        }
    }
    respawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingCanvas};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn streak(x: f32, y: f32, angle: f32) -> ShootingStar {
        ShootingStar {
            position: Vec2::new(x, y),
            speed: 3.0,
            length: 50.0,
            angle,
            color: Rgba::new(0.5, 0.5, 1.0, 0.5),
        }
    }

    #[test]
    fn test_trail_end() {
        let s = streak(10.0, 10.0, std::f32::consts::FRAC_PI_2);
        assert!((s.trail_end() - Vec2::new(10.0, 60.0)).length() < 1e-4);
    }

    #[test]
    fn test_advance_moves_left_by_speed() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut s = streak(400.0, 300.0, 0.0);
        let respawned = s.advance(&mut rng, Viewport::new(800.0, 600.0), 0.005);
        assert!(!respawned);
        assert_eq!(s.position.x, 397.0);
        // tan(0) = 0, so no vertical drift on the first step.
        assert_eq!(s.position.y, 300.0);
        assert!(s.angle.abs() <= 0.005);
    }

    #[test]
    fn test_off_left_edge_respawns_right() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let viewport = Viewport::new(800.0, 600.0);
        let mut s = streak(-60.0, 300.0, 0.0);
        assert!(s.advance(&mut rng, viewport, 0.005));
        assert_eq!(s.position.x, 850.0);
        assert!((0.0..600.0).contains(&s.position.y));
        assert_eq!(s.speed, 3.0);
        assert_eq!(s.length, 50.0);
    }

    #[test]
    fn test_off_bottom_edge_respawns() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let viewport = Viewport::new(800.0, 600.0);
        let mut s = streak(400.0, 660.0, 0.0);
        assert!(s.advance(&mut rng, viewport, 0.0));
        assert_eq!(s.position.x, 850.0);
    }

    #[test]
    fn test_no_jitter_keeps_angle() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut s = streak(400.0, 300.0, 0.3);
        s.advance(&mut rng, Viewport::new(800.0, 600.0), 0.0);
        assert_eq!(s.angle, 0.3);
    }

    #[test]
    fn test_render_pass_samples_width_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let params = ShootingStarParams::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut stars = spawn_shooting_stars(&mut rng, &params, viewport);
        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        for _ in 0..10 {
            render_shooting_stars(&mut stars, &mut canvas, &mut rng, &params, viewport);
        }
        assert_eq!(canvas.commands().len(), 200);
        for cmd in canvas.commands() {
            let DrawCommand::StrokeLine { width, .. } = cmd else {
                panic!("expected only lines, got {cmd:?}");
            };
            assert!(params.stroke_width.contains(*width));
        }
    }
}
