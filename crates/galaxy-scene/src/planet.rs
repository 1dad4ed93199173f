//! Planets orbiting the surface center.
//!
//! Each planet is drawn through a rotate/translate/counter-rotate frame: the
//! frame is turned by the orbit angle, pushed out by the orbit radius and turned
//! back, so the body traces a circle without spinning. The angle then advances by
//! the planet's angular speed and wraps into `[0, 2π)`.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::sampling::{Palette, SampleRange};
use crate::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    /// Spawn position. The orbit, not this, decides where the planet is drawn.
    pub position: Vec2,
    pub radius: f32,
    /// Orbital angular speed in radians per frame.
    pub speed: f32,
    pub orbit_radius: f32,
    /// Current orbit angle, always in `[0, 2π)`.
    pub orbit_angle: f32,
    pub color: Rgba,
    /// Accumulated spin. Tracked but never drawn.
    pub rotation: f32,
    pub rotation_speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlanetParams {
    pub count: usize,
    pub radius: SampleRange,
    pub speed: SampleRange,
    /// Inner orbit bound. The outer bound is half the viewport width.
    pub min_orbit_radius: f32,
    pub rotation_speed: SampleRange,
    pub palette: Palette,
}

impl Default for PlanetParams {
    fn default() -> Self {
        Self {
            count: 10,
            radius: SampleRange::new(20.0, 50.0),
            speed: SampleRange::new(0.01, 0.05),
            min_orbit_radius: 100.0,
            rotation_speed: SampleRange::new(-0.01, 0.01),
            palette: Palette::new(
                [
                    (255, 0, 170),
                    (170, 0, 255),
                    (0, 170, 255),
                    (255, 170, 0),
                    (0, 255, 170),
                    (255, 255, 0),
                    (0, 255, 255),
                    (255, 136, 0),
                    (136, 255, 0),
                    (0, 255, 136),
                ]
                .map(|(r, g, b)| Rgba::from_rgb8(r as f32, g as f32, b as f32, 1.0))
                .to_vec(),
            ),
        }
    }
}

impl PlanetParams {
    /// Orbit radius range for a viewport. Collapses to the inner bound when the
    /// viewport is too narrow to leave room beyond it.
    pub fn orbit_range(&self, viewport: Viewport) -> SampleRange {
        let outer = (viewport.width / 2.0).max(self.min_orbit_radius);
        SampleRange::new(self.min_orbit_radius, outer)
    }
}

impl Planet {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, params: &PlanetParams, viewport: Viewport) -> Self {
        let position = viewport.random_point(rng);
        let radius = params.radius.sample(rng);
        let speed = params.speed.sample(rng);
        let orbit_radius = params.orbit_range(viewport).sample(rng);
        let orbit_angle = wrap_angle(rng.random::<f32>() * TAU);
        let color = params.palette.pick(rng).unwrap_or(Rgba::WHITE);
        let rotation_speed = params.rotation_speed.sample(rng);
        Self {
            position,
            radius,
            speed,
            orbit_radius,
            orbit_angle,
            color,
            rotation: 0.0,
            rotation_speed,
        }
    }

    /// Device-space center when drawn around `center` at the current angle.
    pub fn orbit_position(&self, center: Vec2) -> Vec2 {
        center + Vec2::from_angle(self.orbit_angle) * self.orbit_radius
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, center: Vec2) {
        canvas.save();
        canvas.translate(center);
        canvas.rotate(self.orbit_angle);
        canvas.translate(Vec2::new(self.orbit_radius, 0.0));
        canvas.rotate(-self.orbit_angle);
        canvas.fill_circle(Vec2::ZERO, self.radius, self.color);
        canvas.restore();
    }

    /// Advance one frame along the orbit.
    pub fn advance(&mut self) {
        self.orbit_angle = wrap_angle(self.orbit_angle + self.speed);
        self.rotation += self.rotation_speed;
    }
}

/// Reduce `angle` into `[0, 2π)`, for either direction of travel.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

pub fn spawn_planets<R: Rng + ?Sized>(
    rng: &mut R,
    params: &PlanetParams,
    viewport: Viewport,
) -> Vec<Planet> {
    (0..params.count)
        .map(|_| Planet::spawn(rng, params, viewport))
        .collect()
}

/// Draw each planet at its current angle, then advance it.
pub fn render_planets<C: Canvas + ?Sized>(planets: &mut [Planet], canvas: &mut C, center: Vec2) {
    for planet in planets {
        planet.draw(canvas, center);
        planet.advance();
    }
}
