//! The 2D drawing surface the scene paints onto.
//!
//! Mirrors the small subset of an immediate-mode canvas API the renderers need:
//! a current transform and global alpha with save/restore, and three fill/stroke
//! primitives. Implementations decide how pixels are produced.

use glam::{Affine2, Vec2};

use crate::color::Rgba;

/// Axis-aligned rectangle in local (pre-transform) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Square of side `2 * half_extent` centered on `center`.
    pub fn centered_square(center: Vec2, half_extent: f32) -> Self {
        Self {
            origin: center - Vec2::splat(half_extent),
            size: Vec2::splat(half_extent * 2.0),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.origin + self.size;
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.origin + self.size;
        [
            self.origin,
            Vec2::new(max.x, self.origin.y),
            max,
            Vec2::new(self.origin.x, max.y),
        ]
    }
}

/// Two-stop radial gradient from `inner` at `center` to `outer` at `radius`.
///
/// Beyond `radius` the outer color extends, as with a canvas radial gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    pub inner: Rgba,
    pub outer: Rgba,
}

impl RadialGradient {
    /// Premultiplied color at local point `p`, interpolated in premultiplied space.
    pub fn sample(&self, p: Vec2) -> [f32; 4] {
        let t = if self.radius > 0.0 {
            (p.distance(self.center) / self.radius).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let a = self.inner.premultiplied();
        let b = self.outer.premultiplied();
        std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
    }
}

/// A 2D drawing surface.
///
/// Geometry passed to the primitives is in local coordinates and is mapped
/// through the current transform. Colors are composited at the current global
/// alpha.
pub trait Canvas {
    /// Surface width in pixels.
    fn width(&self) -> f32;
    /// Surface height in pixels.
    fn height(&self) -> f32;

    /// Reset every pixel to transparent. Transform and alpha are untouched.
    fn clear(&mut self);

    /// Push the current transform and global alpha.
    fn save(&mut self);
    /// Pop the state pushed by the matching [`save`](Self::save).
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    fn set_global_alpha(&mut self, alpha: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn fill_rect_gradient(&mut self, rect: Rect, gradient: &RadialGradient);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// Transform and global alpha, plus the save/restore stack behind them.
///
/// Shared by the concrete canvases so they agree on transform semantics:
/// `translate`/`rotate` post-multiply, like an HTML canvas.
#[derive(Clone, Debug)]
pub struct CanvasState {
    pub transform: Affine2,
    pub global_alpha: f32,
    stack: Vec<(Affine2, f32)>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            global_alpha: 1.0,
            stack: Vec::new(),
        }
    }
}

impl CanvasState {
    pub fn save(&mut self) {
        self.stack.push((self.transform, self.global_alpha));
    }

    /// Restore the last saved state. An unbalanced restore is ignored.
    pub fn restore(&mut self) {
        if let Some((transform, alpha)) = self.stack.pop() {
            self.transform = transform;
            self.global_alpha = alpha;
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    pub fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.global_alpha = alpha.clamp(0.0, 1.0);
        }
    }

    /// Map a local point to device space.
    pub fn to_device(&self, p: Vec2) -> Vec2 {
        self.transform.transform_point2(p)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
