//! CPU rasterizer implementing [`Canvas`] over an owned pixel buffer.
//!
//! Pixels are premultiplied RGBA in `[0, 1]`, composited source-over. Circle and
//! line edges are anti-aliased analytically from the distance to the edge.

use glam::Vec2;

use crate::canvas::{Canvas, CanvasState, RadialGradient, Rect};
use crate::color::Rgba;

/// An owned, premultiplied RGBA f32 frame buffer.
#[derive(Clone, Debug)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
    state: CanvasState,
}

/// Inclusive-exclusive pixel bounds `(x0, y0, x1, y1)`.
type Span = (usize, usize, usize, usize);

/// Pixels in a `width` × `height` buffer, computed in `usize`.
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl Pixmap {
    /// Create a transparent pixmap. Zero dimensions are clamped to 1.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; pixel_count(width, height)],
            state: CanvasState::default(),
        }
    }

    pub fn width_px(&self) -> u32 {
        self.width
    }

    pub fn height_px(&self) -> u32 {
        self.height
    }

    /// Premultiplied color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// Flatten over an opaque `background` into straight-alpha RGBA8 bytes,
    /// row-major, suitable for texture upload or PNG encoding.
    pub fn to_rgba8(&self, background: Rgba) -> Vec<u8> {
        let bg = background.premultiplied();
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            let inv = 1.0 - p[3];
            let out: [f32; 4] = std::array::from_fn(|i| p[i] + bg[i] * inv);
            let alpha = out[3];
            for channel in &out[..3] {
                let straight = if alpha > 0.0 { channel / alpha } else { 0.0 };
                bytes.push(to_u8(straight));
            }
            bytes.push(to_u8(alpha));
        }
        bytes
    }

    /// Composite premultiplied `src` at `(x, y)` scaled by `coverage` and global alpha.
    fn blend(&mut self, x: usize, y: usize, src: [f32; 4], coverage: f32) {
        let k = coverage * self.state.global_alpha;
        if k <= 0.0 {
            return;
        }
        let dst = &mut self.pixels[y * self.width as usize + x];
        let inv = 1.0 - src[3] * k;
        for i in 0..4 {
            dst[i] = src[i] * k + dst[i] * inv;
        }
    }

    /// Pixels whose centers may fall inside `[min, max]`, clipped to the surface.
    fn span(&self, min: Vec2, max: Vec2) -> Option<Span> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn pixel_center(x: usize, y: usize) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

impl Canvas for Pixmap {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.translate(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.state.rotate(angle);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.set_global_alpha(alpha);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        // Transforms are rigid (translate/rotate), so the radius is unchanged.
        let c = self.state.to_device(center);
        let reach = Vec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.span(c - reach, c + reach) else {
            return;
        };
        let src = color.premultiplied();
        for y in y0..y1 {
            for x in x0..x1 {
                let d = pixel_center(x, y).distance(c);
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                self.blend(x, y, src, coverage);
            }
        }
    }

    fn fill_rect_gradient(&mut self, rect: Rect, gradient: &RadialGradient) {
        let corners = rect.corners().map(|p| self.state.to_device(p));
        let min = corners.iter().fold(Vec2::splat(f32::INFINITY), |a, p| a.min(*p));
        let max = corners
            .iter()
            .fold(Vec2::splat(f32::NEG_INFINITY), |a, p| a.max(*p));
        let Some((x0, y0, x1, y1)) = self.span(min, max) else {
            return;
        };
        let to_local = self.state.transform.inverse();
        for y in y0..y1 {
            for x in x0..x1 {
                let local = to_local.transform_point2(pixel_center(x, y));
                if rect.contains(local) {
                    let src = gradient.sample(local);
                    self.blend(x, y, src, 1.0);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let a = self.state.to_device(from);
        let b = self.state.to_device(to);
        let axis = b - a;
        let length = axis.length();
        // Butt caps: a zero-length segment paints nothing.
        if !length.is_finite() || length <= f32::EPSILON {
            return;
        }
        let dir = axis / length;
        let half = width / 2.0;
        let reach = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.span(a.min(b) - reach, a.max(b) + reach) else {
            return;
        };
        let src = color.premultiplied();
        for y in y0..y1 {
            for x in x0..x1 {
                let local = pixel_center(x, y) - a;
                let along = local.dot(dir);
                let across = local.perp_dot(dir).abs();
                let coverage = (half - across + 0.5).clamp(0.0, 1.0)
                    * (along + 0.5).clamp(0.0, 1.0)
                    * (length - along + 0.5).clamp(0.0, 1.0);
                self.blend(x, y, src, coverage);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_pixel_count_does_not_wrap_u32() {
        assert_eq!(pixel_count(640, 480), 307_200);
        assert_eq!(pixel_count(70_000, 70_000), 4_900_000_000);
    }

    fn approx(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_new_pixmap_is_transparent() {
        let pixmap = Pixmap::new(4, 3);
        assert_eq!(pixmap.pixels().len(), 12);
        assert!(pixmap.pixels().iter().all(|p| *p == [0.0; 4]));
    }

    #[test]
    fn test_zero_size_clamped() {
        let pixmap = Pixmap::new(0, 0);
        assert_eq!((pixmap.width_px(), pixmap.height_px()), (1, 1));
    }

    #[test]
    fn test_fill_circle_covers_center_not_corner() {
        let mut pixmap = Pixmap::new(20, 20);
        pixmap.fill_circle(Vec2::new(10.0, 10.0), 3.0, Rgba::WHITE);
        assert!(approx(pixmap.pixel(10, 10).unwrap(), [1.0; 4]));
        assert_eq!(pixmap.pixel(0, 0).unwrap(), [0.0; 4]);
        assert_eq!(pixmap.pixel(10, 16).unwrap(), [0.0; 4]);
    }

    #[test]
    fn test_transform_moves_circle() {
        let mut pixmap = Pixmap::new(20, 20);
        pixmap.save();
        pixmap.translate(Vec2::new(15.0, 5.0));
        pixmap.fill_circle(Vec2::ZERO, 2.0, Rgba::WHITE);
        pixmap.restore();
        assert!(pixmap.pixel(15, 5).unwrap()[3] > 0.9);
        assert_eq!(pixmap.pixel(0, 0).unwrap(), [0.0; 4]);
    }

    #[test]
    fn test_global_alpha_scales_coverage() {
        let mut pixmap = Pixmap::new(10, 10);
        pixmap.set_global_alpha(0.5);
        pixmap.fill_circle(Vec2::new(5.0, 5.0), 3.0, Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert!(approx(pixmap.pixel(5, 5).unwrap(), [0.5, 0.0, 0.0, 0.5]));
    }

    #[test]
    fn test_source_over_blending() {
        let mut pixmap = Pixmap::new(10, 10);
        pixmap.fill_circle(Vec2::new(5.0, 5.0), 4.0, Rgba::new(0.0, 0.0, 1.0, 1.0));
        pixmap.fill_circle(Vec2::new(5.0, 5.0), 4.0, Rgba::new(1.0, 0.0, 0.0, 0.5));
        assert!(approx(pixmap.pixel(5, 5).unwrap(), [0.5, 0.0, 0.5, 1.0]));
    }

    #[test]
    fn test_gradient_rect_is_strongest_at_center() {
        let mut pixmap = Pixmap::new(40, 40);
        let center = Vec2::new(20.0, 20.0);
        let gradient = RadialGradient {
            center,
            radius: 15.0,
            inner: Rgba::new(0.0, 1.0, 0.0, 1.0),
            outer: Rgba::TRANSPARENT,
        };
        pixmap.fill_rect_gradient(Rect::centered_square(center, 15.0), &gradient);
        let middle = pixmap.pixel(20, 20).unwrap();
        let edge = pixmap.pixel(20, 33).unwrap();
        assert!(middle[3] > 0.9, "center alpha {}", middle[3]);
        assert!(edge[3] < middle[3]);
        assert_eq!(pixmap.pixel(2, 2).unwrap(), [0.0; 4]);
    }

    #[test]
    fn test_stroke_line_paints_along_segment_only() {
        let mut pixmap = Pixmap::new(30, 10);
        pixmap.stroke_line(Vec2::new(5.0, 5.0), Vec2::new(25.0, 5.0), 2.0, Rgba::WHITE);
        assert!(pixmap.pixel(15, 4).unwrap()[3] > 0.9);
        assert_eq!(pixmap.pixel(15, 8).unwrap(), [0.0; 4]);
        assert_eq!(pixmap.pixel(1, 4).unwrap(), [0.0; 4]);
        assert_eq!(pixmap.pixel(28, 4).unwrap(), [0.0; 4]);
    }

    #[test]
    fn test_non_finite_geometry_is_skipped() {
        let mut pixmap = Pixmap::new(10, 10);
        pixmap.stroke_line(Vec2::new(5.0, 5.0), Vec2::new(5.0, f32::INFINITY), 2.0, Rgba::WHITE);
        pixmap.fill_circle(Vec2::new(f32::NAN, 5.0), 3.0, Rgba::WHITE);
        assert!(pixmap.pixels().iter().all(|p| *p == [0.0; 4]));
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut pixmap = Pixmap::new(10, 10);
        pixmap.fill_circle(Vec2::new(5.0, 5.0), 3.0, Rgba::WHITE);
        pixmap.clear();
        assert!(pixmap.pixels().iter().all(|p| *p == [0.0; 4]));
    }

    #[test]
    fn test_to_rgba8_composites_over_background() {
        let mut pixmap = Pixmap::new(2, 1);
        pixmap.fill_circle(Vec2::new(0.5, 0.5), 0.5, Rgba::WHITE);
        let bytes = pixmap.to_rgba8(Rgba::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..4], &[255, 255, 255, 255]);
        assert_eq!(&bytes[4..8], &[0, 0, 255, 255]);
    }
}
