//! A [`Canvas`] that records draw calls instead of rasterizing them.

use glam::Vec2;

use crate::canvas::{Canvas, CanvasState, RadialGradient, Rect};
use crate::color::Rgba;

/// One recorded primitive, with geometry already mapped to device space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        alpha: f32,
    },
    FillRectGradient {
        /// Device-space corners, in the order of [`Rect::corners`].
        corners: [Vec2; 4],
        /// Device-space gradient center.
        center: Vec2,
        radius: f32,
        inner: Rgba,
        outer: Rgba,
        alpha: f32,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
        alpha: f32,
    },
}

impl DrawCommand {
    pub fn is_circle(&self) -> bool {
        matches!(self, Self::FillCircle { .. })
    }

    pub fn is_gradient(&self) -> bool {
        matches!(self, Self::FillRectGradient { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Self::StrokeLine { .. })
    }
}

#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    state: CanvasState,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            state: CanvasState::default(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop everything recorded so far. The transform stack is untouched.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current save/restore depth. Zero after every balanced pass.
    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    pub fn global_alpha(&self) -> f32 {
        self.state.global_alpha
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
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
        self.commands.push(DrawCommand::FillCircle {
            center: self.state.to_device(center),
            radius,
            color,
            alpha: self.state.global_alpha,
        });
    }

    fn fill_rect_gradient(&mut self, rect: Rect, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::FillRectGradient {
            corners: rect.corners().map(|p| self.state.to_device(p)),
            center: self.state.to_device(gradient.center),
            radius: gradient.radius,
            inner: gradient.inner,
            outer: gradient.outer,
            alpha: self.state.global_alpha,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine {
            from: self.state.to_device(from),
            to: self.state.to_device(to),
            width,
            color,
            alpha: self.state.global_alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_device_space() {
        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        canvas.save();
        canvas.translate(Vec2::new(10.0, 20.0));
        canvas.set_global_alpha(0.25);
        canvas.fill_circle(Vec2::new(1.0, 1.0), 4.0, Rgba::WHITE);
        canvas.restore();
        canvas.stroke_line(Vec2::ZERO, Vec2::X, 2.0, Rgba::BLACK);

        assert_eq!(
            canvas.commands()[0],
            DrawCommand::FillCircle {
                center: Vec2::new(11.0, 21.0),
                radius: 4.0,
                color: Rgba::WHITE,
                alpha: 0.25,
            }
        );
        let DrawCommand::StrokeLine { from, alpha, .. } = canvas.commands()[1] else {
            panic!("expected a line, got {:?}", canvas.commands()[1]);
        };
        assert_eq!(from, Vec2::ZERO);
        assert_eq!(alpha, 1.0);
        assert_eq!(canvas.depth(), 0);
    }

    #[test]
    fn test_take_commands_empties_log() {
        let mut canvas = RecordingCanvas::new(10.0, 10.0);
        canvas.clear();
        assert_eq!(canvas.take_commands(), vec![DrawCommand::Clear]);
        assert!(canvas.commands().is_empty());
    }
}
