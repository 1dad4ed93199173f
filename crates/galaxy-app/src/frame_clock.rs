//! Per-redraw frame timing.
//!
//! The scene advances exactly one step per displayed frame, so there is no
//! simulation accumulator: the clock only measures how long each frame took,
//! flags slow frames and keeps a smoothed FPS figure for the title bar and the
//! periodic stats line.

use std::time::Instant;
use tracing::warn;

/// Frames slower than this (250 ms, i.e. under 4 FPS) are reported.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Weight of the newest sample in the FPS moving average.
pub const FPS_SMOOTHING: f64 = 0.1;

pub struct FrameClock {
    previous_time: Instant,
    frame_count: u64,
    slow_frames: u64,
    last_frame_time: f64,
    fps: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            frame_count: 0,
            slow_frames: 0,
            last_frame_time: 0.0,
            fps: 0.0,
        }
    }

    /// Measure wall time since the previous tick, record it, then run one frame.
    pub fn tick(&mut self, frame_fn: impl FnOnce()) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time);
        frame_fn();
    }

    /// Record a frame that took `frame_time` seconds.
    pub fn advance(&mut self, frame_time: f64) {
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            self.slow_frames += 1;
        }

        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.fps = if self.fps == 0.0 {
                instant_fps
            } else {
                self.fps + (instant_fps - self.fps) * FPS_SMOOTHING
            };
        }

        self.last_frame_time = frame_time;
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames that exceeded [`MAX_FRAME_TIME`].
    pub fn slow_frames(&self) -> u64 {
        self.slow_frames
    }

    /// Duration of the most recent frame, in seconds.
    pub fn last_frame_time(&self) -> f64 {
        self.last_frame_time
    }

    /// Smoothed frames per second. Zero until a frame with non-zero duration.
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_sets_fps_directly() {
        let mut clock = FrameClock::new();
        clock.advance(1.0 / 50.0);
        assert!((clock.fps() - 50.0).abs() < 1e-9);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_fps_converges_to_steady_rate() {
        let mut clock = FrameClock::new();
        clock.advance(1.0 / 30.0);
        for _ in 0..200 {
            clock.advance(1.0 / 60.0);
        }
        assert!((clock.fps() - 60.0).abs() < 0.01, "fps {}", clock.fps());
    }

    #[test]
    fn test_slow_frames_counted() {
        let mut clock = FrameClock::new();
        clock.advance(0.016);
        clock.advance(0.5);
        clock.advance(MAX_FRAME_TIME);
        assert_eq!(clock.slow_frames(), 1);
        assert_eq!(clock.frame_count(), 3);
        assert_eq!(clock.last_frame_time(), MAX_FRAME_TIME);
    }

    #[test]
    fn test_zero_duration_frame_keeps_fps() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.fps(), 0.0);
        clock.advance(0.02);
        clock.advance(0.0);
        assert!((clock.fps() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_tick_runs_frame_once() {
        let mut clock = FrameClock::new();
        let mut runs = 0;
        clock.tick(|| runs += 1);
        clock.tick(|| runs += 1);
        assert_eq!(runs, 2);
        assert_eq!(clock.frame_count(), 2);
    }
}
