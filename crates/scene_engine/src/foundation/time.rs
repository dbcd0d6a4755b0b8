//! Frame timing
//!
//! The engine loop asks the [`Timer`] for the time elapsed since the previous
//! frame. A timer built with [`Timer::fixed`] reports the same step every
//! frame, which keeps headless runs and tests deterministic.

use std::time::Instant;

/// Frame timer supplying `delta_time` to the scene once per iteration
#[derive(Debug, Clone)]
pub struct Timer {
    last_frame: Instant,
    fixed_step: Option<f32>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a timer measuring wall-clock time between frames
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_step: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Create a timer that always reports `step` seconds per frame.
    ///
    /// Negative steps are clamped to zero.
    pub fn fixed(step: f32) -> Self {
        Self {
            fixed_step: Some(step.max(0.0)),
            ..Self::new()
        }
    }

    /// Advance to the next frame and return its delta time in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = match self.fixed_step {
            Some(step) => step,
            None => now.duration_since(self.last_frame).as_secs_f32(),
        };
        self.last_frame = now;
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Time of the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total time accumulated by [`tick`](Self::tick)
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_timer_reports_constant_step() {
        let mut timer = Timer::fixed(0.25);
        assert_relative_eq!(timer.tick(), 0.25);
        assert_relative_eq!(timer.tick(), 0.25);
        assert_eq!(timer.frame_count(), 2);
        assert_relative_eq!(timer.total_time(), 0.5);
        assert_relative_eq!(timer.average_fps(), 4.0);
    }

    #[test]
    fn test_negative_step_is_clamped() {
        let mut timer = Timer::fixed(-1.0);
        assert_relative_eq!(timer.tick(), 0.0);
    }

    #[test]
    fn test_wall_clock_delta_is_non_negative() {
        let mut timer = Timer::new();
        assert!(timer.tick() >= 0.0);
        assert_eq!(timer.frame_count(), 1);
    }
}
