//! Frame pacing
//!
//! Turns the host's irregular frame callbacks into a 60 Hz tick stream.

use crate::consts::{FPS_WINDOW_MS, FRAME_INTERVAL_MS, TARGET_FPS};

/// Result of offering a timestamp to the pacer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    /// Whether the simulation should advance this callback
    pub should_advance: bool,
    /// Fires counted over the last completed one-second window
    pub fps: u32,
}

/// Fixed-rate gate over wall-clock timestamps (milliseconds)
#[derive(Debug, Clone)]
pub struct Pacer {
    interval_ms: f64,
    /// Last fire time, kept on the interval grid
    reference_ms: f64,
    /// Deadline for publishing the current window's count
    window_end_ms: f64,
    frames_in_window: u32,
    fps: u32,
}

impl Pacer {
    /// Create a pacer whose first fire is due one interval after `start_ms`
    pub fn new(start_ms: f64) -> Self {
        Self {
            interval_ms: FRAME_INTERVAL_MS,
            reference_ms: start_ms,
            window_end_ms: start_ms + FPS_WINDOW_MS,
            frames_in_window: 0,
            fps: TARGET_FPS,
        }
    }

    /// Offer the current time. Never blocks; only says whether a tick is due.
    pub fn tick(&mut self, now_ms: f64) -> Pace {
        let elapsed = now_ms - self.reference_ms;
        if elapsed < self.interval_ms {
            return Pace {
                should_advance: false,
                fps: self.fps,
            };
        }

        // Stay on the grid: carry the remainder instead of snapping to now
        let excess = elapsed % self.interval_ms;
        self.reference_ms = now_ms - excess;

        self.frames_in_window += 1;
        if self.window_end_ms < now_ms {
            self.window_end_ms = now_ms + FPS_WINDOW_MS;
            self.fps = self.frames_in_window;
            self.frames_in_window = 0;
        }

        Pace {
            should_advance: true,
            fps: self.fps,
        }
    }

    /// Latest FPS estimate
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
