//! Frame clock, timelines and easing.
//!
//! The engines never own a real clock. The host subscribes to its own
//! per-frame source while a [`FrameClock`] reports running, and feeds the
//! elapsed wall time back in. [`Timeline`] is the stock implementation.

use std::time::Duration;

/// Duration of one simulated frame at 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Per-frame callback source, seen from the engine side.
///
/// `start` asks the host to begin delivering ticks; `stop` asks it to stop.
/// After `stop` returns the engine must not receive further ticks, and it
/// ignores any that arrive anyway.
pub trait FrameClock {
    /// Begin delivering ticks.
    fn start(&mut self);

    /// Stop delivering ticks.
    fn stop(&mut self);

    /// Whether ticks are currently wanted.
    fn is_running(&self) -> bool;
}

// =============================================================================
// Easing
// =============================================================================

/// Easing curves applied to linear timeline progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Sine ease in (slow start)
    EaseInSine,
    /// Sine ease out (slow end)
    EaseOutSine,
    /// Quadratic ease in and out
    EaseInOutQuad,
}

impl Easing {
    /// Apply the curve to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInSine => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Self::EaseOutSine => (t * std::f64::consts::FRAC_PI_2).sin(),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

// =============================================================================
// Timeline
// =============================================================================

/// Direction a timeline plays in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// From 0 towards the duration
    #[default]
    Forward,
    /// From the duration back towards 0
    Backward,
}

/// A single delivered tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Wall time since the previous tick
    pub delta: Duration,
    /// Linear progress in `[0, 1]` (always 0 for unbounded timelines)
    pub progress: f64,
    /// The timeline reached its end on this tick
    pub completed: bool,
}

/// Frame clock with an optional fixed duration and a play direction.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    duration: Option<Duration>,
    direction: Direction,
    elapsed: Duration,
    running: bool,
    frames: u64,
}

impl Timeline {
    /// Timeline that completes after `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    /// Timeline that runs until stopped.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Configured duration, if any.
    #[must_use]
    pub const fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Current direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Change direction without moving the playhead.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Move the playhead to the start for the current direction.
    pub fn rewind(&mut self) {
        self.elapsed = match (self.direction, self.duration) {
            (Direction::Backward, Some(duration)) => duration,
            _ => Duration::ZERO,
        };
        self.frames = 0;
    }

    /// Ticks delivered since the last rewind.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(duration) if !duration.is_zero() => {
                (self.elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
            }
            Some(_) => match self.direction {
                Direction::Forward => 1.0,
                Direction::Backward => 0.0,
            },
            None => 0.0,
        }
    }

    /// Whether the playhead sits at the end for the current direction.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match (self.duration, self.direction) {
            (Some(duration), Direction::Forward) => self.elapsed >= duration,
            (Some(_), Direction::Backward) => self.elapsed.is_zero(),
            (None, _) => false,
        }
    }

    /// Deliver a tick. Returns `None` while stopped.
    pub fn advance(&mut self, delta: Duration) -> Option<Frame> {
        if !self.running {
            return None;
        }
        self.frames += 1;

        let completed = match (self.duration, self.direction) {
            (Some(duration), Direction::Forward) => {
                self.elapsed = (self.elapsed + delta).min(duration);
                self.elapsed >= duration
            }
            (Some(_), Direction::Backward) => {
                self.elapsed = self.elapsed.saturating_sub(delta);
                self.elapsed.is_zero()
            }
            (None, _) => {
                self.elapsed += delta;
                false
            }
        };
        if completed {
            self.running = false;
        }

        Some(Frame {
            delta,
            progress: self.progress(),
            completed,
        })
    }
}

impl FrameClock for Timeline {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
