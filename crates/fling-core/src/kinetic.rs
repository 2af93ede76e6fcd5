//! Kinetic scroll physics.
//!
//! Three pieces, used in order by the finger-scroll state machine:
//!
//! 1. [`MotionBuffer`] keeps the last few pointer samples of a drag.
//! 2. [`release_velocity`] turns those samples into a per-frame velocity.
//! 3. [`Deceleration`] plans a geometric decay that comes to rest exactly on
//!    a step boundary and integrates it on a fixed 1/60 s timestep.
//!
//! Plan derivation, with `x` the per-frame speed and `y` the decay rate:
//! travel after `n` frames is `x * (1 + 1/y + ... + 1/y^n)`, i.e.
//! `x * a` with `a = (1 - y^-(n+1)) / (1 - 1/y)`. Solving `x / y^n < 1`
//! gives `n = ln(x) / ln(y)`; fifteen extra frames soften the stop. Given
//! the distance `d` to the next step boundary, the launch speed is `d / a`.

use crate::adjustment::{Axis, ScrollTarget};
use crate::error::{FlingError, Result};
use crate::geometry::Point;
use crate::style::{StyleStore, Stylable};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Length of one simulated frame in milliseconds.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Release speeds below this (in units per frame) are bumped up to it.
pub const MIN_RELEASE_SPEED: f64 = 2.0;

/// Frames added to `ln(x) / ln(y)` so the stop is not abrupt.
pub const SETTLE_FRAMES: f64 = 15.0;

/// Default motion buffer capacity.
pub const DEFAULT_MOTION_BUFFER: usize = 3;

/// Default per-frame decay divisor.
pub const DEFAULT_DECEL_RATE: f64 = 1.1;

/// How a finger scroller reacts to a released drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollMode {
    /// Content follows the pointer and snaps on release
    #[default]
    Push,
    /// Content keeps moving after release and decelerates
    Kinetic,
}

/// Finger-scroll tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct KineticConfig {
    /// Push or kinetic scrolling
    pub mode: ScrollMode,
    /// Per-frame velocity divisor, strictly greater than 1
    pub decel_rate: f64,
    /// Number of pointer samples averaged at release, at least 1
    pub motion_buffer: usize,
}

impl Default for KineticConfig {
    fn default() -> Self {
        Self {
            mode: ScrollMode::Push,
            decel_rate: DEFAULT_DECEL_RATE,
            motion_buffer: DEFAULT_MOTION_BUFFER,
        }
    }
}

impl KineticConfig {
    /// Kinetic mode with default tuning.
    #[must_use]
    pub fn kinetic() -> Self {
        Self {
            mode: ScrollMode::Kinetic,
            ..Self::default()
        }
    }

    /// Set the scroll mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ScrollMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the deceleration rate.
    #[must_use]
    pub const fn with_decel_rate(mut self, decel_rate: f64) -> Self {
        self.decel_rate = decel_rate;
        self
    }

    /// Set the motion buffer capacity.
    #[must_use]
    pub const fn with_motion_buffer(mut self, capacity: usize) -> Self {
        self.motion_buffer = capacity;
        self
    }

    /// Reject unusable tuning.
    pub fn validate(&self) -> Result<()> {
        validate_decel_rate(self.decel_rate)?;
        if self.motion_buffer == 0 {
            return Err(FlingError::InvalidMotionBuffer(0));
        }
        Ok(())
    }

    /// Read `scroll-mode`, `decel-rate` and `motion-buffer` from a style
    /// store, keeping defaults for anything unset.
    pub fn from_style(store: &StyleStore, stylable: &dyn Stylable) -> Result<Self> {
        let mut config = Self::default();
        if let Some(mode) = store.text(stylable, "scroll-mode")? {
            config.mode = match mode {
                "push" => ScrollMode::Push,
                "kinetic" => ScrollMode::Kinetic,
                other => {
                    tracing::warn!(value = other, "unknown scroll-mode");
                    return Err(FlingError::StyleType {
                        property: "scroll-mode".to_string(),
                        expected: "scroll mode (push or kinetic)",
                    });
                }
            };
        }
        if let Some(rate) = store.number(stylable, "decel-rate")? {
            config.decel_rate = rate;
        }
        if let Some(capacity) = store.number(stylable, "motion-buffer")? {
            if !(capacity.is_finite() && capacity >= 0.0 && capacity.fract() == 0.0) {
                tracing::warn!(value = capacity, "motion-buffer is not a whole number");
                return Err(FlingError::StyleType {
                    property: "motion-buffer".to_string(),
                    expected: "whole number",
                });
            }
            config.motion_buffer = capacity as usize;
        }
        config.validate()?;
        Ok(config)
    }
}

fn validate_decel_rate(rate: f64) -> Result<()> {
    if rate.is_finite() && rate > 1.0 {
        Ok(())
    } else {
        Err(FlingError::InvalidDecelRate(rate))
    }
}

// =============================================================================
// Motion buffer
// =============================================================================

/// A pointer position recorded during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Local position
    pub position: Point,
    /// When it was sampled
    pub timestamp: Instant,
}

impl MotionSample {
    /// Create a sample.
    #[must_use]
    pub const fn new(position: Point, timestamp: Instant) -> Self {
        Self {
            position,
            timestamp,
        }
    }
}

/// Fixed-capacity ring of the most recent motion samples.
#[derive(Debug, Clone)]
pub struct MotionBuffer {
    samples: Vec<MotionSample>,
    capacity: usize,
    head: usize,
}

impl MotionBuffer {
    /// Create an empty buffer; capacity must be at least 1.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(FlingError::InvalidMotionBuffer(capacity));
        }
        Ok(Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        })
    }

    /// Maximum number of samples kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.head = 0;
    }

    /// Change the capacity. Held samples are discarded.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(FlingError::InvalidMotionBuffer(capacity));
        }
        self.capacity = capacity;
        self.samples = Vec::with_capacity(capacity);
        self.head = 0;
        Ok(())
    }

    /// Append a sample, overwriting the oldest once full.
    pub fn push(&mut self, sample: MotionSample) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.head] = sample;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Most recently pushed sample.
    #[must_use]
    pub fn latest(&self) -> Option<&MotionSample> {
        if self.samples.len() < self.capacity {
            self.samples.last()
        } else {
            self.samples.get((self.head + self.capacity - 1) % self.capacity)
        }
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &MotionSample> + '_ {
        let len = self.samples.len();
        (0..len).map(move |i| &self.samples[(self.head + i) % len])
    }

    /// Mean position and mean timestamp of the held samples.
    #[must_use]
    pub fn average(&self) -> Option<MotionSample> {
        let base = self.iter().map(|s| s.timestamp).min()?;
        let count = self.samples.len() as f64;

        let (mut x, mut y, mut offset) = (0.0f64, 0.0f64, Duration::ZERO);
        for sample in self.iter() {
            x += f64::from(sample.position.x);
            y += f64::from(sample.position.y);
            offset += sample.timestamp.duration_since(base);
        }

        let divisor = u32::try_from(self.samples.len()).unwrap_or(u32::MAX);
        Some(MotionSample::new(
            Point::new((x / count) as f32, (y / count) as f32),
            base + offset / divisor,
        ))
    }
}

// =============================================================================
// Release velocity
// =============================================================================

/// Per-frame velocity in scroll units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Horizontal units per frame
    pub dx: f64,
    /// Vertical units per frame
    pub dy: f64,
}

impl Velocity {
    /// Create a velocity.
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Component along an axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.dx,
            Axis::Vertical => self.dy,
        }
    }

    /// Larger of the two magnitudes.
    #[must_use]
    pub fn max_speed(&self) -> f64 {
        self.dx.abs().max(self.dy.abs())
    }
}

fn bump_min_speed(v: f64) -> f64 {
    if v.abs() < MIN_RELEASE_SPEED {
        if v > 0.0 {
            MIN_RELEASE_SPEED
        } else {
            -MIN_RELEASE_SPEED
        }
    } else {
        v
    }
}

/// Velocity at release from the buffered drag samples.
///
/// `v = (average_position - release_position) / frac`, with `frac` the
/// time since the average sample expressed in 1/60 s frames. Releases that
/// share a timestamp with the samples count as one frame. Each component is
/// raised to at least [`MIN_RELEASE_SPEED`] in magnitude, keeping its sign
/// (zero becomes negative).
#[must_use]
pub fn release_velocity(buffer: &MotionBuffer, release: Point, at: Instant) -> Option<Velocity> {
    let average = buffer.average()?;
    let elapsed_ms = at.saturating_duration_since(average.timestamp).as_secs_f64() * 1000.0;
    let frac = if elapsed_ms > 0.0 {
        elapsed_ms / FRAME_MS
    } else {
        1.0
    };

    let dx = f64::from(average.position.x - release.x) / frac;
    let dy = f64::from(average.position.y - release.y) / frac;
    Some(Velocity::new(bump_min_speed(dx), bump_min_speed(dy)))
}

// =============================================================================
// Deceleration
// =============================================================================

/// Geometric sum factor `a = (1 - y^-(n+1)) / (1 - 1/y)`.
#[must_use]
pub fn travel_factor(decel_rate: f64, frames: f64) -> f64 {
    (1.0 - decel_rate.powf(-(frames + 1.0))) / (1.0 - 1.0 / decel_rate)
}

/// Frames until a speed of `speed` decays below one unit, plus settling.
#[must_use]
pub fn frames_to_rest(speed: f64, decel_rate: f64) -> f64 {
    speed.ln() / decel_rate.ln() + SETTLE_FRAMES
}

/// Whether a deceleration is still moving after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecelStatus {
    /// Keep delivering ticks
    Moving,
    /// Both axes are done or the frame budget is spent
    Finished,
}

/// In-flight kinetic deceleration.
#[derive(Debug, Clone, PartialEq)]
pub struct Deceleration {
    velocity: Velocity,
    decel_rate: f64,
    accumulated_ms: f64,
    frames_run: u32,
    frame_budget: u32,
    planned_frames: f64,
}

impl Deceleration {
    /// Plan a deceleration from a release velocity so that every axis comes
    /// to rest on the next step boundary in its direction of travel.
    pub fn plan(release: Velocity, decel_rate: f64, target: &dyn ScrollTarget) -> Result<Self> {
        validate_decel_rate(decel_rate)?;

        let speed = release.max_speed().max(MIN_RELEASE_SPEED);
        let planned_frames = frames_to_rest(speed, decel_rate);
        let factor = travel_factor(decel_rate, planned_frames);

        let mut launch = [0.0; 2];
        for (slot, axis) in launch.iter_mut().zip(Axis::BOTH) {
            let value = target.value(axis);
            let rest = target
                .bounds(axis)
                .step_toward(value, release.along(axis) > 0.0)?;
            *slot = (rest - value) / factor;
        }

        Ok(Self {
            velocity: Velocity::new(launch[0], launch[1]),
            decel_rate,
            accumulated_ms: 0.0,
            frames_run: 0,
            frame_budget: planned_frames.floor() as u32 + 1,
            planned_frames,
        })
    }

    /// Current per-frame velocity.
    #[must_use]
    pub const fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// `n` from the plan (fractional).
    #[must_use]
    pub const fn planned_frames(&self) -> f64 {
        self.planned_frames
    }

    /// Maximum number of simulated frames.
    #[must_use]
    pub const fn frame_budget(&self) -> u32 {
        self.frame_budget
    }

    /// Simulated frames run so far.
    #[must_use]
    pub const fn frames_run(&self) -> u32 {
        self.frames_run
    }

    /// Feed elapsed wall time; runs as many fixed 1/60 s steps as it covers.
    pub fn advance(&mut self, delta: Duration, target: &mut dyn ScrollTarget) -> DecelStatus {
        self.accumulated_ms += delta.as_secs_f64() * 1000.0;

        while self.accumulated_ms >= FRAME_MS {
            if self.step(target) == DecelStatus::Finished {
                return DecelStatus::Finished;
            }
            self.accumulated_ms -= FRAME_MS;
        }
        DecelStatus::Moving
    }

    /// One simulated frame: move, decay, then check travel limits.
    pub fn step(&mut self, target: &mut dyn ScrollTarget) -> DecelStatus {
        target.scroll_by(Axis::Horizontal, self.velocity.dx);
        target.scroll_by(Axis::Vertical, self.velocity.dy);
        self.velocity.dx /= self.decel_rate;
        self.velocity.dy /= self.decel_rate;
        self.frames_run += 1;

        tracing::trace!(
            frame = self.frames_run,
            dx = self.velocity.dx,
            dy = self.velocity.dy,
            "deceleration step"
        );

        let moving = Axis::BOTH.iter().any(|&axis| {
            target
                .bounds(axis)
                .can_travel(target.value(axis), self.velocity.along(axis))
        });
        if !moving || self.frames_run >= self.frame_budget {
            DecelStatus::Finished
        } else {
            DecelStatus::Moving
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustment::{Adjustment, AdjustmentPair};
    use crate::animation::FRAME_INTERVAL;
    use proptest::prelude::*;

    fn sample(x: f32, y: f32, base: Instant, ms: u64) -> MotionSample {
        MotionSample::new(Point::new(x, y), base + Duration::from_millis(ms))
    }

    fn target(step: f64, h: f64, v: f64) -> AdjustmentPair {
        AdjustmentPair::new(
            Adjustment::new(0.0, 10_000.0, step, 100.0)
                .unwrap()
                .with_value(h),
            Adjustment::new(0.0, 10_000.0, step, 100.0)
                .unwrap()
                .with_value(v),
        )
    }

    #[test]
    fn test_config_defaults() {
        let config = KineticConfig::default();
        assert_eq!(config.mode, ScrollMode::Push);
        assert_eq!(config.decel_rate, 1.1);
        assert_eq!(config.motion_buffer, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            KineticConfig::kinetic().with_decel_rate(1.0).validate(),
            Err(FlingError::InvalidDecelRate(_))
        ));
        assert!(matches!(
            KineticConfig::kinetic().with_motion_buffer(0).validate(),
            Err(FlingError::InvalidMotionBuffer(0))
        ));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(MotionBuffer::new(0).is_err());
        let mut buffer = MotionBuffer::new(2).unwrap();
        assert!(buffer.set_capacity(0).is_err());
        assert_eq!(buffer.capacity(), 2);
    }

    #[test]
    fn test_buffer_overwrites_oldest() {
        let base = Instant::now();
        let mut buffer = MotionBuffer::new(3).unwrap();
        for i in 0..5u16 {
            buffer.push(sample(f32::from(i), 0.0, base, u64::from(i)));
        }
        assert_eq!(buffer.len(), 3);
        let xs: Vec<f32> = buffer.iter().map(|s| s.position.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(buffer.latest().unwrap().position.x, 4.0);
    }

    #[test]
    fn test_buffer_latest_before_full() {
        let base = Instant::now();
        let mut buffer = MotionBuffer::new(4).unwrap();
        assert!(buffer.latest().is_none());
        buffer.push(sample(1.0, 1.0, base, 0));
        buffer.push(sample(2.0, 2.0, base, 1));
        assert_eq!(buffer.latest().unwrap().position, Point::new(2.0, 2.0));
    }

    #[test]
    fn test_buffer_clear() {
        let mut buffer = MotionBuffer::new(2).unwrap();
        buffer.push(sample(1.0, 1.0, Instant::now(), 0));
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.average().is_none());
    }

    #[test]
    fn test_average() {
        let base = Instant::now();
        let mut buffer = MotionBuffer::new(3).unwrap();
        buffer.push(sample(0.0, 30.0, base, 0));
        buffer.push(sample(10.0, 60.0, base, 10));
        buffer.push(sample(20.0, 90.0, base, 20));

        let avg = buffer.average().unwrap();
        assert_eq!(avg.position, Point::new(10.0, 60.0));
        assert_eq!(avg.timestamp, base + Duration::from_millis(10));
    }

    #[test]
    fn test_release_velocity_per_frame() {
        let base = Instant::now();
        let mut buffer = MotionBuffer::new(3).unwrap();
        buffer.push(sample(100.0, 50.0, base, 0));
        buffer.push(sample(90.0, 50.0, base, 10));
        buffer.push(sample(80.0, 50.0, base, 20));

        // Average sits at x=90, t=10ms; release at x=60 one frame later.
        let at = base + Duration::from_millis(10) + FRAME_INTERVAL;
        let v = release_velocity(&buffer, Point::new(60.0, 50.0), at).unwrap();
        assert!((v.dx - 30.0).abs() < 1e-3, "dx = {}", v.dx);
        // No vertical motion is bumped to the minimum, negative.
        assert_eq!(v.dy, -MIN_RELEASE_SPEED);
    }

    #[test]
    fn test_release_velocity_minimum_keeps_sign() {
        let base = Instant::now();
        let mut buffer = MotionBuffer::new(1).unwrap();
        buffer.push(sample(10.5, 9.5, base, 0));
        let at = base + FRAME_INTERVAL;
        let v = release_velocity(&buffer, Point::new(10.0, 10.0), at).unwrap();
        assert_eq!(v.dx, MIN_RELEASE_SPEED);
        assert_eq!(v.dy, -MIN_RELEASE_SPEED);
    }

    #[test]
    fn test_release_velocity_same_instant_is_finite() {
        let base = Instant::now();
        let mut buffer = MotionBuffer::new(2).unwrap();
        buffer.push(sample(50.0, 0.0, base, 0));
        let v = release_velocity(&buffer, Point::new(0.0, 0.0), base).unwrap();
        assert!(v.dx.is_finite());
        assert_eq!(v.dx, 50.0);
    }

    #[test]
    fn test_release_velocity_empty_buffer() {
        let buffer = MotionBuffer::new(3).unwrap();
        assert!(release_velocity(&buffer, Point::ORIGIN, Instant::now()).is_none());
    }

    #[test]
    fn test_frames_to_rest_matches_formula() {
        let n = frames_to_rest(20.0, 1.1);
        assert!((n - (20f64.ln() / 1.1f64.ln() + 15.0)).abs() < 1e-12);
        assert!((n - 46.43).abs() < 0.01);
    }

    #[test]
    fn test_plan_rejects_bad_rate() {
        let t = target(50.0, 10.0, 10.0);
        assert!(Deceleration::plan(Velocity::new(20.0, 2.0), 1.0, &t).is_err());
        assert!(Deceleration::plan(Velocity::new(20.0, 2.0), f64::NAN, &t).is_err());
    }

    #[test]
    fn test_plan_launch_speed_reaches_next_step() {
        let t = target(50.0, 10.0, 70.0);
        let decel = Deceleration::plan(Velocity::new(20.0, -5.0), 1.1, &t).unwrap();
        let a = travel_factor(1.1, decel.planned_frames());
        assert!((decel.velocity().dx * a - 40.0).abs() < 1e-9);
        assert!((decel.velocity().dy * a + 20.0).abs() < 1e-9);
        assert_eq!(decel.frame_budget(), 47);
    }

    #[test]
    fn test_decelerates_onto_step_boundary() {
        let mut t = target(50.0, 10.0, 70.0);
        let mut decel = Deceleration::plan(Velocity::new(20.0, -5.0), 1.1, &t).unwrap();

        let mut previous = decel.velocity();
        let mut status = DecelStatus::Moving;
        while status == DecelStatus::Moving {
            status = decel.advance(FRAME_INTERVAL, &mut t);
            let v = decel.velocity();
            assert!(v.dx.abs() < previous.dx.abs());
            assert!(v.dy.abs() < previous.dy.abs());
            previous = v;
            assert!(decel.frames_run() <= decel.frame_budget());
        }

        t.snap(Axis::Horizontal).unwrap();
        t.snap(Axis::Vertical).unwrap();
        assert_eq!(t.value(Axis::Horizontal), 50.0);
        assert_eq!(t.value(Axis::Vertical), 50.0);
    }

    #[test]
    fn test_stops_at_lower_bound() {
        let mut t = target(50.0, 0.0, 0.0);
        let mut decel = Deceleration::plan(Velocity::new(-30.0, -30.0), 1.1, &t).unwrap();
        let status = decel.advance(FRAME_INTERVAL, &mut t);
        assert_eq!(status, DecelStatus::Finished);
        assert_eq!(decel.frames_run(), 1);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut t = target(50.0, 10.0, 10.0);
        let mut decel = Deceleration::plan(Velocity::new(20.0, 20.0), 1.1, &t).unwrap();

        decel.advance(Duration::from_millis(10), &mut t);
        assert_eq!(decel.frames_run(), 0);
        assert_eq!(t.value(Axis::Horizontal), 10.0);

        decel.advance(Duration::from_millis(10), &mut t);
        assert_eq!(decel.frames_run(), 1);

        decel.advance(Duration::from_millis(50), &mut t);
        assert_eq!(decel.frames_run(), 4);
    }

    proptest! {
        #[test]
        fn prop_buffer_never_exceeds_capacity(capacity in 1usize..8, pushes in 0usize..32) {
            let base = Instant::now();
            let mut buffer = MotionBuffer::new(capacity).unwrap();
            for i in 0..pushes {
                buffer.push(sample(i as f32, 0.0, base, i as u64));
                prop_assert!(buffer.len() <= capacity);
            }
            if pushes > 0 {
                prop_assert_eq!(buffer.latest().unwrap().position.x, (pushes - 1) as f32);
            }
        }

        #[test]
        fn prop_deceleration_terminates_within_budget(
            speed in 2.0f64..200.0,
            rate in 1.05f64..2.0,
            start in 1.0f64..9000.0,
            step in 1.0f64..400.0,
            positive in any::<bool>(),
        ) {
            let mut t = target(step, start, start);
            let release = if positive { Velocity::new(speed, speed) } else { Velocity::new(-speed, -speed) };
            let mut decel = Deceleration::plan(release, rate, &t).unwrap();
            let budget = decel.frame_budget();

            let frame = FRAME_INTERVAL;
            let mut ticks = 0u32;
            while decel.advance(frame, &mut t) == DecelStatus::Moving {
                ticks += 1;
                prop_assert!(ticks <= budget + 1);
            }
            prop_assert!(decel.frames_run() <= budget);
        }
    }
}
