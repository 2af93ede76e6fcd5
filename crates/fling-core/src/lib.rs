//! Core types for the Fling scrolling and layout engines.
//!
//! This crate provides the pieces shared by every engine:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Padding`]
//! - Scroll ranges: [`Adjustment`], [`AxisBounds`], [`ScrollTarget`]
//! - Pointer input: [`PointerEvent`], [`PointerGrab`], [`EventResponse`]
//! - Frame timing: [`FrameClock`], [`Timeline`], [`Easing`]
//! - Kinetic physics: [`MotionBuffer`], [`release_velocity`], [`Deceleration`]
//! - Styling: [`StyleStore`], [`Stylable`]
//! - Errors: [`FlingError`]

mod adjustment;
pub mod animation;
mod error;
mod event;
mod geometry;
pub mod kinetic;
pub mod style;

pub use adjustment::{Adjustment, AdjustmentPair, Axis, AxisBounds, ScrollTarget};
pub use animation::{Direction, Easing, Frame, FrameClock, Timeline, FRAME_INTERVAL};
pub use error::{FlingError, Result};
pub use event::{EventResponse, MouseButton, PointerEvent, PointerGrab};
pub use geometry::{Padding, Point, Rect, Size};
pub use kinetic::{
    release_velocity, DecelStatus, Deceleration, KineticConfig, MotionBuffer, MotionSample,
    ScrollMode, Velocity,
};
pub use style::{Selector, StylePriority, StyleSheet, StyleStore, StyleValue, Stylable};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    // ==========================================================================
    // CROSS-MODULE TESTS
    // ==========================================================================

    mod kinetic_style_tests {
        use super::*;

        #[test]
        fn test_kinetic_config_from_style() {
            let mut store = StyleStore::new();
            store
                .load_from_str(
                    "types: { FingerScroll: { scroll-mode: kinetic, decel-rate: 1.25, motion-buffer: 5 } }",
                    StylePriority::UserAgent,
                )
                .unwrap();

            let config = KineticConfig::from_style(&store, &Selector::new("FingerScroll")).unwrap();
            assert_eq!(config.mode, ScrollMode::Kinetic);
            assert_eq!(config.decel_rate, 1.25);
            assert_eq!(config.motion_buffer, 5);
        }

        #[test]
        fn test_kinetic_config_from_empty_style() {
            let store = StyleStore::new();
            let config = KineticConfig::from_style(&store, &Selector::new("FingerScroll")).unwrap();
            assert_eq!(config, KineticConfig::default());
        }

        #[test]
        fn test_kinetic_config_rejects_bad_rate() {
            let mut store = StyleStore::new();
            store
                .load_from_str(
                    "types: { FingerScroll: { decel-rate: 0.9 } }",
                    StylePriority::Author,
                )
                .unwrap();
            assert!(matches!(
                KineticConfig::from_style(&store, &Selector::new("FingerScroll")),
                Err(FlingError::InvalidDecelRate(_))
            ));
        }

        #[test]
        fn test_kinetic_config_rejects_unknown_mode() {
            let mut store = StyleStore::new();
            store
                .load_from_str(
                    "types: { FingerScroll: { scroll-mode: inertial } }",
                    StylePriority::Author,
                )
                .unwrap();
            let err = KineticConfig::from_style(&store, &Selector::new("FingerScroll")).unwrap_err();
            assert!(matches!(err, FlingError::StyleType { ref property, .. } if property == "scroll-mode"));
        }

        #[test]
        fn test_kinetic_config_rejects_fractional_buffer() {
            let mut store = StyleStore::new();
            store
                .load_from_str(
                    "types: { FingerScroll: { scroll-mode: push, motion-buffer: 2.7 } }",
                    StylePriority::Author,
                )
                .unwrap();
            let err = KineticConfig::from_style(&store, &Selector::new("FingerScroll")).unwrap_err();
            assert!(matches!(err, FlingError::StyleType { ref property, .. } if property == "motion-buffer"));

            store
                .load_from_str(
                    "types: { FingerScroll: { motion-buffer: 4 } }",
                    StylePriority::Author,
                )
                .unwrap();
            let config = KineticConfig::from_style(&store, &Selector::new("FingerScroll")).unwrap();
            assert_eq!(config.motion_buffer, 4);
            assert_eq!(config.mode, ScrollMode::Push);
        }
    }

    mod physics_tests {
        use super::*;

        #[test]
        fn test_release_then_decelerate() {
            let base = Instant::now();
            let mut buffer = MotionBuffer::new(3).unwrap();
            for (i, x) in [300.0f32, 280.0, 260.0].into_iter().enumerate() {
                buffer.push(MotionSample::new(
                    Point::new(x, 0.0),
                    base + Duration::from_millis(16 * i as u64),
                ));
            }
            let release = release_velocity(&buffer, Point::new(240.0, 0.0), base + Duration::from_millis(48))
                .unwrap();
            assert!(release.dx > 0.0);

            let mut target = AdjustmentPair::new(
                Adjustment::new(0.0, 2000.0, 100.0, 200.0).unwrap().with_value(60.0),
                Adjustment::new(0.0, 2000.0, 100.0, 200.0).unwrap(),
            );
            let mut decel = Deceleration::plan(release, 1.1, &target).unwrap();
            while decel.advance(FRAME_INTERVAL, &mut target) == DecelStatus::Moving {}

            target.snap(Axis::Horizontal).unwrap();
            assert_eq!(target.value(Axis::Horizontal), 100.0);
            assert_eq!(target.value(Axis::Vertical), 0.0);
        }
    }
}
