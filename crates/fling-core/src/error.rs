//! Error types shared by the Fling engines.

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FlingError>;

/// Precondition violations and loading failures.
///
/// The engines never silently produce NaN or infinite positions: any input
/// that would lead there is rejected with one of these variants.
#[derive(Debug, Error)]
pub enum FlingError {
    /// Step increment must be a finite value greater than zero.
    #[error("invalid step increment {0}: must be finite and > 0")]
    InvalidStepIncrement(f64),

    /// Deceleration rate must be a finite value greater than one.
    #[error("invalid deceleration rate {0}: must be finite and > 1.0")]
    InvalidDecelRate(f64),

    /// Motion buffer needs room for at least one sample.
    #[error("invalid motion buffer capacity {0}: must be at least 1")]
    InvalidMotionBuffer(usize),

    /// Grid item with a negative or non-finite natural size.
    #[error("invalid size for item {index}: {width}x{height}")]
    InvalidItemSize {
        /// Position of the item in flow order.
        index: usize,
        /// Reported natural width.
        width: f32,
        /// Reported natural height.
        height: f32,
    },

    /// Negative or non-finite gap.
    #[error("invalid {axis} gap {value}: must be finite and >= 0")]
    InvalidGap {
        /// Which gap ("row" or "column").
        axis: &'static str,
        /// Offending value.
        value: f32,
    },

    /// Alignment factor outside `[0, 1]`.
    #[error("invalid {axis} alignment {value}: must be within [0, 1]")]
    InvalidAlignment {
        /// Which alignment ("row" or "column").
        axis: &'static str,
        /// Offending value.
        value: f32,
    },

    /// Negative or NaN available extent. Infinity means unbounded.
    #[error("invalid available {axis} {value}: must be >= 0")]
    InvalidExtent {
        /// Which axis ("width" or "height").
        axis: &'static str,
        /// Offending value.
        value: f32,
    },

    /// A style value had the wrong type for the requested property.
    #[error("style property '{property}' is not a {expected}")]
    StyleType {
        /// Property name.
        property: String,
        /// Expected value kind.
        expected: &'static str,
    },

    /// IO error while reading a style document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed style document.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
