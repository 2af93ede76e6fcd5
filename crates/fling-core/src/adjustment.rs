//! One-dimensional range adjustments and the scroll target they form.
//!
//! A scroll target is the pair of ranges a scrollable view exposes to the
//! kinetic engine. The engine only reads bounds and reads/writes values;
//! everything else (repainting, notifying listeners) is the host's business.

use crate::error::{FlingError, Result};
use serde::{Deserialize, Serialize};

/// Scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Left/right
    Horizontal,
    /// Up/down
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Self; 2] = [Self::Horizontal, Self::Vertical];
}

/// Static description of a range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    /// Smallest value
    pub lower: f64,
    /// Largest value plus one page
    pub upper: f64,
    /// Quantization unit positions snap to at rest
    pub step_increment: f64,
    /// Visible extent
    pub page_size: f64,
}

impl AxisBounds {
    /// Create bounds; the step increment is validated.
    pub fn new(lower: f64, upper: f64, step_increment: f64, page_size: f64) -> Result<Self> {
        let bounds = Self {
            lower,
            upper,
            step_increment,
            page_size,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Check the step increment is usable for snapping.
    pub fn validate(&self) -> Result<()> {
        if self.step_increment.is_finite() && self.step_increment > 0.0 {
            Ok(())
        } else {
            Err(FlingError::InvalidStepIncrement(self.step_increment))
        }
    }

    /// Largest reachable value (`upper - page_size`, never below `lower`).
    #[must_use]
    pub fn max_value(&self) -> f64 {
        (self.upper - self.page_size).max(self.lower)
    }

    /// Clamp a value into the reachable range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.max_value())
    }

    /// Nearest step boundary: `round((value - lower) / step) * step + lower`.
    pub fn snap(&self, value: f64) -> Result<f64> {
        self.validate()?;
        let steps = ((value - self.lower) / self.step_increment).round();
        Ok(steps.mul_add(self.step_increment, self.lower))
    }

    /// Next step boundary in the direction of travel: ceiling when moving
    /// towards larger values, floor otherwise.
    pub fn step_toward(&self, value: f64, positive: bool) -> Result<f64> {
        self.validate()?;
        let offset = (value - self.lower) / self.step_increment;
        let steps = if positive {
            offset.ceil()
        } else {
            offset.floor()
        };
        Ok(steps.mul_add(self.step_increment, self.lower))
    }

    /// Whether motion with the given signed velocity can still make progress.
    #[must_use]
    pub fn can_travel(&self, value: f64, velocity: f64) -> bool {
        (velocity > 0.0 && value < self.upper - self.page_size)
            || (velocity < 0.0 && value > self.lower)
    }
}

/// The pair of ranges a scrollable view exposes.
///
/// Implementations are expected to clamp values written through
/// [`ScrollTarget::set_value`] into their own range.
pub trait ScrollTarget {
    /// Current value of an axis.
    fn value(&self, axis: Axis) -> f64;

    /// Set the value of an axis.
    fn set_value(&mut self, axis: Axis, value: f64);

    /// Bounds of an axis.
    fn bounds(&self, axis: Axis) -> AxisBounds;

    /// Move an axis by a relative amount.
    fn scroll_by(&mut self, axis: Axis, delta: f64) {
        let value = self.value(axis);
        self.set_value(axis, value + delta);
    }

    /// Snap an axis to its nearest step boundary.
    fn snap(&mut self, axis: Axis) -> Result<()> {
        let snapped = self.bounds(axis).snap(self.value(axis))?;
        self.set_value(axis, snapped);
        Ok(())
    }
}

/// Concrete clamping range adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    value: f64,
    bounds: AxisBounds,
}

impl Adjustment {
    /// Create an adjustment at `lower`.
    pub fn new(lower: f64, upper: f64, step_increment: f64, page_size: f64) -> Result<Self> {
        let bounds = AxisBounds::new(lower, upper, step_increment, page_size)?;
        Ok(Self {
            value: lower,
            bounds,
        })
    }

    /// Builder-style initial value (clamped).
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.set_value(value);
        self
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Set the value, clamped into range.
    pub fn set_value(&mut self, value: f64) {
        self.value = self.bounds.clamp(value);
    }

    /// Bounds.
    #[must_use]
    pub const fn bounds(&self) -> AxisBounds {
        self.bounds
    }
}

/// Horizontal and vertical adjustments bundled as a [`ScrollTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentPair {
    /// Horizontal range
    pub horizontal: Adjustment,
    /// Vertical range
    pub vertical: Adjustment,
}

impl AdjustmentPair {
    /// Bundle two adjustments.
    #[must_use]
    pub const fn new(horizontal: Adjustment, vertical: Adjustment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    fn get(&self, axis: Axis) -> &Adjustment {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    fn get_mut(&mut self, axis: Axis) -> &mut Adjustment {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }
}

impl ScrollTarget for AdjustmentPair {
    fn value(&self, axis: Axis) -> f64 {
        self.get(axis).value()
    }

    fn set_value(&mut self, axis: Axis, value: f64) {
        self.get_mut(axis).set_value(value);
    }

    fn bounds(&self, axis: Axis) -> AxisBounds {
        self.get(axis).bounds()
    }
}
