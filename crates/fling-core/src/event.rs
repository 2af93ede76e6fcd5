//! Pointer input delivered by the host toolkit.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary (usually left) button
    Primary,
    /// Middle button
    Middle,
    /// Secondary (usually right) button
    Secondary,
    /// Any other button by number
    Other(u16),
}

/// Pointer event in widget-local coordinates.
///
/// Timestamps come from a monotonic clock; the engines only ever look at
/// differences between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed
    Press {
        /// Local position of the press
        position: Point,
        /// Button pressed
        button: MouseButton,
        /// When the press happened
        timestamp: Instant,
    },
    /// Pointer moved
    Motion {
        /// New local position
        position: Point,
        /// When the motion was sampled
        timestamp: Instant,
    },
    /// Button released
    Release {
        /// Local position of the release
        position: Point,
        /// Button released
        button: MouseButton,
        /// When the release happened
        timestamp: Instant,
    },
}

impl PointerEvent {
    /// Position carried by the event.
    #[must_use]
    pub const fn position(&self) -> Point {
        match self {
            Self::Press { position, .. }
            | Self::Motion { position, .. }
            | Self::Release { position, .. } => *position,
        }
    }

    /// Timestamp carried by the event.
    #[must_use]
    pub const fn timestamp(&self) -> Instant {
        match self {
            Self::Press { timestamp, .. }
            | Self::Motion { timestamp, .. }
            | Self::Release { timestamp, .. } => *timestamp,
        }
    }

    /// Button for press/release events.
    #[must_use]
    pub const fn button(&self) -> Option<MouseButton> {
        match self {
            Self::Press { button, .. } | Self::Release { button, .. } => Some(*button),
            Self::Motion { .. } => None,
        }
    }

    /// True for press/release of the primary button.
    #[must_use]
    pub fn is_primary_button(&self) -> bool {
        self.button() == Some(MouseButton::Primary)
    }
}

/// Exclusive pointer capture provided by the host.
///
/// A scroller grabs the pointer on press so that motion outside its bounds
/// still reaches it, and releases the grab on button release.
pub trait PointerGrab {
    /// Route all pointer events to the scroller.
    fn grab(&mut self);

    /// Give the pointer back.
    fn ungrab(&mut self);

    /// Whether the scroller still owns the grab. Another component (a
    /// scrollbar, say) may have taken it in the meantime.
    fn is_held(&self) -> bool;
}

/// What the shell should do with an event after the engine saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Not for us; keep propagating.
    Ignored,
    /// Handled; stop propagation.
    Consumed,
    /// Handled, but re-deliver it to the children (click-through on release).
    Forward,
}
