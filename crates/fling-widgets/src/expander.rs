//! Expander: a label that shows or hides a child when clicked.

use fling_core::{
    Direction, Easing, EventResponse, FlingError, FrameClock, Padding, PointerEvent, Rect, Result,
    Size, Stylable, StyleStore, Timeline,
};
use fling_layout::{ExpanderAllocation, ExpanderMetrics, DEFAULT_SPACING};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default reveal animation length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// Expander tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExpanderConfig {
    /// Space around label and child
    pub padding: Padding,
    /// Gap between label and child
    pub spacing: f32,
    /// Length of the reveal animation
    pub duration: Duration,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            padding: Padding::ZERO,
            spacing: DEFAULT_SPACING,
            duration: DEFAULT_DURATION,
        }
    }
}

impl ExpanderConfig {
    /// Set padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Set spacing.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the animation length.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Reject negative or non-finite spacing.
    pub fn validate(&self) -> Result<()> {
        if self.spacing.is_finite() && self.spacing >= 0.0 {
            Ok(())
        } else {
            Err(FlingError::InvalidGap {
                axis: "expander",
                value: self.spacing,
            })
        }
    }

    /// Read `padding`, `spacing` and `transition-duration` (milliseconds).
    pub fn from_style(store: &StyleStore, stylable: &dyn Stylable) -> Result<Self> {
        let mut config = Self::default();
        if let Some(padding) = store.padding(stylable, "padding")? {
            config.padding = padding;
        }
        if let Some(spacing) = store.number(stylable, "spacing")? {
            config.spacing = spacing as f32;
        }
        if let Some(ms) = store.number(stylable, "transition-duration")? {
            config.duration = Duration::from_millis(ms.max(0.0) as u64);
        }
        config.validate()?;
        Ok(config)
    }

    fn metrics(&self) -> ExpanderMetrics {
        ExpanderMetrics::new(self.padding, self.spacing)
    }
}

/// Notifications produced by an expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpanderEvent {
    /// The expanded state flipped
    Toggled {
        /// New state
        expanded: bool,
    },
    /// An expansion finished; the child is visible again and may fade in
    ChildRevealed,
}

/// Expander state and reveal animation.
#[derive(Debug, Clone)]
pub struct Expander {
    label: String,
    config: ExpanderConfig,
    has_child: bool,
    child_visible: bool,
    timeline: Timeline,
    progress: f64,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new("")
    }
}

impl Expander {
    /// Expanded expander with a label and a child.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let config = ExpanderConfig::default();
        let mut timeline = Timeline::new(config.duration);
        timeline.set_direction(Direction::Backward);
        Self {
            label: label.into(),
            config,
            has_child: true,
            child_visible: true,
            timeline,
            progress: 1.0,
        }
    }

    /// Apply a configuration. The animation length takes effect on the
    /// next toggle.
    pub fn with_config(mut self, config: ExpanderConfig) -> Result<Self> {
        self.set_config(config)?;
        Ok(self)
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: ExpanderConfig) -> Result<()> {
        config.validate()?;
        if config.duration != self.config.duration {
            let direction = self.timeline.direction();
            self.timeline = Timeline::new(config.duration);
            self.timeline.set_direction(direction);
        }
        self.config = config;
        Ok(())
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &ExpanderConfig {
        &self.config
    }

    /// Label text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Change the label text.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Tell the expander whether it has a child. Without one, clicks do
    /// nothing.
    pub fn set_has_child(&mut self, has_child: bool) {
        self.has_child = has_child;
    }

    /// Whether the child is (or is becoming) shown.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        match self.timeline.direction() {
            Direction::Forward => true,
            Direction::Backward => !self.timeline.is_running() && self.child_visible,
        }
    }

    /// Whether the child should be painted.
    #[must_use]
    pub const fn is_child_visible(&self) -> bool {
        self.child_visible
    }

    /// Whether the reveal animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.timeline.is_running()
    }

    /// Eased reveal fraction in `[0, 1]`.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Flip between expanded and collapsed.
    ///
    /// Collapsing hides the child at once and plays the animation
    /// backwards; expanding plays it forwards and shows the child when it
    /// completes. A toggle mid-animation reverses from the current point.
    pub fn toggle(&mut self) -> Option<ExpanderEvent> {
        if !self.has_child {
            return None;
        }
        let expanded = if self.child_visible {
            self.child_visible = false;
            self.timeline.set_direction(Direction::Backward);
            false
        } else {
            self.timeline.set_direction(Direction::Forward);
            true
        };
        if !self.timeline.is_running() {
            self.timeline.rewind();
        }
        self.timeline.start();
        tracing::debug!(label = %self.label, expanded, "expander toggled");
        Some(ExpanderEvent::Toggled { expanded })
    }

    /// Toggle on primary-button release.
    pub fn handle_event(&mut self, event: &PointerEvent) -> (EventResponse, Option<ExpanderEvent>) {
        match event {
            PointerEvent::Release { .. } if event.is_primary_button() => match self.toggle() {
                Some(change) => (EventResponse::Consumed, Some(change)),
                None => (EventResponse::Ignored, None),
            },
            _ => (EventResponse::Ignored, None),
        }
    }

    /// Advance the reveal animation.
    pub fn on_frame(&mut self, delta: Duration) -> Option<ExpanderEvent> {
        let frame = self.timeline.advance(delta)?;
        self.progress = Easing::EaseInSine.apply(frame.progress);

        if frame.completed && self.timeline.direction() == Direction::Forward {
            self.child_visible = true;
            return Some(ExpanderEvent::ChildRevealed);
        }
        None
    }

    /// Preferred size for given label and child sizes at the current
    /// reveal fraction.
    #[must_use]
    pub fn preferred_size(&self, label: Size, child: Option<Size>) -> Size {
        let child = child.filter(|_| self.has_child);
        self.config
            .metrics()
            .preferred_size(label, child, self.progress as f32)
    }

    /// Boxes for label and child inside `bounds`.
    #[must_use]
    pub fn allocate(&self, bounds: Rect, label: Size, child: Option<Size>) -> ExpanderAllocation {
        let child = child.filter(|_| self.has_child);
        self.config.metrics().allocate(bounds, label, child)
    }
}
