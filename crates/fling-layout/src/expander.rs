//! Expander sizing: a label on top, a child revealed below it.
//!
//! The child's contribution to the height is scaled by the revealed
//! fraction, so animating the fraction from 0 to 1 grows the expander
//! smoothly. Allocation always gives the child its full box; clipping the
//! partly revealed part is the shell's job.

use fling_core::{Padding, Rect, Size};
use serde::{Deserialize, Serialize};

/// Default gap between label and child.
pub const DEFAULT_SPACING: f32 = 6.0;

/// Padding and spacing of an expander.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpanderMetrics {
    /// Space around label and child
    pub padding: Padding,
    /// Gap between label and child
    pub spacing: f32,
}

impl Default for ExpanderMetrics {
    fn default() -> Self {
        Self {
            padding: Padding::ZERO,
            spacing: DEFAULT_SPACING,
        }
    }
}

/// Boxes assigned to the label and child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpanderAllocation {
    /// Label box
    pub label: Rect,
    /// Child box, absent when there is no child
    pub child: Option<Rect>,
}

impl ExpanderMetrics {
    /// Create metrics.
    #[must_use]
    pub const fn new(padding: Padding, spacing: f32) -> Self {
        Self { padding, spacing }
    }

    /// `padding.left + max(child, label) + padding.right`.
    #[must_use]
    pub fn preferred_width(&self, label: Size, child: Option<Size>) -> f32 {
        let child_w = child.map_or(0.0, |c| c.width);
        self.padding.left + child_w.max(label.width) + self.padding.right
    }

    /// `padding.top + label + (child + spacing) * revealed + padding.bottom`.
    #[must_use]
    pub fn preferred_height(&self, label: Size, child: Option<Size>, revealed: f32) -> f32 {
        let child_h = child.map_or(0.0, |c| (c.height + self.spacing) * revealed.clamp(0.0, 1.0));
        self.padding.top + label.height + child_h + self.padding.bottom
    }

    /// Preferred width and height together.
    #[must_use]
    pub fn preferred_size(&self, label: Size, child: Option<Size>, revealed: f32) -> Size {
        Size::new(
            self.preferred_width(label, child),
            self.preferred_height(label, child, revealed),
        )
    }

    /// Place label and child inside `bounds`.
    ///
    /// The label sits at the top-left padding corner, clamped to the content
    /// box. The child goes below it after `spacing`, clamped to whatever
    /// height is left.
    #[must_use]
    pub fn allocate(&self, bounds: Rect, label: Size, child: Option<Size>) -> ExpanderAllocation {
        let content = bounds.inset(&self.padding);

        let label_w = label.width.min(content.width);
        let label_h = label.height.min(content.height);
        let label_box = Rect::new(content.x, content.y, label_w, label_h);

        let child_box = child.map(|child| {
            let top = label_h + self.spacing;
            let remaining = (content.height - top).max(0.0);
            Rect::new(
                content.x,
                content.y + top,
                child.width.min(content.width),
                child.height.min(remaining),
            )
        });

        ExpanderAllocation {
            label: label_box,
            child: child_box,
        }
    }
}
