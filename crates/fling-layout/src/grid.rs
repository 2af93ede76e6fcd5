//! Wrapping grid reflow.
//!
//! Items flow along the major axis (left to right, or top to bottom in
//! column-major mode) and wrap onto a new line when the next item would
//! cross the available major extent. Layout runs in two passes: an optional
//! measurement pass collecting the largest natural size along each axis
//! for homogeneous mode, then a placement pass walking the items line by
//! line.
//!
//! Internally everything is computed in major/minor coordinates and
//! transposed back to x/y for column-major layouts.

use fling_core::{FlingError, Rect, Result, Size, Stylable, StyleStore};
use serde::{Deserialize, Serialize};

/// A laid-out element: its natural size. Order determines flow order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridItem {
    /// Preferred width
    pub natural_width: f32,
    /// Preferred height
    pub natural_height: f32,
}

impl GridItem {
    /// Create an item.
    #[must_use]
    pub const fn new(natural_width: f32, natural_height: f32) -> Self {
        Self {
            natural_width,
            natural_height,
        }
    }

    /// Natural size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.natural_width, self.natural_height)
    }

    fn validate(&self, index: usize) -> Result<()> {
        let ok = |v: f32| v.is_finite() && v >= 0.0;
        if ok(self.natural_width) && ok(self.natural_height) {
            Ok(())
        } else {
            Err(FlingError::InvalidItemSize {
                index,
                width: self.natural_width,
                height: self.natural_height,
            })
        }
    }
}

impl From<Size> for GridItem {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Grid flags, gaps and alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GridLayoutConfig {
    /// Every row is as tall as the tallest item
    pub homogeneous_rows: bool,
    /// Every column is as wide as the widest item
    pub homogeneous_columns: bool,
    /// Flow top to bottom, wrapping into new columns
    pub column_major: bool,
    /// Justify each line against the far end of the major axis
    pub end_align: bool,
    /// Space between rows
    pub row_gap: f32,
    /// Space between columns
    pub column_gap: f32,
    /// Vertical position of an item inside its row, 0 = top, 1 = bottom
    pub row_align: f32,
    /// Horizontal position of an item inside its column, 0 = left, 1 = right
    pub column_align: f32,
}

impl Default for GridLayoutConfig {
    fn default() -> Self {
        Self {
            homogeneous_rows: false,
            homogeneous_columns: false,
            column_major: false,
            end_align: false,
            row_gap: 0.0,
            column_gap: 0.0,
            row_align: 0.0,
            column_align: 0.0,
        }
    }
}

impl GridLayoutConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set homogeneous rows.
    #[must_use]
    pub const fn with_homogeneous_rows(mut self, value: bool) -> Self {
        self.homogeneous_rows = value;
        self
    }

    /// Set homogeneous columns.
    #[must_use]
    pub const fn with_homogeneous_columns(mut self, value: bool) -> Self {
        self.homogeneous_columns = value;
        self
    }

    /// Set column-major flow.
    #[must_use]
    pub const fn with_column_major(mut self, value: bool) -> Self {
        self.column_major = value;
        self
    }

    /// Set end alignment.
    #[must_use]
    pub const fn with_end_align(mut self, value: bool) -> Self {
        self.end_align = value;
        self
    }

    /// Set both gaps.
    #[must_use]
    pub const fn with_gap(mut self, row_gap: f32, column_gap: f32) -> Self {
        self.row_gap = row_gap;
        self.column_gap = column_gap;
        self
    }

    /// Set both alignments.
    #[must_use]
    pub const fn with_align(mut self, row_align: f32, column_align: f32) -> Self {
        self.row_align = row_align;
        self.column_align = column_align;
        self
    }

    /// Reject negative gaps and alignments outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (axis, value) in [("row", self.row_gap), ("column", self.column_gap)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FlingError::InvalidGap { axis, value });
            }
        }
        for (axis, value) in [("row", self.row_align), ("column", self.column_align)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FlingError::InvalidAlignment { axis, value });
            }
        }
        Ok(())
    }

    /// Read grid properties from a style store, keeping defaults for
    /// anything unset.
    pub fn from_style(store: &StyleStore, stylable: &dyn Stylable) -> Result<Self> {
        let mut config = Self::default();
        let flags = [
            ("homogeneous-rows", &mut config.homogeneous_rows),
            ("homogeneous-columns", &mut config.homogeneous_columns),
            ("column-major", &mut config.column_major),
            ("end-align", &mut config.end_align),
        ];
        for (name, slot) in flags {
            if let Some(value) = store.flag(stylable, name)? {
                *slot = value;
            }
        }
        let numbers = [
            ("row-gap", &mut config.row_gap),
            ("column-gap", &mut config.column_gap),
            ("row-align", &mut config.row_align),
            ("column-align", &mut config.column_align),
        ];
        for (name, slot) in numbers {
            if let Some(value) = store.number(stylable, name)? {
                *slot = value as f32;
            }
        }
        config.validate()?;
        Ok(config)
    }

    // Row-major: columns run along the major axis.
    fn homogeneous_major(&self) -> bool {
        if self.column_major {
            self.homogeneous_rows
        } else {
            self.homogeneous_columns
        }
    }

    fn homogeneous_minor(&self) -> bool {
        if self.column_major {
            self.homogeneous_columns
        } else {
            self.homogeneous_rows
        }
    }

    fn major_gap(&self) -> f32 {
        if self.column_major {
            self.row_gap
        } else {
            self.column_gap
        }
    }

    fn minor_gap(&self) -> f32 {
        if self.column_major {
            self.column_gap
        } else {
            self.row_gap
        }
    }

    fn major_align(&self) -> f32 {
        if self.column_major {
            self.row_align
        } else {
            self.column_align
        }
    }

    fn minor_align(&self) -> f32 {
        if self.column_major {
            self.column_align
        } else {
            self.row_align
        }
    }
}

/// Space offered to the grid. `None` (or infinity) means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AvailableExtent {
    /// Available width
    pub width: Option<f32>,
    /// Available height
    pub height: Option<f32>,
}

impl AvailableExtent {
    /// Bounded on both axes.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Unbounded on both axes, for intrinsic size queries.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            width: None,
            height: None,
        }
    }

    /// Bounded width, unbounded height.
    #[must_use]
    pub const fn width(width: f32) -> Self {
        Self {
            width: Some(width),
            height: None,
        }
    }

    /// Bounded height, unbounded width.
    #[must_use]
    pub const fn height(height: f32) -> Self {
        Self {
            width: None,
            height: Some(height),
        }
    }

    fn checked(axis: &'static str, value: Option<f32>) -> Result<Option<f32>> {
        match value {
            Some(v) if v.is_nan() || v < 0.0 => Err(FlingError::InvalidExtent { axis, value: v }),
            Some(v) if v.is_infinite() => Ok(None),
            other => Ok(other),
        }
    }

    fn wrap_extent(&self, column_major: bool) -> Result<Option<f32>> {
        let width = Self::checked("width", self.width)?;
        let height = Self::checked("height", self.height)?;
        Ok(if column_major { height } else { width })
    }
}

impl From<Size> for AvailableExtent {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Output of a layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridPlacementResult {
    /// One box per item, in input order
    pub boxes: Vec<Rect>,
    /// Largest right edge of any box
    pub total_width: f32,
    /// Largest bottom edge of any box
    pub total_height: f32,
}

impl GridPlacementResult {
    /// Overall content extent.
    #[must_use]
    pub const fn total_size(&self) -> Size {
        Size::new(self.total_width, self.total_height)
    }
}

/// Item size expressed along the flow axes.
#[derive(Debug, Clone, Copy)]
struct Extent {
    major: f32,
    minor: f32,
}

/// A run of items sharing a line, `start..end` in flow order.
#[derive(Debug, Clone, Copy)]
struct Line {
    start: usize,
    end: usize,
    span: f32,
    cross: f32,
}

/// Split items into lines with the wrap test. An item only moves to a new
/// line when the current line already holds something, so an oversized
/// item sits alone.
fn break_lines(extents: &[Extent], advance: impl Fn(Extent) -> f32, wrap: Option<f32>, gap: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line {
        start: 0,
        end: 0,
        span: 0.0,
        cross: 0.0,
    };
    let mut cursor = 0.0f32;

    for (index, &extent) in extents.iter().enumerate() {
        let size = advance(extent);
        let overflows = wrap.is_some_and(|wrap| cursor + size > wrap);
        if line.end > line.start && overflows {
            lines.push(line);
            line = Line {
                start: index,
                end: index,
                span: 0.0,
                cross: 0.0,
            };
            cursor = 0.0;
        }
        line.end = index + 1;
        line.span = cursor + size;
        line.cross = line.cross.max(extent.minor);
        cursor += size + gap;
    }
    if line.end > line.start {
        lines.push(line);
    }
    lines
}

/// Place `items` into `available` space.
///
/// Fails on negative or non-finite item sizes, negative gaps, alignments
/// outside `[0, 1]` and negative available extents.
pub fn layout(
    items: &[GridItem],
    available: AvailableExtent,
    config: &GridLayoutConfig,
) -> Result<GridPlacementResult> {
    config.validate()?;
    for (index, item) in items.iter().enumerate() {
        item.validate(index)?;
    }
    let wrap = available.wrap_extent(config.column_major)?;

    let extents: Vec<Extent> = items
        .iter()
        .map(|item| {
            let size = if config.column_major {
                item.size().transposed()
            } else {
                item.size()
            };
            Extent {
                major: size.width,
                minor: size.height,
            }
        })
        .collect();

    let homogeneous_major = config.homogeneous_major();
    let homogeneous_minor = config.homogeneous_minor();

    // Measurement pass.
    let (max_major, max_minor) = if homogeneous_major || homogeneous_minor {
        extents.iter().fold((0.0f32, 0.0f32), |(major, minor), e| {
            (major.max(e.major), minor.max(e.minor))
        })
    } else {
        (0.0, 0.0)
    };

    let advance = |e: Extent| if homogeneous_major { max_major } else { e.major };
    let major_gap = config.major_gap();
    let lines = break_lines(&extents, advance, wrap, major_gap);

    // Placement pass.
    let mut result = GridPlacementResult {
        boxes: Vec::with_capacity(items.len()),
        total_width: 0.0,
        total_height: 0.0,
    };
    let (major_align, minor_align) = (config.major_align(), config.minor_align());
    let mut current_minor = 0.0f32;

    for line in &lines {
        let cross = if homogeneous_minor { max_minor } else { line.cross };
        let mut current_major = match wrap {
            Some(wrap) if config.end_align => (wrap - line.span).max(0.0),
            _ => 0.0,
        };

        for extent in &extents[line.start..line.end] {
            let mut major = current_major;
            if homogeneous_major {
                major += (max_major - extent.major) * major_align;
            }
            let minor = current_minor + (cross - extent.minor) * minor_align;

            let mut rect = Rect::new(major, minor, extent.major, extent.minor);
            if config.column_major {
                rect = rect.transposed();
            }
            result.total_width = result.total_width.max(rect.right());
            result.total_height = result.total_height.max(rect.bottom());
            result.boxes.push(rect);

            current_major += advance(*extent) + major_gap;
        }
        current_minor += cross + config.minor_gap();
    }

    tracing::trace!(
        items = items.len(),
        lines = lines.len(),
        width = result.total_width,
        height = result.total_height,
        "grid layout"
    );
    Ok(result)
}
