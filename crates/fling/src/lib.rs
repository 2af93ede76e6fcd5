//! Fling: kinetic finger scrolling and reflowing grid layout.
//!
//! Engines only. The host toolkit feeds pointer events and frame ticks in
//! and reads scroll positions and cell rectangles out.
//!
//! ```
//! use fling::layout::{AvailableExtent, GridItem, GridLayoutConfig};
//!
//! let items = vec![GridItem::new(10.0, 10.0); 5];
//! let config = GridLayoutConfig::default().with_gap(2.0, 2.0);
//! let result = fling::layout::layout(&items, AvailableExtent::width(33.0), &config).unwrap();
//! assert_eq!(result.boxes[2].y, 12.0);
//! ```

#![allow(
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::unwrap_used,
    clippy::float_cmp
)]

pub use fling_core::*;
pub use fling_layout as layout;
pub use fling_widgets as widgets;

/// The types a host usually needs.
pub mod prelude {
    pub use fling_core::{
        Adjustment, AdjustmentPair, Axis, EventResponse, FlingError, FrameClock, KineticConfig,
        MouseButton, Point, PointerEvent, PointerGrab, Rect, Result, ScrollMode, ScrollTarget,
        Selector, Size, StylePriority, StyleStore,
    };
    pub use fling_layout::{AvailableExtent, GridItem, GridLayout, GridLayoutConfig};
    pub use fling_widgets::{
        Cell, CellRenderer, CellValue, Expander, ExpanderEvent, FingerScroll, IconView, ListModel,
        ScrollState,
    };
}
