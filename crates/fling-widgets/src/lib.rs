#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]
//! Widget engines for Fling.
//!
//! Host-agnostic state behind the widgets: the host toolkit owns painting
//! and actors, these types own behavior.

pub mod expander;
pub mod finger_scroll;
pub mod icon_view;

pub use expander::{Expander, ExpanderConfig, ExpanderEvent, DEFAULT_DURATION};
pub use finger_scroll::{FingerScroll, ScrollState};
pub use icon_view::{AttributeMapping, Cell, CellRenderer, CellValue, IconView, ListModel};
