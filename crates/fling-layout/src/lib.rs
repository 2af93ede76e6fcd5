#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
//! Layout engines for Fling.
//!
//! Implements wrapping grid reflow and expander sizing.
//!
//! # Grid reflow
//!
//! [`layout`] is the pure function: items, available extent and
//! [`GridLayoutConfig`] in, per-item boxes and total extent out.
//! [`GridLayout`] wraps it with owned items and a [`MeasureCache`] so a
//! shell can ask `measure` repeatedly during negotiation and `place` once
//! the final allocation is known.

mod cache;
mod engine;
mod expander;
mod grid;

pub use cache::{CacheKey, MeasureCache, DEFAULT_CAPACITY};
pub use engine::GridLayout;
pub use expander::{ExpanderAllocation, ExpanderMetrics, DEFAULT_SPACING};
pub use grid::{layout, AvailableExtent, GridItem, GridLayoutConfig, GridPlacementResult};

#[cfg(test)]
mod tests {
    use super::*;
    use fling_core::{Selector, StylePriority, StyleStore};

    mod style_tests {
        use super::*;

        #[test]
        fn test_grid_config_from_style() {
            let mut store = StyleStore::new();
            store
                .load_from_str(
                    r"
classes:
  photos:
    homogeneous-rows: true
    homogeneous-columns: true
    column-gap: 8
    row-gap: 4
    column-align: 0.5
",
                    StylePriority::Author,
                )
                .unwrap();

            let selector = Selector::new("Grid").with_class("photos");
            let config = GridLayoutConfig::from_style(&store, &selector).unwrap();
            assert!(config.homogeneous_rows && config.homogeneous_columns);
            assert!(!config.column_major);
            assert_eq!(config.column_gap, 8.0);
            assert_eq!(config.row_gap, 4.0);
            assert_eq!(config.column_align, 0.5);
        }

        #[test]
        fn test_grid_config_from_style_validates() {
            let mut store = StyleStore::new();
            store
                .load_from_str("types: { Grid: { row-align: 2 } }", StylePriority::Author)
                .unwrap();
            assert!(GridLayoutConfig::from_style(&store, &Selector::new("Grid")).is_err());
        }

        #[test]
        fn test_grid_config_wrong_type() {
            let mut store = StyleStore::new();
            store
                .load_from_str("types: { Grid: { end-align: 1 } }", StylePriority::Author)
                .unwrap();
            assert!(GridLayoutConfig::from_style(&store, &Selector::new("Grid")).is_err());
        }
    }
}
