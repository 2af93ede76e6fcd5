//! Grid layout engine with measure memoization.

use fling_core::{Rect, Result, Size};

use crate::cache::{CacheKey, MeasureCache};
use crate::grid::{layout, AvailableExtent, GridItem, GridLayoutConfig, GridPlacementResult};

/// Stateful grid: owns its items and configuration and answers the
/// shell's measure/place queries.
#[derive(Debug, Default)]
pub struct GridLayout {
    items: Vec<GridItem>,
    config: GridLayoutConfig,
    revision: u64,
    cache: MeasureCache,
}

impl GridLayout {
    /// Create an empty grid.
    #[must_use]
    pub fn new(config: GridLayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Items in flow order.
    #[must_use]
    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &GridLayoutConfig {
        &self.config
    }

    /// Replace all items.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = GridItem>) {
        self.items = items.into_iter().collect();
        self.invalidate();
    }

    /// Append an item.
    pub fn push(&mut self, item: GridItem) {
        self.items.push(item);
        self.invalidate();
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: GridLayoutConfig) {
        self.config = config;
        self.invalidate();
    }

    /// Measure cache statistics.
    #[must_use]
    pub const fn cache(&self) -> &MeasureCache {
        &self.cache
    }

    fn invalidate(&mut self) {
        self.revision += 1;
        self.cache.retain_revision(self.revision);
    }

    /// Content size when offered `available` space.
    ///
    /// Results are memoised per extent. Changing items or configuration
    /// drops every cached measurement; otherwise the cache keeps at most
    /// [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) extents, evicting the
    /// least recently used. Hosts that call [`end_frame`](Self::end_frame)
    /// once per frame also shed extents unused for two frames.
    pub fn measure(&mut self, available: AvailableExtent) -> Result<Size> {
        let key = CacheKey::new(self.revision, available);
        if let Some(size) = self.cache.get(key) {
            return Ok(size);
        }
        let size = layout(&self.items, available, &self.config)?.total_size();
        self.cache.insert(key, size);
        Ok(size)
    }

    /// Full placement inside a final allocation.
    pub fn compute(&mut self, allocation: Size) -> Result<GridPlacementResult> {
        let result = layout(&self.items, allocation.into(), &self.config)?;
        self.cache
            .insert(CacheKey::new(self.revision, allocation.into()), result.total_size());
        Ok(result)
    }

    /// Per-item boxes inside a final allocation, in item order.
    pub fn place(&mut self, allocation: Size) -> Result<Vec<Rect>> {
        Ok(self.compute(allocation)?.boxes)
    }

    /// Mark the end of a frame; unused measurements age out.
    pub fn end_frame(&mut self) {
        self.cache.advance_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridLayout {
        let mut grid = GridLayout::new(GridLayoutConfig::default().with_gap(2.0, 2.0));
        grid.set_items(std::iter::repeat(GridItem::new(10.0, 10.0)).take(5));
        grid
    }

    #[test]
    fn test_measure_is_memoized() {
        let mut grid = grid();
        let first = grid.measure(AvailableExtent::width(33.0)).unwrap();
        let second = grid.measure(AvailableExtent::width(33.0)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Size::new(22.0, 34.0));
        assert_eq!(grid.cache().hits(), 1);
        assert_eq!(grid.cache().misses(), 1);
    }

    #[test]
    fn test_mutation_invalidates() {
        let mut grid = grid();
        grid.measure(AvailableExtent::width(33.0)).unwrap();
        grid.push(GridItem::new(10.0, 10.0));
        assert!(grid.cache().is_empty());
        assert_eq!(
            grid.measure(AvailableExtent::width(33.0)).unwrap(),
            Size::new(22.0, 34.0)
        );

        grid.set_config(GridLayoutConfig::default());
        assert_eq!(
            grid.measure(AvailableExtent::width(33.0)).unwrap(),
            Size::new(30.0, 20.0)
        );
    }

    #[test]
    fn test_intrinsic_size_is_single_line() {
        let mut grid = grid();
        assert_eq!(
            grid.measure(AvailableExtent::unbounded()).unwrap(),
            Size::new(58.0, 10.0)
        );
    }

    #[test]
    fn test_place_matches_layout() {
        let mut grid = grid();
        let boxes = grid.place(Size::new(33.0, 100.0)).unwrap();
        assert_eq!(boxes.len(), 5);
        assert_eq!(boxes[3], Rect::new(12.0, 12.0, 10.0, 10.0));
    }

    #[test]
    fn test_end_frame_ages_out() {
        let mut grid = grid();
        grid.measure(AvailableExtent::width(40.0)).unwrap();
        for _ in 0..3 {
            grid.end_frame();
        }
        assert!(grid.cache().is_empty());
    }

    #[test]
    fn test_resize_drag_stays_bounded() {
        let mut grid = grid();
        // A window resize offers a new width on every event, no frame ends.
        for width in 0..500 {
            grid.measure(AvailableExtent::width(20.0 + width as f32 * 0.5))
                .unwrap();
        }
        assert_eq!(grid.cache().len(), crate::DEFAULT_CAPACITY);
        assert_eq!(grid.cache().misses(), 500);
    }
}
