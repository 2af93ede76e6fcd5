//! Measure caching for memoization.

use fling_core::Size;
use std::collections::HashMap;

use crate::grid::AvailableExtent;

/// Cache key combining the content revision and the offered extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Revision of the items and configuration
    pub revision: u64,
    /// Width bits, `None` when unbounded
    pub width_bits: Option<u32>,
    /// Height bits, `None` when unbounded
    pub height_bits: Option<u32>,
}

impl CacheKey {
    /// Key for an extent at a revision.
    #[must_use]
    pub fn new(revision: u64, available: AvailableExtent) -> Self {
        let bits = |v: Option<f32>| v.filter(|v| v.is_finite()).map(f32::to_bits);
        Self {
            revision,
            width_bits: bits(available.width),
            height_bits: bits(available.height),
        }
    }
}

/// Measurements kept before the least recently used one is evicted.
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    size: Size,
    frame: u64,
    stamp: u64,
}

/// Bounded cache of measured sizes.
///
/// Stale revisions are dropped by the owner through
/// [`retain_revision`](Self::retain_revision); within a revision the
/// cache holds at most `capacity` extents and evicts the least recently
/// used one to make room.
#[derive(Debug)]
pub struct MeasureCache {
    entries: HashMap<CacheKey, CacheEntry>,
    capacity: usize,
    frame: u64,
    stamp: u64,
    hits: usize,
    misses: usize,
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MeasureCache {
    /// Empty cache with [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty cache holding at most `capacity` measurements (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            frame: 0,
            stamp: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Maximum number of measurements kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn touch(&mut self) -> u64 {
        self.stamp += 1;
        self.stamp
    }

    /// Cached size for a key, counting the hit or miss.
    #[must_use]
    pub fn get(&mut self, key: CacheKey) -> Option<Size> {
        let stamp = self.touch();
        let frame = self.frame;
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.frame = frame;
                entry.stamp = stamp;
                self.hits += 1;
                Some(entry.size)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Record a measurement, evicting the least recently used one when full.
    pub fn insert(&mut self, key: CacheKey, size: Size) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.stamp)
                .map(|(key, _)| *key);
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }
        let stamp = self.touch();
        self.entries.insert(
            key,
            CacheEntry {
                size,
                frame: self.frame,
                stamp,
            },
        );
    }

    /// Drop entries older than `revision`.
    pub fn retain_revision(&mut self, revision: u64) {
        self.entries.retain(|key, _| key.revision >= revision);
    }

    /// Forget every measurement and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Lookups answered from the cache.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Lookups that had to measure.
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// Start a new frame; measurements unused for two frames are dropped.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
        let threshold = self.frame.saturating_sub(2);
        self.entries.retain(|_, entry| entry.frame >= threshold);
    }

    /// Number of cached measurements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
