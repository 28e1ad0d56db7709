//! Great-circle geometry cache, shared by MST and candidate rendering.
//!
//! # Lifetime
//!
//! Entries are keyed by [`PairKey`] and live as long as the dataset they were
//! computed for.  [`reset_for`](GreatCircleCache::reset_for) compares the
//! content-based [`DatasetKey`] and clears everything on change; reloading
//! the same cities keeps the cache warm.  There is no partial eviction.
//!
//! # Identity
//!
//! The first polyline stored for a key is the one every later lookup gets.
//! Bulk inserts never replace an existing entry, so an MST edge and a
//! candidate edge for the same pair always share one `Arc`.
//!
//! The cache is owned by the UI-side session and is never shared with the
//! worker thread, so it needs no lock.

use mst_core::{DatasetKey, GeoPoint, GreatCircleOptions, PairKey, great_circle_points};

use crate::{GeometryEntry, Polyline};

/// Map keyed by node pair; FxHash under the `fx-hash` feature.
#[cfg(feature = "fx-hash")]
pub type PairMap<V> = rustc_hash::FxHashMap<PairKey, V>;
#[cfg(not(feature = "fx-hash"))]
pub type PairMap<V> = std::collections::HashMap<PairKey, V>;

/// Set of node pairs, hashed like [`PairMap`].
#[cfg(feature = "fx-hash")]
pub type PairSet = rustc_hash::FxHashSet<PairKey>;
#[cfg(not(feature = "fx-hash"))]
pub type PairSet = std::collections::HashSet<PairKey>;

#[derive(Debug, Default)]
pub struct GreatCircleCache {
    dataset: Option<DatasetKey>,
    entries: PairMap<Polyline>,
}

impl GreatCircleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the cache to `key`.  Returns `true` if the cache was cleared
    /// because the dataset changed.
    pub fn reset_for(&mut self, key: &DatasetKey) -> bool {
        if self.dataset.as_ref() == Some(key) {
            return false;
        }
        let dropped = self.entries.len();
        self.entries.clear();
        self.dataset = Some(key.clone());
        if dropped > 0 {
            log::info!("dataset changed; dropped {dropped} cached geodesics");
        }
        true
    }

    /// Dataset the entries belong to, if bound.
    pub fn dataset(&self) -> Option<&DatasetKey> {
        self.dataset.as_ref()
    }

    /// Store `points` under `key` unless an entry exists.  Returns the
    /// entry now stored, which is the earlier one if there was one.
    pub fn insert(&mut self, key: PairKey, points: Polyline) -> Polyline {
        self.entries.entry(key).or_insert(points).clone()
    }

    /// Insert every entry of a compute response.  Returns how many keys
    /// were new.
    pub fn insert_bulk<'a, I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = &'a GeometryEntry>,
    {
        let before = self.entries.len();
        for entry in entries {
            self.entries.entry(entry.key()).or_insert_with(|| entry.points().clone());
        }
        self.entries.len() - before
    }

    pub fn get(&self, key: PairKey) -> Option<&Polyline> {
        self.entries.get(&key)
    }

    /// Cached polyline for `key`, computing and storing it on a miss.
    ///
    /// `positions` is the current dataset indexed by node.  Returns `None`
    /// only if either endpoint is out of range.
    pub fn get_or_compute(
        &mut self,
        key:       PairKey,
        positions: &[GeoPoint],
        opts:      &GreatCircleOptions,
    ) -> Option<Polyline> {
        if let Some(hit) = self.entries.get(&key) {
            return Some(hit.clone());
        }
        let a = *positions.get(key.lo().index())?;
        let b = *positions.get(key.hi().index())?;
        log::trace!("geodesic cache miss for {key}");
        let line: Polyline = great_circle_points(a, b, opts).into();
        Some(self.insert(key, line))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries but keep the dataset binding.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
