//! Item state store
//!
//! One `ItemState` per visible item, keyed by the host's stable string key.
//! The ordered key vector is the authoritative sequence; `ItemState::index`
//! and `ItemState::logical` are derived from it. Animatable handles are
//! created once per key and reused across reconciliations and relayouts so
//! in-flight visuals survive cosmetic rebuilds.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sortgrid_animation::{AnimatedValue, AnimatedVec2};

use crate::geometry::{GridGeometry, Point};

/// Per-item state: identity, derived slot, and live animatable handles
#[derive(Debug)]
pub struct ItemState {
    /// Stable identity, immutable
    pub key: String,
    /// Current position in the ordered sequence (derived)
    pub index: usize,
    /// Settled position this item animates toward (derived from `index`)
    pub logical: Point,
    /// Rendered position: tween-driven, or pointer-driven while dragged
    pub position: AnimatedVec2,
    /// Reserved for visual feedback; defaults to fully opaque
    pub opacity: AnimatedValue,
}

impl ItemState {
    fn new(key: String, index: usize, logical: Point) -> Self {
        Self {
            key,
            index,
            logical,
            position: AnimatedVec2::new(logical.x, logical.y),
            opacity: AnimatedValue::new(1.0),
        }
    }
}

/// Outcome of reconciling the store against a new input sequence
#[derive(Debug, PartialEq)]
pub enum StoreDiff {
    /// Identical key set and order; nothing was touched
    Unchanged,
    Changed {
        /// Surviving keys whose logical position changed
        moved: Vec<String>,
        /// Keys absent from the new input, now discarded
        removed: Vec<String>,
    },
}

/// The key-addressed store plus the authoritative ordered sequence
pub struct ItemStore {
    order: Vec<String>,
    states: FxHashMap<String, ItemState>,
    revision: u64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            states: FxHashMap::default(),
            revision: 0,
        }
    }

    /// The authoritative ordered key sequence
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bumped on every structural change; unchanged reconciliations leave it
    /// alone, which is what keeps cosmetic re-renders from replaying
    /// animations.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, key: &str) -> Option<&ItemState> {
        self.states.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ItemState> {
        self.states.get_mut(key)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.states.get(key).map(|s| s.index)
    }

    /// Reconcile against a new ordered key sequence.
    ///
    /// Existing keys keep their animatable handles; brand-new keys get fresh
    /// handles seeded at their logical position. An identical sequence is
    /// detected up front and leaves the store untouched.
    pub fn reconcile(&mut self, new_keys: Vec<String>, geometry: &GridGeometry) -> StoreDiff {
        if new_keys == self.order {
            return StoreDiff::Unchanged;
        }

        let removed: Vec<String> = self
            .order
            .iter()
            .filter(|k| !new_keys.contains(k))
            .cloned()
            .collect();
        for key in &removed {
            self.states.remove(key);
        }

        let mut moved = Vec::new();
        for (index, key) in new_keys.iter().enumerate() {
            let logical = geometry.position_of(index);
            match self.states.get_mut(key) {
                Some(state) => {
                    state.index = index;
                    if state.logical != logical {
                        state.logical = logical;
                        moved.push(key.clone());
                    }
                }
                None => {
                    self.states
                        .insert(key.clone(), ItemState::new(key.clone(), index, logical));
                }
            }
        }

        self.order = new_keys;
        self.revision += 1;
        tracing::debug!(
            moved = moved.len(),
            removed = removed.len(),
            total = self.order.len(),
            "store reconciled"
        );
        StoreDiff::Changed { moved, removed }
    }

    /// Single-element move within the ordered sequence
    pub fn move_key(&mut self, from: usize, to: usize) {
        let key = self.order.remove(from);
        self.order.insert(to, key);
        self.revision += 1;
    }

    /// Re-derive `index` and `logical` for every item from the current order.
    ///
    /// Returns the keys whose logical position changed.
    pub fn reindex(&mut self, geometry: &GridGeometry) -> Vec<String> {
        let mut moved = Vec::new();
        for (index, key) in self.order.iter().enumerate() {
            if let Some(state) = self.states.get_mut(key) {
                state.index = index;
                let logical = geometry.position_of(index);
                if state.logical != logical {
                    state.logical = logical;
                    moved.push(key.clone());
                }
            }
        }
        moved
    }

    /// Re-derive logical positions after a configuration change and snap
    /// rendered positions to them, keeping every animatable handle alive.
    pub fn relayout(&mut self, geometry: &GridGeometry) {
        for (index, key) in self.order.iter().enumerate() {
            if let Some(state) = self.states.get_mut(key) {
                state.index = index;
                state.logical = geometry.position_of(index);
                state.position.set(state.logical.x, state.logical.y);
            }
        }
    }

    /// Advance every animatable handle by `dt_ms`.
    ///
    /// Returns the keys whose position pair settled on this tick.
    pub fn tick_all(&mut self, dt_ms: f32) -> SmallVec<[String; 8]> {
        let mut settled = SmallVec::new();
        for state in self.states.values_mut() {
            state.opacity.tick(dt_ms);
            if state.position.tick(dt_ms) {
                settled.push(state.key.clone());
            }
        }
        settled
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn grid() -> GridGeometry {
        GridGeometry::new(2, 100.0, 100.0)
    }

    #[test]
    fn test_reconcile_creates_states_seeded_at_logical() {
        let mut store = ItemStore::new();
        let diff = store.reconcile(keys(&["a", "b", "c"]), &grid());
        assert!(matches!(diff, StoreDiff::Changed { .. }));

        let c = store.get("c").unwrap();
        assert_eq!(c.index, 2);
        assert_eq!(c.logical, Point::new(0.0, 100.0));
        assert_eq!(c.position.get(), (0.0, 100.0));
        assert_eq!(c.opacity.get(), 1.0);
    }

    #[test]
    fn test_reconcile_identical_input_is_untouched() {
        let mut store = ItemStore::new();
        store.reconcile(keys(&["a", "b"]), &grid());
        let revision = store.revision();

        assert_eq!(store.reconcile(keys(&["a", "b"]), &grid()), StoreDiff::Unchanged);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_reconcile_reuses_handles_for_surviving_keys() {
        let mut store = ItemStore::new();
        store.reconcile(keys(&["a", "b"]), &grid());

        // Leave "b" somewhere off its logical position, as a live handle would be
        store.get_mut("b").unwrap().position.set(55.0, 77.0);

        let diff = store.reconcile(keys(&["b", "a"]), &grid());
        let StoreDiff::Changed { moved, removed } = diff else {
            panic!("expected change");
        };
        assert!(removed.is_empty());
        assert_eq!(moved, keys(&["b", "a"]));

        // The handle survived: the rendered position was not reset
        assert_eq!(store.get("b").unwrap().position.get(), (55.0, 77.0));
        assert_eq!(store.get("b").unwrap().index, 0);
    }

    #[test]
    fn test_reconcile_reports_removed_keys() {
        let mut store = ItemStore::new();
        store.reconcile(keys(&["a", "b", "c"]), &grid());

        let StoreDiff::Changed { removed, .. } = store.reconcile(keys(&["a", "c"]), &grid())
        else {
            panic!("expected change");
        };
        assert_eq!(removed, keys(&["b"]));
        assert!(store.get("b").is_none());
    }

    #[test]
    fn test_move_key_and_reindex() {
        let mut store = ItemStore::new();
        store.reconcile(keys(&["a", "b", "c", "d"]), &grid());

        store.move_key(0, 3);
        assert_eq!(store.order(), keys(&["b", "c", "d", "a"]).as_slice());

        let moved = store.reindex(&grid());
        // Every item shifted by one slot
        assert_eq!(moved.len(), 4);
        assert_eq!(store.index_of("a"), Some(3));
        assert_eq!(store.get("a").unwrap().logical, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_relayout_snaps_to_new_geometry() {
        let mut store = ItemStore::new();
        store.reconcile(keys(&["a", "b", "c"]), &grid());

        let wider = GridGeometry::new(3, 50.0, 50.0);
        store.relayout(&wider);

        let c = store.get("c").unwrap();
        assert_eq!(c.logical, Point::new(100.0, 0.0));
        assert_eq!(c.position.get(), (100.0, 0.0));
        assert!(!c.position.is_animating());
    }
}
