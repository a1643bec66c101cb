//! The reorderable grid engine
//!
//! `SortableGrid` owns the ordered items, the per-key animatable state, the
//! drag session, and the grouped-animation bookkeeping. The host feeds it
//! resolved gestures (`long_press` / `pointer_move` / `pointer_up` / `tap`),
//! drives it once per frame with `tick`, and renders from the `cells`
//! snapshot; the engine only positions cells, never draws them.
//!
//! Everything runs on one logical thread. Gesture callbacks, tween
//! completion, and the auto-scroll step never interleave mid-sample: each
//! entry point mutates state and returns.

use smallvec::SmallVec;
use sortgrid_animation::{GroupClass, GroupTracker, TweenConfig};

use crate::autoscroll::{clamp_offset, edge_pull, AutoScroll, SCROLL_EPSILON};
use crate::config::{GridConfig, GridError};
use crate::geometry::{GridGeometry, Point};
use crate::session::{DragPhase, DragSession};
use crate::store::{ItemStore, StoreDiff};

type KeyExtractor<T> = Box<dyn Fn(&T) -> String>;
type DragStartFn = Box<dyn FnMut(&str, usize)>;
type PressFn<T> = Box<dyn FnMut(&T, usize)>;
type SortFn = Box<dyn FnMut(&[String])>;
type ScrollToFn = Box<dyn FnMut(f32, bool)>;

/// Per-cell render state for one frame
#[derive(Clone, Copy, Debug)]
pub struct CellSnapshot<'a> {
    pub key: &'a str,
    pub index: usize,
    /// Rendered top-left x, in content coordinates
    pub x: f32,
    /// Rendered top-left y, in content coordinates
    pub y: f32,
    pub opacity: f32,
    /// True while this cell is picked up; render it elevated
    pub dragging: bool,
}

/// A fixed-column grid whose items can be reordered by long-press dragging
pub struct SortableGrid<T> {
    config: GridConfig,
    geometry: GridGeometry,
    store: ItemStore,
    items: Vec<T>,
    key_of: KeyExtractor<T>,
    tracker: GroupTracker,
    phase: DragPhase,
    autoscroll: AutoScroll,
    viewport_height: f32,
    scroll_offset: f32,
    on_drag_start: Option<DragStartFn>,
    on_press: Option<PressFn<T>>,
    on_sort: Option<SortFn>,
    on_scroll_to: Option<ScrollToFn>,
}

impl<T> SortableGrid<T> {
    /// Build an engine for the given configuration.
    ///
    /// Fails fast on degenerate configuration rather than computing broken
    /// geometry later.
    pub fn new(
        config: GridConfig,
        key_of: impl Fn(&T) -> String + 'static,
    ) -> Result<Self, GridError> {
        let geometry = config.resolve()?;
        Ok(Self {
            config,
            geometry,
            store: ItemStore::new(),
            items: Vec::new(),
            key_of: Box::new(key_of),
            tracker: GroupTracker::new(),
            phase: DragPhase::Idle,
            autoscroll: AutoScroll::new(),
            viewport_height: 0.0,
            scroll_offset: 0.0,
            on_drag_start: None,
            on_press: None,
            on_sort: None,
            on_scroll_to: None,
        })
    }

    // ========================================================================
    // Callback registration
    // ========================================================================

    /// Fired once per successful pick-up with `(key, index)`
    pub fn on_drag_start(mut self, f: impl FnMut(&str, usize) + 'static) -> Self {
        self.on_drag_start = Some(Box::new(f));
        self
    }

    /// Fired for a plain tap with `(&item, index)`; mutually exclusive with
    /// a drag
    pub fn on_press(mut self, f: impl FnMut(&T, usize) + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    /// Fired exactly once per completed drag cycle with the committed order
    pub fn on_sort(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.on_sort = Some(Box::new(f));
        self
    }

    /// Fired when auto-scroll wants the host to move to an offset
    pub fn on_scroll_to(mut self, f: impl FnMut(f32, bool) + 'static) -> Self {
        self.on_scroll_to = Some(Box::new(f));
        self
    }

    // ========================================================================
    // Host inputs
    // ========================================================================

    /// Replace the input sequence, reconciling item state by key.
    ///
    /// An input with identical keys in identical order leaves animation
    /// state untouched. If the picked-up key disappears mid-drag, the
    /// session is cancelled without a commit report.
    pub fn set_items(&mut self, items: Vec<T>) {
        let new_keys: Vec<String> = items.iter().map(|item| (self.key_of)(item)).collect();
        self.items = items;

        match self.store.reconcile(new_keys, &self.geometry) {
            StoreDiff::Unchanged => {}
            StoreDiff::Changed { moved, removed } => {
                let selected_removed = self
                    .phase
                    .selected_key()
                    .is_some_and(|key| removed.iter().any(|r| r == key));
                if selected_removed {
                    tracing::debug!("selected key vanished from input, cancelling drag");
                    self.cancel_session();
                }
                for key in &removed {
                    // Settling on behalf of a discarded key keeps groups from
                    // waiting on a tween that will never tick again. Any
                    // release completion this produces has no session left to
                    // commit for.
                    self.tracker.settle(key);
                }
                self.apply_moves(moved);
            }
        }
    }

    /// Swap the grid configuration, re-deriving every logical position.
    ///
    /// Animatable handles are reused, not recreated; positions snap to the
    /// new layout since a relayout is not a reorder.
    pub fn set_config(&mut self, config: GridConfig) -> Result<(), GridError> {
        let geometry = config.resolve()?;
        self.config = config;
        self.geometry = geometry;
        self.store.relayout(&self.geometry);
        Ok(())
    }

    /// Report the rendering surface's height (layout measurement)
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    /// Report the host's current content offset
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }

    // ========================================================================
    // Gesture stream
    // ========================================================================

    /// Long-press on an item: pick it up and start a drag session.
    ///
    /// Ignored while any layout animation is in flight or a session already
    /// exists; re-entrant pick-ups on an inconsistent intermediate layout
    /// are an expected race, not an error.
    pub fn long_press(&mut self, key: &str) {
        if self.tracker.is_busy() {
            tracing::trace!(key, "long-press ignored, layout animating");
            return;
        }
        if !self.phase.is_idle() {
            return;
        }
        let Some(index) = self.store.index_of(key) else {
            return;
        };

        let pointer_start = self.geometry.position_of(index);
        self.phase = DragPhase::Dragging(DragSession::new(key.to_string(), pointer_start));
        self.autoscroll.activate();
        tracing::trace!(key, index, "drag started");

        if let Some(mut cb) = self.on_drag_start.take() {
            cb(key, index);
            self.on_drag_start = Some(cb);
        }
    }

    /// Pointer-move sample, relative to the gesture start.
    ///
    /// Drives the picked-up cell 1:1 (no tween) and runs the reorder test.
    pub fn pointer_move(&mut self, dx: f32, dy: f32) {
        let (key, target) = match &mut self.phase {
            DragPhase::Dragging(session) => {
                session.move_delta = Point::new(dx, dy);
                (session.key.clone(), session.target())
            }
            _ => return,
        };

        if let Some(state) = self.store.get_mut(&key) {
            state.position.set(target.x, target.y);
        }
        self.reorder_test();
    }

    /// Pointer lifted (or gesture cancelled): start the snap-home animation.
    ///
    /// The commit report fires when the snap completes, which may be within
    /// this call when the cell is already home. Without an active drag this
    /// is a silent no-op: a duplicate up racing the release snap must not
    /// disturb the pending commit.
    pub fn pointer_up(&mut self) {
        if !self.phase.is_dragging() {
            return;
        }
        let DragPhase::Dragging(session) = std::mem::take(&mut self.phase) else {
            return;
        };
        self.autoscroll.deactivate();

        let key = session.key;
        let Some(state) = self.store.get_mut(&key) else {
            // Defensive: no state to snap, nothing to commit
            return;
        };

        let logical = state.logical;
        let moving = state
            .position
            .animate_to(logical.x, logical.y, TweenConfig::release());
        self.phase = DragPhase::Releasing { key: key.clone() };
        tracing::trace!(key = %key, "drag released");

        if moving {
            self.tracker.start(GroupClass::Release, [key]);
        } else {
            // Snap resolved synchronously (already home); commit now
            self.finish_release();
        }
    }

    /// Plain tap on the item at `index`; no-op while a session exists
    pub fn tap(&mut self, index: usize) {
        if !self.phase.is_idle() || index >= self.items.len() {
            return;
        }
        if let Some(mut cb) = self.on_press.take() {
            cb(&self.items[index], index);
            self.on_press = Some(cb);
        }
    }

    // ========================================================================
    // Frame drive
    // ========================================================================

    /// Advance animations and the auto-scroll loop by one frame.
    ///
    /// Completion of the release group is the single trigger that reports
    /// the final order.
    pub fn tick(&mut self, dt_ms: f32) {
        let settled = self.store.tick_all(dt_ms);
        let mut completed: SmallVec<[GroupClass; 2]> = SmallVec::new();
        for key in &settled {
            if let Some(class) = self.tracker.settle(key) {
                completed.push(class);
            }
        }
        for class in completed {
            if class == GroupClass::Release {
                self.finish_release();
            }
        }

        self.autoscroll_step();
    }

    // ========================================================================
    // Render surface and introspection
    // ========================================================================

    /// Per-cell render state, in sequence order
    pub fn cells(&self) -> impl Iterator<Item = CellSnapshot<'_>> + '_ {
        let dragging_key = match &self.phase {
            DragPhase::Dragging(session) => Some(session.key.as_str()),
            _ => None,
        };
        self.store
            .order()
            .iter()
            .enumerate()
            .filter_map(move |(index, key)| {
                self.store.get(key).map(|state| {
                    let (x, y) = state.position.get();
                    CellSnapshot {
                        key,
                        index,
                        x,
                        y,
                        opacity: state.opacity.get(),
                        dragging: dragging_key == Some(key.as_str()),
                    }
                })
            })
    }

    /// The authoritative ordered key sequence
    pub fn order(&self) -> &[String] {
        self.store.order()
    }

    /// The ordered items, matching `order`
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_dragging(&self) -> bool {
        self.phase.is_dragging()
    }

    /// Whether any layout-touching animation group is in flight
    pub fn is_animating(&self) -> bool {
        self.tracker.is_busy()
    }

    /// In-flight group count (at most one by construction)
    pub fn active_animation_groups(&self) -> usize {
        self.tracker.active_groups()
    }

    pub fn content_height(&self) -> f32 {
        self.geometry.content_height(self.store.len())
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// The hit-test-and-splice step run on every pointer sample.
    ///
    /// Skipped entirely while a group is in flight: samples are dropped, not
    /// queued, so no cell ever animates toward two targets at once.
    fn reorder_test(&mut self) {
        if self.tracker.is_busy() {
            tracing::trace!("reorder test dropped, group in flight");
            return;
        }
        let (key, target) = match &self.phase {
            DragPhase::Dragging(session) => (session.key.clone(), session.target()),
            _ => return,
        };

        let len = self.store.len();
        let Some(current) = self.store.index_of(&key) else {
            return;
        };
        let new_index = self.geometry.cell_index_at(target, len);
        if new_index == current {
            return;
        }

        // Single-element move: only items strictly between the two indices
        // shift, which keeps the animation set minimal.
        self.store.move_key(current, new_index);
        let item = self.items.remove(current);
        self.items.insert(new_index, item);

        let moved = self.store.reindex(&self.geometry);
        tracing::trace!(key = %key, from = current, to = new_index, "reorder applied");

        let mut members: SmallVec<[String; 8]> = SmallVec::new();
        for moved_key in moved {
            if moved_key == key {
                // The dragged cell is pointer-driven, never tweened
                continue;
            }
            if let Some(state) = self.store.get_mut(&moved_key) {
                let logical = state.logical;
                if state
                    .position
                    .animate_to(logical.x, logical.y, TweenConfig::reorder())
                {
                    members.push(moved_key);
                }
            }
        }
        self.tracker.start(GroupClass::Reorder, members);
    }

    /// One frame of the auto-scroll loop; only acts while armed
    fn autoscroll_step(&mut self) {
        if !self.autoscroll.is_active() {
            return;
        }
        let key = match &self.phase {
            DragPhase::Dragging(session) => session.key.clone(),
            _ => return,
        };
        let Some(state) = self.store.get(&key) else {
            return;
        };

        let (_, cell_y) = state.position.get();
        let pull = edge_pull(
            cell_y - self.scroll_offset,
            self.geometry.item_height(),
            self.viewport_height,
        );
        if pull.abs() <= SCROLL_EPSILON {
            return;
        }

        let content_height = self.geometry.content_height(self.store.len());
        let new_offset = clamp_offset(
            self.scroll_offset + pull,
            content_height,
            self.viewport_height,
        );
        let applied = new_offset - self.scroll_offset;
        if applied.abs() <= SCROLL_EPSILON {
            return;
        }

        self.scroll_offset = new_offset;
        if let DragPhase::Dragging(session) = &mut self.phase {
            session.scroll_accumulator += applied;
        }
        // The dragged cell stays under the viewport-fixed finger while the
        // content scrolls beneath it
        if let Some(state) = self.store.get_mut(&key) {
            state.position.shift(0.0, applied);
        }
        self.reorder_test();

        if let Some(mut cb) = self.on_scroll_to.take() {
            cb(new_offset, false);
            self.on_scroll_to = Some(cb);
        }
    }

    /// Commit the drag cycle: report the final order exactly once
    fn finish_release(&mut self) {
        let DragPhase::Releasing { key } = std::mem::take(&mut self.phase) else {
            return;
        };
        tracing::trace!(key = %key, "drag committed");
        if let Some(mut cb) = self.on_sort.take() {
            cb(self.store.order());
            self.on_sort = Some(cb);
        }
    }

    /// Implicit release without a commit report (selected key vanished)
    fn cancel_session(&mut self) {
        self.autoscroll.deactivate();
        self.phase = DragPhase::Idle;
    }

    /// Move surviving items toward their new logical positions after a
    /// reconciliation, as one group - or snap them if a group is already in
    /// flight, preserving the at-most-one-group invariant.
    ///
    /// The selected key is special-cased: mid-drag its position is
    /// pointer-driven and left alone; mid-release its in-flight snap is
    /// retargeted at the new logical position so it never settles off-slot.
    fn apply_moves(&mut self, moved: Vec<String>) {
        let busy = self.tracker.is_busy();
        let releasing = matches!(self.phase, DragPhase::Releasing { .. });
        let selected = self.phase.selected_key().map(str::to_string);

        let mut members: SmallVec<[String; 8]> = SmallVec::new();
        let mut settled: SmallVec<[String; 8]> = SmallVec::new();
        for key in moved {
            let is_selected = selected.as_deref() == Some(key.as_str());
            if is_selected && !releasing {
                continue;
            }
            let Some(state) = self.store.get_mut(&key) else {
                continue;
            };
            let logical = state.logical;
            if is_selected {
                if !state
                    .position
                    .animate_to(logical.x, logical.y, TweenConfig::release())
                {
                    // Retarget resolved synchronously; the snap is done
                    settled.push(key);
                }
            } else if busy {
                state.position.set(logical.x, logical.y);
                settled.push(key);
            } else if state
                .position
                .animate_to(logical.x, logical.y, TweenConfig::reorder())
            {
                members.push(key);
            }
        }

        // Snaps and synchronous retargets produce no tick-driven settle
        // edge; settle the tracker by hand so no group waits forever on a
        // dead tween.
        let mut completed: SmallVec<[GroupClass; 2]> = SmallVec::new();
        for key in &settled {
            if let Some(class) = self.tracker.settle(key) {
                completed.push(class);
            }
        }
        for class in completed {
            if class == GroupClass::Release {
                self.finish_release();
            }
        }

        if !busy {
            self.tracker.start(GroupClass::Reorder, members);
        }
    }
}
