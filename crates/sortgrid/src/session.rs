//! Drag session state machine
//!
//! One pick-up-drag-drop cycle is a `DragPhase` value: `Idle` until a
//! long-press arms a session, `Dragging` while pointer samples stream in,
//! `Releasing` while the snap-home animation flies, then back to `Idle` when
//! the final order is committed. The session carries everything the reorder
//! test and the auto-scroll loop need to reconstruct the dragged cell's
//! target position from relative pointer deltas.

use crate::geometry::Point;

/// Live state for an active drag
#[derive(Clone, Debug)]
pub struct DragSession {
    /// Key of the picked-up item
    pub key: String,
    /// Logical grid position of the item when the gesture began
    pub pointer_start: Point,
    /// Latest pointer delta relative to gesture start
    pub move_delta: Point,
    /// Cumulative auto-scroll offset since drag start; compensates the
    /// delta math for content moving under a stationary finger
    pub scroll_accumulator: f32,
}

impl DragSession {
    pub fn new(key: String, pointer_start: Point) -> Self {
        Self {
            key,
            pointer_start,
            move_delta: Point::ZERO,
            scroll_accumulator: 0.0,
        }
    }

    /// The dragged cell's current target position in content coordinates
    pub fn target(&self) -> Point {
        Point::new(
            self.pointer_start.x + self.move_delta.x,
            self.pointer_start.y + self.move_delta.y + self.scroll_accumulator,
        )
    }
}

/// The drag lifecycle as a sum type
///
/// Armed and Dragging are one observable state: a session is created on
/// long-press and driven identically until release.
#[derive(Clone, Debug, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(DragSession),
    Releasing {
        key: String,
    },
}

impl DragPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragPhase::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragPhase::Dragging(_))
    }

    /// Key held by the session, in either active phase
    pub fn selected_key(&self) -> Option<&str> {
        match self {
            DragPhase::Idle => None,
            DragPhase::Dragging(session) => Some(&session.key),
            DragPhase::Releasing { key } => Some(key),
        }
    }
}
