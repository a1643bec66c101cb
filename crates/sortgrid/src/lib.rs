//! Sortgrid - a reorderable grid engine
//!
//! Lays a sequence of items into a fixed-column grid and lets a user
//! long-press a cell, drag it across the grid, and drop it into a new slot,
//! reordering the sequence and reporting the committed order.
//!
//! # Features
//!
//! - **Stable keys**: item state is addressed by host-supplied keys, so
//!   animatable handles survive reorders and input reconciliation
//! - **Grouped animations**: displaced cells slide as one transaction; a new
//!   reorder never starts while the previous one is in flight
//! - **Edge auto-scroll**: dragging near the viewport edge scrolls the
//!   content under a stationary finger
//! - **Host-driven**: the engine consumes resolved gestures and a per-frame
//!   tick; rendering, raw touch handling, and scrolling stay with the host
//!
//! # Example
//!
//! ```rust
//! use sortgrid::prelude::*;
//!
//! let mut grid = SortableGrid::new(
//!     GridConfig::new(3, 300.0),
//!     |item: &String| item.clone(),
//! )
//! .unwrap()
//! .on_sort(|order| println!("committed: {order:?}"));
//!
//! grid.set_items(vec!["a".into(), "b".into(), "c".into()]);
//! grid.long_press("a");
//! grid.pointer_move(120.0, 0.0);
//! grid.pointer_up();
//! // drive grid.tick(dt) from the host's frame loop
//! ```

pub mod autoscroll;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod session;
pub mod store;

pub use config::{GridConfig, GridError};
pub use engine::{CellSnapshot, SortableGrid};
pub use geometry::{GridGeometry, Point};
pub use session::{DragPhase, DragSession};
pub use store::{ItemState, ItemStore, StoreDiff};

pub use sortgrid_animation::{AnimatedValue, AnimatedVec2, Easing, GroupClass, TweenConfig};

/// Commonly used types
pub mod prelude {
    pub use crate::config::{GridConfig, GridError};
    pub use crate::engine::{CellSnapshot, SortableGrid};
    pub use crate::geometry::Point;
    pub use sortgrid_animation::{Easing, TweenConfig};
}
