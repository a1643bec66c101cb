//! Sortgrid Animation Layer
//!
//! Eased tweens, animated value pairs, and grouped completion tracking.
//!
//! # Features
//!
//! - **Animated values**: scalars and x/y pairs driven immediately or by
//!   eased tweens, ticked by the host's frame loop
//! - **Easing**: a small table of quad/cubic curves
//! - **Group tracking**: sets of tweens started together and treated as one
//!   completion unit, with a single busy predicate gating new work
//!
//! The layer owns no clock: the embedding engine advances tweens with a
//! per-frame `tick(dt_ms)` and feeds settle edges back into the tracker.

pub mod easing;
pub mod group;
pub mod value;

pub use easing::Easing;
pub use group::{GroupClass, GroupId, GroupTracker};
pub use value::{AnimatedValue, AnimatedVec2, TweenConfig};
