//! Grouped animation tracking
//!
//! A reorder shuffle starts one tween per displaced cell, but the engine
//! treats the set as a single transaction: no new layout animation may start
//! while the group is in flight, and the group completes only when every
//! member has settled. `GroupTracker` owns that bookkeeping; the tweens
//! themselves live with the item states and are ticked by the engine.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Unique identifier for an in-flight animation group
    pub struct GroupId;
}

/// What a group is doing to the grid
///
/// Both classes touch the layout, so both gate drag pick-up; they are
/// distinguished because release completion is the commit trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupClass {
    /// Displaced cells sliding to their new slots mid-drag
    Reorder,
    /// The picked-up cell snapping home after the pointer lifts
    Release,
}

/// An in-flight group: the keys whose tweens have not yet settled
struct Group {
    class: GroupClass,
    pending: SmallVec<[String; 8]>,
}

/// Tracks grouped animations as single completion units
pub struct GroupTracker {
    groups: SlotMap<GroupId, Group>,
}

impl GroupTracker {
    pub fn new() -> Self {
        Self {
            groups: SlotMap::with_key(),
        }
    }

    /// Start tracking a group over `members`.
    ///
    /// Returns `None` when the member set is empty, which means the group is
    /// synchronously complete (every tween resolved immediately) and the
    /// caller should run its completion path right away.
    pub fn start<I>(&mut self, class: GroupClass, members: I) -> Option<GroupId>
    where
        I: IntoIterator<Item = String>,
    {
        let pending: SmallVec<[String; 8]> = members.into_iter().collect();
        if pending.is_empty() {
            return None;
        }
        tracing::trace!(?class, members = pending.len(), "animation group started");
        Some(self.groups.insert(Group { class, pending }))
    }

    /// Record that `key`'s tween settled.
    ///
    /// When this empties a group, the whole group is removed atomically and
    /// its class is returned so the caller can run the completion path.
    pub fn settle(&mut self, key: &str) -> Option<GroupClass> {
        let mut completed = None;
        for (id, group) in self.groups.iter_mut() {
            if let Some(pos) = group.pending.iter().position(|k| k == key) {
                group.pending.swap_remove(pos);
                if group.pending.is_empty() {
                    completed = Some(id);
                }
                break;
            }
        }

        let id = completed?;
        let group = self.groups.remove(id)?;
        tracing::trace!(class = ?group.class, "animation group completed");
        Some(group.class)
    }

    /// Drop a group without waiting for its members
    pub fn cancel(&mut self, id: GroupId) {
        self.groups.remove(id);
    }

    /// Drop every in-flight group
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Whether any layout-touching group is in flight.
    ///
    /// Gates drag pick-up and the reorder test.
    pub fn is_busy(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Whether a group of the given class is in flight
    pub fn has_class(&self, class: GroupClass) -> bool {
        self.groups.values().any(|g| g.class == class)
    }

    /// Number of in-flight groups
    pub fn active_groups(&self) -> usize {
        self.groups.len()
    }
}

impl Default for GroupTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_group_completes_synchronously() {
        let mut tracker = GroupTracker::new();
        assert!(tracker
            .start(GroupClass::Reorder, std::iter::empty())
            .is_none());
        assert!(!tracker.is_busy());
    }

    #[test]
    fn test_group_completes_only_when_all_members_settle() {
        let mut tracker = GroupTracker::new();
        tracker
            .start(GroupClass::Reorder, ["a".to_string(), "b".to_string()])
            .unwrap();

        assert!(tracker.is_busy());
        assert_eq!(tracker.settle("a"), None);
        assert!(tracker.is_busy());
        assert_eq!(tracker.settle("b"), Some(GroupClass::Reorder));
        assert!(!tracker.is_busy());
    }

    #[test]
    fn test_settle_unknown_key_is_noop() {
        let mut tracker = GroupTracker::new();
        tracker
            .start(GroupClass::Release, ["a".to_string()])
            .unwrap();

        assert_eq!(tracker.settle("zzz"), None);
        assert!(tracker.is_busy());
    }

    #[test]
    fn test_cancel_removes_group() {
        let mut tracker = GroupTracker::new();
        let id = tracker
            .start(GroupClass::Reorder, ["a".to_string()])
            .unwrap();

        tracker.cancel(id);
        assert!(!tracker.is_busy());
        assert_eq!(tracker.settle("a"), None);
    }

    #[test]
    fn test_class_queries() {
        let mut tracker = GroupTracker::new();
        tracker
            .start(GroupClass::Release, ["a".to_string()])
            .unwrap();

        assert!(tracker.has_class(GroupClass::Release));
        assert!(!tracker.has_class(GroupClass::Reorder));
        assert_eq!(tracker.active_groups(), 1);
    }
}
