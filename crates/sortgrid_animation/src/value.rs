//! Tween-driven animated values
//!
//! `AnimatedValue` is the opaque animatable scalar the grid engine drives:
//! it can be written immediately (pointer-driven tracks) or eased toward a
//! target over time (layout shuffles, release snaps). `AnimatedVec2` moves an
//! x/y pair as a single unit.
//!
//! Zero-duration and zero-distance tweens resolve synchronously: the value
//! jumps to the target and the tween never enters flight. Callers relying on
//! a completion edge must check the return of [`AnimatedValue::animate_to`].

use crate::easing::Easing;

/// Distance under which a tween is considered already at its target.
const SETTLE_EPSILON: f32 = 1e-4;

/// Configuration for a single tween
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenConfig {
    /// Duration in milliseconds
    pub duration_ms: u32,
    /// Easing curve applied to progress
    pub easing: Easing,
}

impl TweenConfig {
    pub fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// Uniform shuffle used when displaced cells slide to their new slots
    pub fn reorder() -> Self {
        Self::new(300, Easing::EaseInOutQuad)
    }

    /// Decelerating snap used when the picked-up cell settles home
    pub fn release() -> Self {
        Self::new(200, Easing::EaseOutCubic)
    }
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self::reorder()
    }
}

/// An in-flight tween from one value to another
#[derive(Clone, Copy, Debug)]
struct Tween {
    from: f32,
    to: f32,
    elapsed_ms: f32,
    duration_ms: f32,
    easing: Easing,
}

/// A scalar that can be set immediately or animated toward a target
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    current: f32,
    tween: Option<Tween>,
}

impl AnimatedValue {
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            tween: None,
        }
    }

    /// Read the current value
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Write the value immediately, cancelling any in-flight tween
    pub fn set(&mut self, value: f32) {
        self.current = value;
        self.tween = None;
    }

    /// Start a tween toward `target`.
    ///
    /// Returns `true` if a tween entered flight, `false` if the move resolved
    /// synchronously (zero duration or the value is already at the target).
    pub fn animate_to(&mut self, target: f32, config: TweenConfig) -> bool {
        if config.duration_ms == 0 || (target - self.current).abs() < SETTLE_EPSILON {
            self.set(target);
            return false;
        }
        self.tween = Some(Tween {
            from: self.current,
            to: target,
            elapsed_ms: 0.0,
            duration_ms: config.duration_ms as f32,
            easing: config.easing,
        });
        true
    }

    /// Cancel any in-flight tween, leaving the value where it is
    pub fn cancel(&mut self) {
        self.tween = None;
    }

    /// Whether a tween is in flight
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance the tween by `dt_ms`.
    ///
    /// Returns `true` on the tick that finishes the tween.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };

        tween.elapsed_ms += dt_ms;
        if tween.elapsed_ms >= tween.duration_ms {
            self.current = tween.to;
            self.tween = None;
            return true;
        }

        let progress = tween.elapsed_ms / tween.duration_ms;
        let eased = tween.easing.apply(progress);
        self.current = tween.from + (tween.to - tween.from) * eased;
        false
    }
}

/// An x/y pair animated as one unit
///
/// Both components share one tween clock: the pair is settled only when both
/// components are settled, and [`AnimatedVec2::tick`] reports the tick on
/// which the last component lands.
#[derive(Clone, Debug)]
pub struct AnimatedVec2 {
    pub x: AnimatedValue,
    pub y: AnimatedValue,
}

impl AnimatedVec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: AnimatedValue::new(x),
            y: AnimatedValue::new(y),
        }
    }

    /// Read the current pair
    pub fn get(&self) -> (f32, f32) {
        (self.x.get(), self.y.get())
    }

    /// Write both components immediately, cancelling in-flight tweens
    pub fn set(&mut self, x: f32, y: f32) {
        self.x.set(x);
        self.y.set(y);
    }

    /// Shift both components immediately by a delta
    pub fn shift(&mut self, dx: f32, dy: f32) {
        self.x.set(self.x.get() + dx);
        self.y.set(self.y.get() + dy);
    }

    /// Start tweening both components toward `(x, y)`.
    ///
    /// Returns `true` if either component entered flight.
    pub fn animate_to(&mut self, x: f32, y: f32, config: TweenConfig) -> bool {
        let moving_x = self.x.animate_to(x, config);
        let moving_y = self.y.animate_to(y, config);
        moving_x || moving_y
    }

    /// Cancel in-flight tweens on both components
    pub fn cancel(&mut self) {
        self.x.cancel();
        self.y.cancel();
    }

    pub fn is_animating(&self) -> bool {
        self.x.is_animating() || self.y.is_animating()
    }

    /// Advance both components; returns `true` on the tick where the pair
    /// transitions from animating to settled.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let was_animating = self.is_animating();
        self.x.tick(dt_ms);
        self.y.tick(dt_ms);
        was_animating && !self.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cancels_tween() {
        let mut v = AnimatedValue::new(0.0);
        assert!(v.animate_to(10.0, TweenConfig::new(100, Easing::Linear)));
        v.tick(50.0);
        assert!(v.is_animating());

        v.set(3.0);
        assert!(!v.is_animating());
        assert_eq!(v.get(), 3.0);
    }

    #[test]
    fn test_tween_progresses_and_completes() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(100.0, TweenConfig::new(100, Easing::Linear));

        assert!(!v.tick(50.0));
        assert!((v.get() - 50.0).abs() < 1e-3);

        assert!(v.tick(60.0));
        assert_eq!(v.get(), 100.0);
        assert!(!v.is_animating());

        // No further completion edges once settled
        assert!(!v.tick(16.0));
    }

    #[test]
    fn test_zero_duration_resolves_synchronously() {
        let mut v = AnimatedValue::new(0.0);
        assert!(!v.animate_to(42.0, TweenConfig::new(0, Easing::Linear)));
        assert_eq!(v.get(), 42.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn test_zero_distance_resolves_synchronously() {
        let mut v = AnimatedValue::new(7.0);
        assert!(!v.animate_to(7.0, TweenConfig::new(300, Easing::Linear)));
        assert!(!v.is_animating());
    }

    #[test]
    fn test_vec2_settles_when_both_components_settle() {
        let mut p = AnimatedVec2::new(0.0, 0.0);
        // x has distance, y is already there
        assert!(p.animate_to(10.0, 0.0, TweenConfig::new(100, Easing::Linear)));

        assert!(!p.tick(50.0));
        assert!(p.tick(60.0));
        assert_eq!(p.get(), (10.0, 0.0));
    }

    #[test]
    fn test_vec2_shift_is_immediate() {
        let mut p = AnimatedVec2::new(5.0, 5.0);
        p.shift(1.0, -2.0);
        assert_eq!(p.get(), (6.0, 3.0));
        assert!(!p.is_animating());
    }
}
