//! Edge auto-scroll
//!
//! While a drag is active, each frame checks whether the dragged cell sits
//! within half an item-height of the viewport's top or bottom edge and, if
//! so, nudges the scroll offset proportionally to the penetration depth.
//! The pull is capped at half an item-height per frame, and sub-pixel noise
//! below [`SCROLL_EPSILON`] is discarded so the offset does not thrash.
//!
//! The loop itself is gated by an activation token owned by the engine: set
//! on entering the dragging phase, cleared on every exit from it.

/// Minimum per-frame scroll delta worth applying
pub const SCROLL_EPSILON: f32 = 0.2;

/// Activation token for the per-frame auto-scroll step
#[derive(Debug, Default)]
pub struct AutoScroll {
    active: bool,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self { active: false }
    }

    /// Arm the loop; the engine steps it every frame while armed
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Disarm the loop; the next frame will not step it
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Signed scroll pull for a dragged cell at `cell_top` (viewport-relative).
///
/// Negative within half an item-height of the top edge, positive within half
/// an item-height of the bottom edge, zero elsewhere. Magnitude grows with
/// penetration depth and is capped at half an item-height.
pub fn edge_pull(cell_top: f32, item_height: f32, viewport_height: f32) -> f32 {
    let half = item_height / 2.0;

    if cell_top < half {
        return -(half - cell_top).min(half);
    }

    let cell_bottom = cell_top + item_height;
    let threshold = viewport_height - half;
    if cell_bottom > threshold {
        return (cell_bottom - threshold).min(half);
    }

    0.0
}

/// Clamp a scroll offset to the scrollable range
pub fn clamp_offset(offset: f32, content_height: f32, viewport_height: f32) -> f32 {
    let max = (content_height - viewport_height).max(0.0);
    offset.clamp(0.0, max)
}
