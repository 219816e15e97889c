//! Damage tracking for partial repainting.
//!
//! [`DamageTracker`] accumulates redraw requests for one widget into a single
//! bounding rectangle in that widget's local coordinates.
//!
//! # Architecture
//!
//! Damage is merged by bounding-box union: the pending rectangle spans the
//! minimum of all origins and the maximum of all far edges. Two small, distant
//! requests therefore repaint the whole box between them. This can over-redraw
//! but never under-redraws, and the merge is commutative, associative and
//! idempotent.
//!
//! Requests are not filtered. A zero-area request still stretches the pending
//! box to include its origin.

use crate::types::Rect;

/// Tracks the damaged (dirty) region of one widget.
///
/// # Example
///
/// ```
/// use horizon_navbar_render::damage::DamageTracker;
/// use horizon_navbar_render::Rect;
///
/// let mut tracker = DamageTracker::new();
///
/// tracker.add_damage(Rect::new(0, 0, 10, 10));
/// tracker.add_damage(Rect::new(5, 5, 10, 10));
///
/// assert_eq!(tracker.damage_region(), Some(Rect::new(0, 0, 15, 15)));
///
/// // Clear damage after repainting
/// tracker.clear();
/// assert!(!tracker.has_damage());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DamageTracker {
    /// The accumulated damage region. `None` means nothing is pending.
    damage: Option<Rect>,
    /// Number of requests merged since the last clear.
    damage_count: u32,
    /// Extent used by [`invalidate_all`](Self::invalidate_all).
    viewport: Option<Rect>,
}

impl DamageTracker {
    /// Create a new damage tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a damage tracker that knows the full extent of its widget.
    pub fn with_viewport(viewport: Rect) -> Self {
        Self {
            viewport: Some(viewport),
            ..Self::default()
        }
    }

    /// Set the widget extent, e.g. after a resize.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
    }

    /// Get the widget extent.
    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    /// Add a damaged region that needs repainting.
    ///
    /// The first request since the last clear is stored as-is; later
    /// requests are merged by bounding-box union.
    pub fn add_damage(&mut self, rect: Rect) {
        self.damage_count = self.damage_count.saturating_add(1);
        self.damage = Some(match self.damage {
            Some(existing) => existing.union(&rect),
            None => rect,
        });
        tracing::trace!(
            target: "horizon_navbar::damage",
            ?rect,
            merged = ?self.damage,
            count = self.damage_count,
            "damage added"
        );
    }

    /// Mark a region as damaged by its bounds.
    #[inline]
    pub fn add_damage_bounds(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.add_damage(Rect::new(x, y, width, height));
    }

    /// Mark the whole viewport as damaged.
    ///
    /// Does nothing if no viewport has been set.
    pub fn invalidate_all(&mut self) {
        if let Some(viewport) = self.viewport {
            self.add_damage(viewport);
        }
    }

    /// Get the current damage region.
    ///
    /// Returns `None` if no damage has been recorded.
    #[inline]
    pub fn damage_region(&self) -> Option<Rect> {
        self.damage
    }

    /// Check if any damage has been recorded.
    #[inline]
    pub fn has_damage(&self) -> bool {
        self.damage.is_some()
    }

    /// Get the number of damage requests merged since the last clear.
    #[inline]
    pub fn damage_count(&self) -> u32 {
        self.damage_count
    }

    /// Clear all damage.
    ///
    /// Should be called after the damaged region has been repainted.
    pub fn clear(&mut self) {
        self.damage = None;
        self.damage_count = 0;
    }

    /// Return the pending damage and clear the tracker.
    pub fn take(&mut self) -> Option<Rect> {
        let damage = self.damage.take();
        self.damage_count = 0;
        damage
    }
}

/// Implemented by widgets that report damage into a tracker they do not own.
pub trait DamageSource {
    /// Report damage to the tracker.
    fn report_damage(&mut self, tracker: &mut DamageTracker);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracker() {
        let tracker = DamageTracker::new();
        assert!(!tracker.has_damage());
        assert!(tracker.damage_region().is_none());
        assert_eq!(tracker.damage_count(), 0);
    }

    #[test]
    fn test_single_damage() {
        let mut tracker = DamageTracker::new();
        tracker.add_damage(Rect::new(10, 20, 100, 50));

        assert!(tracker.has_damage());
        assert_eq!(tracker.damage_count(), 1);
        assert_eq!(tracker.damage_region(), Some(Rect::new(10, 20, 100, 50)));
    }

    #[test]
    fn test_overlapping_merge() {
        let mut tracker = DamageTracker::new();
        tracker.add_damage_bounds(0, 0, 10, 10);
        tracker.add_damage_bounds(5, 5, 10, 10);

        assert_eq!(tracker.damage_region(), Some(Rect::new(0, 0, 15, 15)));
    }

    #[test]
    fn test_distant_rects_merge_to_bounding_box() {
        let mut tracker = DamageTracker::new();
        tracker.add_damage(Rect::new(10, 10, 5, 5));
        tracker.add_damage(Rect::new(100, 100, 30, 30));

        let damage = tracker.damage_region().unwrap();
        assert_eq!(damage.left(), 10);
        assert_eq!(damage.top(), 10);
        assert_eq!(damage.right(), 130);
        assert_eq!(damage.bottom(), 130);
    }

    #[test]
    fn test_merge_order_independent() {
        let rects = [
            Rect::new(3, 40, 7, 2),
            Rect::new(-5, 8, 20, 20),
            Rect::new(60, 1, 4, 4),
            Rect::new(3, 40, 7, 2),
        ];

        let mut forward = DamageTracker::new();
        rects.iter().for_each(|r| forward.add_damage(*r));

        let mut backward = DamageTracker::new();
        rects.iter().rev().for_each(|r| backward.add_damage(*r));

        let expected = rects[1..]
            .iter()
            .fold(rects[0], |acc, r| acc.union(r));
        assert_eq!(forward.damage_region(), Some(expected));
        assert_eq!(backward.damage_region(), Some(expected));
    }

    #[test]
    fn test_repeated_rect_is_idempotent() {
        let mut tracker = DamageTracker::new();
        for _ in 0..4 {
            tracker.add_damage(Rect::new(2, 3, 4, 5));
        }
        assert_eq!(tracker.damage_region(), Some(Rect::new(2, 3, 4, 5)));
        assert_eq!(tracker.damage_count(), 4);
    }

    #[test]
    fn test_empty_rect_participates() {
        let mut tracker = DamageTracker::new();
        tracker.add_damage(Rect::new(10, 10, 10, 10));
        tracker.add_damage(Rect::new(0, 0, 0, 0));

        assert_eq!(tracker.damage_region(), Some(Rect::new(0, 0, 20, 20)));
    }

    #[test]
    fn test_invalidate_all() {
        let mut tracker = DamageTracker::with_viewport(Rect::new(0, 0, 300, 22));
        tracker.add_damage(Rect::new(4, 4, 2, 2));
        tracker.invalidate_all();

        assert_eq!(tracker.damage_region(), Some(Rect::new(0, 0, 300, 22)));

        let mut no_viewport = DamageTracker::new();
        no_viewport.invalidate_all();
        assert!(!no_viewport.has_damage());
    }

    #[test]
    fn test_clear_and_take() {
        let mut tracker = DamageTracker::new();
        tracker.add_damage(Rect::new(10, 10, 50, 50));
        tracker.clear();

        assert!(!tracker.has_damage());
        assert_eq!(tracker.damage_count(), 0);

        tracker.add_damage(Rect::new(1, 1, 1, 1));
        assert_eq!(tracker.take(), Some(Rect::new(1, 1, 1, 1)));
        assert!(!tracker.has_damage());
        assert_eq!(tracker.take(), None);
    }
}
