//! Clip-list painting for partially covered windows.
//!
//! A host window that is overlapped by other windows exposes its visible area
//! as a list of rectangles rather than a single one. A redraw of one widget
//! has to paint every part of the requested area that is both inside the
//! widget and visible, and nothing else.
//!
//! [`RedrawRequest`] pairs the requested rectangle with the widget's work
//! rectangle. Its [`passes`](RedrawRequest::passes) iterator yields one
//! rectangle per visible entry that overlaps, and
//! [`paint`](RedrawRequest::paint) sets the device clip to each of them in turn
//! and runs a paint step.
//!
//! # Example
//!
//! ```
//! use horizon_navbar_render::{Color, DisplayList, Painter, Rect, RedrawRequest};
//!
//! // A window split in two by an overlapping window.
//! let visible = [Rect::new(0, 0, 50, 30), Rect::new(80, 0, 100, 30)];
//! let request = RedrawRequest::new(Rect::new(0, 0, 200, 30), Rect::new(40, 0, 60, 26));
//!
//! let mut painter = DisplayList::new();
//! let passes = request.paint(&visible, &mut painter, |p, pass| {
//!     p.fill_rect(pass, Color::WHITE);
//! });
//! assert_eq!(passes, 2);
//! ```

use crate::painter::Painter;
use crate::types::Rect;

/// A request to repaint part of one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedrawRequest {
    /// Area the host asked to repaint, in device coordinates.
    pub requested: Rect,
    /// The widget's allocated work rectangle, in device coordinates.
    pub work: Rect,
}

impl RedrawRequest {
    /// Create a redraw request.
    #[inline]
    pub const fn new(requested: Rect, work: Rect) -> Self {
        Self { requested, work }
    }

    /// The part of the request inside the widget, if any.
    #[inline]
    pub fn clip(&self) -> Option<Rect> {
        self.requested.intersect(&self.work)
    }

    /// Rectangles that must be painted, front-to-back.
    ///
    /// Every visible entry is visited. Entries with no area, or that miss the
    /// clip, produce nothing. Yields nothing at all when the request misses
    /// the widget.
    pub fn passes<'a>(&self, visible: &'a [Rect]) -> impl Iterator<Item = Rect> + 'a {
        let clip = self.clip();
        visible
            .iter()
            .filter_map(move |entry| clip.and_then(|clip| entry.intersect(&clip)))
    }

    /// Paint every pass with `paint_step`, setting the device clip first.
    ///
    /// The device clip is removed again after the last pass. Returns the
    /// number of passes painted.
    pub fn paint<P, F>(&self, visible: &[Rect], painter: &mut P, mut paint_step: F) -> usize
    where
        P: Painter + ?Sized,
        F: FnMut(&mut P, Rect),
    {
        if self.clip().is_none() {
            return 0;
        }

        let mut count = 0;
        for pass in self.passes(visible) {
            painter.set_clip(Some(pass));
            paint_step(painter, pass);
            count += 1;
        }
        if count > 0 {
            painter.set_clip(None);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::DisplayList;
    use crate::types::{Color, Point};

    fn setup() -> (RedrawRequest, Vec<Rect>) {
        let work = Rect::new(100, 10, 200, 25);
        let requested = Rect::new(0, 0, 250, 40);
        // Window split by two overlapping windows.
        let visible = vec![
            Rect::new(0, 0, 140, 50),
            Rect::new(160, 0, 40, 20),
            Rect::new(160, 20, 400, 30),
        ];
        (RedrawRequest::new(requested, work), visible)
    }

    fn area(rects: &[Rect]) -> i64 {
        rects
            .iter()
            .map(|r| i64::from(r.width()) * i64::from(r.height()))
            .sum()
    }

    #[test]
    fn test_rejects_request_outside_work() {
        let request = RedrawRequest::new(Rect::new(0, 0, 10, 10), Rect::new(20, 0, 10, 10));
        let visible = [Rect::new(0, 0, 100, 100)];
        assert_eq!(request.passes(&visible).count(), 0);

        let mut painter = DisplayList::new();
        assert_eq!(request.paint(&visible, &mut painter, |_, _| {}), 0);
        assert!(painter.commands().is_empty());
    }

    #[test]
    fn test_passes_contained_in_request_and_work() {
        let (request, visible) = setup();
        let passes: Vec<_> = request.passes(&visible).collect();

        assert_eq!(passes.len(), 3);
        for pass in &passes {
            assert!(request.requested.contains_rect(pass));
            assert!(request.work.contains_rect(pass));
        }
    }

    #[test]
    fn test_visits_every_visible_rect() {
        let (request, visible) = setup();
        let passes: Vec<_> = request.passes(&visible).collect();
        assert_eq!(
            passes,
            vec![
                Rect::new(100, 10, 40, 25),
                Rect::new(160, 10, 40, 10),
                Rect::new(160, 20, 90, 15),
            ]
        );
    }

    #[test]
    fn test_full_coverage_equals_clip() {
        let work = Rect::new(10, 10, 100, 20);
        let requested = Rect::new(30, 0, 200, 200);
        // Disjoint tiles covering the whole work rectangle.
        let visible = [
            Rect::new(0, 0, 50, 40),
            Rect::new(50, 0, 50, 15),
            Rect::new(50, 15, 500, 25),
            Rect::new(100, 0, 500, 15),
        ];
        let request = RedrawRequest::new(requested, work);
        let passes: Vec<_> = request.passes(&visible).collect();

        let clip = request.clip().unwrap();
        let bounds = passes[1..].iter().fold(passes[0], |acc, r| acc.union(r));
        assert_eq!(bounds, clip);
        assert_eq!(area(&passes), area(&[clip]));
    }

    #[test]
    fn test_empty_entries_are_skipped() {
        let request = RedrawRequest::new(Rect::new(0, 0, 100, 100), Rect::new(0, 0, 100, 100));
        let visible = [
            Rect::new(0, 0, 0, 0),
            Rect::new(10, 10, 10, 10),
            Rect::new(50, 50, 0, 10),
            Rect::new(60, 60, 5, 5),
        ];
        let passes: Vec<_> = request.passes(&visible).collect();
        assert_eq!(passes, vec![Rect::new(10, 10, 10, 10), Rect::new(60, 60, 5, 5)]);
    }

    #[test]
    fn test_paint_sets_and_resets_clip() {
        let (request, visible) = setup();
        let mut painter = DisplayList::new();
        let count = request.paint(&visible, &mut painter, |p, pass| {
            p.draw_line(pass.origin, Point::new(pass.right() - 1, pass.top()), Color::BLACK);
        });

        assert_eq!(count, 3);
        assert_eq!(painter.clips().len(), 3);
        assert_eq!(painter.clip(), None);
    }
}
