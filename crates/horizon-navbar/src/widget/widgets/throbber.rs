//! Activity indicator widget.
//!
//! [`Throbber`] shows an animation while the browser is busy. The shell drives
//! it: [`start`](Throbber::start) when loading begins,
//! [`advance`](Throbber::advance) on every animation tick and
//! [`stop`](Throbber::stop) when loading ends. Frames come from the throbber
//! atlas, one column per frame; column 0 is the idle image.

use horizon_navbar_render::{IconAtlas, Painter, Point, Rect, RedrawRequest};

use crate::component::{ComponentId, ComponentTree, EventKind, Orientation, SizeBounds};
use crate::error::ToolbarResult;
use crate::logging::targets;
use crate::style::ToolbarStyle;

/// Frame shown while idle.
pub const IDLE_FRAME: usize = 0;

/// First frame of the running animation.
pub const FIRST_FRAME: usize = 1;

/// Observable throbber state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrobberState {
    Idle,
    Running(usize),
}

/// An animated busy indicator.
#[derive(Debug, Clone)]
pub struct Throbber {
    running: bool,
    frame: usize,
    max_frame: usize,
    component: ComponentId,
}

impl Throbber {
    /// Create an idle throbber whose animation runs from [`FIRST_FRAME`] to
    /// `max_frame`.
    ///
    /// Adds a fixed-width component to `tree` with `handler` bound to redraw.
    pub fn create<H: Copy>(
        tree: &mut ComponentTree<H>,
        style: &ToolbarStyle,
        max_frame: usize,
        handler: H,
    ) -> ToolbarResult<Self> {
        let bounds = SizeBounds::fixed_width(style.button_width()).with_max_height(style.height);
        let component = tree.create("throbber", Orientation::Horizontal, bounds, 0);
        tree.bind(component, EventKind::Redraw, handler)?;
        Ok(Self {
            running: false,
            frame: IDLE_FRAME,
            max_frame: max_frame.max(FIRST_FRAME),
            component,
        })
    }

    #[inline]
    pub fn component(&self) -> ComponentId {
        self.component
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Last animation frame.
    #[inline]
    pub fn max_frame(&self) -> usize {
        self.max_frame
    }

    /// Stored frame index, which may be stale until the next redraw.
    #[inline]
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn state(&self) -> ThrobberState {
        if self.running {
            ThrobberState::Running(self.frame)
        } else {
            ThrobberState::Idle
        }
    }

    /// Begin animating from the first frame.
    pub fn start(&mut self) {
        self.running = true;
        self.frame = FIRST_FRAME;
    }

    /// Return to the idle frame.
    pub fn stop(&mut self) {
        self.running = false;
        self.frame = IDLE_FRAME;
    }

    /// Step to the next frame, wrapping after the last.
    ///
    /// An out-of-range frame restarts at the first frame. Does nothing while
    /// idle; returns whether the frame moved.
    pub fn advance(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.frame = if self.in_range(self.frame) && self.frame < self.max_frame {
            self.frame + 1
        } else {
            FIRST_FRAME
        };
        true
    }

    /// Overwrite the frame index, as a stale notification from the shell would.
    ///
    /// The value is not validated here; redraw corrects it.
    pub fn set_frame(&mut self, frame: usize) {
        self.frame = frame;
    }

    /// The frame a redraw shows, clamping an out-of-range running frame to
    /// [`FIRST_FRAME`].
    pub fn displayed_frame(&mut self) -> usize {
        if !self.running {
            self.frame = IDLE_FRAME;
        } else if !self.in_range(self.frame) {
            tracing::trace!(target: targets::TOOLBAR, frame = self.frame, max = self.max_frame, "throbber frame clamped");
            self.frame = FIRST_FRAME;
        }
        self.frame
    }

    fn in_range(&self, frame: usize) -> bool {
        (FIRST_FRAME..=self.max_frame).contains(&frame)
    }

    /// Paint the part of the throbber inside `area`.
    ///
    /// Paints the background, then the current frame's atlas cell when the
    /// atlas is loaded. Returns the number of passes painted.
    pub fn on_redraw(
        &mut self,
        area: Rect,
        allocated: Rect,
        style: &ToolbarStyle,
        atlas: Option<&IconAtlas>,
        visible: &[Rect],
        painter: &mut dyn Painter,
    ) -> usize {
        let work = allocated.with_height_delta(-1);
        let frame = self.displayed_frame();
        let icon = atlas.and_then(|atlas| {
            atlas
                .cell_rect(frame, 0, style.icon_cell())
                .map(|src| (atlas, src))
        });
        if icon.is_none() {
            tracing::trace!(target: targets::DAMAGE, frame, "throbber atlas not ready");
        }

        let dest = Point::new(work.left(), work.top() + style.icon_padding_y);
        RedrawRequest::new(area, work).paint(visible, painter, |p, pass| {
            p.fill_rect(pass, style.icon_background);
            if let Some((atlas, src)) = icon {
                p.draw_bitmap(atlas, src, dest, style.icon_background);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{StylePreset, StyleTable};
    use horizon_navbar_render::DisplayList;
    use image::RgbaImage;

    fn setup(max_frame: usize) -> Throbber {
        let style = *StyleTable::default().preset(StylePreset::Standard);
        let mut tree: ComponentTree<()> = ComponentTree::new();
        Throbber::create(&mut tree, &style, max_frame, ()).unwrap()
    }

    #[test]
    fn test_state_machine() {
        let mut throbber = setup(3);
        assert_eq!(throbber.state(), ThrobberState::Idle);
        assert!(!throbber.advance());

        throbber.start();
        assert_eq!(throbber.state(), ThrobberState::Running(1));
        throbber.advance();
        throbber.advance();
        assert_eq!(throbber.state(), ThrobberState::Running(3));
        throbber.advance();
        assert_eq!(throbber.state(), ThrobberState::Running(1));

        throbber.stop();
        assert_eq!(throbber.state(), ThrobberState::Idle);
        assert_eq!(throbber.frame(), IDLE_FRAME);
    }

    #[test]
    fn test_frame_stays_in_range() {
        for start in [0, 1, 4, 8, 9, 100] {
            let mut throbber = setup(8);
            throbber.start();
            throbber.set_frame(start);
            for _ in 0..20 {
                throbber.advance();
                assert!((FIRST_FRAME..=8).contains(&throbber.frame()));
            }
            throbber.set_frame(start);
            assert!((FIRST_FRAME..=8).contains(&throbber.displayed_frame()));
        }
    }

    #[test]
    fn test_stale_frame_clamped_on_redraw() {
        let style = *StyleTable::default().preset(StylePreset::Standard);
        let mut throbber = setup(8);
        throbber.start();
        throbber.set_frame(42);

        let atlas = IconAtlas::new(RgbaImage::new(24 * 9, 24)).unwrap();
        let allocated = Rect::new(300, 0, style.button_width(), style.height);
        let mut painter = DisplayList::new();
        throbber.on_redraw(allocated, allocated, &style, Some(&atlas), &[allocated], &mut painter);

        assert_eq!(throbber.frame(), FIRST_FRAME);
        assert_eq!(
            painter.bitmaps(),
            vec![(Rect::new(24, 0, 24, 24), Point::new(300, 1))]
        );
    }

    #[test]
    fn test_idle_redraw_uses_idle_frame() {
        let style = *StyleTable::default().preset(StylePreset::Standard);
        let mut throbber = setup(8);
        throbber.set_frame(5);

        let atlas = IconAtlas::new(RgbaImage::new(24 * 9, 24)).unwrap();
        let allocated = Rect::new(0, 0, style.button_width(), style.height);
        let mut painter = DisplayList::new();
        throbber.on_redraw(allocated, allocated, &style, Some(&atlas), &[allocated], &mut painter);
        assert_eq!(painter.bitmaps()[0].0, Rect::new(0, 0, 24, 24));
    }

    #[test]
    fn test_zero_max_frame_is_raised() {
        let mut throbber = setup(0);
        assert_eq!(throbber.max_frame(), FIRST_FRAME);
        throbber.start();
        throbber.advance();
        assert_eq!(throbber.state(), ThrobberState::Running(FIRST_FRAME));
    }
}
