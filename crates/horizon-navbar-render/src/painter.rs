//! The drawing interface toolbar widgets paint through.
//!
//! This module defines the [`Painter`] trait, a small immediate-mode API
//! over the host's drawing surface. The surface is shared with the rest of the
//! window, so every paint sequence is bracketed by [`Painter::lock`] and
//! [`Painter::unlock`]. [`SurfaceGuard`] pairs the two so the lock is released
//! on every exit path.
//!
//! [`DisplayList`] is a painter that records commands instead of rasterising
//! them. It is used for headless operation and by tests.
//!
//! # Paint Sequence
//!
//! ```
//! use horizon_navbar_render::{Color, DisplayList, Painter, Rect, SurfaceGuard};
//!
//! let mut painter = DisplayList::new();
//! if let Some(mut surface) = SurfaceGuard::acquire(&mut painter) {
//!     surface.set_clip(Some(Rect::new(0, 0, 24, 24)));
//!     surface.fill_rect(Rect::new(0, 0, 32, 32), Color::WHITE);
//!     surface.set_clip(None);
//! }
//! assert!(!painter.is_locked());
//! ```

use std::ops::{Deref, DerefMut};

use crate::atlas::IconAtlas;
use crate::types::{Color, Point, Rect};

/// Text attributes for [`Painter::draw_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStyle {
    /// Point size of the font.
    pub size_pt: i32,
    /// Text color.
    pub foreground: Color,
    /// Color painted behind each glyph cell.
    pub background: Color,
}

impl FontStyle {
    /// Create a font style with black text on white.
    pub const fn new(size_pt: i32) -> Self {
        Self {
            size_pt,
            foreground: Color::BLACK,
            background: Color::WHITE,
        }
    }

    /// Set the text and background colors.
    pub const fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    /// Horizontal advance of one glyph cell in device units.
    ///
    /// Toolbar text is drawn in a fixed-pitch face.
    #[inline]
    pub fn advance(&self) -> i32 {
        (self.size_pt * 3 / 5).max(1)
    }

    /// Height of one text line in device units.
    #[inline]
    pub fn line_height(&self) -> i32 {
        (self.size_pt + self.size_pt / 4).max(1)
    }
}

/// The core 2D painting trait.
///
/// Implementations draw onto the host window's shared surface. All
/// coordinates are absolute device coordinates; the current clip restricts
/// every drawing call.
pub trait Painter {
    // =========================================================================
    // Surface access
    // =========================================================================

    /// Try to acquire the drawing surface.
    ///
    /// Returns `false` if another party holds it. A failed acquisition is not
    /// an error; the caller skips painting and retries on the next damage
    /// notification.
    fn lock(&mut self) -> bool;

    /// Release the drawing surface acquired by [`lock`](Self::lock).
    fn unlock(&mut self);

    /// Whether painting currently targets an offscreen compositing buffer.
    ///
    /// Widgets that paint straight to the screen skip their own repaint while
    /// this is active.
    fn is_offscreen(&self) -> bool {
        false
    }

    // =========================================================================
    // Clipping
    // =========================================================================

    /// Set the device clip, or remove it with `None`.
    fn set_clip(&mut self, clip: Option<Rect>);

    /// Get the current device clip.
    fn clip(&self) -> Option<Rect>;

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a one-pixel line. Both endpoints are inclusive.
    fn draw_line(&mut self, from: Point, to: Point, color: Color);

    /// Stroke the inside edge of a rectangle with a one-pixel border.
    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let (l, t) = (rect.left(), rect.top());
        let (r, b) = (rect.right() - 1, rect.bottom() - 1);
        self.draw_line(Point::new(l, t), Point::new(r, t), color);
        self.draw_line(Point::new(l, b), Point::new(r, b), color);
        self.draw_line(Point::new(l, t), Point::new(l, b), color);
        self.draw_line(Point::new(r, t), Point::new(r, b), color);
    }

    /// Copy the `src` cell of an atlas to `dest`.
    ///
    /// Transparent atlas pixels show `background`.
    fn draw_bitmap(&mut self, atlas: &IconAtlas, src: Rect, dest: Point, background: Color);

    /// Draw a run of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, font: &FontStyle);
}

/// Holds the drawing surface lock for the lifetime of the guard.
///
/// Dereferences to the painter. Dropping the guard unlocks the surface.
pub struct SurfaceGuard<'a, P: Painter + ?Sized> {
    painter: &'a mut P,
}

impl<'a, P: Painter + ?Sized> SurfaceGuard<'a, P> {
    /// Lock the surface, or return `None` if it is busy.
    pub fn acquire(painter: &'a mut P) -> Option<Self> {
        if painter.lock() {
            Some(Self { painter })
        } else {
            tracing::debug!(target: "horizon_navbar::damage", "drawing surface busy, paint skipped");
            None
        }
    }
}

impl<P: Painter + ?Sized> Deref for SurfaceGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.painter
    }
}

impl<P: Painter + ?Sized> DerefMut for SurfaceGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.painter
    }
}

impl<P: Painter + ?Sized> Drop for SurfaceGuard<'_, P> {
    fn drop(&mut self) {
        self.painter.unlock();
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// The device clip changed.
    SetClip(Option<Rect>),
    /// A solid fill.
    FillRect { rect: Rect, color: Color },
    /// A one-pixel line.
    Line { from: Point, to: Point, color: Color },
    /// An atlas cell copy.
    Bitmap { src: Rect, dest: Point },
    /// A text run.
    Text { text: String, origin: Point },
}

/// A [`Painter`] that records draw commands.
///
/// It can simulate a busy surface and offscreen compositing, which makes it
/// the painter of choice for headless hosts and tests.
#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    clip: Option<Rect>,
    locked: bool,
    busy: bool,
    offscreen: bool,
    lock_count: u32,
}

impl DisplayList {
    /// Create an empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent [`Painter::lock`] calls fail while `busy` is set.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Report offscreen compositing as active.
    pub fn set_offscreen(&mut self, offscreen: bool) {
        self.offscreen = offscreen;
    }

    /// Whether the surface lock is currently held.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Number of successful lock acquisitions so far.
    #[inline]
    pub fn lock_count(&self) -> u32 {
        self.lock_count
    }

    /// The recorded commands.
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Every non-`None` clip that was set, in order.
    pub fn clips(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::SetClip(Some(rect)) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Every fill that was recorded, in order.
    pub fn fills(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// Source cells of every bitmap copy, in order.
    pub fn bitmaps(&self) -> Vec<(Rect, Point)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Bitmap { src, dest } => Some((*src, *dest)),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Painter for DisplayList {
    fn lock(&mut self) -> bool {
        if self.busy || self.locked {
            return false;
        }
        self.locked = true;
        self.lock_count += 1;
        true
    }

    fn unlock(&mut self) {
        self.locked = false;
    }

    fn is_offscreen(&self) -> bool {
        self.offscreen
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
        self.commands.push(DrawCommand::SetClip(clip));
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_bitmap(&mut self, _atlas: &IconAtlas, src: Rect, dest: Point, _background: Color) {
        self.commands.push(DrawCommand::Bitmap { src, dest });
    }

    fn draw_text(&mut self, text: &str, origin: Point, _font: &FontStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            origin,
        });
    }
}
