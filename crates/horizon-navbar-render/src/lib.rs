//! Painting layer for Horizon Navbar.
//!
//! This crate holds everything the toolbar needs to put pixels on a shared,
//! possibly overlapped window surface without knowing anything about
//! toolbars: integer geometry, damage accumulation, clip-list walking, an
//! abstract [`Painter`], and grid-addressed icon atlases.
//!
//! # Repainting a Widget
//!
//! A widget accumulates damage in a [`DamageTracker`], then repaints it
//! through a [`RedrawRequest`] against the host's list of visible rectangles:
//!
//! ```
//! use horizon_navbar_render::{
//!     Color, DamageTracker, DisplayList, Painter, Rect, RedrawRequest, SurfaceGuard,
//! };
//!
//! let work = Rect::new(0, 0, 120, 26);
//! let visible = [Rect::new(0, 0, 800, 600)];
//!
//! let mut damage = DamageTracker::new();
//! damage.add_damage(Rect::new(10, 4, 8, 8));
//!
//! let mut painter = DisplayList::new();
//! if let Some(pending) = damage.damage_region() {
//!     if let Some(mut surface) = SurfaceGuard::acquire(&mut painter) {
//!         RedrawRequest::new(pending, work).paint(&visible, &mut *surface, |p, pass| {
//!             p.fill_rect(pass, Color::WHITE);
//!         });
//!         damage.clear();
//!     }
//! }
//! assert_eq!(painter.fills().len(), 1);
//! ```

pub mod atlas;
pub mod clip;
pub mod damage;
mod error;
pub mod painter;
mod types;

pub use atlas::IconAtlas;
pub use clip::RedrawRequest;
pub use damage::{DamageSource, DamageTracker};
pub use error::{RenderError, RenderResult};
pub use painter::{DisplayList, DrawCommand, FontStyle, Painter, SurfaceGuard};
pub use types::{Color, Point, Rect, Size};
