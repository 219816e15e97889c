//! Interfaces to the collaborators a toolbar works with.
//!
//! The toolbar does not own its window, the page it navigates, the drawing
//! surface, or the clipboard. It reaches them through the traits in this
//! module, bundled per call into a [`ShellContext`]. Widgets refer to their
//! owning window only by [`WindowId`]; they never hold a reference back up to
//! it.

use horizon_navbar_render::{Painter, Rect};

use crate::events::PointerSnapshot;
use crate::platform::clipboard::ClipboardProvider;

/// Identity of a browser window, resolved by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Which part of a browser window holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusTarget {
    /// The page view.
    #[default]
    Browser,
    /// The toolbar's address field.
    AddressField,
}

/// The window hosting a toolbar.
pub trait HostWindow {
    /// The window's identity.
    fn id(&self) -> WindowId;

    /// Currently visible parts of the window, front-to-back, in window
    /// coordinates.
    fn visible_rects(&self) -> Vec<Rect>;

    /// Sample the pointer device.
    fn pointer_snapshot(&mut self) -> PointerSnapshot;

    /// Ask the window manager to deliver a redraw for `area`.
    fn request_redraw(&mut self, area: Rect);

    /// Mark the browser view as needing a layout pass.
    fn request_layout(&mut self);

    /// Move keyboard focus.
    fn set_focus(&mut self, target: FocusTarget);

    /// Current keyboard focus.
    fn focus(&self) -> FocusTarget;
}

/// The page-navigation collaborator.
///
/// Every call names the window it concerns.
pub trait Navigator {
    /// Whether the window has a page view the toolbar can act on.
    fn is_attached(&self, window: WindowId) -> bool;

    fn back_available(&self, window: WindowId) -> bool;
    fn forward_available(&self, window: WindowId) -> bool;
    fn reload_available(&self, window: WindowId) -> bool;
    fn stop_available(&self, window: WindowId) -> bool;

    fn go_back(&mut self, window: WindowId);
    fn go_forward(&mut self, window: WindowId);
    fn reload(&mut self, window: WindowId);
    fn stop(&mut self, window: WindowId);

    /// Start loading `url` in the window.
    fn navigate_to(&mut self, window: WindowId, url: &str);
}

/// Everything a toolbar entry point needs from the shell for one call.
pub struct ShellContext<'a> {
    pub host: &'a mut dyn HostWindow,
    pub painter: &'a mut dyn Painter,
    pub navigator: &'a mut dyn Navigator,
    pub clipboard: &'a mut dyn ClipboardProvider,
}

impl<'a> ShellContext<'a> {
    /// Bundle the collaborators.
    pub fn new(
        host: &'a mut dyn HostWindow,
        painter: &'a mut dyn Painter,
        navigator: &'a mut dyn Navigator,
        clipboard: &'a mut dyn ClipboardProvider,
    ) -> Self {
        Self {
            host,
            painter,
            navigator,
            clipboard,
        }
    }

    /// The window the call concerns.
    #[inline]
    pub fn window(&self) -> WindowId {
        self.host.id()
    }
}
