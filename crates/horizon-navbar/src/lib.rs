//! Horizon Navbar - the navigation toolbar of a browser shell.
//!
//! A [`Toolbar`] composes back/home/forward/stop/reload buttons, an editable
//! address field and an activity throbber into one widget tree, and takes
//! part in the host window manager's damage-based redraw protocol. It paints
//! only the exposed parts of an overlapped window, keeps button and throbber
//! state in step with the page, and turns raw pointer and key input into
//! editing, selection, clipboard and navigation commands.
//!
//! The toolbar owns no window. The shell hands it a [`HostWindow`], a
//! [`Painter`](render::Painter), a [`Navigator`] and a clipboard per call,
//! bundled as a [`ShellContext`]. Shared resources (style table, icon
//! atlases) live in a [`ToolbarTheme`] the shell creates once.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_navbar::headless::{HeadlessNavigator, HeadlessWindow};
//! use horizon_navbar::render::Rect;
//! use horizon_navbar::{ButtonSelector, Toolbar, ToolbarConfig, ToolbarTheme, WindowId};
//!
//! let config = ToolbarConfig::default();
//! let theme = Arc::new(ToolbarTheme::new(&config)?);
//! let mut toolbar = Toolbar::create(WindowId(1), theme, &config)?;
//! toolbar.resize(Rect::new(0, 0, 800, 600))?;
//!
//! let mut host = HeadlessWindow::new(WindowId(1));
//! let navigator = HeadlessNavigator::new().with_all_available(false);
//! toolbar.refresh_buttons(ButtonSelector::All, &navigator, &mut host);
//! assert_eq!(host.redraws().len(), 5);
//! # Ok::<(), horizon_navbar::ToolbarError>(())
//! ```

pub mod component;
pub mod config;
mod error;
pub mod events;
pub mod headless;
pub mod host;
pub mod logging;
pub mod platform;
pub mod style;
pub mod theme;
pub mod toolbar;
pub mod widget;

pub use config::{Margins, ToolbarConfig};
pub use error::{ToolbarError, ToolbarResult};
pub use events::{Key, KeyPressEvent, KeyboardModifiers, MouseButton, PointerEvent, PointerSnapshot};
pub use host::{FocusTarget, HostWindow, Navigator, ShellContext, WindowId};
pub use style::{StylePreset, StyleTable, ToolbarStyle};
pub use theme::{IconResource, ToolbarTheme};
pub use toolbar::{ButtonSelector, Toolbar, WidgetRef};
pub use widget::widgets::{ButtonKind, ButtonState, LineEditor, TextEditor};

/// Painting layer.
pub mod render {
    pub use horizon_navbar_render::*;
}
