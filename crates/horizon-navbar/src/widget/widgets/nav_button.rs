//! Navigation button widget implementation.
//!
//! This module provides [`NavButton`], a fixed-size icon button bound to one
//! page-navigation action. The toolbar creates one per entry of
//! [`BUTTON_DESCRIPTORS`], in table order.
//!
//! A button has two visual states. Its icon is the atlas cell at
//! `(button index, state row)`, with the cell size taken from the active
//! [`ToolbarStyle`]. The visual state is only ever written by
//! [`NavButton::refresh`], which the toolbar calls from its button-refresh
//! operation.
//!
//! # Example
//!
//! ```
//! use horizon_navbar::widget::widgets::{ButtonKind, descriptors};
//!
//! let kinds: Vec<_> = descriptors().filter_map(|d| d.action).collect();
//! assert_eq!(kinds.first(), Some(&ButtonKind::Back));
//! assert_eq!(kinds.len(), 5);
//! ```

use horizon_navbar_render::{IconAtlas, Painter, Point, Rect, RedrawRequest};

use crate::component::{ComponentId, ComponentTree, EventKind, Orientation, SizeBounds};
use crate::error::ToolbarResult;
use crate::host::{Navigator, WindowId};
use crate::logging::targets;
use crate::style::ToolbarStyle;

// ============================================================================
// Button Kind
// ============================================================================

/// The navigation action a button is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Back,
    Home,
    Forward,
    Stop,
    Reload,
}

impl ButtonKind {
    /// Human-readable name, used as the component name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Home => "home",
            Self::Forward => "forward",
            Self::Stop => "stop",
            Self::Reload => "reload",
        }
    }

    /// Ask the navigator whether the action is currently possible.
    ///
    /// Returns `None` for kinds without an availability predicate.
    pub fn availability(self, navigator: &dyn Navigator, window: WindowId) -> Option<bool> {
        match self {
            Self::Back => Some(navigator.back_available(window)),
            Self::Forward => Some(navigator.forward_available(window)),
            Self::Reload => Some(navigator.reload_available(window)),
            Self::Stop => Some(navigator.stop_available(window)),
            Self::Home => None,
        }
    }

    /// Run the action for `window`.
    ///
    /// History movement is only attempted when the navigator reports it
    /// available. Returns `true` if an action was invoked.
    pub fn invoke(self, navigator: &mut dyn Navigator, window: WindowId, home_url: &str) -> bool {
        match self {
            Self::Back => {
                let available = navigator.back_available(window);
                if available {
                    navigator.go_back(window);
                }
                available
            }
            Self::Forward => {
                let available = navigator.forward_available(window);
                if available {
                    navigator.go_forward(window);
                }
                available
            }
            Self::Home => {
                navigator.navigate_to(window, home_url);
                true
            }
            Self::Stop => {
                navigator.stop(window);
                true
            }
            Self::Reload => {
                navigator.reload(window);
                true
            }
        }
    }
}

// ============================================================================
// Button State
// ============================================================================

/// Visual state of a button. The discriminant is the atlas row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    Enabled = 0,
    Disabled = 1,
}

impl ButtonState {
    /// Atlas row holding the icons for this state.
    #[inline]
    pub const fn row(self) -> usize {
        self as usize
    }

    fn from_available(available: bool) -> Self {
        if available { Self::Enabled } else { Self::Disabled }
    }
}

// ============================================================================
// Descriptor Table
// ============================================================================

/// One entry of the static button table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonDescriptor {
    /// Resource identifier of the button's icon set.
    pub resource_id: u32,
    /// Bound action; `None` only in the sentinel.
    pub action: Option<ButtonKind>,
    /// Position in the button row; negative only in the sentinel.
    pub index: i32,
}

impl ButtonDescriptor {
    /// Terminates [`BUTTON_DESCRIPTORS`].
    pub const SENTINEL: Self = Self {
        resource_id: 0,
        action: None,
        index: -1,
    };

    const fn new(resource_id: u32, action: ButtonKind, index: i32) -> Self {
        Self {
            resource_id,
            action: Some(action),
            index,
        }
    }

    #[inline]
    pub const fn is_sentinel(&self) -> bool {
        self.index < 0
    }
}

/// The toolbar's buttons, in display order.
pub static BUTTON_DESCRIPTORS: [ButtonDescriptor; 6] = [
    ButtonDescriptor::new(1, ButtonKind::Back, 0),
    ButtonDescriptor::new(2, ButtonKind::Home, 1),
    ButtonDescriptor::new(3, ButtonKind::Forward, 2),
    ButtonDescriptor::new(4, ButtonKind::Stop, 3),
    ButtonDescriptor::new(5, ButtonKind::Reload, 4),
    ButtonDescriptor::SENTINEL,
];

/// Entries of [`BUTTON_DESCRIPTORS`] before the sentinel.
pub fn descriptors() -> impl Iterator<Item = &'static ButtonDescriptor> {
    BUTTON_DESCRIPTORS.iter().take_while(|d| !d.is_sentinel())
}

// ============================================================================
// NavButton
// ============================================================================

/// A clickable navigation icon.
#[derive(Debug, Clone)]
pub struct NavButton {
    kind: ButtonKind,
    resource_id: u32,
    index: usize,
    state: ButtonState,
    component: ComponentId,
    window: WindowId,
}

impl NavButton {
    /// Create a button for `descriptor` at row position `index`.
    ///
    /// Adds a fixed-width component to `tree` and binds `handler` to its
    /// redraw and click events. Returns `Ok(None)` for the sentinel.
    pub fn create<H: Copy>(
        tree: &mut ComponentTree<H>,
        style: &ToolbarStyle,
        index: usize,
        descriptor: &ButtonDescriptor,
        window: WindowId,
        handler: H,
    ) -> ToolbarResult<Option<Self>> {
        let Some(kind) = descriptor.action else {
            return Ok(None);
        };

        let bounds = SizeBounds::fixed_width(style.button_width()).with_max_height(style.height);
        let component = tree.create(kind.name(), Orientation::Horizontal, bounds, 0);
        tree.bind(component, EventKind::Redraw, handler)?;
        tree.bind(component, EventKind::Click, handler)?;

        tracing::trace!(target: targets::TOOLBAR, ?kind, index, "created button");
        Ok(Some(Self {
            kind,
            resource_id: descriptor.resource_id,
            index,
            state: ButtonState::Enabled,
            component,
            window,
        }))
    }

    #[inline]
    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    #[inline]
    pub fn resource_id(&self) -> u32 {
        self.resource_id
    }

    /// Position in the button row, which is also the atlas column.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Set the visual state directly.
    pub fn set_state(&mut self, state: ButtonState) {
        self.state = state;
    }

    #[inline]
    pub fn component(&self) -> ComponentId {
        self.component
    }

    #[inline]
    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Re-query the navigator and update the visual state.
    ///
    /// Returns `true` if the state changed. Buttons without an availability
    /// predicate never change.
    pub fn refresh(&mut self, navigator: &dyn Navigator) -> bool {
        let Some(available) = self.kind.availability(navigator, self.window) else {
            return false;
        };
        let state = ButtonState::from_available(available);
        let changed = state != self.state;
        self.state = state;
        changed
    }

    /// Paint the part of the button inside `area`.
    ///
    /// `allocated` is the button's rectangle from layout; its bottom row
    /// belongs to the bar border and is excluded. Without an atlas only the
    /// background is painted. Returns the number of passes painted.
    pub fn on_redraw(
        &self,
        area: Rect,
        allocated: Rect,
        style: &ToolbarStyle,
        atlas: Option<&IconAtlas>,
        visible: &[Rect],
        painter: &mut dyn Painter,
    ) -> usize {
        let work = allocated.with_height_delta(-1);
        let icon = atlas.and_then(|atlas| {
            atlas
                .cell_rect(self.index, self.state.row(), style.icon_cell())
                .map(|src| (atlas, src))
        });
        if icon.is_none() {
            tracing::trace!(target: targets::DAMAGE, kind = ?self.kind, "icon atlas not ready");
        }

        let dest = Point::new(
            work.left() + style.icon_padding_x,
            work.top() + style.icon_padding_y,
        );
        RedrawRequest::new(area, work).paint(visible, painter, |p, pass| {
            p.fill_rect(pass, style.icon_background);
            if let Some((atlas, src)) = icon {
                p.draw_bitmap(atlas, src, dest, style.icon_background);
            }
        })
    }

    /// Run the bound action for the owning window.
    pub fn on_click(&self, navigator: &mut dyn Navigator, home_url: &str) -> bool {
        tracing::debug!(target: targets::INPUT, kind = ?self.kind, "button clicked");
        self.kind.invoke(navigator, self.window, home_url)
    }
}
