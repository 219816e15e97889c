//! The toolbar controller.
//!
//! A [`Toolbar`] composes the navigation buttons, the address field and the
//! throbber into one horizontal component tree, and is the only surface the
//! browser shell talks to. The shell calls its lifecycle operations
//! ([`create`](Toolbar::create), [`resize`](Toolbar::resize),
//! [`hide`](Toolbar::hide), [`destroy`](Toolbar::destroy)), forwards redraw,
//! click and key events from the window manager, and notifies it of
//! navigation and resource changes.
//!
//! All entry points run synchronously on the caller's thread. Collaborators
//! are passed in per call, either individually or bundled in a
//! [`ShellContext`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_navbar::headless::{HeadlessNavigator, HeadlessWindow};
//! use horizon_navbar::platform::ScrapClipboard;
//! use horizon_navbar::render::{DisplayList, Rect};
//! use horizon_navbar::{ShellContext, Toolbar, ToolbarConfig, ToolbarTheme, WindowId};
//!
//! let config = ToolbarConfig::default();
//! let theme = Arc::new(ToolbarTheme::new(&config)?);
//! let mut toolbar = Toolbar::create(WindowId(1), theme, &config)?;
//! toolbar.resize(Rect::new(0, 0, 640, 26))?;
//!
//! let mut host = HeadlessWindow::new(WindowId(1));
//! let mut painter = DisplayList::new();
//! let mut navigator = HeadlessNavigator::new();
//! let mut clipboard = ScrapClipboard::utf8();
//! let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);
//! toolbar.redraw(Rect::new(0, 0, 640, 26), &mut ctx)?;
//!
//! toolbar.destroy();
//! # Ok::<(), horizon_navbar::ToolbarError>(())
//! ```

use std::sync::Arc;

use horizon_navbar_render::{Color, Painter, Point, Rect, RedrawRequest, SurfaceGuard};

use crate::component::{ComponentId, ComponentTree, EventKind, Orientation, SizeBounds};
use crate::config::ToolbarConfig;
use crate::error::ToolbarResult;
use crate::events::{KeyPressEvent, PointerEvent};
use crate::host::{FocusTarget, HostWindow, Navigator, ShellContext, WindowId};
use crate::logging::{ComponentTreeDebug, PerfSpan, TreeFormatOptions, span_names, targets};
use crate::style::ToolbarStyle;
use crate::theme::{IconResource, ToolbarTheme};
use crate::widget::widgets::{
    AddressField, ButtonKind, LineEditor, NavButton, TextEditor, Throbber, descriptors,
};

/// Handler bound to a component: which widget receives its events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetRef {
    /// The root container.
    Bar,
    /// A button, by position in the row.
    Button(usize),
    AddressField,
    Throbber,
}

/// Which buttons a refresh applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSelector {
    #[default]
    All,
    Only(ButtonKind),
}

impl ButtonSelector {
    fn selects(self, kind: ButtonKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == kind,
        }
    }
}

/// A browser window's navigation toolbar.
#[derive(Debug)]
pub struct Toolbar<E: TextEditor = LineEditor> {
    window: WindowId,
    theme: Arc<ToolbarTheme>,
    style_index: usize,
    style: ToolbarStyle,
    home_url: String,
    tree: ComponentTree<WidgetRef>,
    root: ComponentId,
    buttons: Vec<NavButton>,
    address_field: AddressField<E>,
    throbber: Throbber,
    hidden: bool,
    area: Rect,
}

impl Toolbar<LineEditor> {
    /// Build a toolbar for `owner` with the default line editor.
    ///
    /// # Errors
    ///
    /// Fails if the configured style index is out of range or the widget
    /// storage cannot be allocated. Nothing is left behind on failure.
    pub fn create(
        owner: WindowId,
        theme: Arc<ToolbarTheme>,
        config: &ToolbarConfig,
    ) -> ToolbarResult<Self> {
        let style = *theme.style(config.style)?;
        Self::create_with_editor(owner, theme, config, LineEditor::new(style.font_height_pt))
    }
}

impl<E: TextEditor> Toolbar<E> {
    /// Build a toolbar whose address field embeds `editor`.
    pub fn create_with_editor(
        owner: WindowId,
        theme: Arc<ToolbarTheme>,
        config: &ToolbarConfig,
        editor: E,
    ) -> ToolbarResult<Self> {
        let _span = PerfSpan::new(span_names::CREATE);
        let style = *theme.style(config.style)?;

        let mut tree = ComponentTree::new();
        let root = tree.create(
            "toolbar",
            Orientation::Horizontal,
            SizeBounds::UNBOUNDED.with_max_height(style.height),
            0,
        );
        tree.bind(root, EventKind::Redraw, WidgetRef::Bar)?;

        let mut buttons = Vec::new();
        buttons.try_reserve_exact(descriptors().count())?;
        for (index, descriptor) in descriptors().enumerate() {
            let created =
                NavButton::create(&mut tree, &style, index, descriptor, owner, WidgetRef::Button(index))?;
            if let Some(button) = created {
                tree.attach(root, button.component())?;
                buttons.push(button);
            }
        }

        let address_field = AddressField::create(
            &mut tree,
            editor,
            owner,
            config,
            theme.background(),
            WidgetRef::AddressField,
        )?;
        tree.attach(root, address_field.component())?;

        let throbber = Throbber::create(&mut tree, &style, config.throbber_frames, WidgetRef::Throbber)?;
        tree.attach(root, throbber.component())?;

        crate::navbar_debug!(
            window = owner.0,
            style = config.style,
            buttons = buttons.len(),
            "toolbar created"
        );

        Ok(Self {
            window: owner,
            theme,
            style_index: config.style,
            style,
            home_url: config.home_url.clone(),
            tree,
            root,
            buttons,
            address_field,
            throbber,
            hidden: false,
            area: Rect::ZERO,
        })
    }

    /// Tear the toolbar down, children first.
    pub fn destroy(mut self) {
        let _span = PerfSpan::new(span_names::DESTROY);
        if let Err(err) = self.tree.destroy(self.root) {
            crate::navbar_warn!(%err, "component tree already torn down");
        }
        crate::navbar_debug!(window = self.window.0, "toolbar destroyed");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn window(&self) -> WindowId {
        self.window
    }

    #[inline]
    pub fn theme(&self) -> &Arc<ToolbarTheme> {
        &self.theme
    }

    #[inline]
    pub fn style(&self) -> &ToolbarStyle {
        &self.style
    }

    #[inline]
    pub fn style_index(&self) -> usize {
        self.style_index
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Height the toolbar takes in the window layout; zero while hidden.
    pub fn height(&self) -> i32 {
        if self.hidden { 0 } else { self.style.height }
    }

    /// The buttons, in row order.
    #[inline]
    pub fn buttons(&self) -> &[NavButton] {
        &self.buttons
    }

    pub fn button(&self, kind: ButtonKind) -> Option<&NavButton> {
        self.buttons.iter().find(|b| b.kind() == kind)
    }

    #[inline]
    pub fn address_field(&self) -> &AddressField<E> {
        &self.address_field
    }

    #[inline]
    pub fn address_field_mut(&mut self) -> &mut AddressField<E> {
        &mut self.address_field
    }

    #[inline]
    pub fn throbber(&self) -> &Throbber {
        &self.throbber
    }

    /// The component tree, for inspection.
    #[inline]
    pub fn tree(&self) -> &ComponentTree<WidgetRef> {
        &self.tree
    }

    /// Current field text.
    pub fn url_text(&self) -> &str {
        self.address_field.text()
    }

    /// Allocated rectangle of a widget, in window coordinates.
    pub fn rect_of(&self, widget: WidgetRef) -> Option<Rect> {
        let id = match widget {
            WidgetRef::Bar => self.root,
            WidgetRef::Button(index) => self.buttons.get(index)?.component(),
            WidgetRef::AddressField => self.address_field.component(),
            WidgetRef::Throbber => self.throbber.component(),
        };
        self.tree.rect(id).ok()
    }

    /// Render the component tree for debug output.
    pub fn debug_tree(&self) -> ToolbarResult<String> {
        ComponentTreeDebug::with_options(TreeFormatOptions::detailed())
            .format_subtree(&self.tree, self.root)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Lay the toolbar out along the top of `area`.
    ///
    /// Buttons keep their fixed width, the throbber sits at the right end and
    /// the address field takes what is left. The editor is resized to match.
    pub fn resize(&mut self, area: Rect) -> ToolbarResult<()> {
        self.area = area;
        let bar = Rect::new(area.left(), area.top(), area.width(), self.height());
        self.tree.layout(self.root, bar)?;
        let field = self.tree.rect(self.address_field.component())?;
        self.address_field.adjust_size(field);
        tracing::trace!(target: targets::TOOLBAR, ?bar, ?field, "toolbar laid out");
        Ok(())
    }

    /// Hide or show the toolbar.
    ///
    /// Components survive; only the height contribution changes. The host
    /// is asked for a layout pass and a redraw of the area the bar covers
    /// when shown.
    pub fn hide(&mut self, hidden: bool, host: &mut dyn HostWindow) -> ToolbarResult<()> {
        if self.hidden == hidden {
            return Ok(());
        }
        self.hidden = hidden;
        self.resize(self.area)?;
        host.request_layout();
        host.request_redraw(Rect::new(
            self.area.left(),
            self.area.top(),
            self.area.width(),
            self.style.height,
        ));
        tracing::debug!(target: targets::TOOLBAR, hidden, "toolbar visibility changed");
        Ok(())
    }

    // =========================================================================
    // Shell Notifications
    // =========================================================================

    /// Re-query navigation availability for the selected buttons.
    ///
    /// Each selected button gets its state updated and a redraw requested
    /// for its own rectangle. Other buttons are untouched.
    pub fn refresh_buttons(
        &mut self,
        which: ButtonSelector,
        navigator: &dyn Navigator,
        host: &mut dyn HostWindow,
    ) {
        for button in self.buttons.iter_mut().filter(|b| which.selects(b.kind())) {
            let changed = button.refresh(navigator);
            tracing::trace!(target: targets::TOOLBAR, kind = ?button.kind(), state = ?button.state(), changed, "button refreshed");
            if self.hidden {
                continue;
            }
            if let Ok(rect) = self.tree.rect(button.component()) {
                host.request_redraw(rect);
            }
        }
    }

    /// Set the field text when the window's page view is attached.
    ///
    /// Returns `false`, changing nothing, when it is not. Otherwise the field
    /// content is damaged and the stop button refreshed.
    pub fn set_url_text(
        &mut self,
        text: &str,
        navigator: &dyn Navigator,
        host: &mut dyn HostWindow,
    ) -> bool {
        if !navigator.is_attached(self.window) {
            crate::navbar_trace!("view not attached, url text ignored");
            return false;
        }
        self.address_field.set_text(text);
        self.refresh_buttons(ButtonSelector::Only(ButtonKind::Stop), navigator, host);
        true
    }

    /// An icon atlas finished loading into the theme.
    pub fn on_resource_ready(
        &mut self,
        which: IconResource,
        navigator: &dyn Navigator,
        host: &mut dyn HostWindow,
    ) {
        tracing::debug!(target: targets::THEME, ?which, "resource ready");
        match which {
            IconResource::Toolbar => self.refresh_buttons(ButtonSelector::All, navigator, host),
            IconResource::Throbber => self.request_throbber_redraw(host),
        }
    }

    pub fn throbber_start(&mut self, host: &mut dyn HostWindow) {
        self.throbber.start();
        self.request_throbber_redraw(host);
    }

    pub fn throbber_stop(&mut self, host: &mut dyn HostWindow) {
        self.throbber.stop();
        self.request_throbber_redraw(host);
    }

    /// Step the animation; only redraws while running.
    pub fn throbber_advance(&mut self, host: &mut dyn HostWindow) {
        if self.throbber.advance() {
            self.request_throbber_redraw(host);
        }
    }

    fn request_throbber_redraw(&self, host: &mut dyn HostWindow) {
        if self.hidden {
            return;
        }
        if let Some(rect) = self.rect_of(WidgetRef::Throbber) {
            host.request_redraw(rect);
        }
    }

    /// Paint pending address-field damage.
    pub fn url_redraw(&mut self, host: &dyn HostWindow, painter: &mut dyn Painter) -> bool {
        if self.hidden {
            return false;
        }
        self.address_field.consume_and_redraw(host, painter)
    }

    // =========================================================================
    // Window Manager Events
    // =========================================================================

    /// Repaint every widget overlapping `area`, then the bar border.
    ///
    /// Returns the number of clip passes painted; zero when hidden or when
    /// the drawing surface is busy.
    pub fn redraw(&mut self, area: Rect, ctx: &mut ShellContext<'_>) -> ToolbarResult<usize> {
        if self.hidden {
            return Ok(0);
        }
        let _span = PerfSpan::new(span_names::REDRAW);
        let visible = ctx.host.visible_rects();
        let overlapping = self.tree.intersecting(self.root, area)?;
        let Some(mut surface) = SurfaceGuard::acquire(&mut *ctx.painter) else {
            return Ok(0);
        };

        let toolbar_atlas = self.theme.atlas(IconResource::Toolbar);
        let throbber_atlas = self.theme.atlas(IconResource::Throbber);
        let mut passes = 0;
        for id in overlapping {
            let allocated = self.tree.rect(id)?;
            for handler in self.tree.handlers(id, EventKind::Redraw)? {
                passes += match handler {
                    WidgetRef::Bar => self.paint_border(area, allocated, &visible, &mut *surface),
                    WidgetRef::Button(index) => self.buttons.get(index).map_or(0, |button| {
                        button.on_redraw(
                            area,
                            allocated,
                            &self.style,
                            toolbar_atlas.as_ref(),
                            &visible,
                            &mut *surface,
                        )
                    }),
                    WidgetRef::AddressField => {
                        self.address_field.on_redraw(area, &visible, &mut *surface)
                    }
                    WidgetRef::Throbber => self.throbber.on_redraw(
                        area,
                        allocated,
                        &self.style,
                        throbber_atlas.as_ref(),
                        &visible,
                        &mut *surface,
                    ),
                };
            }
        }
        tracing::trace!(target: targets::DAMAGE, ?area, passes, "toolbar redrawn");
        Ok(passes)
    }

    /// Draw the bottom border line when the redraw reaches the bar's bottom
    /// row.
    fn paint_border(
        &self,
        area: Rect,
        bar: Rect,
        visible: &[Rect],
        painter: &mut dyn Painter,
    ) -> usize {
        let request = RedrawRequest::new(area, bar);
        if request.clip().is_none_or(|clip| clip.bottom() != bar.bottom()) {
            return 0;
        }
        let y = bar.bottom() - 1;
        request.paint(visible, painter, |p, _| {
            p.draw_line(Point::new(bar.left(), y), Point::new(bar.right() - 1, y), Color::BLACK);
        })
    }

    /// Route a button press to the widget under it.
    ///
    /// Returns `true` if a widget consumed the press.
    pub fn click(&mut self, event: PointerEvent, ctx: &mut ShellContext<'_>) -> ToolbarResult<bool> {
        if self.hidden {
            return Ok(false);
        }
        let Some(id) = self.tree.hit_test(self.root, event.position) else {
            return Ok(false);
        };

        let mut consumed = false;
        for handler in self.tree.handlers(id, EventKind::Click)? {
            consumed |= match handler {
                WidgetRef::Button(index) => self
                    .buttons
                    .get(index)
                    .is_some_and(|button| button.on_click(ctx.navigator, &self.home_url)),
                WidgetRef::AddressField => self.address_field.on_click(&event, ctx),
                WidgetRef::Bar | WidgetRef::Throbber => false,
            };
        }
        Ok(consumed)
    }

    /// Deliver a key press to the address field if it holds focus.
    ///
    /// A paste replaces the URL the way [`set_url_text`](Self::set_url_text)
    /// does, stop button refresh included.
    pub fn key_input(&mut self, event: KeyPressEvent, ctx: &mut ShellContext<'_>) -> bool {
        if self.hidden || ctx.host.focus() != FocusTarget::AddressField {
            return false;
        }
        if event.is_shortcut('v') {
            let Some(text) = self.address_field.clipboard_text(ctx.clipboard) else {
                return false;
            };
            if !self.set_url_text(&text, &*ctx.navigator, &mut *ctx.host) {
                return false;
            }
            self.address_field.consume_and_redraw(&*ctx.host, &mut *ctx.painter);
            return true;
        }
        self.address_field.on_key(event, ctx)
    }
}
