//! Address field widget implementation.
//!
//! [`AddressField`] wraps a [`TextEditor`] in a bordered field with fixed
//! margins. It turns raw pointer and key input into editor commands, handles
//! submit and the clipboard shortcuts, and keeps one pending damage rectangle.
//!
//! # Damage
//!
//! Damage is kept in content-local coordinates, where `(0, 0)` is the
//! top-left corner of the editor area (the work rectangle inset by the
//! margins). Requests merge by bounding box through a [`DamageTracker`].
//! [`AddressField::consume_and_redraw`] paints the pending area through the
//! window's clip list and clears it. If the drawing surface is busy, the
//! damage stays pending for the next attempt.
//!
//! # Pointer Protocol
//!
//! A press on an unfocused field only takes focus and selects all text. With
//! focus held, a press of any button places the caret (or extends the
//! selection when Shift or Control is held, or selects a word on a double
//! click) and then tracks the drag. Tracking polls the host's pointer until
//! the primary button is released, extending the selection whenever the
//! pointer moves further than the drag threshold from the last held sample.

use horizon_navbar_render::{
    Color, DamageTracker, Painter, Point, Rect, RedrawRequest, Size, SurfaceGuard,
};

use super::line_editor::{EditCommand, LineEditor, PointerAction, TextEditor};
use crate::component::{ComponentId, ComponentTree, EventKind, Orientation, SizeBounds};
use crate::config::{Margins, ToolbarConfig};
use crate::error::ToolbarResult;
use crate::events::{Key, KeyPressEvent, PointerEvent};
use crate::host::{FocusTarget, HostWindow, Navigator, ShellContext, WindowId};
use crate::logging::{PerfSpan, span_names, targets};
use crate::platform::clipboard::{ClipboardProvider, decode_local, encode_local};

/// The toolbar's editable URL field.
#[derive(Debug)]
pub struct AddressField<E: TextEditor = LineEditor> {
    editor: E,
    component: ComponentId,
    window: WindowId,
    damage: DamageTracker,
    margins: Margins,
    drag_threshold: i32,
    background: Color,
    /// Allocated rectangle minus the border row, in window coordinates.
    work: Rect,
}

impl<E: TextEditor> AddressField<E> {
    /// Create the field around `editor`, holding the configured initial URL.
    ///
    /// Adds a flexible component to `tree` and binds `handler` to its redraw
    /// and click events.
    pub fn create<H: Copy>(
        tree: &mut ComponentTree<H>,
        mut editor: E,
        window: WindowId,
        config: &ToolbarConfig,
        background: Color,
        handler: H,
    ) -> ToolbarResult<Self> {
        let bounds = SizeBounds::UNBOUNDED;
        let component = tree.create("address", Orientation::Horizontal, bounds, 1);
        tree.bind(component, EventKind::Redraw, handler)?;
        tree.bind(component, EventKind::Click, handler)?;

        editor.set_text(&config.initial_url);
        let mut field = Self {
            editor,
            component,
            window,
            damage: DamageTracker::new(),
            margins: config.url_margins,
            drag_threshold: config.drag_threshold,
            background,
            work: Rect::ZERO,
        };
        field.collect_editor_damage();
        Ok(field)
    }

    #[inline]
    pub fn component(&self) -> ComponentId {
        self.component
    }

    #[inline]
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Mutable access to the editor. Changes are picked up as damage on the
    /// next redraw.
    #[inline]
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn text(&self) -> &str {
        self.editor.text()
    }

    /// The work rectangle in window coordinates.
    #[inline]
    pub fn work_rect(&self) -> Rect {
        self.work
    }

    /// The editor area: the work rectangle inset by the margins.
    pub fn content_rect(&self) -> Rect {
        let m = self.margins;
        self.work.inset(m.left, m.top, m.right, m.bottom)
    }

    fn content_origin(&self) -> Point {
        self.content_rect().origin
    }

    // =========================================================================
    // Damage
    // =========================================================================

    /// Mark a content-local rectangle as needing repaint.
    pub fn request_redraw(&mut self, rect: Rect) {
        self.damage.add_damage(rect);
    }

    /// Whether damage is pending.
    pub fn is_dirty(&self) -> bool {
        self.damage.has_damage()
    }

    /// The pending damage rectangle, in content-local coordinates.
    pub fn pending_damage(&self) -> Option<Rect> {
        self.damage.damage_region()
    }

    fn collect_editor_damage(&mut self) {
        self.editor.report_damage(&mut self.damage);
    }

    fn request_full_redraw(&mut self) {
        let size = self.editor.dimensions();
        self.request_redraw(Rect::new(0, 0, size.width, size.height));
    }

    /// Paint pending damage and clear it.
    ///
    /// Skipped while the painter composites offscreen or the surface lock is
    /// busy; the damage then stays pending. Returns `true` if the damage was
    /// consumed.
    pub fn consume_and_redraw(&mut self, host: &dyn HostWindow, painter: &mut dyn Painter) -> bool {
        self.collect_editor_damage();
        let Some(pending) = self.damage.damage_region() else {
            return false;
        };
        if painter.is_offscreen() {
            tracing::trace!(target: targets::DAMAGE, "offscreen compositing active, field repaint deferred");
            return false;
        }

        let content = self.content_rect();
        let origin = content.origin;
        let visible = host.visible_rects();
        let Some(mut surface) = SurfaceGuard::acquire(painter) else {
            return false;
        };

        let request = RedrawRequest::new(pending.offset(origin.x, origin.y), content);
        let editor = &self.editor;
        let passes = request.paint(&visible, &mut *surface, |p, pass| {
            editor.paint(p, origin, pass.offset(-origin.x, -origin.y));
        });
        drop(surface);

        tracing::trace!(target: targets::DAMAGE, ?pending, passes, "field damage consumed");
        self.damage.clear();
        true
    }

    // =========================================================================
    // Geometry and Content
    // =========================================================================

    /// Track a new allocation and resize the editor to fit inside the margins.
    pub fn adjust_size(&mut self, allocated: Rect) {
        self.work = allocated.with_height_delta(-1);
        let content = self.content_rect();
        self.editor
            .set_dimensions(Size::new(content.width().max(0), content.height().max(0)));
        self.collect_editor_damage();
        self.request_full_redraw();
    }

    /// Replace the text and request a redraw of the content area.
    pub fn set_text(&mut self, text: &str) {
        self.editor.set_text(text);
        self.collect_editor_damage();
        self.request_full_redraw();
    }

    /// Move keyboard focus into the field and select all text.
    pub fn focus_in(&mut self, host: &mut dyn HostWindow) {
        host.set_focus(FocusTarget::AddressField);
        self.editor.set_focused(true);
        self.editor.keypress(EditCommand::SelectAll);
        self.collect_editor_damage();
        tracing::debug!(target: targets::INPUT, "address field focused");
    }

    /// Hand keyboard focus back to the browser view.
    pub fn focus_out(&mut self, host: &mut dyn HostWindow) {
        host.set_focus(FocusTarget::Browser);
        self.editor.set_focused(false);
        self.collect_editor_damage();
    }

    // =========================================================================
    // Host Redraw
    // =========================================================================

    /// Paint the part of the field inside `area` on an already locked
    /// painter.
    ///
    /// Margins are filled with the toolbar background and the editor paints
    /// the rest. Pending damage is left alone. Returns the number of passes.
    pub fn on_redraw(&self, area: Rect, visible: &[Rect], painter: &mut dyn Painter) -> usize {
        let content = self.content_rect();
        let origin = content.origin;
        let strips = self.margin_strips(content);
        let editor = &self.editor;
        let background = self.background;

        RedrawRequest::new(area, self.work).paint(visible, painter, |p, pass| {
            for strip in &strips {
                if let Some(rect) = strip.intersect(&pass) {
                    p.fill_rect(rect, background);
                }
            }
            if let Some(inner) = pass.intersect(&content) {
                editor.paint(p, origin, inner.offset(-origin.x, -origin.y));
            }
        })
    }

    fn margin_strips(&self, content: Rect) -> [Rect; 4] {
        let work = self.work;
        [
            Rect::new(work.left(), work.top(), work.width(), content.top() - work.top()),
            Rect::new(work.left(), content.bottom(), work.width(), work.bottom() - content.bottom()),
            Rect::new(work.left(), content.top(), content.left() - work.left(), content.height()),
            Rect::new(content.right(), content.top(), work.right() - content.right(), content.height()),
        ]
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// Handle a button press inside the field.
    ///
    /// Returns `true` if the press was consumed.
    pub fn on_click(&mut self, event: &PointerEvent, ctx: &mut ShellContext<'_>) -> bool {
        if ctx.host.focus() != FocusTarget::AddressField {
            self.focus_in(ctx.host);
            self.consume_and_redraw(&*ctx.host, &mut *ctx.painter);
            return true;
        }

        let action = if event.is_double_click() {
            PointerAction::SelectWord
        } else if event.modifiers.extends_selection() {
            PointerAction::ExtendTo
        } else {
            PointerAction::Press
        };
        let local = event.position.relative_to(self.content_origin());
        tracing::trace!(target: targets::INPUT, ?action, ?local, button = ?event.button, "field press");
        self.editor.pointer_action(action, local);
        self.consume_and_redraw(&*ctx.host, &mut *ctx.painter);

        self.track_drag(event.position, ctx);
        true
    }

    /// Follow the pointer until the primary button is released.
    ///
    /// Runs a local polling loop on the caller's thread. Every sample that
    /// moved further than the drag threshold from the last recorded one
    /// extends the selection and repaints. The release sample only ends the
    /// drag.
    fn track_drag(&mut self, start: Point, ctx: &mut ShellContext<'_>) {
        let _span = PerfSpan::new(span_names::DRAG);
        let origin = self.content_origin();
        self.editor.pointer_action(PointerAction::DragBegin, start.relative_to(origin));

        let mut last = start;
        loop {
            let sample = ctx.host.pointer_snapshot();
            let local = sample.position.relative_to(origin);
            if !sample.buttons.primary {
                self.editor.pointer_action(PointerAction::Hover, local);
                break;
            }

            let dx = (sample.position.x - last.x).abs();
            let dy = (sample.position.y - last.y).abs();
            if dx > self.drag_threshold || dy > self.drag_threshold {
                last = sample.position;
                self.editor.pointer_action(PointerAction::Holding, local);
                self.collect_editor_damage();
                if self.is_dirty() {
                    self.consume_and_redraw(&*ctx.host, &mut *ctx.painter);
                }
            }
        }

        self.consume_and_redraw(&*ctx.host, &mut *ctx.painter);
        tracing::trace!(target: targets::INPUT, selection = self.editor.selected_text(), "drag finished");
    }

    // =========================================================================
    // Keyboard Input
    // =========================================================================

    /// Handle a key press while the field has focus.
    ///
    /// Returns `true` if the key was consumed.
    pub fn on_key(&mut self, event: KeyPressEvent, ctx: &mut ShellContext<'_>) -> bool {
        let modifiers = event.modifiers;
        let handled = if modifiers.alt || modifiers.meta {
            false
        } else if modifiers.control {
            match event.key {
                Key::Char(ch) => match ch.to_ascii_lowercase() {
                    'c' => {
                        self.copy(ctx.clipboard);
                        true
                    }
                    'v' => self.paste(ctx.clipboard),
                    'x' => {
                        if self.copy(ctx.clipboard) {
                            self.editor.keypress(EditCommand::DeleteSelection);
                        }
                        true
                    }
                    'a' => {
                        self.editor.keypress(EditCommand::SelectAll);
                        true
                    }
                    _ => false,
                },
                Key::ArrowLeft => self.command(EditCommand::WordLeft),
                Key::ArrowRight => self.command(EditCommand::WordRight),
                Key::Backspace => self.command(EditCommand::DeleteWordLeft),
                Key::Delete => self.command(EditCommand::DeleteWordRight),
                Key::Enter => self.submit(ctx.navigator, ctx.host),
                _ => false,
            }
        } else {
            match event.key {
                Key::Enter => self.submit(ctx.navigator, ctx.host),
                Key::Escape => {
                    self.editor.keypress(EditCommand::SelectAll);
                    self.editor.keypress(EditCommand::DeleteSelection);
                    true
                }
                Key::Char(ch) if !ch.is_control() => self.command(EditCommand::Insert(ch)),
                Key::Backspace => self.command(EditCommand::DeleteLeft),
                Key::Delete => self.command(EditCommand::DeleteRight),
                Key::ArrowLeft => self.command(EditCommand::CursorLeft),
                Key::ArrowRight => self.command(EditCommand::CursorRight),
                Key::Home => self.command(EditCommand::LineStart),
                Key::End => self.command(EditCommand::LineEnd),
                _ => false,
            }
        };

        if handled {
            self.consume_and_redraw(&*ctx.host, &mut *ctx.painter);
        }
        handled
    }

    /// Forward a recognized key to the editor. The key counts as consumed
    /// even when the editor has nothing to do.
    fn command(&mut self, command: EditCommand) -> bool {
        self.editor.keypress(command);
        true
    }

    /// Navigate to the field text and give focus back to the page.
    ///
    /// An empty field submits nothing and keeps focus.
    fn submit(&mut self, navigator: &mut dyn Navigator, host: &mut dyn HostWindow) -> bool {
        if self.editor.text().is_empty() {
            return false;
        }
        let url = self.editor.text().to_owned();
        tracing::debug!(target: targets::INPUT, %url, "address submitted");
        navigator.navigate_to(self.window, &url);
        self.focus_out(host);
        true
    }

    /// Write the whole field text to the clipboard.
    ///
    /// Returns `false` if the text could not be encoded and nothing was
    /// written.
    pub fn copy(&mut self, clipboard: &mut dyn ClipboardProvider) -> bool {
        let encoding = clipboard.encoding();
        match encode_local(self.editor.text(), encoding) {
            Some(bytes) => {
                clipboard.write_text(&bytes);
                true
            }
            None => {
                tracing::warn!(
                    target: targets::CLIPBOARD,
                    encoding = encoding.name(),
                    "field text not representable in clipboard encoding, copy skipped"
                );
                false
            }
        }
    }

    /// Replace the field text with the clipboard text.
    ///
    /// Returns `true` if the text was replaced. An empty or undecodable
    /// clipboard leaves the field untouched.
    pub fn paste(&mut self, clipboard: &mut dyn ClipboardProvider) -> bool {
        match self.clipboard_text(clipboard) {
            Some(text) => {
                self.set_text(&text);
                true
            }
            None => false,
        }
    }

    /// Read and decode the clipboard text, if there is any.
    pub fn clipboard_text(&self, clipboard: &mut dyn ClipboardProvider) -> Option<String> {
        let bytes = clipboard.read_text().filter(|bytes| !bytes.is_empty())?;
        let encoding = clipboard.encoding();
        match decode_local(&bytes, encoding) {
            Some(text) => Some(text),
            None => {
                tracing::warn!(
                    target: targets::CLIPBOARD,
                    encoding = encoding.name(),
                    len = bytes.len(),
                    "clipboard text could not be decoded, paste skipped"
                );
                None
            }
        }
    }
}
