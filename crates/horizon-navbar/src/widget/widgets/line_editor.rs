//! Single-line text editing for the address field.
//!
//! [`TextEditor`] is the editing capability the address field embeds: it owns
//! the text, caret and selection, reacts to edit commands and pointer
//! actions, and paints itself. [`LineEditor`] is the default implementation.
//!
//! Positions are byte offsets into UTF-8 text and always sit on grapheme
//! cluster boundaries. Text is measured with the fixed glyph advance of the
//! editor's [`FontStyle`].
//!
//! The editor does not talk to the host. Every change it makes is recorded as
//! a damage rectangle in editor-local coordinates, which the owner collects
//! through [`DamageSource::report_damage`].

use unicode_segmentation::UnicodeSegmentation;

use horizon_navbar_render::{Color, DamageSource, DamageTracker, FontStyle, Painter, Point, Rect, Size};

/// Edit commands understood by a [`TextEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert a character, replacing the selection.
    Insert(char),
    /// Delete the selection or the grapheme before the caret.
    DeleteLeft,
    /// Delete the selection or the grapheme after the caret.
    DeleteRight,
    DeleteWordLeft,
    DeleteWordRight,
    /// Delete the selection, if any.
    DeleteSelection,
    CursorLeft,
    CursorRight,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    SelectAll,
    ClearSelection,
}

/// Pointer actions understood by a [`TextEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Place the caret.
    Press,
    /// Extend the selection from its anchor (or the caret) to the point.
    ExtendTo,
    /// Select the word under the point.
    SelectWord,
    /// Begin a drag selection anchored at the current selection or caret.
    DragBegin,
    /// The pointer moved while a drag is held.
    Holding,
    /// The drag button was released. Ends the drag without moving the caret.
    Hover,
}

/// An embedded single-line editing capability.
pub trait TextEditor: DamageSource {
    fn text(&self) -> &str;

    /// Replace the whole text and place the caret at its end.
    fn set_text(&mut self, text: &str);

    /// Insert text at the caret, replacing the selection.
    ///
    /// Returns `true` if the text changed.
    fn insert_text(&mut self, text: &str) -> bool;

    /// The selected text, or `""`.
    fn selected_text(&self) -> &str;

    /// Apply an edit command. Returns `true` if text, caret or selection
    /// changed.
    fn keypress(&mut self, command: EditCommand) -> bool;

    /// Apply a pointer action at `position`, in editor-local coordinates.
    fn pointer_action(&mut self, action: PointerAction, position: Point) -> bool;

    /// Resize the editor.
    fn set_dimensions(&mut self, size: Size);

    fn dimensions(&self) -> Size;

    /// Show or hide the caret.
    fn set_focused(&mut self, focused: bool);

    /// Paint the part of the editor inside `clip` (editor-local), with the
    /// editor's top-left corner at `origin` on the device.
    fn paint(&self, painter: &mut dyn Painter, origin: Point, clip: Rect);
}

/// The default [`TextEditor`].
#[derive(Debug, Clone)]
pub struct LineEditor {
    text: String,
    /// Caret position (byte offset).
    cursor_pos: usize,
    /// Selection anchor; the selection spans anchor..caret.
    selection_anchor: Option<usize>,
    /// Horizontal scroll in device units.
    scroll_offset: i32,
    size: Size,
    padding_left: i32,
    padding_right: i32,
    border_width: i32,
    font: FontStyle,
    border_color: Color,
    selection_font: FontStyle,
    focused: bool,
    dragging: bool,
    damage: Vec<Rect>,
}

impl LineEditor {
    /// Create an empty editor with a font of `size_pt` points.
    pub fn new(size_pt: i32) -> Self {
        let font = FontStyle::new(size_pt);
        Self {
            text: String::new(),
            cursor_pos: 0,
            selection_anchor: None,
            scroll_offset: 0,
            size: Size::ZERO,
            padding_left: 4,
            padding_right: 4,
            border_width: 1,
            font,
            border_color: Color::BLACK,
            selection_font: font.with_colors(Color::WHITE, Color::BLACK),
            focused: false,
            dragging: false,
            damage: Vec::new(),
        }
    }

    /// Create an editor holding `text`.
    pub fn with_text(size_pt: i32, text: &str) -> Self {
        let mut editor = Self::new(size_pt);
        editor.set_text(text);
        editor.damage.clear();
        editor
    }

    /// Caret position as a byte offset.
    #[inline]
    pub fn cursor_position(&self) -> usize {
        self.cursor_pos
    }

    /// Move the caret, snapping to a grapheme boundary and clearing the
    /// selection.
    pub fn set_cursor_position(&mut self, pos: usize) {
        self.cursor_pos = self.snap_to_grapheme_boundary(pos.min(self.text.len()));
        self.selection_anchor = None;
        self.ensure_cursor_visible();
        self.invalidate();
    }

    /// Selected byte range, ordered.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.selection_anchor?;
        if anchor == self.cursor_pos {
            return None;
        }
        Some((anchor.min(self.cursor_pos), anchor.max(self.cursor_pos)))
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.selection_range().is_some()
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[inline]
    pub fn font(&self) -> &FontStyle {
        &self.font
    }

    /// Horizontal scroll in device units.
    #[inline]
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    // =========================================================================
    // Internal: Editing
    // =========================================================================

    fn invalidate(&mut self) {
        self.damage
            .push(Rect::new(0, 0, self.size.width, self.size.height));
    }

    fn delete_selection(&mut self) -> bool {
        match self.selection_range() {
            Some((start, end)) => {
                self.text.replace_range(start..end, "");
                self.cursor_pos = start;
                self.selection_anchor = None;
                true
            }
            None => false,
        }
    }

    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        self.text.replace_range(start..end, "");
        self.cursor_pos = start;
        true
    }

    fn move_cursor(&mut self, pos: usize) -> bool {
        let had_selection = self.selection_anchor.take().is_some();
        let moved = pos != self.cursor_pos;
        self.cursor_pos = pos;
        moved || had_selection
    }

    fn select_word_at(&mut self, pos: usize) {
        let start = self.word_start(pos);
        let end = self.word_end(pos);
        if start < end {
            self.selection_anchor = Some(start);
            self.cursor_pos = end;
        } else {
            self.selection_anchor = None;
            self.cursor_pos = pos;
        }
    }

    // =========================================================================
    // Internal: Grapheme/Word Boundaries
    // =========================================================================

    fn prev_grapheme_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(offset, _)| offset)
            .take_while(|&offset| offset < pos)
            .last()
            .unwrap_or(0)
    }

    fn next_grapheme_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(offset, g)| offset + g.len())
            .find(|&end| end > pos)
            .unwrap_or(self.text.len())
    }

    fn snap_to_grapheme_boundary(&self, pos: usize) -> usize {
        let mut offset = 0;
        for grapheme in self.text.graphemes(true) {
            let next_offset = offset + grapheme.len();
            if pos <= offset {
                return offset;
            }
            if pos < next_offset {
                return if pos - offset <= next_offset - pos {
                    offset
                } else {
                    next_offset
                };
            }
            offset = next_offset;
        }
        self.text.len()
    }

    /// Start of the word before `pos`, skipping separators first.
    fn word_boundary_before(&self, pos: usize) -> usize {
        let chars: Vec<(usize, char)> = self.text[..pos].char_indices().collect();
        let mut idx = chars.len();
        while idx > 0 && !chars[idx - 1].1.is_alphanumeric() {
            idx -= 1;
        }
        while idx > 0 && chars[idx - 1].1.is_alphanumeric() {
            idx -= 1;
        }
        chars.get(idx).map_or(pos, |&(offset, _)| offset).min(pos)
    }

    /// End of the word after `pos`, then past the following separators.
    fn word_boundary_after(&self, pos: usize) -> usize {
        let rest = &self.text[pos..];
        let mut chars = rest.char_indices().peekable();
        while chars.next_if(|(_, c)| c.is_alphanumeric()).is_some() {}
        while chars.next_if(|(_, c)| !c.is_alphanumeric()).is_some() {}
        pos + chars.peek().map_or(rest.len(), |&(offset, _)| offset)
    }

    /// Start of the alphanumeric run containing `pos`.
    fn word_start(&self, pos: usize) -> usize {
        self.text[..pos]
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_alphanumeric())
            .last()
            .map_or(pos, |(offset, _)| offset)
    }

    /// End of the alphanumeric run starting at or containing `pos`.
    fn word_end(&self, pos: usize) -> usize {
        let rest = &self.text[pos..];
        rest.char_indices()
            .find(|(_, c)| !c.is_alphanumeric())
            .map_or(self.text.len(), |(offset, _)| pos + offset)
    }

    // =========================================================================
    // Internal: Geometry
    // =========================================================================

    fn text_left(&self) -> i32 {
        self.border_width + self.padding_left
    }

    fn text_top(&self) -> i32 {
        ((self.size.height - self.font.line_height()) / 2).max(self.border_width)
    }

    fn visible_text_width(&self) -> i32 {
        (self.size.width - 2 * self.border_width - self.padding_left - self.padding_right).max(0)
    }

    /// Number of grapheme cells before byte offset `pos`.
    fn column_of(&self, pos: usize) -> i32 {
        let count = self.text[..pos].graphemes(true).count();
        i32::try_from(count).unwrap_or(i32::MAX)
    }

    /// Byte offset of the grapheme boundary closest to editor-local `x`.
    fn offset_at(&self, x: i32) -> usize {
        let advance = self.font.advance();
        let relative = x - self.text_left() + self.scroll_offset;
        let column = ((relative + advance / 2) / advance).max(0) as usize;
        self.text
            .grapheme_indices(true)
            .nth(column)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn ensure_cursor_visible(&mut self) {
        let cursor_x = self.column_of(self.cursor_pos) * self.font.advance();
        let visible = self.visible_text_width();
        if cursor_x < self.scroll_offset {
            self.scroll_offset = cursor_x;
        } else if cursor_x - self.scroll_offset > visible {
            self.scroll_offset = cursor_x - visible;
        }
        // Never scroll further than needed to show the end of the text.
        let text_width = self.column_of(self.text.len()) * self.font.advance();
        let max_scroll = (text_width - visible).max(0);
        self.scroll_offset = self.scroll_offset.min(max_scroll).max(0);
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(14)
    }
}

impl DamageSource for LineEditor {
    fn report_damage(&mut self, tracker: &mut DamageTracker) {
        for rect in self.damage.drain(..) {
            tracker.add_damage(rect);
        }
    }
}

impl TextEditor for LineEditor {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.chars().filter(|c| !c.is_control()).collect();
        self.cursor_pos = self.text.len();
        self.selection_anchor = None;
        self.ensure_cursor_visible();
        self.invalidate();
    }

    fn insert_text(&mut self, text: &str) -> bool {
        let filtered: String = text.chars().filter(|c| !c.is_control()).collect();
        if filtered.is_empty() {
            return false;
        }
        self.delete_selection();
        self.text.insert_str(self.cursor_pos, &filtered);
        self.cursor_pos += filtered.len();
        self.ensure_cursor_visible();
        self.invalidate();
        true
    }

    fn selected_text(&self) -> &str {
        self.selection_range()
            .map_or("", |(start, end)| &self.text[start..end])
    }

    fn keypress(&mut self, command: EditCommand) -> bool {
        let changed = match command {
            EditCommand::Insert(ch) => {
                let mut buf = [0u8; 4];
                return self.insert_text(ch.encode_utf8(&mut buf));
            }
            EditCommand::DeleteLeft => {
                self.delete_selection() || {
                    let prev = self.prev_grapheme_boundary(self.cursor_pos);
                    self.delete_range(prev, self.cursor_pos)
                }
            }
            EditCommand::DeleteRight => {
                self.delete_selection() || {
                    let next = self.next_grapheme_boundary(self.cursor_pos);
                    self.delete_range(self.cursor_pos, next)
                }
            }
            EditCommand::DeleteWordLeft => {
                self.delete_selection() || {
                    let start = self.word_boundary_before(self.cursor_pos);
                    self.delete_range(start, self.cursor_pos)
                }
            }
            EditCommand::DeleteWordRight => {
                self.delete_selection() || {
                    let end = self.word_boundary_after(self.cursor_pos);
                    self.delete_range(self.cursor_pos, end)
                }
            }
            EditCommand::DeleteSelection => self.delete_selection(),
            EditCommand::CursorLeft => {
                let target = match self.selection_range() {
                    Some((start, _)) => start,
                    None => self.prev_grapheme_boundary(self.cursor_pos),
                };
                self.move_cursor(target)
            }
            EditCommand::CursorRight => {
                let target = match self.selection_range() {
                    Some((_, end)) => end,
                    None => self.next_grapheme_boundary(self.cursor_pos),
                };
                self.move_cursor(target)
            }
            EditCommand::WordLeft => self.move_cursor(self.word_boundary_before(self.cursor_pos)),
            EditCommand::WordRight => self.move_cursor(self.word_boundary_after(self.cursor_pos)),
            EditCommand::LineStart => self.move_cursor(0),
            EditCommand::LineEnd => self.move_cursor(self.text.len()),
            EditCommand::SelectAll => {
                let changed = self.selection_range() != Some((0, self.text.len()));
                self.selection_anchor = Some(0);
                self.cursor_pos = self.text.len();
                changed
            }
            EditCommand::ClearSelection => self.selection_anchor.take().is_some(),
        };

        if changed {
            self.ensure_cursor_visible();
            self.invalidate();
        }
        changed
    }

    fn pointer_action(&mut self, action: PointerAction, position: Point) -> bool {
        let pos = self.offset_at(position.x);
        match action {
            PointerAction::Press => {
                self.dragging = false;
                self.selection_anchor = None;
                self.cursor_pos = pos;
            }
            PointerAction::ExtendTo => {
                self.selection_anchor = self.selection_anchor.or(Some(self.cursor_pos));
                self.cursor_pos = pos;
            }
            PointerAction::SelectWord => {
                self.dragging = false;
                self.select_word_at(pos);
            }
            PointerAction::DragBegin => {
                self.dragging = true;
                self.selection_anchor = self.selection_anchor.or(Some(self.cursor_pos));
                return false;
            }
            PointerAction::Holding => {
                if !self.dragging {
                    return false;
                }
                self.cursor_pos = pos;
            }
            PointerAction::Hover => {
                if !self.dragging {
                    return false;
                }
                self.dragging = false;
                if self.selection_anchor == Some(self.cursor_pos) {
                    self.selection_anchor = None;
                }
            }
        }
        self.ensure_cursor_visible();
        self.invalidate();
        true
    }

    fn set_dimensions(&mut self, size: Size) {
        self.size = size;
        self.ensure_cursor_visible();
        self.invalidate();
    }

    fn dimensions(&self) -> Size {
        self.size
    }

    fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.invalidate();
        }
    }

    fn paint(&self, painter: &mut dyn Painter, origin: Point, clip: Rect) {
        let bounds = Rect::from_origin_size(origin, self.size);
        let Some(area) = clip.offset(origin.x, origin.y).intersect(&bounds) else {
            return;
        };

        painter.fill_rect(area, self.font.background);
        painter.stroke_rect(bounds, self.border_color);

        let advance = self.font.advance();
        let text_x = origin.x + self.text_left() - self.scroll_offset;
        let text_y = origin.y + self.text_top();
        let x_of = |pos: usize| text_x + self.column_of(pos) * advance;

        match self.selection_range() {
            Some((start, end)) => {
                let selection = Rect::new(
                    x_of(start),
                    text_y,
                    x_of(end) - x_of(start),
                    self.font.line_height(),
                );
                painter.fill_rect(selection, self.selection_font.background);
                for (range, font) in [
                    (0..start, &self.font),
                    (start..end, &self.selection_font),
                    (end..self.text.len(), &self.font),
                ] {
                    if !range.is_empty() {
                        painter.draw_text(&self.text[range.clone()], Point::new(x_of(range.start), text_y), font);
                    }
                }
            }
            None => {
                if !self.text.is_empty() {
                    painter.draw_text(&self.text, Point::new(text_x, text_y), &self.font);
                }
                if self.focused {
                    let caret = Rect::new(x_of(self.cursor_pos), text_y, 1, self.font.line_height());
                    painter.fill_rect(caret, self.font.foreground);
                }
            }
        }
    }
}
