//! Pointer, keyboard and clipboard behaviour of the address field, driven
//! through the toolbar's entry points.

use std::sync::Arc;

use encoding_rs::WINDOWS_1252;
use horizon_navbar::headless::{HeadlessNavigator, HeadlessWindow, NavAction};
use horizon_navbar::platform::{ClipboardProvider, ScrapClipboard};
use horizon_navbar::render::{DisplayList, Point, Rect};
use horizon_navbar::{
    ButtonKind, ButtonState, FocusTarget, HostWindow, Key, KeyPressEvent, KeyboardModifiers,
    MouseButton, PointerEvent, PointerSnapshot, ShellContext, TextEditor, Toolbar, ToolbarConfig,
    ToolbarTheme, WindowId,
};
use tracing_subscriber::EnvFilter;

const WINDOW: WindowId = WindowId(5);
const URL: &str = "http://www.example.org";

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup(text: &str) -> Toolbar {
    init_logging();
    let config = ToolbarConfig::default();
    let theme = Arc::new(ToolbarTheme::new(&config).unwrap());
    let mut toolbar = Toolbar::create(WINDOW, theme, &config).unwrap();
    toolbar.resize(Rect::new(0, 0, 640, 26)).unwrap();

    let mut host = HeadlessWindow::new(WINDOW);
    assert!(toolbar.set_url_text(text, &HeadlessNavigator::new(), &mut host));
    toolbar
}

/// Window position of the boundary before grapheme `column` of the field.
///
/// The field's content starts at x = 162 and its text 5 pixels further in;
/// the standard style advances 8 pixels per grapheme.
fn column_x(column: i32) -> Point {
    Point::new(167 + 8 * column, 10)
}

fn focused_host() -> HeadlessWindow {
    HeadlessWindow::new(WINDOW).with_focus(FocusTarget::AddressField)
}

#[test]
fn test_press_on_unfocused_field_takes_focus() {
    let mut toolbar = setup(URL);
    let mut host = HeadlessWindow::new(WINDOW);
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(toolbar.click(PointerEvent::click(column_x(3)), &mut ctx).unwrap());
    drop(ctx);

    assert_eq!(host.focus_changes(), &[FocusTarget::AddressField]);
    assert_eq!(toolbar.address_field().editor().selected_text(), URL);
    assert_eq!(host.pointer_polls(), 0);
    assert!(navigator.actions().is_empty());
    assert!(!toolbar.address_field().is_dirty());
}

#[test]
fn test_drag_extends_selection() {
    let mut toolbar = setup(URL);
    let mut host = focused_host();
    host.script_pointer([
        // Within the threshold of the press.
        PointerSnapshot::held(Point::new(226, 10)),
        PointerSnapshot::held(Point::new(239, 10)),
        PointerSnapshot::held(Point::new(263, 10)),
    ]);
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(toolbar.click(PointerEvent::click(column_x(7)), &mut ctx).unwrap());
    drop(ctx);

    let editor = toolbar.address_field().editor();
    assert_eq!(editor.selected_text(), "www.e");
    assert!(!editor.is_dragging());
    // Three held samples and the release.
    assert_eq!(host.pointer_polls(), 4);
    assert!(!toolbar.address_field().is_dirty());
}

#[test]
fn test_release_sample_only_ends_drag() {
    let mut toolbar = setup(URL);
    let mut host = focused_host();
    host.script_pointer([PointerSnapshot::released(column_x(11))]);
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    toolbar.click(PointerEvent::click(column_x(7)), &mut ctx).unwrap();
    drop(ctx);

    let editor = toolbar.address_field().editor();
    assert!(!editor.has_selection());
    assert_eq!(editor.cursor_position(), 7);
    assert!(!editor.is_dragging());
    assert_eq!(host.pointer_polls(), 1);
}

#[test]
fn test_double_click_selects_word() {
    let mut toolbar = setup(URL);
    let mut host = focused_host();
    let position = column_x(13);
    host.script_pointer([PointerSnapshot::released(position)]);
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(toolbar.click(PointerEvent::double_click(position), &mut ctx).unwrap());
    drop(ctx);

    assert_eq!(toolbar.address_field().editor().selected_text(), "example");
}

#[test]
fn test_shift_click_extends_from_caret() {
    let mut toolbar = setup(URL);
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();

    host.script_pointer([PointerSnapshot::released(column_x(4))]);
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);
    toolbar.click(PointerEvent::click(column_x(4)), &mut ctx).unwrap();
    drop(ctx);
    assert!(!toolbar.address_field().editor().has_selection());
    assert_eq!(toolbar.address_field().editor().cursor_position(), 4);

    host.script_pointer([PointerSnapshot::released(column_x(10))]);
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);
    let event = PointerEvent::click(column_x(10)).with_modifiers(KeyboardModifiers::SHIFT);
    toolbar.click(event, &mut ctx).unwrap();
    drop(ctx);

    assert_eq!(toolbar.address_field().editor().selected_text(), "://www");
}

#[test]
fn test_secondary_button_acts_as_press_with_focus() {
    let mut toolbar = setup(URL);
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    let mut event = PointerEvent::click(column_x(2));
    event.button = MouseButton::Right;
    assert!(toolbar.click(event, &mut ctx).unwrap());
    drop(ctx);

    let editor = toolbar.address_field().editor();
    assert_eq!(editor.cursor_position(), 2);
    assert!(!editor.has_selection());
    // Released right away: one sample ends the drag.
    assert_eq!(host.pointer_polls(), 1);
}

#[test]
fn test_enter_submits_and_returns_focus() {
    let mut toolbar = setup("https://example.org/search");
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(toolbar.key_input(KeyPressEvent::new(Key::Enter), &mut ctx));
    drop(ctx);

    assert_eq!(
        navigator.actions(),
        &[NavAction::NavigateTo(WINDOW, "https://example.org/search".to_owned())]
    );
    assert_eq!(host.focus_changes(), &[FocusTarget::Browser]);
    assert_eq!(host.focus(), FocusTarget::Browser);
}

#[test]
fn test_enter_on_empty_field_keeps_focus() {
    let mut toolbar = setup("");
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(!toolbar.key_input(KeyPressEvent::new(Key::Enter), &mut ctx));
    drop(ctx);

    assert!(navigator.actions().is_empty());
    assert!(host.focus_changes().is_empty());
    assert_eq!(host.focus(), FocusTarget::AddressField);
}

#[test]
fn test_keys_need_field_focus() {
    let mut toolbar = setup(URL);
    let mut host = HeadlessWindow::new(WINDOW);
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(!toolbar.key_input('x'.into(), &mut ctx));
    assert!(!toolbar.key_input(KeyPressEvent::new(Key::Enter), &mut ctx));
    drop(ctx);

    assert_eq!(toolbar.url_text(), URL);
    assert!(navigator.actions().is_empty());
}

#[test]
fn test_paste_replaces_url_and_refreshes_stop() {
    let mut toolbar = setup("http://old.example/");
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    navigator.set_stop_available(false);
    let mut clipboard = ScrapClipboard::new(WINDOWS_1252);
    clipboard.write_text(b"http://new.example/");
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(toolbar.key_input(KeyPressEvent::ctrl(Key::Char('v')), &mut ctx));
    drop(ctx);

    assert_eq!(toolbar.url_text(), "http://new.example/");
    assert_eq!(toolbar.button(ButtonKind::Stop).unwrap().state(), ButtonState::Disabled);
    assert_eq!(host.redraws(), &[Rect::new(96, 0, 32, 26)]);
    assert!(!toolbar.address_field().is_dirty());
}

#[test]
fn test_paste_decodes_local_encoding() {
    let mut toolbar = setup("http://");
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::new(WINDOWS_1252);
    clipboard.write_text(b"caf\xE9");
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(toolbar.key_input(KeyPressEvent::ctrl(Key::Char('V')), &mut ctx));
    drop(ctx);

    assert_eq!(toolbar.url_text(), "café");
}

#[test]
fn test_paste_needs_attached_view() {
    let mut toolbar = setup(URL);
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    navigator.set_attached(false);
    let mut clipboard = ScrapClipboard::utf8();
    clipboard.write_text(b"http://new.example/");
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(!toolbar.key_input(KeyPressEvent::ctrl(Key::Char('v')), &mut ctx));
    drop(ctx);

    assert_eq!(toolbar.url_text(), URL);
    assert!(host.redraws().is_empty());
}

#[test]
fn test_paste_of_malformed_text_changes_nothing() {
    let mut toolbar = setup("http://");
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();
    clipboard.write_text(b"\xFF\xFE");
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(!toolbar.key_input(KeyPressEvent::ctrl(Key::Char('v')), &mut ctx));
    drop(ctx);

    assert_eq!(toolbar.url_text(), "http://");
}

#[test]
fn test_copy_encodes_field_text() {
    let mut toolbar = setup("http://café.example/");
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::new(WINDOWS_1252);
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(toolbar.key_input(KeyPressEvent::ctrl(Key::Char('c')), &mut ctx));
    drop(ctx);

    assert_eq!(clipboard.contents(), Some(&b"http://caf\xE9.example/"[..]));
    assert_eq!(toolbar.url_text(), "http://café.example/");
}

#[test]
fn test_copy_of_unrepresentable_text_is_skipped() {
    let mut toolbar = setup("日本");
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::new(WINDOWS_1252);
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(toolbar.key_input(KeyPressEvent::ctrl(Key::Char('c')), &mut ctx));
    drop(ctx);

    assert_eq!(clipboard.contents(), None);
}

#[test]
fn test_cut_of_unrepresentable_text_keeps_it() {
    let mut toolbar = setup("日本");
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::new(WINDOWS_1252);
    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);

    assert!(toolbar.key_input(KeyPressEvent::ctrl(Key::Char('a')), &mut ctx));
    assert!(toolbar.key_input(KeyPressEvent::ctrl(Key::Char('x')), &mut ctx));
    drop(ctx);

    assert_eq!(toolbar.url_text(), "日本");
    assert_eq!(clipboard.contents(), None);
}

#[test]
fn test_edits_are_painted_immediately() {
    let mut toolbar = setup("http://");
    let mut host = focused_host();
    let mut painter = DisplayList::new();
    let mut navigator = HeadlessNavigator::new();
    let mut clipboard = ScrapClipboard::utf8();

    // Damage from setting the text is still pending.
    assert!(toolbar.address_field().is_dirty());
    assert!(toolbar.url_redraw(&host, &mut painter));
    assert!(!toolbar.url_redraw(&host, &mut painter));
    assert_eq!(painter.lock_count(), 1);

    let mut ctx = ShellContext::new(&mut host, &mut painter, &mut navigator, &mut clipboard);
    assert!(toolbar.key_input('a'.into(), &mut ctx));
    drop(ctx);

    assert_eq!(toolbar.url_text(), "http://a");
    assert!(!toolbar.address_field().is_dirty());
    assert_eq!(painter.lock_count(), 2);
}
