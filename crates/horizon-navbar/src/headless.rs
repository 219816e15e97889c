//! In-process collaborators for running a toolbar without a window system.
//!
//! [`HeadlessWindow`] stands in for the host window: it reports a fixed
//! clip list, replays scripted pointer samples, and records the redraw,
//! layout and focus requests it receives. [`HeadlessNavigator`] answers the
//! availability predicates from plain flags and logs every action.
//!
//! Together with [`DisplayList`](horizon_navbar_render::DisplayList) and
//! [`ScrapClipboard`](crate::platform::ScrapClipboard) they make up a
//! complete [`ShellContext`](crate::ShellContext) for tests and tooling.

use std::collections::VecDeque;

use horizon_navbar_render::{Point, Rect};

use crate::events::PointerSnapshot;
use crate::host::{FocusTarget, HostWindow, Navigator, WindowId};

/// Extent of the default clip list.
const DEFAULT_EXTENT: i32 = 1 << 16;

/// A scripted host window.
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    id: WindowId,
    visible: Vec<Rect>,
    pointer_script: VecDeque<PointerSnapshot>,
    last_pointer: Point,
    polls: usize,
    focus: FocusTarget,
    redraws: Vec<Rect>,
    layout_requests: usize,
    focus_changes: Vec<FocusTarget>,
}

impl HeadlessWindow {
    /// A fully visible window with focus on the page.
    pub fn new(id: WindowId) -> Self {
        Self {
            id,
            visible: vec![Rect::new(0, 0, DEFAULT_EXTENT, DEFAULT_EXTENT)],
            pointer_script: VecDeque::new(),
            last_pointer: Point::ZERO,
            polls: 0,
            focus: FocusTarget::Browser,
            redraws: Vec::new(),
            layout_requests: 0,
            focus_changes: Vec::new(),
        }
    }

    /// Replace the clip list.
    pub fn with_visible_rects(mut self, visible: Vec<Rect>) -> Self {
        self.visible = visible;
        self
    }

    /// Start with focus on `target`.
    pub fn with_focus(mut self, target: FocusTarget) -> Self {
        self.focus = target;
        self
    }

    pub fn set_visible_rects(&mut self, visible: Vec<Rect>) {
        self.visible = visible;
    }

    /// Queue pointer samples for [`HostWindow::pointer_snapshot`].
    ///
    /// Once the queue runs dry the pointer reads as released at the last
    /// sampled position.
    pub fn script_pointer(&mut self, samples: impl IntoIterator<Item = PointerSnapshot>) {
        self.pointer_script.extend(samples);
    }

    /// Number of pointer samples taken so far.
    #[inline]
    pub fn pointer_polls(&self) -> usize {
        self.polls
    }

    /// Redraw requests received, in order.
    #[inline]
    pub fn redraws(&self) -> &[Rect] {
        &self.redraws
    }

    pub fn clear_redraws(&mut self) {
        self.redraws.clear();
    }

    #[inline]
    pub fn layout_requests(&self) -> usize {
        self.layout_requests
    }

    /// Focus moves requested, in order.
    #[inline]
    pub fn focus_changes(&self) -> &[FocusTarget] {
        &self.focus_changes
    }
}

impl HostWindow for HeadlessWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn visible_rects(&self) -> Vec<Rect> {
        self.visible.clone()
    }

    fn pointer_snapshot(&mut self) -> PointerSnapshot {
        self.polls += 1;
        match self.pointer_script.pop_front() {
            Some(sample) => {
                self.last_pointer = sample.position;
                sample
            }
            None => PointerSnapshot::released(self.last_pointer),
        }
    }

    fn request_redraw(&mut self, area: Rect) {
        self.redraws.push(area);
    }

    fn request_layout(&mut self) {
        self.layout_requests += 1;
    }

    fn set_focus(&mut self, target: FocusTarget) {
        self.focus = target;
        self.focus_changes.push(target);
    }

    fn focus(&self) -> FocusTarget {
        self.focus
    }
}

/// A navigation action recorded by [`HeadlessNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Back(WindowId),
    Forward(WindowId),
    Reload(WindowId),
    Stop(WindowId),
    NavigateTo(WindowId, String),
}

/// A navigator driven by flags.
#[derive(Debug, Clone)]
pub struct HeadlessNavigator {
    attached: bool,
    back: bool,
    forward: bool,
    reload: bool,
    stop: bool,
    actions: Vec<NavAction>,
}

impl HeadlessNavigator {
    /// An attached navigator with every action available.
    pub fn new() -> Self {
        Self {
            attached: true,
            back: true,
            forward: true,
            reload: true,
            stop: true,
            actions: Vec::new(),
        }
    }

    /// Set all four availability flags.
    pub fn with_all_available(mut self, available: bool) -> Self {
        self.back = available;
        self.forward = available;
        self.reload = available;
        self.stop = available;
        self
    }

    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    pub fn set_back_available(&mut self, available: bool) {
        self.back = available;
    }

    pub fn set_forward_available(&mut self, available: bool) {
        self.forward = available;
    }

    pub fn set_reload_available(&mut self, available: bool) {
        self.reload = available;
    }

    pub fn set_stop_available(&mut self, available: bool) {
        self.stop = available;
    }

    /// Actions invoked so far, in order.
    #[inline]
    pub fn actions(&self) -> &[NavAction] {
        &self.actions
    }

    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }
}

impl Default for HeadlessNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for HeadlessNavigator {
    fn is_attached(&self, _window: WindowId) -> bool {
        self.attached
    }

    fn back_available(&self, _window: WindowId) -> bool {
        self.back
    }

    fn forward_available(&self, _window: WindowId) -> bool {
        self.forward
    }

    fn reload_available(&self, _window: WindowId) -> bool {
        self.reload
    }

    fn stop_available(&self, _window: WindowId) -> bool {
        self.stop
    }

    fn go_back(&mut self, window: WindowId) {
        self.actions.push(NavAction::Back(window));
    }

    fn go_forward(&mut self, window: WindowId) {
        self.actions.push(NavAction::Forward(window));
    }

    fn reload(&mut self, window: WindowId) {
        self.actions.push(NavAction::Reload(window));
    }

    fn stop(&mut self, window: WindowId) {
        self.actions.push(NavAction::Stop(window));
    }

    fn navigate_to(&mut self, window: WindowId, url: &str) {
        self.actions.push(NavAction::NavigateTo(window, url.to_owned()));
    }
}
