//! Logging and debugging facilities for Horizon Navbar.
//!
//! This module provides:
//! - Target and span names for filtering the crate's `tracing` output
//! - Debug visualization for component trees
//! - A timing guard for profiling toolbar operations
//!
//! # Tracing Integration
//!
//! The toolbar never installs a subscriber. To see its logs, install one in
//! the browser shell:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_navbar::input=trace,horizon_navbar=debug")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! Use [`ComponentTreeDebug`] to dump a component hierarchy, or
//! `Toolbar::debug_tree` for a whole toolbar:
//!
//! ```ignore
//! tracing::debug!("toolbar layout:\n{}", toolbar.debug_tree()?);
//! ```

use std::fmt::{Debug, Write as FmtWrite};
use std::time::Instant;

use crate::component::{ComponentId, ComponentTree};
use crate::error::ToolbarResult;

/// Span names used throughout Horizon Navbar for tracing.
pub mod span_names {
    /// Toolbar creation.
    pub const CREATE: &str = "horizon_navbar::create";
    /// Toolbar teardown.
    pub const DESTROY: &str = "horizon_navbar::destroy";
    /// Redraw dispatch for one requested area.
    pub const REDRAW: &str = "horizon_navbar::redraw";
    /// Address field drag tracking.
    pub const DRAG: &str = "horizon_navbar::drag";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Toolbar lifecycle and dispatch.
    pub const TOOLBAR: &str = "horizon_navbar::toolbar";
    /// Damage accumulation and repaint.
    pub const DAMAGE: &str = "horizon_navbar::damage";
    /// Pointer and keyboard routing.
    pub const INPUT: &str = "horizon_navbar::input";
    /// Component tree changes.
    pub const COMPONENT: &str = "horizon_navbar::component";
    /// Clipboard transfers.
    pub const CLIPBOARD: &str = "horizon_navbar::clipboard";
    /// Theme resources.
    pub const THEME: &str = "horizon_navbar::theme";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for component tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Whether to show component ids.
    pub show_ids: bool,
    /// Whether to show allocated rectangles.
    pub show_rects: bool,
    /// Whether to show handler bindings.
    pub show_bindings: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_rects: true,
            show_bindings: false,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            show_bindings: true,
            ..Default::default()
        }
    }

    /// Names only.
    pub fn minimal() -> Self {
        Self {
            show_rects: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing component trees.
#[derive(Debug, Clone, Default)]
pub struct ComponentTreeDebug {
    options: TreeFormatOptions,
}

impl ComponentTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree<H: Copy + Debug>(
        &self,
        tree: &ComponentTree<H>,
        root: ComponentId,
    ) -> ToolbarResult<String> {
        let mut output = String::new();
        self.format_into(tree, root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_into<H: Copy + Debug>(
        &self,
        tree: &ComponentTree<H>,
        id: ComponentId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> ToolbarResult<()> {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }

        output.push_str(&self.build_prefix(depth, is_last));
        let name = tree.name(id)?;
        output.push_str(if name.is_empty() { "(unnamed)" } else { name });

        // Writing to a String cannot fail.
        if self.options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if self.options.show_rects {
            let _ = write!(output, " {:?}", tree.rect(id)?);
        }
        if self.options.show_bindings {
            for binding in tree.bindings(id)? {
                let _ = write!(output, " {:?}->{:?}", binding.kind, binding.handler);
            }
        }
        output.push('\n');

        let children = tree.children(id)?;
        let count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.format_into(tree, child, depth + 1, i + 1 == count, output)?;
        }
        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }
        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|  ", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}  ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
        };
        let mut prefix = branch.repeat(depth - 1);
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}

/// A guard that times an operation and reports it when dropped.
///
/// The span stays entered for the guard's lifetime, so events logged while
/// it is alive are attributed to the operation.
#[derive(Debug)]
pub struct PerfSpan {
    name: &'static str,
    start: Instant,
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a span for `name` and start timing.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_navbar::perf", "perf", operation = name);
        Self {
            name,
            start: Instant::now(),
            _span: span.entered(),
        }
    }
}

impl Drop for PerfSpan {
    fn drop(&mut self) {
        tracing::trace!(
            target: "horizon_navbar::perf",
            operation = self.name,
            elapsed_us = self.start.elapsed().as_micros() as u64,
            "operation finished"
        );
    }
}

/// Trace-level event with the toolbar target.
#[macro_export]
macro_rules! navbar_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_navbar::toolbar", $($arg)*)
    };
}

/// Debug-level event with the toolbar target.
#[macro_export]
macro_rules! navbar_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_navbar::toolbar", $($arg)*)
    };
}

/// Warn-level event with the toolbar target.
#[macro_export]
macro_rules! navbar_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_navbar::toolbar", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{EventKind, Orientation, SizeBounds};
    use horizon_navbar_render::Rect;

    fn setup() -> (ComponentTree<u8>, ComponentId) {
        let mut tree = ComponentTree::new();
        let root = tree.create("toolbar", Orientation::Horizontal, SizeBounds::UNBOUNDED, 0);
        let back = tree.create("back", Orientation::Horizontal, SizeBounds::fixed_width(32), 0);
        let url = tree.create("url", Orientation::Horizontal, SizeBounds::UNBOUNDED, 1);
        tree.attach(root, back).unwrap();
        tree.attach(root, url).unwrap();
        tree.bind(back, EventKind::Click, 7).unwrap();
        tree.layout(root, Rect::new(0, 0, 100, 26)).unwrap();
        (tree, root)
    }

    #[test]
    fn test_tree_format_hierarchy() {
        let (tree, root) = setup();
        let output = ComponentTreeDebug::new().format_subtree(&tree, root).unwrap();

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("toolbar Rect(0, 0, 100x26)"));
        assert!(lines[1].starts_with("\u{251c}\u{2500}\u{2500} back"));
        assert!(lines[2].starts_with("\u{2514}\u{2500}\u{2500} url Rect(32, 0, 68x26)"));
    }

    #[test]
    fn test_tree_format_detailed_ascii() {
        let (tree, root) = setup();
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::detailed()
        };
        let output = ComponentTreeDebug::with_options(options)
            .format_subtree(&tree, root)
            .unwrap();
        assert!(output.contains("+-- back"));
        assert!(output.contains("Click->7"));
    }

    #[test]
    fn test_tree_format_max_depth() {
        let (tree, root) = setup();
        let options = TreeFormatOptions {
            max_depth: Some(0),
            ..TreeFormatOptions::minimal()
        };
        let output = ComponentTreeDebug::with_options(options)
            .format_subtree(&tree, root)
            .unwrap();
        assert_eq!(output, "toolbar\n");
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
