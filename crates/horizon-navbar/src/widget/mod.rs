//! Widgets composed into the toolbar.
//!
//! Each widget owns one component in the toolbar's
//! [`ComponentTree`](crate::component::ComponentTree) and binds its redraw
//! and click events there at creation. Widgets keep their own state and
//! paint through a [`Painter`](horizon_navbar_render::Painter) handed in by
//! the toolbar; none of them holds a reference to its window, only a
//! [`WindowId`](crate::host::WindowId).

pub mod widgets;

pub use widgets::{
    AddressField, ButtonKind, ButtonState, EditCommand, LineEditor, NavButton, PointerAction,
    TextEditor, Throbber, ThrobberState,
};
