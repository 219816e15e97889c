//! Toolbar widgets.
//!
//! - [`NavButton`]: icon button bound to a navigation action
//! - [`Throbber`]: animated activity indicator
//! - [`AddressField`]: the editable URL field
//! - [`LineEditor`]: the single-line editor embedded in the address field

mod address_field;
mod line_editor;
mod nav_button;
mod throbber;

pub use address_field::AddressField;
pub use line_editor::{EditCommand, LineEditor, PointerAction, TextEditor};
pub use nav_button::{
    BUTTON_DESCRIPTORS, ButtonDescriptor, ButtonKind, ButtonState, NavButton, descriptors,
};
pub use throbber::{FIRST_FRAME, IDLE_FRAME, Throbber, ThrobberState};
