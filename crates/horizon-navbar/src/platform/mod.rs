//! Platform services used by the toolbar.
//!
//! # Clipboard
//!
//! ```ignore
//! use horizon_navbar::platform::{ClipboardProvider, SystemClipboard};
//!
//! let mut clipboard = SystemClipboard::new()?;
//! clipboard.write_text("https://example.org/".as_bytes());
//! ```

pub mod clipboard;

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{ClipboardError, ClipboardProvider, ScrapClipboard, decode_local, encode_local};
