//! Clipboard access for the address field.
//!
//! The address field talks to the clipboard in raw bytes through
//! [`ClipboardProvider`]. Each provider declares the encoding its bytes are
//! in; the field's text is always UTF-8, so paste decodes with
//! [`decode_local`] and copy encodes with [`encode_local`].
//!
//! Two providers are included:
//! - [`SystemClipboard`] wraps the `arboard` crate and exchanges UTF-8.
//! - [`ScrapClipboard`] is a process-local scrap buffer holding text in a
//!   fixed local encoding, for shells without a system clipboard and for tests.
//!
//! # Example
//!
//! ```
//! use horizon_navbar::platform::{ClipboardProvider, ScrapClipboard, decode_local};
//!
//! let mut scrap = ScrapClipboard::new(encoding_rs::WINDOWS_1252);
//! scrap.write_text(b"caf\xE9");
//! let bytes = scrap.read_text().unwrap();
//! assert_eq!(decode_local(&bytes, scrap.encoding()).as_deref(), Some("café"));
//! ```
//!
//! # Platform Notes
//!
//! - **Windows**: Uses the Win32 clipboard API
//! - **macOS**: Uses NSPasteboard
//! - **Linux**: Uses X11 selections or Wayland data-control protocol

use std::fmt;

use encoding_rs::{Encoding, UTF_8};

use crate::config::ToolbarConfig;
use crate::logging::targets;

/// Byte-level clipboard used by the address field.
pub trait ClipboardProvider {
    /// Current clipboard text in [`encoding`](Self::encoding), or `None` if
    /// the clipboard holds no text.
    fn read_text(&mut self) -> Option<Vec<u8>>;

    /// Replace the clipboard text. `bytes` are in
    /// [`encoding`](Self::encoding).
    fn write_text(&mut self, bytes: &[u8]);

    /// Encoding of the bytes exchanged with this clipboard.
    fn encoding(&self) -> &'static Encoding;
}

/// Decode clipboard bytes into UTF-8 text.
///
/// Returns `None` if the bytes are malformed in `encoding`; no replacement
/// characters are ever produced. Control characters are dropped, since the
/// address field holds a single line.
pub fn decode_local(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let text = encoding.decode_without_bom_handling_and_without_replacement(bytes)?;
    Some(text.chars().filter(|c| !c.is_control()).collect())
}

/// Encode UTF-8 text into clipboard bytes.
///
/// Returns `None` if `text` contains characters `encoding` cannot represent.
pub fn encode_local(text: &str, encoding: &'static Encoding) -> Option<Vec<u8>> {
    let (bytes, _, had_errors) = encoding.encode(text);
    (!had_errors).then(|| bytes.into_owned())
}

/// Error type for clipboard backend setup.
#[derive(Debug)]
pub struct ClipboardError {
    message: String,
}

impl ClipboardError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clipboard error: {}", self.message)
    }
}

impl std::error::Error for ClipboardError {}

#[cfg(feature = "system-clipboard")]
impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// The platform clipboard.
///
/// Read and write failures are logged and treated as an empty clipboard.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    /// Open the platform clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard cannot be accessed, which can happen
    /// if the system clipboard is unavailable or locked by another process.
    pub fn new() -> Result<Self, ClipboardError> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

#[cfg(feature = "system-clipboard")]
impl ClipboardProvider for SystemClipboard {
    fn read_text(&mut self) -> Option<Vec<u8>> {
        match self.inner.get_text() {
            Ok(text) => Some(text.into_bytes()),
            Err(err) => {
                tracing::debug!(target: targets::CLIPBOARD, error = %ClipboardError::from(err), "no clipboard text");
                None
            }
        }
    }

    fn write_text(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        if let Err(err) = self.inner.set_text(text.as_ref()) {
            tracing::warn!(target: targets::CLIPBOARD, error = %ClipboardError::from(err), "clipboard write failed");
        }
    }

    fn encoding(&self) -> &'static Encoding {
        UTF_8
    }
}

#[cfg(feature = "system-clipboard")]
impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

/// A process-local scrap buffer in a fixed encoding.
#[derive(Debug, Clone)]
pub struct ScrapClipboard {
    contents: Option<Vec<u8>>,
    encoding: &'static Encoding,
}

impl ScrapClipboard {
    /// An empty scrap buffer exchanging bytes in `encoding`.
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            contents: None,
            encoding,
        }
    }

    /// An empty UTF-8 scrap buffer.
    pub fn utf8() -> Self {
        Self::new(UTF_8)
    }

    /// An empty scrap buffer in the configured local encoding.
    pub fn from_config(config: &ToolbarConfig) -> Self {
        Self::new(config.clipboard_encoding())
    }

    /// Raw contents, if any.
    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.contents = None;
    }
}

impl Default for ScrapClipboard {
    fn default() -> Self {
        Self::utf8()
    }
}

impl ClipboardProvider for ScrapClipboard {
    fn read_text(&mut self) -> Option<Vec<u8>> {
        self.contents.clone()
    }

    fn write_text(&mut self, bytes: &[u8]) {
        tracing::trace!(target: targets::CLIPBOARD, len = bytes.len(), "scrap written");
        self.contents = Some(bytes.to_vec());
    }

    fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}
