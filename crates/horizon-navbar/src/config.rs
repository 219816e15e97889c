//! Toolbar configuration and builder.
//!
//! [`ToolbarConfig`] collects every setting the toolbar reads at creation
//! time. It can be built in code or loaded from TOML; missing keys fall back
//! to their defaults.
//!
//! # Example
//!
//! ```
//! use horizon_navbar::ToolbarConfig;
//!
//! let config = ToolbarConfig::from_toml_str(r##"
//! style = 2
//! background = "#DDDDDD"
//! home_url = "https://example.org/"
//!
//! [url_margins]
//! left = 3
//! "##).unwrap();
//!
//! assert_eq!(config.style, 2);
//! assert_eq!(config.url_margins.left, 3);
//! assert_eq!(config.url_margins.right, 2);
//! assert_eq!(config.drag_threshold, 5);
//! ```

use std::path::Path;

use encoding_rs::{Encoding, WINDOWS_1252};
use serde::{Deserialize, Serialize};

use horizon_navbar_render::Color;

use crate::error::{ToolbarError, ToolbarResult};
use crate::logging::targets;
use crate::style::StylePreset;

/// Space between the address field's allocated rectangle and its editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    /// The same margin on all four sides.
    pub const fn uniform(margin: i32) -> Self {
        Self {
            left: margin,
            top: margin,
            right: margin,
            bottom: margin,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(2)
    }
}

/// Settings read by the toolbar at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
    /// Index into the style table.
    pub style: usize,
    /// Toolbar background as `#RRGGBB`.
    pub background: String,
    /// Folder below `toolbar/` holding the icon atlases.
    pub image_folder: String,
    /// Where the home button navigates.
    pub home_url: String,
    /// Text placed in the address field on creation.
    pub initial_url: String,
    /// Pointer movement, in device units, needed before a drag extends the
    /// selection.
    pub drag_threshold: i32,
    /// Highest throbber animation frame.
    pub throbber_frames: usize,
    /// WHATWG label of the local clipboard encoding.
    pub clipboard_encoding: String,
    pub url_margins: Margins,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            style: StylePreset::Standard.index(),
            background: "#FFFFFF".to_owned(),
            image_folder: "default".to_owned(),
            home_url: "about:welcome".to_owned(),
            initial_url: "http://".to_owned(),
            drag_threshold: 5,
            url_margins: Margins::default(),
            throbber_frames: 8,
            clipboard_encoding: "windows-1252".to_owned(),
        }
    }
}

impl ToolbarConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ToolbarResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ToolbarResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::TOOLBAR, path = %path.as_ref().display(), "loaded toolbar configuration");
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> ToolbarResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Select a style preset by index.
    pub fn with_style(mut self, index: usize) -> Self {
        self.style = index;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color.to_hex();
        self
    }

    pub fn with_image_folder(mut self, folder: impl Into<String>) -> Self {
        self.image_folder = folder.into();
        self
    }

    pub fn with_home_url(mut self, url: impl Into<String>) -> Self {
        self.home_url = url.into();
        self
    }

    pub fn with_initial_url(mut self, url: impl Into<String>) -> Self {
        self.initial_url = url.into();
        self
    }

    pub fn with_drag_threshold(mut self, threshold: i32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn with_url_margins(mut self, margins: Margins) -> Self {
        self.url_margins = margins;
        self
    }

    /// Set the highest throbber frame. Clamped to at least one frame.
    pub fn with_throbber_frames(mut self, frames: usize) -> Self {
        self.throbber_frames = frames.max(1);
        self
    }

    pub fn with_clipboard_encoding(mut self, label: impl Into<String>) -> Self {
        self.clipboard_encoding = label.into();
        self
    }

    /// The parsed background color.
    pub fn background_color(&self) -> ToolbarResult<Color> {
        Color::from_hex(&self.background)
            .ok_or_else(|| ToolbarError::InvalidColor(self.background.clone()))
    }

    /// The local clipboard encoding.
    ///
    /// Unknown labels fall back to windows-1252.
    pub fn clipboard_encoding(&self) -> &'static Encoding {
        Encoding::for_label(self.clipboard_encoding.trim().as_bytes()).unwrap_or_else(|| {
            tracing::warn!(
                target: targets::CLIPBOARD,
                label = %self.clipboard_encoding,
                "unknown clipboard encoding, using windows-1252"
            );
            WINDOWS_1252
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolbarConfig::default();
        assert_eq!(config.style, 1);
        assert_eq!(config.initial_url, "http://");
        assert_eq!(config.drag_threshold, 5);
        assert_eq!(config.url_margins, Margins::uniform(2));
        assert_eq!(config.background_color().unwrap(), Color::WHITE);
        assert_eq!(config.clipboard_encoding(), WINDOWS_1252);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            ToolbarConfig::from_toml_str("").unwrap(),
            ToolbarConfig::default()
        );
    }

    #[test]
    fn test_builder() {
        let config = ToolbarConfig::new()
            .with_style(0)
            .with_background(Color::from_rgb8(0x12, 0x34, 0x56))
            .with_home_url("https://example.org/")
            .with_throbber_frames(0)
            .with_clipboard_encoding("utf-8");

        assert_eq!(config.style, 0);
        assert_eq!(config.background, "#123456");
        assert_eq!(config.throbber_frames, 1);
        assert_eq!(config.clipboard_encoding(), encoding_rs::UTF_8);
    }

    #[test]
    fn test_invalid_values() {
        let config = ToolbarConfig::new().with_clipboard_encoding("no-such-charset");
        assert_eq!(config.clipboard_encoding(), WINDOWS_1252);

        let mut config = ToolbarConfig::new();
        config.background = "white".to_owned();
        assert!(matches!(
            config.background_color(),
            Err(ToolbarError::InvalidColor(_))
        ));

        assert!(matches!(
            ToolbarConfig::from_toml_str("style = \"large\""),
            Err(ToolbarError::Config(_))
        ));
    }

    #[test]
    fn test_toml_text_round_trip() {
        let config = ToolbarConfig::new().with_image_folder("crystal");
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("image_folder = \"crystal\""));
        assert_eq!(ToolbarConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ToolbarConfig::load("/nonexistent/navbar.toml"),
            Err(ToolbarError::Io(_))
        ));
    }
}
