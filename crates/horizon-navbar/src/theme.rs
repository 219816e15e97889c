//! Shared toolbar resources.
//!
//! A [`ToolbarTheme`] is created once by the browser shell and handed to
//! every toolbar as an `Arc`. It owns the style table and the two icon atlases.
//! Atlases arrive asynchronously: the shell decodes them and calls
//! [`ToolbarTheme::resource_ready`], then notifies each toolbar through
//! [`Toolbar::on_resource_ready`](crate::Toolbar::on_resource_ready). Until an
//! atlas is installed, widgets that draw from it paint background only.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_navbar::{IconResource, ToolbarConfig, ToolbarTheme};
//!
//! let theme = Arc::new(ToolbarTheme::new(&ToolbarConfig::default()).unwrap());
//! assert!(!theme.is_ready(IconResource::Toolbar));
//! assert!(theme.resource_path(IconResource::Throbber).ends_with("default/throbber.png"));
//! ```

use std::path::PathBuf;

use parking_lot::RwLock;

use horizon_navbar_render::{Color, IconAtlas};

use crate::config::ToolbarConfig;
use crate::error::ToolbarResult;
use crate::logging::targets;
use crate::style::{StyleTable, ToolbarStyle};

/// The image resources a toolbar draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconResource {
    /// Button icons: one column per button, one row per visual state.
    Toolbar,
    /// Throbber frames: one column per frame.
    Throbber,
}

impl IconResource {
    fn file_name(self) -> &'static str {
        match self {
            Self::Toolbar => "main.png",
            Self::Throbber => "throbber.png",
        }
    }
}

#[derive(Debug, Default)]
struct Atlases {
    toolbar: Option<IconAtlas>,
    throbber: Option<IconAtlas>,
}

impl Atlases {
    fn slot(&mut self, which: IconResource) -> &mut Option<IconAtlas> {
        match which {
            IconResource::Toolbar => &mut self.toolbar,
            IconResource::Throbber => &mut self.throbber,
        }
    }

    fn get(&self, which: IconResource) -> Option<&IconAtlas> {
        match which {
            IconResource::Toolbar => self.toolbar.as_ref(),
            IconResource::Throbber => self.throbber.as_ref(),
        }
    }
}

/// Style table, colors and icon atlases shared by all toolbars.
#[derive(Debug)]
pub struct ToolbarTheme {
    styles: StyleTable,
    background: Color,
    image_folder: String,
    atlases: RwLock<Atlases>,
}

impl ToolbarTheme {
    /// Build a theme from configuration. No atlas is loaded yet.
    pub fn new(config: &ToolbarConfig) -> ToolbarResult<Self> {
        let background = config.background_color()?;
        Ok(Self::with_styles(
            StyleTable::new(background),
            background,
            config.image_folder.clone(),
        ))
    }

    /// Build a theme from an explicit style table.
    pub fn with_styles(styles: StyleTable, background: Color, image_folder: String) -> Self {
        Self {
            styles,
            background,
            image_folder,
            atlases: RwLock::new(Atlases::default()),
        }
    }

    /// Look up a style preset.
    pub fn style(&self, index: usize) -> ToolbarResult<&ToolbarStyle> {
        self.styles.get(index)
    }

    #[inline]
    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Toolbar background color.
    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Where the shell should load `which` from.
    pub fn resource_path(&self, which: IconResource) -> PathBuf {
        PathBuf::from("toolbar")
            .join(&self.image_folder)
            .join(which.file_name())
    }

    /// Install a decoded atlas.
    pub fn resource_ready(&self, which: IconResource, atlas: IconAtlas) {
        tracing::debug!(target: targets::THEME, ?which, size = ?atlas.size(), "icon atlas ready");
        *self.atlases.write().slot(which) = Some(atlas);
    }

    /// Decode `which` from `resource_path` below `base` and install it.
    pub fn load_resource(&self, base: impl Into<PathBuf>, which: IconResource) -> ToolbarResult<()> {
        let path = base.into().join(self.resource_path(which));
        let atlas = IconAtlas::open(&path)?;
        self.resource_ready(which, atlas);
        Ok(())
    }

    /// The atlas for `which`, if it has been installed.
    pub fn atlas(&self, which: IconResource) -> Option<IconAtlas> {
        self.atlases.read().get(which).cloned()
    }

    pub fn is_ready(&self, which: IconResource) -> bool {
        self.atlases.read().get(which).is_some()
    }

    /// Drop both atlases.
    ///
    /// Toolbars keep working afterwards and paint background only.
    pub fn release(&self) {
        let mut atlases = self.atlases.write();
        atlases.toolbar = None;
        atlases.throbber = None;
        tracing::debug!(target: targets::THEME, "icon atlases released");
    }
}
