//! Toolbar size presets.
//!
//! A [`StyleTable`] holds a fixed set of [`ToolbarStyle`] presets, looked up
//! by index. The toolbar picks one at creation time and never changes it.

use horizon_navbar_render::{Color, Size};

use crate::error::{ToolbarError, ToolbarResult};

/// Named slots of the style table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePreset {
    Compact = 0,
    Standard = 1,
    Large = 2,
    /// A slot the shell may overwrite at runtime.
    Custom = 3,
}

impl StylePreset {
    /// Index of the preset in the table.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Geometry and colors of one toolbar size preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarStyle {
    /// Point size of the address field font.
    pub font_height_pt: i32,
    /// Bar height, including the bottom border row.
    pub height: i32,
    pub icon_width: i32,
    pub icon_height: i32,
    /// Horizontal padding on each side of an icon.
    pub icon_padding_x: i32,
    /// Vertical offset of an icon from the top of its widget.
    pub icon_padding_y: i32,
    /// Fill behind icons.
    pub icon_background: Color,
}

impl ToolbarStyle {
    /// Width of a button or throbber widget.
    #[inline]
    pub const fn button_width(&self) -> i32 {
        self.icon_width + 2 * self.icon_padding_x
    }

    /// Size of one icon atlas cell.
    #[inline]
    pub const fn icon_cell(&self) -> Size {
        Size::new(self.icon_width, self.icon_height)
    }
}

/// The table of size presets.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    styles: [ToolbarStyle; 4],
}

impl StyleTable {
    /// Build the standard table with every preset using `background` behind
    /// its icons.
    pub fn new(background: Color) -> Self {
        let preset = |font_height_pt, height, icon, padding_x, padding_y| ToolbarStyle {
            font_height_pt,
            height,
            icon_width: icon,
            icon_height: icon,
            icon_padding_x: padding_x,
            icon_padding_y: padding_y,
            icon_background: background,
        };
        Self {
            styles: [
                preset(9, 18, 16, 0, 0),
                preset(14, 26, 24, 4, 1),
                preset(18, 34, 64, 0, 2),
                preset(18, 34, 64, 0, 2),
            ],
        }
    }

    /// Look up a preset by index.
    pub fn get(&self, index: usize) -> ToolbarResult<&ToolbarStyle> {
        self.styles.get(index).ok_or(ToolbarError::InvalidStyle {
            index,
            available: self.styles.len(),
        })
    }

    /// Look up a named preset.
    #[inline]
    pub fn preset(&self, preset: StylePreset) -> &ToolbarStyle {
        &self.styles[preset.index()]
    }

    /// Replace the custom preset.
    pub fn set_custom(&mut self, style: ToolbarStyle) {
        self.styles[StylePreset::Custom.index()] = style;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_preset() {
        let table = StyleTable::default();
        let style = table.get(1).unwrap();
        assert_eq!(style, table.preset(StylePreset::Standard));
        assert_eq!(style.height, 26);
        assert_eq!(style.icon_cell(), Size::new(24, 24));
        assert_eq!(style.button_width(), 32);
        assert_eq!(style.icon_padding_y, 1);
    }

    #[test]
    fn test_invalid_index() {
        let table = StyleTable::default();
        assert!(matches!(
            table.get(4),
            Err(ToolbarError::InvalidStyle {
                index: 4,
                available: 4
            })
        ));
    }

    #[test]
    fn test_background_shared_by_all_presets() {
        let bg = Color::from_rgb8(0xDD, 0xDD, 0xDD);
        let table = StyleTable::new(bg);
        assert!((0..table.len()).all(|i| table.get(i).unwrap().icon_background == bg));
    }

    #[test]
    fn test_set_custom() {
        let mut table = StyleTable::default();
        let custom = ToolbarStyle {
            height: 40,
            ..*table.preset(StylePreset::Large)
        };
        table.set_custom(custom);
        assert_eq!(table.preset(StylePreset::Custom).height, 40);
        assert_eq!(table.preset(StylePreset::Large).height, 34);
    }
}
