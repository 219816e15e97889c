//! Icon atlases addressed as a grid of equally sized cells.
//!
//! Toolbar icons ship as one bitmap per icon set. Each icon occupies one
//! column of the grid and each visual state (or animation frame) one row, so
//! a cell is addressed by `(column, row)`. The cell size is not stored in the
//! atlas: it comes from the active toolbar style, which lets the same atlas
//! type serve every size preset.

use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::{RenderError, RenderResult};
use crate::types::{Rect, Size};

/// A decoded icon bitmap shared by every widget that draws from it.
///
/// Cloning an atlas is cheap: the pixel data is reference counted.
#[derive(Debug, Clone)]
pub struct IconAtlas {
    bitmap: Arc<RgbaImage>,
}

impl IconAtlas {
    /// Wrap a decoded bitmap.
    pub fn new(bitmap: RgbaImage) -> RenderResult<Self> {
        if bitmap.width() == 0 || bitmap.height() == 0 {
            return Err(RenderError::EmptyBitmap);
        }
        Ok(Self {
            bitmap: Arc::new(bitmap),
        })
    }

    /// Decode an atlas from an image file on disk.
    pub fn open(path: impl AsRef<Path>) -> RenderResult<Self> {
        let bitmap = image::open(path.as_ref())?.into_rgba8();
        Self::new(bitmap)
    }

    /// Decode an atlas from encoded image bytes (PNG).
    pub fn from_encoded(bytes: &[u8]) -> RenderResult<Self> {
        let bitmap = image::load_from_memory(bytes)?.into_rgba8();
        Self::new(bitmap)
    }

    /// The underlying pixels.
    #[inline]
    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    /// Size of the whole bitmap in pixels.
    pub fn size(&self) -> Size {
        Size::new(
            i32::try_from(self.bitmap.width()).unwrap_or(i32::MAX),
            i32::try_from(self.bitmap.height()).unwrap_or(i32::MAX),
        )
    }

    /// Number of whole `(columns, rows)` available for the given cell size.
    pub fn grid(&self, cell: Size) -> RenderResult<(usize, usize)> {
        if cell.is_empty() {
            return Err(RenderError::InvalidDimensions {
                width: cell.width,
                height: cell.height,
            });
        }
        let size = self.size();
        Ok((
            (size.width / cell.width) as usize,
            (size.height / cell.height) as usize,
        ))
    }

    /// Source rectangle of the cell at `(column, row)`.
    ///
    /// Returns `None` if the cell size is empty or the cell does not lie
    /// entirely inside the bitmap.
    pub fn cell_rect(&self, column: usize, row: usize, cell: Size) -> Option<Rect> {
        if cell.is_empty() {
            return None;
        }
        let x = i32::try_from(column).ok()?.checked_mul(cell.width)?;
        let y = i32::try_from(row).ok()?.checked_mul(cell.height)?;
        let rect = Rect::new(x, y, cell.width, cell.height);
        let bounds = Rect::from_origin_size(Default::default(), self.size());
        bounds.contains_rect(&rect).then_some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas(width: u32, height: u32) -> IconAtlas {
        IconAtlas::new(RgbaImage::new(width, height)).unwrap()
    }

    #[test]
    fn test_empty_bitmap_rejected() {
        assert!(matches!(
            IconAtlas::new(RgbaImage::new(0, 10)),
            Err(RenderError::EmptyBitmap)
        ));
    }

    #[test]
    fn test_cell_addressing() {
        // Five 24x24 icons, enabled and disabled rows.
        let atlas = atlas(120, 48);
        let cell = Size::new(24, 24);

        assert_eq!(atlas.grid(cell).unwrap(), (5, 2));
        assert_eq!(atlas.cell_rect(0, 0, cell), Some(Rect::new(0, 0, 24, 24)));
        assert_eq!(atlas.cell_rect(3, 1, cell), Some(Rect::new(72, 24, 24, 24)));
        assert_eq!(atlas.cell_rect(5, 0, cell), None);
        assert_eq!(atlas.cell_rect(0, 2, cell), None);
    }

    #[test]
    fn test_invalid_cell_size() {
        let atlas = atlas(16, 16);
        assert!(atlas.grid(Size::new(0, 16)).is_err());
        assert_eq!(atlas.cell_rect(0, 0, Size::new(16, 0)), None);
    }

    #[test]
    fn test_clone_shares_pixels() {
        let a = atlas(32, 32);
        let b = a.clone();
        assert!(std::ptr::eq(a.bitmap(), b.bitmap()));
    }
}
