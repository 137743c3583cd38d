//! Selection mask produced by the magic wand.

use ndarray::Array2;

/// Mask value of a selected pixel.
pub const SELECTED: u8 = 255;
/// Mask value of an unselected pixel.
pub const UNSELECTED: u8 = 0;

/// Tight bounding box of the selected pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskBounds {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Single-channel selection mask (255 = selected, 0 = not selected),
/// row-major with no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionMask {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl SelectionMask {
    /// All-unselected mask.
    pub(crate) fn empty(width: usize, height: usize) -> Self {
        SelectionMask {
            data: vec![UNSELECTED; width * height],
            width,
            height,
        }
    }

    /// Adopt a raw row-major buffer. Returns `None` if the length does not
    /// match the dimensions.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if width.checked_mul(height)? != data.len() {
            return None;
        }
        Some(SelectionMask { data, width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Mask value at (x, y). Panics outside the mask.
    #[inline]
    pub fn value(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Whether (x, y) is selected. Coordinates outside the mask are unselected.
    #[inline]
    pub fn is_selected(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x] != UNSELECTED
    }

    /// Number of selected pixels.
    pub fn pixel_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != UNSELECTED).count()
    }

    /// Bounding box of the selection, `None` when nothing is selected.
    pub fn bounds(&self) -> Option<MaskBounds> {
        let mut min_x = self.width;
        let mut min_y = self.height;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut any = false;

        for (y, row) in self.data.chunks_exact(self.width.max(1)).enumerate() {
            let first = match row.iter().position(|&v| v != UNSELECTED) {
                Some(x) => x,
                None => continue,
            };
            // `first` exists so `rposition` does too
            let last = row.iter().rposition(|&v| v != UNSELECTED).unwrap_or(first);
            any = true;
            min_x = min_x.min(first);
            max_x = max_x.max(last);
            min_y = min_y.min(y);
            max_y = y;
        }

        if !any {
            return None;
        }
        Some(MaskBounds {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// Flip selected and unselected pixels.
    pub fn invert(&mut self) {
        for v in self.data.iter_mut() {
            *v = if *v == UNSELECTED { SELECTED } else { UNSELECTED };
        }
    }

    /// Copy into a (height, width) array.
    pub fn to_array(&self) -> Array2<u8> {
        Array2::from_shape_fn((self.height, self.width), |(y, x)| self.value(x, y))
    }

    /// Render as an RGBA8 image of one solid color whose alpha is the mask.
    ///
    /// This is the form a compositor consumes to tint or clip by the selection.
    pub fn to_alpha_image(&self, r: u8, g: u8, b: u8) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for &a in &self.data {
            out.extend_from_slice(&[r, g, b, a]);
        }
        out
    }
}
