//! Magic wand entry points for interleaved RGBA8 buffers.
//!
//! Thin wrappers over [`SelectionBuilder`] for front ends that hold
//! canvas-style RGBA pixel data (web canvas, numpy arrays).

use super::builder::SelectionBuilder;
use super::mask::MaskBounds;
use super::options::SelectionOptions;
use crate::error::Result;
use crate::pixel::{ImageView, PixelFormat};

/// Magic wand selection result with metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MagicWandResult {
    /// Selection mask (255 = selected, 0 = not selected)
    pub mask: Vec<u8>,
    /// Bounds of selected region
    pub bounds: Option<MaskBounds>,
    /// Number of selected pixels
    pub pixel_count: usize,
}

/// Perform magic wand selection on an RGBA8 image.
///
/// # Arguments
/// * `image` - RGBA image data (4 bytes per pixel)
/// * `width` - Image width
/// * `height` - Image height
/// * `start_x` - Starting X coordinate
/// * `start_y` - Starting Y coordinate
/// * `tolerance` - Color tolerance (0-100)
/// * `contiguous` - If true, only selects connected pixels; if false, selects all matching pixels
///
/// # Returns
/// Selection mask with one byte per pixel
pub fn magic_wand_select(
    image: &[u8],
    width: usize,
    height: usize,
    start_x: usize,
    start_y: usize,
    tolerance: f64,
    contiguous: bool,
) -> Result<Vec<u8>> {
    let options = SelectionOptions::new()
        .tolerance(tolerance)
        .contiguous(contiguous);
    let view = ImageView::new(image, width, height, PixelFormat::RGBA)?;
    let builder = SelectionBuilder::with_options_par(&view, start_x, start_y, &options)?;
    Ok(builder.into_mask().into_raw())
}

/// Perform magic wand selection with detailed results.
pub fn magic_wand_select_detailed(
    image: &[u8],
    width: usize,
    height: usize,
    start_x: usize,
    start_y: usize,
    tolerance: f64,
    contiguous: bool,
) -> Result<MagicWandResult> {
    let options = SelectionOptions::new()
        .tolerance(tolerance)
        .contiguous(contiguous);
    let view = ImageView::new(image, width, height, PixelFormat::RGBA)?;
    let builder = SelectionBuilder::with_options_par(&view, start_x, start_y, &options)?;

    let pixel_count = builder.stats().included;
    let mask = builder.into_mask();
    Ok(MagicWandResult {
        bounds: mask.bounds(),
        pixel_count,
        mask: mask.into_raw(),
    })
}
