//! WebAssembly exports for the magic wand.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images are
//! flat RGBA8 arrays as delivered by `CanvasRenderingContext2D.getImageData`.
//! Errors surface as JavaScript exceptions carrying the error message.

use wasm_bindgen::prelude::*;

use crate::selection::{contour, magic_wand, SelectionMask};

// ============================================================================
// Magic Wand
// ============================================================================

/// Magic wand selection on an RGBA8 image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `x`, `y` - Seed pixel
/// * `tolerance` - Color tolerance (0-100)
/// * `contiguous` - Only select pixels connected to the seed
///
/// # Returns
/// Flat mask, one byte per pixel (255 = selected)
#[wasm_bindgen]
pub fn magic_wand_select_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    tolerance: f64,
    contiguous: bool,
) -> Result<Vec<u8>, JsValue> {
    magic_wand::magic_wand_select(data, width, height, x, y, tolerance, contiguous)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

// ============================================================================
// Contours
// ============================================================================

/// Outlines of a mask for marching ants.
///
/// # Returns
/// Flat array: [num_contours, len1, x1, y1, x2, y2, ..., len2, ...]
#[wasm_bindgen]
pub fn extract_contours_wasm(mask: &[u8], width: usize, height: usize) -> Result<Vec<f32>, JsValue> {
    let mask = SelectionMask::from_raw(width, height, mask.to_vec())
        .ok_or_else(|| JsValue::from_str("mask length does not match dimensions"))?;
    Ok(contour::extract_contours_flat(&mask))
}
