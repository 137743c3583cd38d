//! wandmask
//!
//! Magic wand region selection for image editors: given a source image, a
//! seed pixel and a color tolerance, build a mask of every pixel reachable
//! from the seed through similar colors.
//!
//! ## Image Format
//! Sources describe their layout explicitly:
//! - **Channel order**: [`PixelFormat`] with 1 to 4 channels (gray, gray+alpha,
//!   RGB/BGR, RGBA/BGRA/ARGB or any custom order)
//! - **Bit depth**: the [`Sample`] type, `u8` (0-255) or `u16` (0-65535)
//!
//! Raw strided buffers go through [`ImageView`], `ndarray` arrays of shape
//! (height, width, channels) through [`NdImage`].
//!
//! ## Tolerance
//! Tolerance is given on a 0-100 scale and mapped onto the sample range as
//! `round(tolerance / 100 * max_sample)`. A pixel is similar when every
//! channel present differs from the seed by at most that amount.
//!
//! ## Bindings
//! - `python` feature: PyO3/numpy module `wandmask`
//! - `wasm` feature: wasm-bindgen exports in [`wasm`]

pub mod error;
pub mod pixel;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, SelectionError};
pub use pixel::{Channel, ImageView, NdImage, PixelFormat, Sample, SourceImage, MAX_CHANNELS};
pub use selection::{
    extract_contours, magic_wand_select, magic_wand_select_detailed, Connectivity, FillStats,
    MagicWandResult, MaskBounds, SelectionBuilder, SelectionMask, SelectionOptions, Tolerance,
};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::ArrayView3;
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::SelectionError;
    use crate::pixel::{NdImage, Sample};
    use crate::selection::{
        contour, Connectivity, SelectionBuilder, SelectionMask, SelectionOptions,
    };

    impl From<SelectionError> for PyErr {
        fn from(err: SelectionError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn select_array<S: Sample>(
        array: ArrayView3<S>,
        x: usize,
        y: usize,
        tolerance: f64,
        contiguous: bool,
        eight_connected: bool,
    ) -> Result<SelectionMask, SelectionError> {
        let connectivity = if eight_connected {
            Connectivity::Eight
        } else {
            Connectivity::Four
        };
        let options = SelectionOptions::new()
            .tolerance(tolerance)
            .connectivity(connectivity)
            .contiguous(contiguous);
        let image = NdImage::infer(array)?;
        Ok(SelectionBuilder::with_options_par(&image, x, y, &options)?.into_mask())
    }

    // ========================================================================
    // Magic Wand
    // ========================================================================

    /// Magic wand selection on a u8 image.
    ///
    /// # Arguments
    /// * `image` - Image of shape (height, width, channels), 1-4 channels
    /// * `x`, `y` - Seed pixel
    /// * `tolerance` - Color tolerance (0-100)
    /// * `contiguous` - Only select pixels connected to the seed
    /// * `eight_connected` - Diagonal neighbors count as connected
    ///
    /// # Returns
    /// Mask of shape (height, width), 255 = selected
    #[pyfunction]
    #[pyo3(signature = (image, x, y, tolerance, contiguous=true, eight_connected=true))]
    pub fn magic_wand_select<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        x: usize,
        y: usize,
        tolerance: f64,
        contiguous: bool,
        eight_connected: bool,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let mask = select_array(image.as_array(), x, y, tolerance, contiguous, eight_connected)?;
        Ok(mask.to_array().into_pyarray(py))
    }

    /// Magic wand selection on a 16-bit image. Tolerance still uses 0-100.
    #[pyfunction]
    #[pyo3(signature = (image, x, y, tolerance, contiguous=true, eight_connected=true))]
    pub fn magic_wand_select_u16<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u16>,
        x: usize,
        y: usize,
        tolerance: f64,
        contiguous: bool,
        eight_connected: bool,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let mask = select_array(image.as_array(), x, y, tolerance, contiguous, eight_connected)?;
        Ok(mask.to_array().into_pyarray(py))
    }

    // ========================================================================
    // Contours
    // ========================================================================

    /// Outlines of a (height, width) mask, packed as
    /// `[count, len1, x, y, ..., len2, ...]`.
    #[pyfunction]
    pub fn extract_contours(mask: PyReadonlyArray2<'_, u8>) -> PyResult<Vec<f32>> {
        let view = mask.as_array();
        let (height, width) = view.dim();
        let data: Vec<u8> = view.iter().copied().collect();
        let mask = SelectionMask::from_raw(width, height, data)
            .ok_or_else(|| PyValueError::new_err("mask shape does not match its data"))?;
        Ok(contour::extract_contours_flat(&mask))
    }

    #[pymodule]
    pub fn wandmask(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(magic_wand_select, m)?)?;
        m.add_function(wrap_pyfunction!(magic_wand_select_u16, m)?)?;
        m.add_function(wrap_pyfunction!(extract_contours, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::wandmask;
