//! Error types for selection building.
//!
//! Every failure is an input-validation failure detected before any
//! scanning starts. Once inputs are accepted the fill always completes.

use thiserror::Error;

/// Reasons a selection could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// The seed point lies outside the image.
    #[error("seed ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// The tolerance is negative, above the maximum, or not a number.
    #[error("tolerance {0} is outside 0..=100")]
    InvalidTolerance(f64),

    /// The pixel buffer cannot be interpreted.
    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),
}

pub type Result<T> = std::result::Result<T, SelectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SelectionError::OutOfBounds { x: 7, y: 2, width: 5, height: 5 };
        assert_eq!(err.to_string(), "seed (7, 2) is outside the 5x5 image");

        let err = SelectionError::InvalidTolerance(120.0);
        assert_eq!(err.to_string(), "tolerance 120 is outside 0..=100");

        let err = SelectionError::UnsupportedPixelFormat("zero channels".into());
        assert!(err.to_string().contains("zero channels"));
    }
}
