//! Color tolerance for magic wand matching.
//!
//! Callers express tolerance on a 0-100 scale. Internally it becomes a
//! per-channel threshold in sample units:
//!
//! ```text
//! threshold = round(tolerance / 100 * Sample::MAX)
//! ```
//!
//! so 100 maps to 255 for 8-bit samples and to 65535 for 16-bit samples.

use crate::error::{Result, SelectionError};
use crate::pixel::Sample;

/// A validated tolerance on the caller-facing 0-100 scale.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Tolerance(f64);

impl Tolerance {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// Validate a caller tolerance. NaN and values outside 0..=100 are rejected.
    pub fn new(value: f64) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(SelectionError::InvalidTolerance(value));
        }
        Ok(Tolerance(value))
    }

    /// Threshold in units of `S`.
    pub fn threshold<S: Sample>(&self) -> u32 {
        self.threshold_for_max(S::MAX)
    }

    /// Threshold for samples ranging over `0..=max_sample`.
    pub fn threshold_for_max(&self, max_sample: u32) -> u32 {
        (self.0 / Self::MAX * max_sample as f64).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_u8() {
        assert_eq!(Tolerance::new(0.0).unwrap().threshold::<u8>(), 0);
        assert_eq!(Tolerance::new(100.0).unwrap().threshold::<u8>(), 255);
        // 127.5 rounds away from zero
        assert_eq!(Tolerance::new(50.0).unwrap().threshold::<u8>(), 128);
        assert_eq!(Tolerance::new(20.0).unwrap().threshold::<u8>(), 51);
    }

    #[test]
    fn test_threshold_u16() {
        assert_eq!(Tolerance::new(100.0).unwrap().threshold::<u16>(), 65535);
        assert_eq!(Tolerance::new(1.0).unwrap().threshold::<u16>(), 655);
    }

    #[test]
    fn test_threshold_monotonic() {
        let mut last = 0;
        for step in 0..=200 {
            let t = Tolerance::new(step as f64 * 0.5).unwrap().threshold::<u8>();
            assert!(t >= last);
            last = t;
        }
        assert_eq!(last, 255);
    }

    #[test]
    fn test_invalid_tolerance() {
        assert_eq!(
            Tolerance::new(-0.1),
            Err(SelectionError::InvalidTolerance(-0.1))
        );
        assert!(Tolerance::new(100.01).is_err());
        assert!(Tolerance::new(f64::NAN).is_err());
        assert!(Tolerance::new(f64::INFINITY).is_err());
    }
}
