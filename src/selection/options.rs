//! Selection configuration.

/// Adjacency rule between rows of a fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Connectivity {
    /// Only pixels directly above or below a run join it.
    Four,
    /// Diagonal neighbors join as well. Neighbor rows are scanned one
    /// column past each end of the parent run.
    #[default]
    Eight,
}

/// Parameters of one magic wand selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionOptions {
    /// Tolerance on the 0-100 scale.
    pub tolerance: f64,
    pub connectivity: Connectivity,
    /// If false, every matching pixel in the image is selected, connected or not.
    pub contiguous: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        SelectionOptions {
            tolerance: 0.0,
            connectivity: Connectivity::Eight,
            contiguous: true,
        }
    }
}

impl SelectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn contiguous(mut self, contiguous: bool) -> Self {
        self.contiguous = contiguous;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = SelectionOptions::default();
        assert_eq!(opts.tolerance, 0.0);
        assert_eq!(opts.connectivity, Connectivity::Eight);
        assert!(opts.contiguous);
    }

    #[test]
    fn test_fluent_setters() {
        let opts = SelectionOptions::new()
            .tolerance(12.5)
            .connectivity(Connectivity::Four)
            .contiguous(false);
        assert_eq!(opts.tolerance, 12.5);
        assert_eq!(opts.connectivity, Connectivity::Four);
        assert!(!opts.contiguous);
    }
}
