//! Magic wand selection for image editing.
//!
//! - **Builder**: scanline flood fill from a seed pixel within a color tolerance
//! - **Magic wand**: convenience entry points for RGBA8 buffers
//! - **Contour extraction**: outlines of a finished mask for marching ants display

pub mod builder;
pub mod contour;
pub mod magic_wand;
pub mod mask;
pub mod options;
pub mod tolerance;

pub use builder::{FillStats, SelectionBuilder};
pub use contour::{extract_contours, extract_contours_flat};
pub use magic_wand::{magic_wand_select, magic_wand_select_detailed, MagicWandResult};
pub use mask::{MaskBounds, SelectionMask};
pub use options::{Connectivity, SelectionOptions};
pub use tolerance::Tolerance;
