//! Scanline flood fill behind the magic wand.
//!
//! The fill works on horizontal runs ("segments") instead of single pixels:
//!
//! 1. The seed row is scanned left and right from the seed to find the
//!    maximal matching run, which is pushed on a work stack.
//! 2. Each popped segment scans the rows directly above and below it. With
//!    8-connectivity the scan covers one extra column on each side so that
//!    diagonal neighbors at the ends of a run are found. Every matching
//!    pixel found starts a new run, grown to its full width and pushed.
//! 3. The fill ends when the stack is empty.
//!
//! A visited table marks every pixel the moment it is classified, inside
//! or outside, so no pixel is examined twice and total work is O(W x H).
//! All comparisons are against the color read at the seed when the build
//! started.

use log::{debug, trace};
use rayon::prelude::*;

use super::mask::{SelectionMask, SELECTED};
use super::options::{Connectivity, SelectionOptions};
use super::tolerance::Tolerance;
use crate::error::{Result, SelectionError};
use crate::pixel::{SourceImage, MAX_CHANNELS};

/// Maximal horizontal run of selected pixels, bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Segment {
    left: usize,
    right: usize,
    y: usize,
}

/// Work done by one build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Pixels classified as inside or outside (each exactly once).
    pub classified: usize,
    /// Pixels included in the mask.
    pub included: usize,
    /// Segments pushed on the work stack.
    pub segments: usize,
    /// Largest number of pending segments at any time.
    pub max_stack_depth: usize,
}

// ============================================================================
// Working State
// ============================================================================

/// W x H flags, indexed `y * width + x`.
struct VisitedTable {
    cells: Vec<bool>,
    width: usize,
}

impl VisitedTable {
    fn new(width: usize, height: usize) -> Self {
        VisitedTable {
            cells: vec![false; width * height],
            width,
        }
    }

    #[inline]
    fn is_visited(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    #[inline]
    fn mark(&mut self, x: usize, y: usize) {
        let idx = y * self.width + x;
        debug_assert!(!self.cells[idx], "pixel ({}, {}) classified twice", x, y);
        self.cells[idx] = true;
    }
}

/// Frozen seed color plus the per-channel threshold.
#[derive(Clone, Copy, Debug)]
struct ColorMatcher {
    picked: [u32; MAX_CHANNELS],
    channels: usize,
    threshold: u32,
}

impl ColorMatcher {
    /// Every present channel must be within the threshold. Slots past the
    /// channel count are never looked at.
    #[inline]
    fn matches(&self, pixel: &[u32; MAX_CHANNELS]) -> bool {
        self.picked[..self.channels]
            .iter()
            .zip(&pixel[..self.channels])
            .all(|(&p, &v)| p.abs_diff(v) <= self.threshold)
    }
}

struct ScanlineFill<'a, I: SourceImage + ?Sized> {
    image: &'a I,
    matcher: ColorMatcher,
    connectivity: Connectivity,
    width: usize,
    height: usize,
    visited: VisitedTable,
    stack: Vec<Segment>,
    mask: SelectionMask,
    stats: FillStats,
    scratch: [u32; MAX_CHANNELS],
}

impl<'a, I: SourceImage + ?Sized> ScanlineFill<'a, I> {
    fn new(image: &'a I, matcher: ColorMatcher, connectivity: Connectivity) -> Self {
        let width = image.width();
        let height = image.height();
        ScanlineFill {
            image,
            matcher,
            connectivity,
            width,
            height,
            visited: VisitedTable::new(width, height),
            stack: Vec::new(),
            mask: SelectionMask::empty(width, height),
            stats: FillStats::default(),
            scratch: [0; MAX_CHANNELS],
        }
    }

    fn run(mut self, seed_x: usize, seed_y: usize) -> (SelectionMask, FillStats) {
        // The seed matches the color it was read from
        let seeded = self.classify(seed_x, seed_y);
        debug_assert!(seeded);
        let first = self.grow_run(seed_x, seed_y);
        self.push(first);

        while let Some(segment) = self.stack.pop() {
            if segment.y > 0 {
                self.scan_row(segment, segment.y - 1);
            }
            if segment.y + 1 < self.height {
                self.scan_row(segment, segment.y + 1);
            }
        }

        (self.mask, self.stats)
    }

    /// Mark an unvisited pixel and decide whether it is inside.
    #[inline]
    fn classify(&mut self, x: usize, y: usize) -> bool {
        self.visited.mark(x, y);
        self.stats.classified += 1;
        self.image.read_pixel(x, y, &mut self.scratch);
        if self.matcher.matches(&self.scratch) {
            self.mask.as_mut_slice()[y * self.width + x] = SELECTED;
            self.stats.included += 1;
            true
        } else {
            false
        }
    }

    /// Extend the included pixel at (x, y) to its maximal run.
    fn grow_run(&mut self, x: usize, y: usize) -> Segment {
        let mut left = x;
        while left > 0 && !self.visited.is_visited(left - 1, y) && self.classify(left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while right + 1 < self.width
            && !self.visited.is_visited(right + 1, y)
            && self.classify(right + 1, y)
        {
            right += 1;
        }
        Segment { left, right, y }
    }

    /// Find every run on row `y` touching `parent` and queue it.
    fn scan_row(&mut self, parent: Segment, y: usize) {
        let (lo, hi) = match self.connectivity {
            Connectivity::Eight => (
                parent.left.saturating_sub(1),
                (parent.right + 1).min(self.width - 1),
            ),
            Connectivity::Four => (parent.left, parent.right),
        };

        let mut x = lo;
        while x <= hi {
            if self.visited.is_visited(x, y) || !self.classify(x, y) {
                x += 1;
                continue;
            }
            let run = self.grow_run(x, y);
            self.push(run);
            // run.right + 1 is either outside the image or already classified
            x = run.right + 1;
        }
    }

    #[inline]
    fn push(&mut self, segment: Segment) {
        self.stack.push(segment);
        self.stats.segments += 1;
        self.stats.max_stack_depth = self.stats.max_stack_depth.max(self.stack.len());
    }
}

/// Mark the pixels of row `y` that match, ignoring connectivity.
#[inline]
fn classify_row<I>(image: &I, matcher: &ColorMatcher, y: usize, row: &mut [u8])
where
    I: SourceImage + ?Sized,
{
    let mut pixel = [0u32; MAX_CHANNELS];
    for (x, out) in row.iter_mut().enumerate() {
        image.read_pixel(x, y, &mut pixel);
        if matcher.matches(&pixel) {
            *out = SELECTED;
        }
    }
}

fn global_stats(mask: &SelectionMask) -> FillStats {
    let total = mask.width() * mask.height();
    let included = mask.pixel_count();
    trace!("global color select matched {} of {} pixels", included, total);
    FillStats {
        classified: total,
        included,
        segments: 0,
        max_stack_depth: 0,
    }
}

/// Select every matching pixel regardless of connectivity, row by row.
fn select_all_matching<I>(image: &I, matcher: ColorMatcher) -> (SelectionMask, FillStats)
where
    I: SourceImage + ?Sized,
{
    let width = image.width();
    let mut mask = SelectionMask::empty(width, image.height());

    for (y, row) in mask.as_mut_slice().chunks_mut(width).enumerate() {
        classify_row(image, &matcher, y, row);
    }

    let stats = global_stats(&mask);
    (mask, stats)
}

/// Same as [`select_all_matching`] with rows classified in parallel.
fn select_all_matching_par<I>(image: &I, matcher: ColorMatcher) -> (SelectionMask, FillStats)
where
    I: SourceImage + Sync + ?Sized,
{
    let width = image.width();
    let mut mask = SelectionMask::empty(width, image.height());

    mask.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| classify_row(image, &matcher, y, row));

    let stats = global_stats(&mask);
    (mask, stats)
}

/// Check geometry, tolerance and seed, then freeze the seed color.
fn prepare<I>(image: &I, x: usize, y: usize, options: &SelectionOptions) -> Result<ColorMatcher>
where
    I: SourceImage + ?Sized,
{
    let width = image.width();
    let height = image.height();
    let format = image.format();

    if width == 0 || height == 0 {
        return Err(rejected(SelectionError::UnsupportedPixelFormat(format!(
            "image is empty ({}x{})",
            width, height
        ))));
    }
    let row_len = width.saturating_mul(format.channel_count());
    if image.stride() < row_len {
        return Err(rejected(SelectionError::UnsupportedPixelFormat(format!(
            "stride {} is shorter than a row of {} samples",
            image.stride(),
            row_len
        ))));
    }
    let tolerance = Tolerance::new(options.tolerance).map_err(rejected)?;
    if x >= width || y >= height {
        return Err(rejected(SelectionError::OutOfBounds {
            x,
            y,
            width,
            height,
        }));
    }

    let mut picked = [0u32; MAX_CHANNELS];
    image.read_pixel(x, y, &mut picked);
    Ok(ColorMatcher {
        picked,
        channels: format.channel_count(),
        threshold: tolerance.threshold::<I::Sample>(),
    })
}

// ============================================================================
// Selection Builder
// ============================================================================

/// Magic wand selection over a [`SourceImage`].
///
/// Construction validates the inputs, runs the fill to completion and keeps
/// the finished mask. A builder is not reusable; build a new one per seed.
///
/// # Example
/// ```
/// use wandmask::{ImageView, PixelFormat, SelectionBuilder};
///
/// let pixels = [0u8, 0, 0, 0, 0, 0, 255, 255, 255];
/// let image = ImageView::new(&pixels, 3, 1, PixelFormat::RGB).unwrap();
/// let selection = SelectionBuilder::new(&image, 0, 0, 0.0).unwrap();
/// assert_eq!(selection.mask().as_slice(), &[255, 255, 0]);
/// ```
#[derive(Clone, Debug)]
pub struct SelectionBuilder {
    mask: SelectionMask,
    stats: FillStats,
}

impl SelectionBuilder {
    /// Contiguous, 8-connected selection at (x, y).
    ///
    /// # Arguments
    /// * `image` - Source pixels, never modified
    /// * `x`, `y` - Seed coordinate, must lie inside the image
    /// * `tolerance` - Color tolerance (0-100)
    pub fn new<I>(image: &I, x: usize, y: usize, tolerance: f64) -> Result<Self>
    where
        I: SourceImage + ?Sized,
    {
        Self::with_options(image, x, y, &SelectionOptions::new().tolerance(tolerance))
    }

    /// Selection at (x, y) with explicit options, on the calling thread.
    ///
    /// Inputs are checked in order: image geometry, tolerance, seed. No
    /// working memory is allocated unless all three pass.
    pub fn with_options<I>(image: &I, x: usize, y: usize, options: &SelectionOptions) -> Result<Self>
    where
        I: SourceImage + ?Sized,
    {
        let matcher = prepare(image, x, y, options)?;
        let (mask, stats) = if options.contiguous {
            ScanlineFill::new(image, matcher, options.connectivity).run(x, y)
        } else {
            select_all_matching(image, matcher)
        };
        Ok(Self::finish(x, y, &matcher, options, mask, stats))
    }

    /// Like [`with_options`](Self::with_options), but a non-contiguous
    /// selection classifies rows on the rayon pool. The contiguous fill is
    /// the same single-threaded scan.
    pub fn with_options_par<I>(image: &I, x: usize, y: usize, options: &SelectionOptions) -> Result<Self>
    where
        I: SourceImage + Sync + ?Sized,
    {
        let matcher = prepare(image, x, y, options)?;
        let (mask, stats) = if options.contiguous {
            ScanlineFill::new(image, matcher, options.connectivity).run(x, y)
        } else {
            select_all_matching_par(image, matcher)
        };
        Ok(Self::finish(x, y, &matcher, options, mask, stats))
    }

    fn finish(
        x: usize,
        y: usize,
        matcher: &ColorMatcher,
        options: &SelectionOptions,
        mask: SelectionMask,
        stats: FillStats,
    ) -> Self {
        debug!(
            "magic wand {}x{} seed=({}, {}) threshold={} {:?}: {:?}",
            mask.width(),
            mask.height(),
            x,
            y,
            matcher.threshold,
            options.connectivity,
            stats
        );
        SelectionBuilder { mask, stats }
    }

    #[inline]
    pub fn mask(&self) -> &SelectionMask {
        &self.mask
    }

    pub fn into_mask(self) -> SelectionMask {
        self.mask
    }

    #[inline]
    pub fn stats(&self) -> FillStats {
        self.stats
    }
}

fn rejected(err: SelectionError) -> SelectionError {
    debug!("magic wand rejected: {}", err);
    err
}
