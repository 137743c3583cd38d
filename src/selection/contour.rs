//! Outline tracing for finished selection masks.
//!
//! Hosts draw marching ants along these outlines. Boundary pixels are
//! followed with Moore-neighbor tracing; points sit at pixel centers.

use super::mask::SelectionMask;

/// A closed outline as pixel-center points.
pub type Outline = Vec<(f32, f32)>;

/// Moore neighborhood, clockwise from right.
const DIRECTIONS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Trace every outline of `mask`.
///
/// Outlines shorter than three points (isolated pixels, one pixel wide
/// stubs traced as a single step) are dropped.
pub fn extract_contours(mask: &SelectionMask) -> Vec<Outline> {
    let width = mask.width();
    let height = mask.height();
    let mut outlines = Vec::new();
    let mut traced = vec![false; width * height];

    for y in 0..height {
        for x in 0..width {
            if !traced[y * width + x] && is_boundary(mask, x as i64, y as i64) {
                let outline = trace_boundary(mask, x as i64, y as i64, &mut traced);
                if outline.len() >= 3 {
                    outlines.push(outline);
                }
            }
        }
    }

    outlines
}

/// Outlines packed for bindings: `[count, len1, x, y, ..., len2, x, y, ...]`.
pub fn extract_contours_flat(mask: &SelectionMask) -> Vec<f32> {
    let outlines = extract_contours(mask);

    let mut packed = vec![outlines.len() as f32];
    for outline in outlines {
        packed.push(outline.len() as f32);
        for (x, y) in outline {
            packed.push(x);
            packed.push(y);
        }
    }
    packed
}

/// Signed lookup for neighbor offsets; anything off the mask is unselected.
#[inline]
fn selected_at(mask: &SelectionMask, x: i64, y: i64) -> bool {
    x >= 0 && y >= 0 && mask.is_selected(x as usize, y as usize)
}

/// Selected with at least one unselected 4-neighbor (the image edge counts
/// as unselected).
#[inline]
fn is_boundary(mask: &SelectionMask, x: i64, y: i64) -> bool {
    selected_at(mask, x, y)
        && (!selected_at(mask, x - 1, y)
            || !selected_at(mask, x + 1, y)
            || !selected_at(mask, x, y - 1)
            || !selected_at(mask, x, y + 1))
}

fn trace_boundary(mask: &SelectionMask, start_x: i64, start_y: i64, traced: &mut [bool]) -> Outline {
    let width = mask.width();
    let mut outline = Vec::new();

    // Enter from the first unselected neighbor
    let mut dir = DIRECTIONS
        .iter()
        .position(|&(dx, dy)| !selected_at(mask, start_x + dx, start_y + dy))
        .unwrap_or(0);

    let (mut x, mut y) = (start_x, start_y);
    let max_steps = width * mask.height() * 2;

    for step in 0..max_steps {
        let idx = y as usize * width + x as usize;
        if !traced[idx] {
            traced[idx] = true;
            outline.push((x as f32 + 0.5, y as f32 + 0.5));
        }

        // Resume the clockwise sweep three steps back from the arrival direction
        let sweep_start = (dir + 5) % 8;
        let mut next = None;
        for i in 0..8 {
            let d = (sweep_start + i) % 8;
            let (dx, dy) = DIRECTIONS[d];
            let (nx, ny) = (x + dx, y + dy);
            if !selected_at(mask, nx, ny) {
                continue;
            }
            if nx == start_x && ny == start_y && step > 0 {
                return outline;
            }
            if is_boundary(mask, nx, ny) {
                next = Some((nx, ny, d));
                break;
            }
        }

        match next {
            Some((nx, ny, d)) => {
                x = nx;
                y = ny;
                dir = d;
            }
            None => break,
        }
    }

    outline
}
