//! Ring rasterization on a square grid.

use crate::check::{check_below, check_min};
use crate::error::Result;
use crate::grid::Grid;

/// Maximum allowed `|distance - radius|` for a cell to belong to the ring.
pub const RING_HALF_WIDTH: f64 = 0.3;

/// Render a one-cell-wide ring of `radius` around `center` on an `n x n` grid.
///
/// Cell `(row, col)` is measured at 1-based coordinates `(row + 1, col + 1)`
/// while `center` is taken as given, so a center sampled in `[0, n)` renders
/// shifted by one cell along both axes. A cell is set iff its Euclidean
/// distance to `center` is within [`RING_HALF_WIDTH`] of `radius`.
pub fn rasterize_ring(n: usize, center: [i64; 2], radius: f64) -> Result<Grid> {
    check_min("n", n as f64, 1.0)?;
    check_min("r", radius, 0.0)?;
    check_below("r", radius, f64::INFINITY)?;
    for (name, c) in [("cx", center[0]), ("cy", center[1])] {
        check_min(name, c as f64, 0.0)?;
        check_below(name, c as f64, n as f64)?;
    }

    let cx = center[0] as f64;
    let cy = center[1] as f64;
    let mut grid = Grid::zeros(n);
    for row in 0..n {
        let dx = (row + 1) as f64 - cx;
        for col in 0..n {
            let dy = (col + 1) as f64 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            if (d - radius).abs() <= RING_HALF_WIDTH {
                grid.set(row, col, 1);
            }
        }
    }
    Ok(grid)
}
