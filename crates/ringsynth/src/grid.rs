//! Square occupancy grid holding rendered ring pixels.

use image::{GrayImage, Luma};

use crate::error::{Result, SynthError};

/// An `n x n` matrix of small integers stored row-major.
///
/// Generated grids only ever hold 0 or 1; arbitrary values are allowed so
/// that externally loaded data can be validated by the pruner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Zero-filled grid of linear size `size`.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Wrap row-major `cells` as a `size x size` grid.
    pub fn from_vec(size: usize, cells: Vec<u8>) -> Result<Self> {
        if cells.len() != size * size {
            return Err(SynthError::InvalidConfig(format!(
                "grid of size {} needs {} cells, got {}",
                size,
                size * size,
                cells.len()
            )));
        }
        Ok(Self { size, cells })
    }

    /// Linear size `n`.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row * self.size + col] = value;
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Number of cells equal to 1.
    pub fn count_ones(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 1).count()
    }

    /// `(row, col)` of every cell equal to 1, row-major.
    pub fn ones(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 1)
            .map(move |(i, _)| (i / n, i % n))
    }

    /// First cell (row-major) whose value is neither 0 nor 1.
    pub fn first_non_binary(&self) -> Option<(usize, usize, u8)> {
        self.cells
            .iter()
            .position(|&v| v > 1)
            .map(|i| (i / self.size, i % self.size, self.cells[i]))
    }

    pub fn is_binary(&self) -> bool {
        self.first_non_binary().is_none()
    }

    /// Logical OR of `other` into `self`: a cell is set if it is non-zero in either grid.
    pub fn merge_or(&mut self, other: &Grid) -> Result<()> {
        if other.size != self.size {
            return Err(SynthError::GridSizeMismatch {
                left: self.size,
                right: other.size,
            });
        }
        for (dst, &src) in self.cells.iter_mut().zip(other.cells.iter()) {
            *dst = u8::from(*dst != 0 || src != 0);
        }
        Ok(())
    }

    /// Reset every cell to 0.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Render as text: one line per row, values separated by single spaces.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2);
        for r in 0..self.size {
            let line: Vec<String> = self.row(r).iter().map(|v| v.to_string()).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }

    /// Grayscale image with set cells white, each cell drawn as a `scale x scale` block.
    ///
    /// Rows map to image `y`, columns to image `x`.
    pub fn to_image(&self, scale: u32) -> GrayImage {
        let scale = scale.max(1);
        let side = self.size as u32 * scale;
        GrayImage::from_fn(side, side, |x, y| {
            let row = (y / scale) as usize;
            let col = (x / scale) as usize;
            if self.get(row, col) != 0 {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_or_is_union() {
        let mut a = Grid::from_vec(2, vec![1, 0, 0, 0]).unwrap();
        let b = Grid::from_vec(2, vec![1, 1, 0, 0]).unwrap();
        a.merge_or(&b).unwrap();
        assert_eq!(a.cells(), &[1, 1, 0, 0]);
    }

    #[test]
    fn merge_or_normalizes_nonzero() {
        let mut a = Grid::zeros(2);
        let b = Grid::from_vec(2, vec![0, 7, 0, 0]).unwrap();
        a.merge_or(&b).unwrap();
        assert_eq!(a.get(0, 1), 1);
    }

    #[test]
    fn merge_or_rejects_size_mismatch() {
        let mut a = Grid::zeros(3);
        let err = a.merge_or(&Grid::zeros(4)).unwrap_err();
        assert!(matches!(
            err,
            SynthError::GridSizeMismatch { left: 3, right: 4 }
        ));
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(Grid::from_vec(3, vec![0; 8]).is_err());
    }

    #[test]
    fn ones_and_non_binary() {
        let g = Grid::from_vec(3, vec![0, 1, 0, 0, 0, 2, 1, 0, 0]).unwrap();
        assert_eq!(g.ones().collect::<Vec<_>>(), vec![(0, 1), (2, 0)]);
        assert_eq!(g.count_ones(), 2);
        assert_eq!(g.first_non_binary(), Some((1, 2, 2)));
        assert!(!g.is_binary());
    }

    #[test]
    fn text_rendering() {
        let g = Grid::from_vec(2, vec![0, 1, 1, 0]).unwrap();
        assert_eq!(g.to_text(), "0 1\n1 0\n");
    }

    #[test]
    fn image_export_scales_cells() {
        let mut g = Grid::zeros(2);
        g.set(1, 0, 1);
        let img = g.to_image(3);
        assert_eq!(img.dimensions(), (6, 6));
        assert_eq!(img.get_pixel(0, 3)[0], 255);
        assert_eq!(img.get_pixel(2, 5)[0], 255);
        assert_eq!(img.get_pixel(3, 3)[0], 0);
        assert_eq!(img.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn clear_resets() {
        let mut g = Grid::from_vec(2, vec![1, 1, 1, 1]).unwrap();
        g.clear();
        assert_eq!(g.count_ones(), 0);
    }
}
