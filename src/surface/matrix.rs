//! Scattered vectors to a dense matrix image
//!
//! Takes per-record (x, y, value) triples, maps the distinct x and y
//! coordinates onto matrix columns and rows, and fills a dense cell grid.
//! The image is drawn in matrix-index coordinates (column index along x,
//! row index along y); the original coordinate vectors are kept for tick
//! relabeling.

use crate::error::{PlotError, Result};

/// Dense matrix built from scattered (x, y, value) records
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixImage {
    /// Distinct x coordinates, ascending, one per matrix column
    pub x_coords: Vec<f64>,
    /// Distinct y coordinates, ascending, one per matrix row
    pub y_coords: Vec<f64>,
    /// Row-major cells, `None` where no record maps to the cell
    pub cells: Vec<Option<f64>>,
    /// Smallest finite cell value
    pub vmin: f64,
    /// Largest finite cell value
    pub vmax: f64,
    /// Value axis label, shown on an attached color bar
    pub label: String,
}

impl MatrixImage {
    pub fn ncols(&self) -> usize {
        self.x_coords.len()
    }

    pub fn nrows(&self) -> usize {
        self.y_coords.len()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        self.cells.get(row * self.ncols() + col).copied().flatten()
    }

    /// Map a cell value into [0, 1] over the image's value range
    pub fn normalized(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span.abs() < f64::EPSILON {
            0.5
        } else {
            ((value - self.vmin) / span).clamp(0.0, 1.0)
        }
    }
}

fn unique_sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v.dedup();
    v
}

fn position(coords: &[f64], value: f64) -> usize {
    // coords came from the same records, so the lookup always succeeds
    coords
        .binary_search_by(|c| c.total_cmp(&value))
        .unwrap_or(0)
}

/// Rasterize scattered records into a [`MatrixImage`]
///
/// Records mapping to the same cell overwrite each other; the last one wins.
pub fn vec_to_matrix(xs: &[f64], ys: &[f64], values: &[f64], label: &str) -> Result<MatrixImage> {
    if xs.is_empty() || xs.len() != ys.len() || xs.len() != values.len() {
        return Err(PlotError::EmptyData);
    }

    let x_coords = unique_sorted(xs);
    let y_coords = unique_sorted(ys);

    let ncols = x_coords.len();
    let mut cells = vec![None; ncols * y_coords.len()];

    let mut vmin = f64::INFINITY;
    let mut vmax = f64::NEG_INFINITY;

    for ((&x, &y), &v) in xs.iter().zip(ys).zip(values) {
        let col = position(&x_coords, x);
        let row = position(&y_coords, y);
        cells[row * ncols + col] = Some(v);
        if v.is_finite() {
            vmin = vmin.min(v);
            vmax = vmax.max(v);
        }
    }

    if !vmin.is_finite() {
        vmin = 0.0;
        vmax = 0.0;
    }

    Ok(MatrixImage {
        x_coords,
        y_coords,
        cells,
        vmin,
        vmax,
        label: label.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_unique_coords_to_cells() {
        let img = vec_to_matrix(
            &[0.0, 10.0, 0.0, 10.0],
            &[1.0, 1.0, 2.0, 2.0],
            &[1.0, 2.0, 3.0, 4.0],
            "v",
        )
        .unwrap();

        assert_eq!(img.ncols(), 2);
        assert_eq!(img.nrows(), 2);
        assert_eq!(img.get(0, 0), Some(1.0));
        assert_eq!(img.get(1, 0), Some(2.0));
        assert_eq!(img.get(0, 1), Some(3.0));
        assert_eq!(img.get(1, 1), Some(4.0));
        assert_eq!(img.vmin, 1.0);
        assert_eq!(img.vmax, 4.0);
    }

    #[test]
    fn test_sparse_cells_stay_empty() {
        let img = vec_to_matrix(&[0.0, 10.0], &[1.0, 2.0], &[5.0, 6.0], "v").unwrap();
        assert_eq!(img.get(0, 0), Some(5.0));
        assert_eq!(img.get(1, 0), None);
        assert_eq!(img.get(0, 1), None);
        assert_eq!(img.get(1, 1), Some(6.0));
    }

    #[test]
    fn test_duplicate_records_last_wins() {
        let img = vec_to_matrix(&[0.0, 0.0], &[1.0, 1.0], &[5.0, 9.0], "v").unwrap();
        assert_eq!(img.get(0, 0), Some(9.0));
    }

    #[test]
    fn test_normalized_range() {
        let img = vec_to_matrix(&[0.0, 1.0], &[0.0, 0.0], &[10.0, 30.0], "v").unwrap();
        assert_eq!(img.normalized(10.0), 0.0);
        assert_eq!(img.normalized(30.0), 1.0);
        assert_eq!(img.normalized(20.0), 0.5);
    }

    #[test]
    fn test_rejects_mismatched_input() {
        assert!(vec_to_matrix(&[], &[], &[], "v").is_err());
        assert!(vec_to_matrix(&[0.0], &[0.0, 1.0], &[0.0], "v").is_err());
    }
}
