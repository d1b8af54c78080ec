//! Dense distance matrices.
//!
//! The detector needs every agent–agent and agent–object distance each tick.
//! Computing them into one row-major buffer keeps the pair loop a plain
//! indexed read.  With the `parallel` feature each row is filled on Rayon's
//! thread pool; rows are independent so the result is identical.

use blob_core::Vec3;

/// Row-major `rows × cols` matrix of Euclidean distances.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Distances between every pair of `points` (`n × n`, symmetric, zero
    /// diagonal).
    pub fn pairwise(points: &[Vec3]) -> Self {
        Self::cross(points, points)
    }

    /// Distances from every `from[i]` to every `to[j]`.
    pub fn cross(from: &[Vec3], to: &[Vec3]) -> Self {
        let rows = from.len();
        let cols = to.len();
        let mut data = vec![0.0; rows * cols];
        if cols == 0 {
            return Self { rows, cols, data };
        }

        let fill = |(i, row): (usize, &mut [f64])| {
            let p = from[i];
            for (slot, q) in row.iter_mut().zip(to) {
                *slot = p.distance(*q);
            }
        };

        #[cfg(not(feature = "parallel"))]
        {
            data.chunks_mut(cols).enumerate().for_each(fill);
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            data.par_chunks_mut(cols).enumerate().for_each(fill);
        }

        Self { rows, cols, data }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distance from row `i` to column `j`.  Panics if out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "distance index ({i}, {j}) out of range");
        self.data[i * self.cols + j]
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}
