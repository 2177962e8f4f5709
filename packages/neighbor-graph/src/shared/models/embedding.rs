//! Embedding matrix
//!
//! Row-major N×D coordinates produced by an upstream dimensionality reduction.
//! The matrix is immutable; dimension selection and normalization return new
//! matrices.

use crate::errors::{GraphError, Result};

/// Immutable N×D point matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    n_points: usize,
    n_dims: usize,
    data: Vec<f64>,
}

impl Embedding {
    /// Build from a flat row-major buffer
    pub fn new(n_points: usize, n_dims: usize, data: Vec<f64>) -> Result<Self> {
        if n_points == 0 || n_dims == 0 {
            return Err(GraphError::prerequisite(
                "embedding is empty; run dimensionality reduction first",
            ));
        }
        if data.len() != n_points * n_dims {
            return Err(GraphError::search(format!(
                "embedding buffer has {} values, expected {}x{}={}",
                data.len(),
                n_points,
                n_dims,
                n_points * n_dims
            )));
        }
        Ok(Self {
            n_points,
            n_dims,
            data,
        })
    }

    /// Build from per-point rows
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n_dims = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * n_dims);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_dims {
                return Err(GraphError::search(format!(
                    "point {} has {} dimensions, expected {}",
                    i + 1,
                    row.len(),
                    n_dims
                )));
            }
            data.extend_from_slice(row);
        }
        Self::new(rows.len(), n_dims, data)
    }

    /// Build a 1-D embedding
    pub fn from_column(values: &[f64]) -> Result<Self> {
        Self::new(values.len(), 1, values.to_vec())
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Coordinates of point `i`
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n_dims;
        &self.data[start..start + self.n_dims]
    }

    /// Single coordinate
    #[inline]
    pub fn get(&self, i: usize, dim: usize) -> f64 {
        self.data[i * self.n_dims + dim]
    }

    /// Iterate over points
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.n_dims)
    }

    /// Keep only the given 1-indexed dimensions, in the given order
    ///
    /// Callers validate the selection first; an index past the last dimension
    /// is reported as a search failure.
    pub fn select_dims(&self, dims: &[usize]) -> Result<Self> {
        if let Some(&bad) = dims.iter().find(|&&d| d == 0 || d > self.n_dims) {
            return Err(GraphError::search(format!(
                "dimension {} is outside 1..={}",
                bad, self.n_dims
            )));
        }
        let mut data = Vec::with_capacity(self.n_points * dims.len());
        for row in self.rows() {
            data.extend(dims.iter().map(|&d| row[d - 1]));
        }
        Self::new(self.n_points, dims.len(), data)
    }

    /// Scale every point to unit L2 norm; zero rows are left unchanged
    pub fn l2_normalized(&self) -> Self {
        let mut data = self.data.clone();
        for row in data.chunks_exact_mut(self.n_dims) {
            let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|x| *x /= norm);
            }
        }
        Self {
            n_points: self.n_points,
            n_dims: self.n_dims,
            data,
        }
    }

    /// Reject NaN and infinite coordinates
    pub fn ensure_finite(&self) -> Result<()> {
        match self.data.iter().position(|v| !v.is_finite()) {
            Some(pos) => Err(GraphError::search(format!(
                "non-finite value at point {}, dimension {}",
                pos / self.n_dims + 1,
                pos % self.n_dims + 1
            ))),
            None => Ok(()),
        }
    }
}

/// Squared Euclidean distance
#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let e = Embedding::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(e.n_points(), 2);
        assert_eq!(e.n_dims(), 2);
        assert_eq!(e.row(1), &[3.0, 4.0]);
        assert_eq!(e.get(0, 1), 2.0);
    }

    #[test]
    fn test_empty_is_prerequisite_error() {
        let rows: Vec<Vec<f64>> = vec![];
        let err = Embedding::from_rows(&rows).unwrap_err();
        assert!(matches!(err, GraphError::Prerequisite(_)));
    }

    #[test]
    fn test_ragged_rows_fail() {
        let err = Embedding::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, GraphError::SearchFailure(_)));
    }

    #[test]
    fn test_buffer_length_mismatch() {
        assert!(Embedding::new(2, 2, vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_select_dims_reorders() {
        let e = Embedding::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let s = e.select_dims(&[3, 1]).unwrap();
        assert_eq!(s.n_dims(), 2);
        assert_eq!(s.row(0), &[3.0, 1.0]);
        assert_eq!(s.row(1), &[6.0, 4.0]);
        assert!(e.select_dims(&[4]).is_err());
    }

    #[test]
    fn test_l2_normalized() {
        let e = Embedding::from_rows(&[vec![3.0, 4.0], vec![0.0, 0.0]]).unwrap();
        let n = e.l2_normalized();
        assert!((n.get(0, 0) - 0.6).abs() < 1e-12);
        assert!((n.get(0, 1) - 0.8).abs() < 1e-12);
        assert_eq!(n.row(1), &[0.0, 0.0]);
    }

    #[test]
    fn test_ensure_finite_reports_position() {
        let e = Embedding::from_rows(&[vec![0.0, 1.0], vec![f64::NAN, 1.0]]).unwrap();
        let err = e.ensure_finite().unwrap_err();
        assert!(err.to_string().contains("point 2, dimension 1"));
    }

    #[test]
    fn test_squared_euclidean() {
        assert_eq!(squared_euclidean(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
    }
}
