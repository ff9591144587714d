//! Sparse Hermitian matrix storage.
//!
//! Only the upper triangle (`i ≤ j`) is ever stored; the lower triangle
//! exists implicitly through conjugation in [`SpHermitian::apply`]. Assembly
//! goes through [`CooBuilder`], which accumulates coordinate triplets and
//! compresses to CSR once, rather than mutating a compressed structure per
//! entry.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::error::{ BlockadeError, BlockadeResult };

/// Coordinate-format accumulator for the upper triangle of a Hermitian
/// matrix.
///
/// Entries at repeated coordinates are summed at compression. Diagonal
/// entries must be real; off-diagonal entries must satisfy `i < j`.
#[derive(Clone, Debug)]
pub struct CooBuilder {
    dim: usize,
    entries: Vec<(usize, usize, C64)>,
}

impl CooBuilder {
    /// Create a new builder for a `dim × dim` matrix.
    ///
    /// Fails for `dim = 0`; a zero-dimensional operator is never meaningful
    /// here.
    pub fn new(dim: usize) -> BlockadeResult<Self> {
        if dim == 0 {
            return Err(BlockadeError::EmptyBasis);
        }
        Ok(Self { dim, entries: Vec::new() })
    }

    /// Create a new builder with room for `cap` entries.
    pub fn with_capacity(dim: usize, cap: usize) -> BlockadeResult<Self> {
        let mut new = Self::new(dim)?;
        new.entries.reserve(cap);
        Ok(new)
    }

    /// Add a value at `(row, col)`.
    ///
    /// Fails on a lower-triangle coordinate or a non-finite value.
    ///
    /// *Panics* if either coordinate is out of bounds.
    pub fn push(&mut self, row: usize, col: usize, value: C64)
        -> BlockadeResult<()>
    {
        if row >= self.dim || col >= self.dim {
            panic!("CooBuilder::push: coordinate out of bounds");
        }
        if row > col {
            return Err(BlockadeError::LowerTriangle { row, col });
        }
        if !value.is_finite() {
            return Err(BlockadeError::NonFinite { row, col });
        }
        self.entries.push((row, col, value));
        Ok(())
    }

    /// Compress into CSR storage, summing duplicate coordinates.
    pub fn into_csr(mut self) -> SpHermitian {
        self.entries.sort_unstable_by_key(|(i, j, _)| (*i, *j));
        let mut cols: Vec<usize> = Vec::with_capacity(self.entries.len());
        let mut vals: Vec<C64> = Vec::with_capacity(self.entries.len());
        let mut row_ptr: Vec<usize> = Vec::with_capacity(self.dim + 1);
        row_ptr.push(0);
        let mut row = 0;
        for (i, j, v) in self.entries {
            while row < i {
                row_ptr.push(cols.len());
                row += 1;
            }
            if let Some((last_col, last_val))
                = cols.last().zip(vals.last_mut())
            {
                if row_ptr[row] < cols.len() && *last_col == j {
                    *last_val += v;
                    continue;
                }
            }
            cols.push(j);
            vals.push(v);
        }
        while row < self.dim {
            row_ptr.push(cols.len());
            row += 1;
        }
        SpHermitian { dim: self.dim, row_ptr, cols, vals }
    }
}

/// CSR representation of a Hermitian matrix, holding the upper triangle
/// only.
#[derive(Clone, Debug, PartialEq)]
pub struct SpHermitian {
    dim: usize,
    row_ptr: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<C64>,
}

impl SpHermitian {
    /// Return the matrix dimension.
    pub fn dim(&self) -> usize { self.dim }

    /// Return the number of explicitly stored entries.
    pub fn nnz(&self) -> usize { self.vals.len() }

    /// Compute `y = H·x`, mirroring the stored strict upper triangle with
    /// conjugation for the lower one.
    ///
    /// *Panics* if `x` has the wrong length.
    pub fn apply(&self, x: &nd::Array1<C64>) -> nd::Array1<C64> {
        if x.len() != self.dim {
            panic!("SpHermitian::apply: dimension mismatch");
        }
        let mut y: nd::Array1<C64> = nd::Array1::zeros(self.dim);
        for i in 0..self.dim {
            for (j, v) in self.row(i) {
                y[i] += v * x[j];
                if i != j {
                    y[j] += v.conj() * x[i];
                }
            }
        }
        y
    }

    /// Return the stored entries of a row as `(column, value)` pairs.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, C64)> + '_ {
        let lo = self.row_ptr[i];
        let hi = self.row_ptr[i + 1];
        self.cols[lo..hi].iter().copied().zip(self.vals[lo..hi].iter().copied())
    }

    /// Expand to a dense array, filling both triangles.
    pub fn to_dense(&self) -> nd::Array2<C64> {
        let mut h: nd::Array2<C64> = nd::Array2::zeros((self.dim, self.dim));
        for i in 0..self.dim {
            for (j, v) in self.row(i) {
                h[[i, j]] += v;
                if i != j {
                    h[[j, i]] += v.conj();
                }
            }
        }
        h
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn c(re: f64, im: f64) -> C64 { C64::new(re, im) }

    #[test]
    fn rejects_lower_triangle() {
        let mut b = CooBuilder::new(3).unwrap();
        let res = b.push(2, 1, c(1.0, 0.0));
        assert_eq!(res, Err(BlockadeError::LowerTriangle { row: 2, col: 1 }));
    }

    #[test]
    fn rejects_non_finite() {
        let mut b = CooBuilder::new(2).unwrap();
        let res = b.push(0, 1, c(f64::NAN, 0.0));
        assert_eq!(res, Err(BlockadeError::NonFinite { row: 0, col: 1 }));
        let res = b.push(0, 1, c(0.0, f64::INFINITY));
        assert_eq!(res, Err(BlockadeError::NonFinite { row: 0, col: 1 }));
    }

    #[test]
    fn zero_dim_is_an_error() {
        assert_eq!(CooBuilder::new(0).err(), Some(BlockadeError::EmptyBasis));
    }

    #[test]
    fn duplicates_sum() {
        let mut b = CooBuilder::new(2).unwrap();
        b.push(0, 1, c(1.0, 0.5)).unwrap();
        b.push(0, 1, c(2.0, -0.5)).unwrap();
        let h = b.into_csr();
        assert_eq!(h.nnz(), 1);
        assert_eq!(h.to_dense()[[0, 1]], c(3.0, 0.0));
    }

    #[test]
    fn hermitian_matvec() {
        // H = [[1, i], [-i, 2]]
        let mut b = CooBuilder::new(2).unwrap();
        b.push(0, 0, c(1.0, 0.0)).unwrap();
        b.push(0, 1, c(0.0, 1.0)).unwrap();
        b.push(1, 1, c(2.0, 0.0)).unwrap();
        let h = b.into_csr();
        let x: nd::Array1<C64> = nd::array![c(1.0, 0.0), c(0.0, 1.0)];
        let y = h.apply(&x);
        // y0 = 1*1 + i*i = 1 - 1 = 0; y1 = -i*1 + 2*i = i
        assert_eq!(y[0], c(0.0, 0.0));
        assert_eq!(y[1], c(0.0, 1.0));
    }

    #[test]
    fn dense_expansion_is_hermitian() {
        let mut b = CooBuilder::new(3).unwrap();
        b.push(0, 1, c(1.0, 2.0)).unwrap();
        b.push(1, 2, c(-0.5, 0.25)).unwrap();
        b.push(1, 1, c(3.0, 0.0)).unwrap();
        let h = b.into_csr().to_dense();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(h[[i, j]], h[[j, i]].conj());
            }
        }
    }
}
