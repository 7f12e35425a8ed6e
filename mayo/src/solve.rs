//! Gaussian elimination over GF(16).
//!
//! The system is built from secret vinegar values and the secret oil
//! matrix, so elimination never branches on matrix entries: pivots are
//! selected with masks and every row is touched for every column.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater};
use zeroize::{Zeroize, Zeroizing};

use crate::gf16;

/// An `rows x (cols + 1)` augmented system `[A | b]`, row-major.
pub(crate) struct Augmented {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

#[inline]
fn is_zero(value: u8) -> Choice {
    value.ct_eq(&0)
}

impl Augmented {
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0u8; rows * (cols + 1)],
        }
    }

    #[inline]
    fn stride(&self) -> usize {
        self.cols + 1
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: u8) {
        let stride = self.stride();
        self.data[row * stride + col] = value;
    }

    pub(crate) fn set_rhs(&mut self, row: usize, value: u8) {
        self.set(row, self.cols, value);
    }

    fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.stride() + col]
    }

    fn row(&self, row: usize) -> &[u8] {
        let stride = self.stride();
        &self.data[row * stride..(row + 1) * stride]
    }

    fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let stride = self.stride();
        &mut self.data[row * stride..(row + 1) * stride]
    }

    /// Brings the system to row echelon form with unit pivots and returns
    /// the rank of `A`.
    ///
    /// For each column the pivot row is assembled by adding every lower row
    /// into it while its entry is still zero, written back under a mask, and
    /// subtracted from all lower rows with a masked factor.
    fn echelon(&mut self) -> usize {
        let mut pivot_row = 0u64;
        let mut pivot = Zeroizing::new(vec![0u8; self.stride()]);

        for pivot_col in 0..self.cols {
            pivot.fill(0);
            let mut pivot_is_zero = Choice::from(1);
            for (row, index) in (0..self.rows).zip(0u64..) {
                let take = index.ct_eq(&pivot_row) | (index.ct_gt(&pivot_row) & pivot_is_zero);
                for (acc, &value) in pivot.iter_mut().zip(self.row(row)) {
                    *acc ^= u8::conditional_select(&0, &value, take);
                }
                pivot_is_zero = is_zero(pivot[pivot_col]);
            }

            let inverse = gf16::inv(pivot[pivot_col]);
            for value in pivot.iter_mut() {
                *value = gf16::mul(*value, inverse);
            }

            let found = !pivot_is_zero;
            for (row, index) in (0..self.rows).zip(0u64..) {
                let write = index.ct_eq(&pivot_row) & found;
                for (dst, src) in self.row_mut(row).iter_mut().zip(pivot.iter()) {
                    dst.conditional_assign(src, write);
                }
            }

            for (row, index) in (0..self.rows).zip(0u64..) {
                let below = index.ct_gt(&pivot_row) & found;
                let factor = u8::conditional_select(&0, &self.get(row, pivot_col), below);
                for (dst, &src) in self.row_mut(row).iter_mut().zip(pivot.iter()) {
                    *dst = gf16::add(*dst, gf16::mul(factor, src));
                }
            }

            pivot_row += u64::from(found.unwrap_u8());
        }

        usize::try_from(pivot_row).unwrap_or(0)
    }

    /// Back substitution over an echelon form of full row rank. Each row's
    /// pivot is its first nonzero entry, located with a running mask.
    fn back_substitute(&mut self) -> Vec<u8> {
        let rhs = self.cols;
        let mut solution = vec![0u8; self.cols];
        for row in (0..self.rows).rev() {
            let mut finished = Choice::from(0);
            for col in row..self.cols {
                let is_pivot = !is_zero(self.get(row, col)) & !finished;
                let value = u8::conditional_select(&0, &self.get(row, rhs), is_pivot);
                solution[col] ^= value;
                for above in 0..row {
                    let delta = gf16::mul(self.get(above, col), value);
                    let updated = gf16::add(self.get(above, rhs), delta);
                    self.set(above, rhs, updated);
                }
                finished |= is_pivot;
            }
        }
        solution
    }

    /// Solves `A d = b` with every free variable set to zero.
    ///
    /// Returns `None` when `A` does not have full row rank.
    pub(crate) fn solve(mut self) -> Option<Vec<u8>> {
        if self.echelon() < self.rows {
            return None;
        }
        Some(self.back_substitute())
    }
}

impl Drop for Augmented {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}
