//! Matrices whose entries are m-vectors.
//!
//! A matrix of m-vectors is a flat `[u64]` with `limbs` words per entry,
//! row-major. Upper-triangular matrices store only the entries `(i, j)` with
//! `i <= j`, also row-major. Plain GF(16) matrices are flat `[u8]`, row-major.

use crate::gf16;

#[inline]
pub(crate) fn mvec_add(acc: &mut [u64], src: &[u64]) {
    for (a, s) in acc.iter_mut().zip(src) {
        *a ^= s;
    }
}

/// `acc += a * src`
#[inline]
pub(crate) fn mvec_mul_add(acc: &mut [u64], src: &[u64], a: u8) {
    for (acc, s) in acc.iter_mut().zip(src) {
        *acc ^= gf16::mul_lanes(a, *s);
    }
}

/// Multiplies an m-vector, read as a polynomial in `z` of degree below `m`,
/// by `z` modulo `f(z) = z^m + sum(f_tail[t] z^t)`.
pub(crate) fn mul_by_z(mvec: &mut [u64], m: usize, f_tail: &[u8; 4]) {
    let limbs = mvec.len();
    let top = crate::codec::mvec_get(mvec, m - 1);

    for i in (1..limbs).rev() {
        mvec[i] = (mvec[i] << 4) | (mvec[i - 1] >> 60);
    }
    mvec[0] <<= 4;
    if m % 16 != 0 {
        mvec[limbs - 1] &= (1u64 << ((m % 16) * 4)) - 1;
    }

    for (t, &coeff) in f_tail.iter().enumerate() {
        mvec[0] ^= u64::from(gf16::mul(top, coeff)) << (4 * t);
    }
}

/// Position of entry `(row, col)`, `row <= col`, in a packed upper-triangular
/// `dim x dim` matrix.
#[inline]
pub(crate) const fn upper_index(row: usize, col: usize, dim: usize) -> usize {
    row * (2 * dim - row + 1) / 2 + (col - row)
}

/// `out[c] = sum_r vec[r] * mat[r][c]` for a `vec.len() x cols` matrix.
pub(crate) fn vec_mul_mat(vec: &[u8], mat: &[u64], cols: usize, limbs: usize) -> Vec<u64> {
    let mut out = vec![0u64; cols * limbs];
    for (r, &x) in vec.iter().enumerate() {
        for c in 0..cols {
            let entry = (r * cols + c) * limbs;
            mvec_mul_add(
                &mut out[c * limbs..(c + 1) * limbs],
                &mat[entry..entry + limbs],
                x,
            );
        }
    }
    out
}

/// `out[r] = sum_c mat[r][c] * vec[c]` for a `rows x vec.len()` matrix.
pub(crate) fn mat_mul_vec(mat: &[u64], rows: usize, vec: &[u8], limbs: usize) -> Vec<u64> {
    let cols = vec.len();
    let mut out = vec![0u64; rows * limbs];
    for r in 0..rows {
        let acc = &mut out[r * limbs..(r + 1) * limbs];
        for (c, &x) in vec.iter().enumerate() {
            let entry = (r * cols + c) * limbs;
            mvec_mul_add(acc, &mat[entry..entry + limbs], x);
        }
    }
    out
}

/// `out[r] = sum_{c >= r} upper[r][c] * vec[c]` for a packed
/// upper-triangular `vec.len() x vec.len()` matrix.
pub(crate) fn upper_mul_vec(upper: &[u64], vec: &[u8], limbs: usize) -> Vec<u64> {
    let dim = vec.len();
    let mut out = vec![0u64; dim * limbs];
    let mut entry = 0;
    for r in 0..dim {
        let acc = &mut out[r * limbs..(r + 1) * limbs];
        for &x in &vec[r..] {
            mvec_mul_add(acc, &upper[entry * limbs..(entry + 1) * limbs], x);
            entry += 1;
        }
    }
    out
}

/// `out = upper * mat` for a packed upper-triangular `dim x dim` matrix of
/// m-vectors and a `dim x cols` GF(16) matrix. Accumulates into `out`.
pub(crate) fn upper_mul_mat(
    upper: &[u64],
    dim: usize,
    mat: &[u8],
    cols: usize,
    limbs: usize,
    out: &mut [u64],
) {
    let mut entry = 0;
    for r in 0..dim {
        for q in r..dim {
            let src = &upper[entry * limbs..(entry + 1) * limbs];
            for c in 0..cols {
                let dst = (r * cols + c) * limbs;
                mvec_mul_add(&mut out[dst..dst + limbs], src, mat[q * cols + c]);
            }
            entry += 1;
        }
    }
}

/// `out = matᵀ * rhs` for a `rows x mat_cols` GF(16) matrix and a
/// `rows x rhs_cols` matrix of m-vectors.
pub(crate) fn mat_t_mul(
    mat: &[u8],
    rows: usize,
    mat_cols: usize,
    rhs: &[u64],
    rhs_cols: usize,
    limbs: usize,
) -> Vec<u64> {
    let mut out = vec![0u64; mat_cols * rhs_cols * limbs];
    for r in 0..rows {
        for a in 0..mat_cols {
            let x = mat[r * mat_cols + a];
            for c in 0..rhs_cols {
                let src = (r * rhs_cols + c) * limbs;
                let dst = (a * rhs_cols + c) * limbs;
                mvec_mul_add(&mut out[dst..dst + limbs], &rhs[src..src + limbs], x);
            }
        }
    }
    out
}

/// Folds a square `dim x dim` matrix into the packed upper-triangular matrix
/// defining the same quadratic form: the diagonal is kept and `M[j][i]` is
/// added onto `M[i][j]` for `i < j`.
pub(crate) fn upper(square: &[u64], dim: usize, limbs: usize) -> Vec<u64> {
    let mut out = vec![0u64; dim * (dim + 1) / 2 * limbs];
    for i in 0..dim {
        for j in i..dim {
            let entry = upper_index(i, j, dim);
            let dst = &mut out[entry * limbs..(entry + 1) * limbs];
            let ij = (i * dim + j) * limbs;
            dst.copy_from_slice(&square[ij..ij + limbs]);
            if i != j {
                let ji = (j * dim + i) * limbs;
                mvec_add(dst, &square[ji..ji + limbs]);
            }
        }
    }
    out
}
