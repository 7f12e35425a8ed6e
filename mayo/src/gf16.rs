//! Arithmetic in GF(16) = GF(2)[x] / (x^4 + x + 1).
//!
//! Elements are the low nibble of a `u8`. Multiplication never branches on
//! its operands.

/// Reduction term for `x^4 = x + 1`.
const REDUCTION: u8 = 0x3;

/// Mask selecting the high bit of every nibble in a `u64`.
const LANE_HIGH_BITS: u64 = 0x8888_8888_8888_8888;

#[inline]
pub(crate) const fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

#[inline]
pub(crate) const fn mul(a: u8, b: u8) -> u8 {
    let mut a = a & 0xf;
    let mut product = 0u8;
    let mut i = 0;
    while i < 4 {
        let mask = 0u8.wrapping_sub((b >> i) & 1);
        product ^= a & mask;
        let high = 0u8.wrapping_sub((a >> 3) & 1);
        a = ((a << 1) & 0xf) ^ (high & REDUCTION);
        i += 1;
    }
    product
}

/// `a^14`, the inverse of any nonzero `a`. Maps 0 to 0.
#[inline]
pub(crate) const fn inv(a: u8) -> u8 {
    let a2 = mul(a, a);
    let a4 = mul(a2, a2);
    let a8 = mul(a4, a4);
    mul(mul(a2, a4), a8)
}

/// Multiplies each of the sixteen nibbles of `x` by the scalar `a`.
#[inline]
pub(crate) fn mul_lanes(a: u8, x: u64) -> u64 {
    let mut x = x;
    let mut product = 0u64;
    for i in 0..4 {
        let mask = 0u64.wrapping_sub(u64::from((a >> i) & 1));
        product ^= x & mask;
        let top = x & LANE_HIGH_BITS;
        x = ((x ^ top) << 1) ^ ((top >> 3) * u64::from(REDUCTION));
    }
    product
}
