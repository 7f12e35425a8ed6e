//! Compact key generation and key expansion.

use zeroize::Zeroizing;

use crate::codec::{pack_mvecs, unpack_mvecs, unpack_vector};
use crate::matrix::{mat_t_mul, mvec_mul_add, upper, upper_mul_mat};
use crate::params::ParameterSet;
use crate::xof::{Domain, Expander};

/// The public quadratic map, `P1` (packed upper-triangular `v x v`) and
/// `P2` (`v x o`), both matrices of m-vectors.
#[derive(Clone)]
pub(crate) struct PublicMap {
    pub(crate) p1: Vec<u64>,
    pub(crate) p2: Vec<u64>,
}

/// Everything the signer needs, derived from the secret seed.
#[derive(Clone)]
pub(crate) struct ExpandedSecret {
    pub(crate) seed_sk: Zeroizing<Vec<u8>>,
    /// `v x o` oil matrix.
    pub(crate) o: Zeroizing<Vec<u8>>,
    pub(crate) p1: Vec<u64>,
    /// `(P1 + P1ᵀ) O + P2`, built in place over `P2`.
    pub(crate) l: Zeroizing<Vec<u64>>,
}

/// `seed_sk -> (seed_pk, O)`
pub(crate) fn expand_secret_seed(
    params: &ParameterSet,
    seed_sk: &[u8],
) -> (Vec<u8>, Zeroizing<Vec<u8>>) {
    let mut xof = Expander::new(Domain::SecretExpand, &[seed_sk]);
    let seed_pk = xof.take(params.pk_seed_bytes);
    let packed_o = Zeroizing::new(xof.take(params.o_bytes()));
    let o = Zeroizing::new(unpack_vector(&packed_o, params.v * params.o));
    (seed_pk, o)
}

/// `seed_pk -> (P1, P2)`
pub(crate) fn expand_public_seed(params: &ParameterSet, seed_pk: &[u8]) -> PublicMap {
    let mut xof = Expander::new(Domain::PublicExpand, &[seed_pk]);
    let p1 = unpack_mvecs(&xof.take(params.p1_bytes()), params.p1_entries(), params.m);
    let p2 = unpack_mvecs(&xof.take(params.p2_bytes()), params.p2_entries(), params.m);
    PublicMap { p1, p2 }
}

/// `P3 = Upper(Oᵀ P1 O + Oᵀ P2)`
pub(crate) fn compute_p3(params: &ParameterSet, map: &PublicMap, o: &[u8]) -> Vec<u64> {
    let limbs = params.m_vec_limbs();
    let mut p1_o_plus_p2 = Zeroizing::new(map.p2.clone());
    upper_mul_mat(&map.p1, params.v, o, params.o, limbs, &mut p1_o_plus_p2);
    let square = Zeroizing::new(mat_t_mul(
        o,
        params.v,
        params.o,
        &p1_o_plus_p2,
        params.o,
        limbs,
    ));
    upper(&square, params.o, limbs)
}

/// `L = (P1 + P1ᵀ) O + P2`, consuming `P2`.
pub(crate) fn compute_l(params: &ParameterSet, p1: &[u64], p2: Vec<u64>, o: &[u8]) -> Vec<u64> {
    let limbs = params.m_vec_limbs();
    let (v, cols) = (params.v, params.o);
    let mut l = p2;
    let mut entry = 0;
    for r in 0..v {
        // Diagonal entries cancel in P1 + P1ᵀ.
        entry += 1;
        for q in r + 1..v {
            let src = &p1[entry * limbs..(entry + 1) * limbs];
            for c in 0..cols {
                let rc = (r * cols + c) * limbs;
                mvec_mul_add(&mut l[rc..rc + limbs], src, o[q * cols + c]);
                let qc = (q * cols + c) * limbs;
                mvec_mul_add(&mut l[qc..qc + limbs], src, o[r * cols + c]);
            }
            entry += 1;
        }
    }
    l
}

/// Derives the encoded verifying key `seed_pk || Pack(P3)` from `seed_sk`.
pub(crate) fn compact_key_gen(params: &ParameterSet, seed_sk: &[u8]) -> Vec<u8> {
    let (seed_pk, o) = expand_secret_seed(params, seed_sk);
    let map = expand_public_seed(params, &seed_pk);
    let p3 = compute_p3(params, &map, &o);

    let mut pk = Vec::with_capacity(params.pk_size);
    pk.extend_from_slice(&seed_pk);
    pk.extend_from_slice(&pack_mvecs(&p3, params.p3_entries(), params.m));
    tracing::debug!(variant = %params.variant, "derived verifying key");
    pk
}

/// Rebuilds the signer's working material from `seed_sk`.
pub(crate) fn expand_sk(params: &ParameterSet, seed_sk: &[u8]) -> ExpandedSecret {
    let (seed_pk, o) = expand_secret_seed(params, seed_sk);
    let PublicMap { p1, p2 } = expand_public_seed(params, &seed_pk);
    let l = Zeroizing::new(compute_l(params, &p1, p2, &o));
    ExpandedSecret {
        seed_sk: Zeroizing::new(seed_sk.to_vec()),
        o,
        p1,
        l,
    }
}
