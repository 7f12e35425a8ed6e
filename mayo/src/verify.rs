//! Signature verification.

use subtle::ConstantTimeEq;

use crate::codec::{pack_mvecs, unpack_mvecs, unpack_vector};
use crate::error::{Error, MayoResult};
use crate::keygen::{PublicMap, expand_public_seed};
use crate::matrix::{mat_mul_vec, mul_by_z, mvec_add, upper_mul_vec, vec_mul_mat};
use crate::params::ParameterSet;
use crate::sign::derive_target;
use crate::xof::message_digest;

/// `P s` for one block `s = (s_v, s_o)` with `P = [[P1, P2], [0, P3]]`.
fn apply_public_matrix(
    params: &ParameterSet,
    map: &PublicMap,
    p3: &[u64],
    block: &[u8],
) -> Vec<u64> {
    let limbs = params.m_vec_limbs();
    let (s_v, s_o) = block.split_at(params.v);

    let mut out = upper_mul_vec(&map.p1, s_v, limbs);
    mvec_add(&mut out, &mat_mul_vec(&map.p2, params.v, s_o, limbs));
    out.extend(upper_mul_vec(p3, s_o, limbs));
    out
}

/// Evaluates the combined public map `P*(s)`.
pub(crate) fn evaluate(
    params: &ParameterSet,
    map: &PublicMap,
    p3: &[u64],
    s: &[u8],
) -> Vec<u64> {
    let limbs = params.m_vec_limbs();
    let blocks: Vec<&[u8]> = s.chunks(params.n).collect();
    let p_s: Vec<Vec<u64>> = blocks
        .iter()
        .map(|block| apply_public_matrix(params, map, p3, block))
        .collect();
    let s_p_s = |i: usize, j: usize| vec_mul_mat(blocks[i], &p_s[j], 1, limbs);

    let mut acc = vec![0u64; limbs];
    for i in (0..params.k).rev() {
        for j in i..params.k {
            mul_by_z(&mut acc, params.m, &params.f_tail);
            mvec_add(&mut acc, &s_p_s(i, j));
            if i != j {
                mvec_add(&mut acc, &s_p_s(j, i));
            }
        }
    }
    acc
}

/// Checks `sig` over `msg` against the encoded verifying key `pk`.
pub(crate) fn verify_signature(
    params: &ParameterSet,
    pk: &[u8],
    msg: &[u8],
    sig: &[u8],
) -> MayoResult<()> {
    params.variant.check_public_key_len(pk.len())?;
    params.variant.check_signature_len(sig.len())?;

    let (packed_s, salt) = sig.split_at(params.s_bytes());
    let s = unpack_vector(packed_s, params.k * params.n);

    let digest = message_digest(params, msg);
    let target = derive_target(params, &digest, salt);

    let (seed_pk, packed_p3) = pk.split_at(params.pk_seed_bytes);
    let map = expand_public_seed(params, seed_pk);
    let p3 = unpack_mvecs(packed_p3, params.p3_entries(), params.m);

    let value = evaluate(params, &map, &p3, &s);
    let lhs = pack_mvecs(&value, 1, params.m);
    let rhs = pack_mvecs(&target, 1, params.m);
    if bool::from(lhs.ct_eq(&rhs)) {
        Ok(())
    } else {
        tracing::debug!(variant = %params.variant, "public map does not reach target");
        Err(Error::VerificationFailed)
    }
}
