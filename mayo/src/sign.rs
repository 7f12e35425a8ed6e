//! Signature generation.

use rand::TryCryptoRng;
use zeroize::Zeroizing;

use crate::codec::{mvec_get, mvec_to_elems, pack_vector, unpack_mvecs, unpack_vector};
use crate::error::{Error, MayoResult};
use crate::gf16;
use crate::keygen::ExpandedSecret;
use crate::matrix::{mul_by_z, mvec_add, mvec_mul_add, upper_mul_vec, vec_mul_mat};
use crate::params::ParameterSet;
use crate::solve::Augmented;
use crate::xof::{Domain, Expander, expand, message_digest};

/// Number of vinegar samples tried before giving up.
pub(crate) const MAX_ATTEMPTS: usize = 256;

/// Derives the target m-vector `t` from the message digest and salt.
pub(crate) fn derive_target(params: &ParameterSet, digest: &[u8], salt: &[u8]) -> Vec<u64> {
    let packed = expand(Domain::Target, &[digest, salt], params.m_bytes());
    unpack_mvecs(&packed, 1, params.m)
}

/// One sampled vinegar assignment and the linear system it induces.
struct Linearized {
    vinegar: Vec<Zeroizing<Vec<u8>>>,
    /// `k * o` columns of `A`, one m-vector each.
    columns: Zeroizing<Vec<u64>>,
    /// `t - sum z^l v_iᵀ P1 v_j`
    rhs: Zeroizing<Vec<u64>>,
}

fn linearize(
    params: &ParameterSet,
    esk: &ExpandedSecret,
    vinegar: Vec<Zeroizing<Vec<u8>>>,
    target: &[u64],
) -> Linearized {
    let (k, o, v) = (params.k, params.o, params.v);
    let limbs = params.m_vec_limbs();

    // M_i = v_iᵀ L, o columns each
    let m_blocks: Vec<Zeroizing<Vec<u64>>> = vinegar
        .iter()
        .map(|vi| Zeroizing::new(vec_mul_mat(vi, &esk.l, o, limbs)))
        .collect();
    // P1 v_j
    let p1_v: Vec<Zeroizing<Vec<u64>>> = vinegar
        .iter()
        .map(|vj| Zeroizing::new(upper_mul_vec(&esk.p1, vj, limbs)))
        .collect();
    let v_p1_v = |i: usize, j: usize| vec_mul_mat(&vinegar[i], &p1_v[j], 1, limbs);

    let mut columns = Zeroizing::new(vec![0u64; k * o * limbs]);
    let mut acc = Zeroizing::new(vec![0u64; limbs]);

    // Horner over the pairs (i, j), i ascending, j descending from k - 1,
    // visited last to first so pair l ends up scaled by z^l.
    for i in (0..k).rev() {
        for j in i..k {
            mul_by_z(&mut acc, params.m, &params.f_tail);
            for column in columns.chunks_mut(limbs) {
                mul_by_z(column, params.m, &params.f_tail);
            }

            let mut u = v_p1_v(i, j);
            if i != j {
                mvec_add(&mut u, &v_p1_v(j, i));
            }
            mvec_add(&mut acc, &u);

            let block_j = &mut columns[j * o * limbs..(j + 1) * o * limbs];
            mvec_add(block_j, &m_blocks[i]);
            if i != j {
                let block_i = &mut columns[i * o * limbs..(i + 1) * o * limbs];
                mvec_add(block_i, &m_blocks[j]);
            }
        }
    }

    let mut rhs = Zeroizing::new(target.to_vec());
    mvec_add(&mut rhs, &acc);
    debug_assert_eq!(vinegar.len(), k);
    debug_assert!(vinegar.iter().all(|vi| vi.len() == v));

    Linearized {
        vinegar,
        columns,
        rhs,
    }
}

/// Solves `A x = y` starting from the random offset `r`: returns `r + d`
/// where `A d = y - A r`, or `None` if `A` is rank deficient.
fn sample_solution(params: &ParameterSet, system: &Linearized, r: &[u8]) -> Option<Vec<u8>> {
    let limbs = params.m_vec_limbs();
    let unknowns = params.k * params.o;

    let mut rhs = Zeroizing::new(system.rhs.to_vec());
    for (column, &ri) in system.columns.chunks(limbs).zip(r) {
        mvec_mul_add(&mut rhs, column, ri);
    }

    let mut aug = Augmented::new(params.m, unknowns);
    for (col, column) in system.columns.chunks(limbs).enumerate() {
        for row in 0..params.m {
            aug.set(row, col, mvec_get(column, row));
        }
    }
    for (row, value) in mvec_to_elems(&rhs, params.m).into_iter().enumerate() {
        aug.set_rhs(row, value);
    }

    let mut x = aug.solve()?;
    for (xi, &ri) in x.iter_mut().zip(r) {
        *xi = gf16::add(*xi, ri);
    }
    Some(x)
}

/// `s_i = (v_i + O x_i, x_i)` for every block, packed and followed by the salt.
fn assemble(
    params: &ParameterSet,
    esk: &ExpandedSecret,
    system: &Linearized,
    x: &[u8],
    salt: &[u8],
) -> Vec<u8> {
    let (n, o, v) = (params.n, params.o, params.v);
    let mut s = Zeroizing::new(vec![0u8; params.k * n]);
    for (block, (vi, xi)) in s
        .chunks_mut(n)
        .zip(system.vinegar.iter().zip(x.chunks(o)))
    {
        for (row, out) in block[..v].iter_mut().enumerate() {
            let oil = esk.o[row * o..(row + 1) * o]
                .iter()
                .zip(xi)
                .fold(0u8, |acc, (&ov, &xv)| gf16::add(acc, gf16::mul(ov, xv)));
            *out = gf16::add(vi[row], oil);
        }
        block[v..].copy_from_slice(xi);
    }

    let mut sig = pack_vector(&s);
    sig.extend_from_slice(salt);
    sig
}

/// One signing attempt with vinegar counter `ctr`. `None` means the
/// linearized system was singular.
fn try_counter(
    params: &ParameterSet,
    esk: &ExpandedSecret,
    digest: &[u8],
    salt: &[u8],
    target: &[u64],
    ctr: u8,
) -> Option<Vec<u8>> {
    let v_bytes = params.v_bytes();
    let mut xof = Expander::new(
        Domain::Vinegar,
        &[digest, salt, &esk.seed_sk[..], &[ctr][..]],
    );
    let packed_v = Zeroizing::new(xof.take(params.k * v_bytes));
    let packed_r = Zeroizing::new(xof.take(params.r_bytes()));

    let vinegar = packed_v
        .chunks(v_bytes)
        .map(|chunk| Zeroizing::new(unpack_vector(chunk, params.v)))
        .collect();
    let r = Zeroizing::new(unpack_vector(&packed_r, params.k * params.o));

    let system = linearize(params, esk, vinegar, target);
    let x = Zeroizing::new(sample_solution(params, &system, &r)?);
    Some(assemble(params, esk, &system, &x, salt))
}

/// Runs `attempt` for counters `0..=255` and returns the first success.
fn first_solvable<T>(
    params: &ParameterSet,
    mut attempt: impl FnMut(u8) -> Option<T>,
) -> MayoResult<T> {
    for ctr in 0..=u8::MAX {
        if let Some(found) = attempt(ctr) {
            tracing::debug!(
                variant = %params.variant,
                attempts = usize::from(ctr) + 1,
                "signed message"
            );
            return Ok(found);
        }
        tracing::trace!(variant = %params.variant, ctr, "singular system, resampling vinegar");
    }

    tracing::warn!(variant = %params.variant, attempts = MAX_ATTEMPTS, "signing failed");
    Err(Error::SigningFailed {
        attempts: MAX_ATTEMPTS,
    })
}

/// Signs `msg`, drawing the salt randomizer from `rng`.
pub(crate) fn sign_message<R: TryCryptoRng + ?Sized>(
    params: &ParameterSet,
    esk: &ExpandedSecret,
    msg: &[u8],
    rng: &mut R,
) -> MayoResult<Vec<u8>> {
    let digest = message_digest(params, msg);

    let mut randomizer = Zeroizing::new(vec![0u8; params.salt_bytes]);
    rng.try_fill_bytes(&mut randomizer)
        .map_err(|_| Error::EntropyExhausted)?;
    let salt = expand(
        Domain::Salt,
        &[&digest[..], &randomizer[..], &esk.seed_sk[..]],
        params.salt_bytes,
    );
    let target = derive_target(params, &digest, &salt);

    first_solvable(params, |ctr| {
        try_counter(params, esk, &digest, &salt, &target, ctr)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::{compact_key_gen, expand_sk};
    use crate::params::Variant;
    use crate::verify::verify_signature;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn signature_layout() {
        for variant in Variant::ALL {
            let params = variant.params();
            let esk = expand_sk(params, &vec![5u8; params.sk_seed_bytes]);
            let mut rng = StdRng::seed_from_u64(1);
            let sig = sign_message(params, &esk, b"layout", &mut rng).unwrap();
            assert_eq!(sig.len(), params.sig_size, "{variant}");

            let s = unpack_vector(&sig[..params.s_bytes()], params.k * params.n);
            assert!(s.iter().all(|&e| e < 16));
        }
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let params = Variant::Mayo2.params();
        let esk = expand_sk(params, &[2u8; 24]);
        let a = sign_message(params, &esk, b"msg", &mut StdRng::seed_from_u64(7)).unwrap();
        let b = sign_message(params, &esk, b"msg", &mut StdRng::seed_from_u64(7)).unwrap();
        let c = sign_message(params, &esk, b"msg", &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn exhausted_retries_fail() {
        let params = Variant::Mayo2.params();
        let mut esk = expand_sk(params, &[6u8; 24]);
        // L = 0 makes A = 0, so every attempt is singular.
        esk.l.fill(0);
        let result = sign_message(params, &esk, b"msg", &mut StdRng::seed_from_u64(1));
        assert!(matches!(
            result,
            Err(Error::SigningFailed { attempts }) if attempts == MAX_ATTEMPTS
        ));
    }

    #[test]
    fn later_counter_still_signs() {
        let params = Variant::Mayo2.params();
        let seed_sk = [9u8; 24];
        let esk = expand_sk(params, &seed_sk);
        let pk = compact_key_gen(params, &seed_sk);

        let digest = message_digest(params, b"retry");
        let salt = expand(Domain::Salt, &[b"fixed salt".as_slice()], params.salt_bytes);
        let target = derive_target(params, &digest, &salt);

        let mut tried = Vec::new();
        let sig = first_solvable(params, |ctr| {
            tried.push(ctr);
            if ctr < 3 {
                None
            } else {
                try_counter(params, &esk, &digest, &salt, &target, ctr)
            }
        })
        .unwrap();
        assert_eq!(tried, [0, 1, 2, 3]);
        verify_signature(params, &pk, b"retry", &sig).unwrap();

        let mut calls = 0;
        let exhausted = first_solvable(params, |_| {
            calls += 1;
            None::<()>
        });
        assert!(matches!(exhausted, Err(Error::SigningFailed { attempts: 256 })));
        assert_eq!(calls, MAX_ATTEMPTS);
    }

    #[test]
    fn linear_system_matches_target() {
        // A x must equal y for the sampled solution.
        let params = Variant::Mayo2.params();
        let limbs = params.m_vec_limbs();
        let esk = expand_sk(params, &[4u8; 24]);
        let target = derive_target(params, &[1u8; 32], &[2u8; 24]);
        let vinegar = (0..params.k)
            .map(|i| {
                let packed = expand(Domain::Vinegar, &[&[i as u8][..]], params.v_bytes());
                Zeroizing::new(unpack_vector(&packed, params.v))
            })
            .collect();
        let system = linearize(params, &esk, vinegar, &target);
        let r = vec![3u8; params.k * params.o];
        let x = sample_solution(params, &system, &r).unwrap();

        let mut ax = vec![0u64; limbs];
        for (column, &xi) in system.columns.chunks(limbs).zip(&x) {
            mvec_mul_add(&mut ax, column, xi);
        }
        assert_eq!(&ax[..], &system.rhs[..]);
    }
}
