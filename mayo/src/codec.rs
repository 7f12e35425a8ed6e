//! Nibble packing of field vectors and m-vectors.
//!
//! Two elements share a byte, low nibble first. An m-vector is held in
//! memory as `ceil(m / 16)` little-endian `u64` limbs with element `i` in
//! nibble `i % 16` of limb `i / 16`; its packed form is `m / 2` bytes.

/// Packs `elems` into `out`, which must hold `ceil(elems.len() / 2)` bytes.
pub(crate) fn encode_into(elems: &[u8], out: &mut [u8]) {
    for (byte, pair) in out.iter_mut().zip(elems.chunks(2)) {
        let high = pair.get(1).copied().unwrap_or(0);
        *byte = (pair[0] & 0xf) | (high << 4);
    }
}

/// Unpacks `out.len()` elements from `bytes`.
pub(crate) fn decode_into(bytes: &[u8], out: &mut [u8]) {
    for (i, elem) in out.iter_mut().enumerate() {
        let byte = bytes[i / 2];
        *elem = if i % 2 == 0 { byte & 0xf } else { byte >> 4 };
    }
}

pub(crate) fn pack_vector(elems: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; elems.len().div_ceil(2)];
    encode_into(elems, &mut out);
    out
}

pub(crate) fn unpack_vector(bytes: &[u8], n: usize) -> Vec<u8> {
    let mut out = vec![0u8; n];
    decode_into(bytes, &mut out);
    out
}

/// Reads element `i` of an m-vector.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn mvec_get(mvec: &[u64], i: usize) -> u8 {
    ((mvec[i / 16] >> ((i % 16) * 4)) & 0xf) as u8
}

/// Unpacks `count` consecutive packed m-vectors into limbs.
pub(crate) fn unpack_mvecs(bytes: &[u8], count: usize, m: usize) -> Vec<u64> {
    let m_bytes = m.div_ceil(2);
    let limbs = m.div_ceil(16);
    let mut out = vec![0u64; count * limbs];
    for (packed, mvec) in bytes
        .chunks(m_bytes)
        .take(count)
        .zip(out.chunks_mut(limbs))
    {
        for (chunk, limb) in packed.chunks(8).zip(mvec.iter_mut()) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            *limb = u64::from_le_bytes(word);
        }
    }
    out
}

/// Packs `count` m-vectors stored as limbs.
pub(crate) fn pack_mvecs(mvecs: &[u64], count: usize, m: usize) -> Vec<u8> {
    let m_bytes = m.div_ceil(2);
    let limbs = m.div_ceil(16);
    let mut out = vec![0u8; count * m_bytes];
    for (packed, mvec) in out.chunks_mut(m_bytes).zip(mvecs.chunks(limbs)) {
        for (chunk, limb) in packed.chunks_mut(8).zip(mvec) {
            let word = limb.to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
    out
}

/// Expands an m-vector into `m` individual elements.
pub(crate) fn mvec_to_elems(mvec: &[u64], m: usize) -> Vec<u8> {
    (0..m).map(|i| mvec_get(mvec, i)).collect()
}
