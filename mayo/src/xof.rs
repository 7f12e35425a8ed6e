//! SHAKE256 expansion with a trailing domain tag, and the message hash.

use sha3::{
    Shake256,
    digest::{ExtendableOutput, Update, XofReader},
};

use crate::params::{MessageHash, ParameterSet};

/// Trailing tag absorbed after the inputs of every expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Domain {
    /// `seed_sk -> seed_pk || O`
    SecretExpand = 0x01,
    /// `seed_pk -> P1 || P2`
    PublicExpand = 0x02,
    Salt = 0x03,
    Target = 0x04,
    /// `digest || salt || seed_sk || ctr -> V || r`
    Vinegar = 0x05,
}

/// An output stream over `SHAKE256(inputs || domain)`, read in consecutive
/// pieces.
pub(crate) struct Expander {
    reader: <Shake256 as ExtendableOutput>::Reader,
}

impl Expander {
    pub(crate) fn new(domain: Domain, inputs: &[&[u8]]) -> Self {
        let mut shake = Shake256::default();
        for input in inputs {
            shake.update(input);
        }
        shake.update(&[domain as u8]);
        Self {
            reader: shake.finalize_xof(),
        }
    }

    /// The next `len` bytes of the stream.
    pub(crate) fn take(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.reader.read(&mut out);
        out
    }
}

/// `out_len` bytes of `SHAKE256(inputs || domain)`.
pub(crate) fn expand(domain: Domain, inputs: &[&[u8]], out_len: usize) -> Vec<u8> {
    Expander::new(domain, inputs).take(out_len)
}

/// Compresses a message to `params.digest_bytes` bytes.
pub(crate) fn message_digest(params: &ParameterSet, msg: &[u8]) -> Vec<u8> {
    use sha2::{Digest, Sha256, Sha384, Sha512};

    match params.message_hash {
        MessageHash::Sha256 => Sha256::digest(msg).to_vec(),
        MessageHash::Sha384 => Sha384::digest(msg).to_vec(),
        MessageHash::Sha512 => Sha512::digest(msg).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Variant;
    use hex_literal::hex;

    #[test]
    fn tag_follows_inputs() {
        let mut shake = Shake256::default();
        shake.update(b"abc");
        shake.update(&[0x04]);
        let mut direct = [0u8; 64];
        shake.finalize_xof().read(&mut direct);

        assert_eq!(
            expand(Domain::Target, &[b"ab".as_slice(), b"c".as_slice()], 64),
            direct
        );
    }

    #[test]
    fn pieces_continue_the_stream() {
        let whole = expand(Domain::Vinegar, &[b"seed".as_slice()], 100);
        let mut xof = Expander::new(Domain::Vinegar, &[b"seed".as_slice()]);
        let head = xof.take(37);
        let tail = xof.take(63);
        assert_eq!(head[..], whole[..37]);
        assert_eq!(tail[..], whole[37..]);
        assert!(xof.take(0).is_empty());
    }

    #[test]
    fn expand_is_a_prefix_stream() {
        let short = expand(Domain::Salt, &[b"seed".as_slice()], 24);
        let long = expand(Domain::Salt, &[b"seed".as_slice()], 100);
        assert_eq!(short[..], long[..24]);
    }

    #[test]
    fn domains_separate_outputs() {
        let outputs = [
            Domain::SecretExpand,
            Domain::PublicExpand,
            Domain::Salt,
            Domain::Target,
            Domain::Vinegar,
        ]
        .map(|domain| expand(domain, &[b"seed".as_slice()], 32));
        for (i, a) in outputs.iter().enumerate() {
            for b in &outputs[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_ne!(
            expand(Domain::Salt, &[b"seed-a".as_slice()], 32),
            expand(Domain::Salt, &[b"seed-b".as_slice()], 32)
        );
    }

    #[test]
    fn message_digest_lengths() {
        for variant in Variant::ALL {
            let params = variant.params();
            assert_eq!(message_digest(params, b"msg").len(), params.digest_bytes);
        }
        assert_eq!(
            message_digest(Variant::Mayo1.params(), b"hello world"),
            hex!("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9")
        );
    }
}
