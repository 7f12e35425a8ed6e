//! MAYO multivariate oil-and-vinegar signatures in Rust.
//!
//! Implements compact key generation, signing and verification over GF(16)
//! for the four MAYO parameter sets `MAYO_1`, `MAYO_2`, `MAYO_3` and
//! `MAYO_5`.
//!
//! ```
//! use mayo::{KeyPair, Mayo2};
//!
//! let kp = KeyPair::<Mayo2>::generate(&mut rand::rng())?;
//! let sig = kp.signing_key().sign_with_rng(&mut rand::rng(), b"hello mayo")?;
//! kp.verifying_key().try_verify(b"hello mayo", &sig)?;
//! # Ok::<(), mayo::Error>(())
//! ```
//!
//! The signing key is the secret seed only. Signing many messages with the
//! same key is cheaper through [`ExpandedSigningKey`], which caches the
//! secret linear algebra derived from the seed.

mod codec;
mod error;
mod gf16;
mod keygen;
mod matrix;
mod params;
mod sign;
mod signature_encoding;
mod signing_key;
mod solve;
mod verify;
mod verifying_key;
mod xof;

pub use error::{Error, MayoResult};
pub use params::{
    Mayo1, Mayo2, Mayo3, Mayo5, MayoParameter, MessageHash, ParameterSet, Variant,
};
pub use signature;
pub use signature_encoding::Signature;
pub use signing_key::{ExpandedSigningKey, KeyPair, SigningKey};
pub use verifying_key::VerifyingKey;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use signature::{Keypair, Signer, Verifier};

    #[test]
    fn test_mayo2_hello_scenario() {
        let kp = KeyPair::<Mayo2>::generate(&mut rand::rng()).unwrap();
        let sig = kp
            .signing_key()
            .sign_with_rng(&mut rand::rng(), b"hello mayo")
            .unwrap();

        assert!(kp.verifying_key().is_valid(b"hello mayo", sig.as_ref()));
        assert!(!kp.verifying_key().is_valid(b"hello mayo!", sig.as_ref()));

        let mut tampered = sig.to_vec();
        let salt_start = Mayo2::params().s_bytes();
        tampered[salt_start] ^= 0x01;
        assert!(!kp.verifying_key().is_valid(b"hello mayo", &tampered));
    }

    #[test]
    fn test_signature_traits() {
        let kp = KeyPair::<Mayo1>::generate(&mut StdRng::seed_from_u64(21)).unwrap();
        let sig: Signature<Mayo1> = kp.signing_key().try_sign(b"trait message").unwrap();
        kp.verifying_key().verify(b"trait message", &sig).unwrap();
        assert!(kp.verifying_key().verify(b"other message", &sig).is_err());
        assert_eq!(&kp.signing_key().verifying_key(), kp.verifying_key());
        assert_eq!(
            &Keypair::verifying_key(kp.signing_key()),
            kp.verifying_key()
        );
    }

    #[test]
    fn test_expanded_key_matches_compact_key() {
        let kp = KeyPair::<Mayo3>::from_seed(&[0x33u8; 32]).unwrap();
        let expanded = kp.signing_key().expand();
        let a = expanded
            .sign_with_rng(&mut StdRng::seed_from_u64(5), b"cached")
            .unwrap();
        let b = kp
            .signing_key()
            .sign_with_rng(&mut StdRng::seed_from_u64(5), b"cached")
            .unwrap();
        assert_eq!(a, b);
        kp.verifying_key().try_verify(b"cached", &a).unwrap();
    }

    #[test]
    fn test_wrong_key_fails() {
        let kp1 = KeyPair::<Mayo5>::from_seed(&[1u8; 40]).unwrap();
        let kp2 = KeyPair::<Mayo5>::from_seed(&[2u8; 40]).unwrap();
        let sig = kp1
            .signing_key()
            .sign_with_rng(&mut StdRng::seed_from_u64(0), b"message")
            .unwrap();
        assert!(matches!(
            kp2.verifying_key().try_verify(b"message", &sig),
            Err(Error::VerificationFailed)
        ));
        kp1.verifying_key().try_verify(b"message", &sig).unwrap();
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        fn fixture() -> (KeyPair<Mayo2>, Signature<Mayo2>) {
            let kp = KeyPair::<Mayo2>::from_seed(&[4u8; 24]).unwrap();
            let sig = kp
                .signing_key()
                .sign_with_rng(&mut StdRng::seed_from_u64(9), b"serde")
                .unwrap();
            (kp, sig)
        }

        #[test]
        fn test_signing_key_serde_json_roundtrip() {
            let (kp, _) = fixture();
            let json = serde_json::to_string(kp.signing_key()).unwrap();
            let sk: SigningKey<Mayo2> = serde_json::from_str(&json).unwrap();
            assert_eq!(&sk, kp.signing_key());
        }

        #[test]
        fn test_verifying_key_serde_json_roundtrip() {
            let (kp, _) = fixture();
            let json = serde_json::to_string(kp.verifying_key()).unwrap();
            assert!(json.starts_with('"'));
            let vk: VerifyingKey<Mayo2> = serde_json::from_str(&json).unwrap();
            assert_eq!(&vk, kp.verifying_key());
        }

        #[test]
        fn test_signature_postcard_roundtrip() {
            let (kp, sig) = fixture();
            let bytes = postcard::to_allocvec(&sig).unwrap();
            let sig2: Signature<Mayo2> = postcard::from_bytes(&bytes).unwrap();
            assert_eq!(sig, sig2);
            kp.verifying_key().try_verify(b"serde", &sig2).unwrap();
        }

        #[test]
        fn test_signature_rejects_wrong_length_on_deserialize() {
            let json = serde_json::to_string(&"00".repeat(185)).unwrap();
            assert!(serde_json::from_str::<Signature<Mayo2>>(&json).is_err());
        }
    }
}
