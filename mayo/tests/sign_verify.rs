//! End-to-end sign/verify behaviour for every parameter set.

use mayo::{
    Error, ExpandedSigningKey, KeyPair, Mayo1, Mayo2, Mayo3, Mayo5, MayoParameter, Signature,
    SigningKey, Variant, VerifyingKey,
};
use rand::{SeedableRng, rngs::StdRng};
use signature::{Signer, Verifier};

macro_rules! test_parameter_sets {
    ($name:ident) => {
        mod $name {
            #[test]
            fn mayo1() {
                super::$name::<mayo::Mayo1>();
            }

            #[test]
            fn mayo2() {
                super::$name::<mayo::Mayo2>();
            }

            #[test]
            fn mayo3() {
                super::$name::<mayo::Mayo3>();
            }

            #[test]
            fn mayo5() {
                super::$name::<mayo::Mayo5>();
            }
        }
    };
}

fn sign_verify<P: MayoParameter>() {
    let kp = KeyPair::<P>::generate(&mut rand::rng()).unwrap();
    let msg = b"Hello, world!";
    let sig = kp.signing_key().try_sign(msg).unwrap();
    kp.verifying_key().verify(msg, &sig).unwrap();
}
test_parameter_sets!(sign_verify);

fn encoded_sizes<P: MayoParameter>() {
    let params = P::params();
    let kp = KeyPair::<P>::generate(&mut StdRng::seed_from_u64(1)).unwrap();
    let sig = kp
        .signing_key()
        .sign_with_rng(&mut StdRng::seed_from_u64(2), b"sizes")
        .unwrap();

    assert_eq!(kp.signing_key().as_ref().len(), params.sk_size);
    assert_eq!(kp.verifying_key().as_ref().len(), params.pk_size);
    assert_eq!(sig.as_ref().len(), params.sig_size);
    assert_eq!(sig.salt().len(), params.salt_bytes);
    assert_eq!(P::SIG_LEN, params.sig_size);
}
test_parameter_sets!(encoded_sizes);

fn deterministic_with_seeded_rng<P: MayoParameter>() {
    let seed = vec![0x17u8; P::SK_LEN];
    let kp1 = KeyPair::<P>::from_seed(&seed).unwrap();
    let kp2 = KeyPair::<P>::from_seed(&seed).unwrap();
    assert_eq!(kp1.verifying_key(), kp2.verifying_key());

    let sig1 = kp1
        .signing_key()
        .sign_with_rng(&mut StdRng::seed_from_u64(42), b"repeatable")
        .unwrap();
    let sig2 = kp2
        .signing_key()
        .sign_with_rng(&mut StdRng::seed_from_u64(42), b"repeatable")
        .unwrap();
    assert_eq!(sig1, sig2);
}
test_parameter_sets!(deterministic_with_seeded_rng);

fn successive_signatures_differ<P: MayoParameter>() {
    let kp = KeyPair::<P>::from_seed(&vec![3u8; P::SK_LEN]).unwrap();
    let expanded = ExpandedSigningKey::from(kp.signing_key());
    let mut rng = StdRng::seed_from_u64(99);
    let sig1 = expanded.sign_with_rng(&mut rng, b"again").unwrap();
    let sig2 = expanded.sign_with_rng(&mut rng, b"again").unwrap();
    assert_ne!(sig1, sig2);
    assert_ne!(sig1.salt(), sig2.salt());
    kp.verifying_key().try_verify(b"again", &sig1).unwrap();
    kp.verifying_key().try_verify(b"again", &sig2).unwrap();
}
test_parameter_sets!(successive_signatures_differ);

fn tampering_is_detected<P: MayoParameter>() {
    let kp = KeyPair::<P>::from_seed(&vec![0xc3u8; P::SK_LEN]).unwrap();
    let vk = kp.verifying_key();
    let sig = kp
        .signing_key()
        .sign_with_rng(&mut StdRng::seed_from_u64(5), b"tamper")
        .unwrap();
    let bytes = sig.to_vec();

    let salt_start = P::params().s_bytes();
    for index in [0, salt_start / 2, salt_start - 1, salt_start, bytes.len() - 1] {
        let mut tampered = bytes.clone();
        tampered[index] ^= 0x01;
        let tampered = Signature::<P>::try_from(tampered).unwrap();
        assert!(
            matches!(
                vk.try_verify(b"tamper", &tampered),
                Err(Error::VerificationFailed)
            ),
            "byte {index} flip accepted"
        );
    }
    assert!(vk.verify(b"tampeR", &sig).is_err());
}
test_parameter_sets!(tampering_is_detected);

#[test]
fn keys_from_other_variants_are_rejected() {
    let kp = KeyPair::<Mayo1>::from_seed(&[1u8; 24]).unwrap();
    let sig = kp
        .signing_key()
        .sign_with_rng(&mut StdRng::seed_from_u64(0), b"variant")
        .unwrap();

    assert!(matches!(
        Signature::<Mayo2>::try_from(sig.as_ref()),
        Err(Error::VariantMismatch {
            expected: Variant::Mayo2,
            found: Variant::Mayo1,
        })
    ));
    assert!(matches!(
        VerifyingKey::<Mayo3>::try_from(kp.verifying_key().as_ref()),
        Err(Error::VariantMismatch {
            expected: Variant::Mayo3,
            found: Variant::Mayo1,
        })
    ));
    // Same seed length, different parameter set: a valid key but a different one.
    let other = KeyPair::<Mayo2>::from_seed(&[1u8; 24]).unwrap();
    assert!(!other.verifying_key().is_valid(b"variant", sig.as_ref()));
}

#[test]
fn signing_key_bytes_reproduce_the_key_pair() {
    let kp = KeyPair::<Mayo5>::generate(&mut StdRng::seed_from_u64(8)).unwrap();
    let sk = SigningKey::<Mayo5>::try_from(kp.signing_key().as_ref()).unwrap();
    assert_eq!(&sk.verifying_key(), kp.verifying_key());

    let sig = sk.try_sign(b"restored").unwrap();
    assert!(kp.verifying_key().is_valid(b"restored", sig.as_ref()));
}

#[test]
fn variant_names_parse() {
    for (name, variant) in [
        ("MAYO_1", Variant::Mayo1),
        ("MAYO_2", Variant::Mayo2),
        ("MAYO_3", Variant::Mayo3),
        ("MAYO_5", Variant::Mayo5),
    ] {
        assert_eq!(name.parse::<Variant>().unwrap(), variant);
        assert_eq!(variant.to_string(), name);
    }
    assert_eq!(Mayo3::VARIANT.params().security_level, 3);
    assert!(matches!(
        "mayo-2".parse::<Variant>(),
        Err(Error::InvalidParameterSet(_))
    ));
}
