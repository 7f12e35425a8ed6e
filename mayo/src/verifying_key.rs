use core::marker::PhantomData;

use crate::error::{Error, MayoResult};
use crate::keygen::compact_key_gen;
use crate::params::MayoParameter;
use crate::signature_encoding::Signature;
use crate::signing_key::SigningKey;
use crate::verify::verify_signature;

/// A MAYO verifying key, `seed_pk || Pack(P3)`.
#[derive(Clone, Debug)]
pub struct VerifyingKey<P: MayoParameter> {
    bytes: Box<[u8]>,
    _marker: PhantomData<P>,
}

impl<P: MayoParameter> AsRef<[u8]> for VerifyingKey<P> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<P: MayoParameter> TryFrom<&[u8]> for VerifyingKey<P> {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        P::VARIANT.check_public_key_len(value.len())?;
        Ok(Self {
            bytes: value.into(),
            _marker: PhantomData,
        })
    }
}

impl<P: MayoParameter> TryFrom<Vec<u8>> for VerifyingKey<P> {
    type Error = Error;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        P::VARIANT.check_public_key_len(value.len())?;
        Ok(Self {
            bytes: value.into_boxed_slice(),
            _marker: PhantomData,
        })
    }
}

impl<P: MayoParameter> TryFrom<&Vec<u8>> for VerifyingKey<P> {
    type Error = Error;

    fn try_from(value: &Vec<u8>) -> Result<Self, Self::Error> {
        VerifyingKey::<P>::try_from(value.as_slice())
    }
}

impl<P: MayoParameter> PartialEq for VerifyingKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<P: MayoParameter> Eq for VerifyingKey<P> {}

impl<P: MayoParameter> core::hash::Hash for VerifyingKey<P> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

#[cfg(feature = "serde")]
impl<P: MayoParameter> serdect::serde::Serialize for VerifyingKey<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serdect::serde::Serializer,
    {
        serdect::slice::serialize_hex_lower_or_bin(&self.bytes, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, P: MayoParameter> serdect::serde::Deserialize<'de> for VerifyingKey<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serdect::serde::Deserializer<'de>,
    {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::try_from(bytes).map_err(serdect::serde::de::Error::custom)
    }
}

impl<P: MayoParameter> VerifyingKey<P> {
    /// Verifies `signature` over `msg`.
    ///
    /// Returns [`Error::VerificationFailed`] for a well-formed signature that
    /// does not satisfy the public map.
    pub fn try_verify(&self, msg: &[u8], signature: &Signature<P>) -> MayoResult<()> {
        verify_signature(P::params(), &self.bytes, msg, signature.as_ref())
    }

    /// Verifies an encoded signature, folding every failure into `false`.
    pub fn is_valid(&self, msg: &[u8], signature: &[u8]) -> bool {
        verify_signature(P::params(), &self.bytes, msg, signature).is_ok()
    }
}

impl<P: MayoParameter> From<&SigningKey<P>> for VerifyingKey<P> {
    fn from(sk: &SigningKey<P>) -> Self {
        Self {
            bytes: compact_key_gen(P::params(), sk.as_ref()).into_boxed_slice(),
            _marker: PhantomData,
        }
    }
}

impl<P: MayoParameter> signature::Verifier<Signature<P>> for VerifyingKey<P> {
    fn verify(&self, msg: &[u8], signature: &Signature<P>) -> Result<(), signature::Error> {
        self.try_verify(msg, signature)
            .map_err(|_| signature::Error::new())
    }
}
