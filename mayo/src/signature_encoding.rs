use core::marker::PhantomData;

use crate::error::{Error, MayoResult};
use crate::params::MayoParameter;

/// An encoded MAYO signature, `Pack(s) || salt`.
///
/// Construction only checks the length; whether the bytes verify is decided
/// by [`VerifyingKey`](crate::VerifyingKey).
#[derive(Clone, Debug)]
pub struct Signature<P: MayoParameter> {
    bytes: Box<[u8]>,
    _marker: PhantomData<P>,
}

impl<P: MayoParameter> Signature<P> {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), P::SIG_LEN);
        Self {
            bytes: bytes.into_boxed_slice(),
            _marker: PhantomData,
        }
    }

    /// The per-signature salt, the trailing `salt_bytes` of the encoding.
    pub fn salt(&self) -> &[u8] {
        &self.bytes[P::params().s_bytes()..]
    }

    /// Serialize the signature to a new heap-allocated vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    fn check_len(len: usize) -> MayoResult<()> {
        P::VARIANT.check_signature_len(len)
    }
}

impl<P: MayoParameter> PartialEq for Signature<P> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<P: MayoParameter> Eq for Signature<P> {}

impl<P: MayoParameter> core::hash::Hash for Signature<P> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl<P: MayoParameter> AsRef<[u8]> for Signature<P> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<P: MayoParameter> TryFrom<&[u8]> for Signature<P> {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::check_len(value.len())?;
        Ok(Signature {
            bytes: value.into(),
            _marker: PhantomData,
        })
    }
}

impl<P: MayoParameter> TryFrom<Vec<u8>> for Signature<P> {
    type Error = Error;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::check_len(value.len())?;
        Ok(Signature {
            bytes: value.into_boxed_slice(),
            _marker: PhantomData,
        })
    }
}

impl<P: MayoParameter> TryFrom<&Vec<u8>> for Signature<P> {
    type Error = Error;

    fn try_from(value: &Vec<u8>) -> Result<Self, Self::Error> {
        Signature::<P>::try_from(value.as_slice())
    }
}

impl<P: MayoParameter> TryFrom<Box<[u8]>> for Signature<P> {
    type Error = Error;

    fn try_from(value: Box<[u8]>) -> Result<Self, Self::Error> {
        Self::check_len(value.len())?;
        Ok(Signature {
            bytes: value,
            _marker: PhantomData,
        })
    }
}

impl<P: MayoParameter> From<Signature<P>> for Vec<u8> {
    fn from(sig: Signature<P>) -> Vec<u8> {
        sig.bytes.into_vec()
    }
}

impl<P: MayoParameter> From<Signature<P>> for Box<[u8]> {
    fn from(sig: Signature<P>) -> Box<[u8]> {
        sig.bytes
    }
}

#[cfg(feature = "serde")]
impl<P: MayoParameter> serdect::serde::Serialize for Signature<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serdect::serde::Serializer,
    {
        serdect::slice::serialize_hex_lower_or_bin(&self.bytes, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, P: MayoParameter> serdect::serde::Deserialize<'de> for Signature<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serdect::serde::Deserializer<'de>,
    {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::try_from(bytes).map_err(serdect::serde::de::Error::custom)
    }
}

impl<P: MayoParameter> signature::SignatureEncoding for Signature<P> {
    type Repr = Box<[u8]>;
}
