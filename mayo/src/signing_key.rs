use core::marker::PhantomData;

use rand::TryCryptoRng;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, MayoResult};
use crate::keygen::{self, ExpandedSecret};
use crate::params::MayoParameter;
use crate::sign::sign_message;
use crate::signature_encoding::Signature;
use crate::verifying_key::VerifyingKey;

// ---------------------------------------------------------------------------
// SigningKey<P>
// ---------------------------------------------------------------------------

/// A compact MAYO signing key: the secret seed `seed_sk`.
///
/// Everything the signer needs is re-derived from the seed by
/// [`SigningKey::expand`].
#[derive(Clone)]
pub struct SigningKey<P: MayoParameter> {
    seed: Box<[u8]>,
    _marker: PhantomData<P>,
}

impl<P: MayoParameter> core::fmt::Debug for SigningKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningKey")
            .field("parameter_set", &P::NAME)
            .field("seed", &"[REDACTED]")
            .finish()
    }
}

impl<P: MayoParameter> Drop for SigningKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: MayoParameter> Zeroize for SigningKey<P> {
    fn zeroize(&mut self) {
        self.seed.zeroize();
    }
}

impl<P: MayoParameter> AsRef<[u8]> for SigningKey<P> {
    fn as_ref(&self) -> &[u8] {
        &self.seed
    }
}

impl<P: MayoParameter> TryFrom<&[u8]> for SigningKey<P> {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != P::SK_LEN {
            return Err(Error::InvalidKeyLength {
                expected: P::SK_LEN,
                got: value.len(),
            });
        }
        Ok(Self::new(value))
    }
}

impl<P: MayoParameter> TryFrom<Vec<u8>> for SigningKey<P> {
    type Error = Error;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let value = Zeroizing::new(value);
        SigningKey::<P>::try_from(value.as_slice())
    }
}

impl<P: MayoParameter> TryFrom<&Vec<u8>> for SigningKey<P> {
    type Error = Error;

    fn try_from(value: &Vec<u8>) -> Result<Self, Self::Error> {
        SigningKey::<P>::try_from(value.as_slice())
    }
}

#[cfg(test)]
impl<P: MayoParameter> PartialEq for SigningKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed
    }
}

#[cfg(test)]
impl<P: MayoParameter> Eq for SigningKey<P> {}

#[cfg(feature = "serde")]
impl<P: MayoParameter> serdect::serde::Serialize for SigningKey<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serdect::serde::Serializer,
    {
        serdect::slice::serialize_hex_lower_or_bin(&self.seed, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, P: MayoParameter> serdect::serde::Deserialize<'de> for SigningKey<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serdect::serde::Deserializer<'de>,
    {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::try_from(bytes).map_err(serdect::serde::de::Error::custom)
    }
}

impl<P: MayoParameter> SigningKey<P> {
    fn new(seed: &[u8]) -> Self {
        Self {
            seed: seed.into(),
            _marker: PhantomData,
        }
    }

    /// Draws a fresh secret seed from `rng`.
    pub fn generate<R: TryCryptoRng + ?Sized>(rng: &mut R) -> MayoResult<Self> {
        let mut seed = Zeroizing::new(vec![0u8; P::SK_LEN]);
        rng.try_fill_bytes(&mut seed)
            .map_err(|_| Error::EntropyExhausted)?;
        Ok(Self::new(&seed))
    }

    /// Derives the oil matrix, `P1` and `L` from the seed.
    pub fn expand(&self) -> ExpandedSigningKey<P> {
        ExpandedSigningKey {
            inner: keygen::expand_sk(P::params(), &self.seed),
            _marker: PhantomData,
        }
    }

    /// Signs `msg` with a salt randomizer drawn from `rng`.
    ///
    /// The key is expanded for this call only; use [`ExpandedSigningKey`]
    /// when signing many messages.
    pub fn sign_with_rng<R: TryCryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> MayoResult<Signature<P>> {
        self.expand().sign_with_rng(rng, msg)
    }

    /// Returns the matching verifying key.
    pub fn verifying_key(&self) -> VerifyingKey<P> {
        VerifyingKey::from(self)
    }
}

impl<P: MayoParameter> signature::Signer<Signature<P>> for SigningKey<P> {
    fn try_sign(&self, msg: &[u8]) -> Result<Signature<P>, signature::Error> {
        self.sign_with_rng(&mut rand::rng(), msg)
            .map_err(|_| signature::Error::new())
    }
}

impl<P: MayoParameter> signature::Keypair for SigningKey<P> {
    type VerifyingKey = VerifyingKey<P>;

    fn verifying_key(&self) -> Self::VerifyingKey {
        VerifyingKey::from(self)
    }
}

// ---------------------------------------------------------------------------
// ExpandedSigningKey<P>
// ---------------------------------------------------------------------------

/// A signing key with its secret linear algebra precomputed.
///
/// Never serialized; rebuild it from the [`SigningKey`]. All secret buffers
/// are wiped on drop.
#[derive(Clone)]
pub struct ExpandedSigningKey<P: MayoParameter> {
    inner: ExpandedSecret,
    _marker: PhantomData<P>,
}

impl<P: MayoParameter> core::fmt::Debug for ExpandedSigningKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExpandedSigningKey")
            .field("parameter_set", &P::NAME)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl<P: MayoParameter> ExpandedSigningKey<P> {
    /// Signs `msg` with a salt randomizer drawn from `rng`.
    pub fn sign_with_rng<R: TryCryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> MayoResult<Signature<P>> {
        sign_message(P::params(), &self.inner, msg, rng).map(Signature::new)
    }
}

impl<P: MayoParameter> From<&SigningKey<P>> for ExpandedSigningKey<P> {
    fn from(sk: &SigningKey<P>) -> Self {
        sk.expand()
    }
}

impl<P: MayoParameter> signature::Signer<Signature<P>> for ExpandedSigningKey<P> {
    fn try_sign(&self, msg: &[u8]) -> Result<Signature<P>, signature::Error> {
        self.sign_with_rng(&mut rand::rng(), msg)
            .map_err(|_| signature::Error::new())
    }
}

// ---------------------------------------------------------------------------
// KeyPair<P>
// ---------------------------------------------------------------------------

/// A MAYO key pair containing both signing and verifying keys.
#[derive(Clone, Debug)]
pub struct KeyPair<P: MayoParameter> {
    signing_key: SigningKey<P>,
    verifying_key: VerifyingKey<P>,
}

impl<P: MayoParameter> KeyPair<P> {
    /// Generates a random key pair for the parameter set `P`.
    pub fn generate<R: TryCryptoRng + ?Sized>(rng: &mut R) -> MayoResult<Self> {
        let signing_key = SigningKey::generate(rng)?;
        let verifying_key = signing_key.verifying_key();
        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    /// Generates a key pair from a deterministic seed of `P::SK_LEN` bytes.
    pub fn from_seed(seed: &[u8]) -> MayoResult<Self> {
        if seed.len() != P::SK_LEN {
            return Err(Error::InvalidSeedLength {
                expected: P::SK_LEN,
                got: seed.len(),
            });
        }
        let signing_key = SigningKey::new(seed);
        let verifying_key = signing_key.verifying_key();
        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    /// Returns a reference to the signing key.
    pub fn signing_key(&self) -> &SigningKey<P> {
        &self.signing_key
    }

    /// Returns a reference to the verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey<P> {
        &self.verifying_key
    }

    /// Splits the pair into its signing and verifying keys.
    pub fn into_parts(self) -> (SigningKey<P>, VerifyingKey<P>) {
        (self.signing_key, self.verifying_key)
    }
}
