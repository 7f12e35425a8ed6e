use core::fmt;
use core::str::FromStr;

use crate::error::{Error, MayoResult};

/// Field size. Every MAYO parameter set works over GF(16).
pub(crate) const Q: usize = 16;

/// Fixed-output hash applied to the message before signing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageHash {
    /// SHA-256, 32-byte digest.
    Sha256,
    /// SHA-384, 48-byte digest.
    Sha384,
    /// SHA-512, 64-byte digest.
    Sha512,
}

/// The numeric description of one MAYO parameter set.
///
/// All records are `'static` and shared read-only; obtain one with
/// [`Variant::params`] or [`MayoParameter::params`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParameterSet {
    /// The variant this record describes.
    pub variant: Variant,
    /// Number of variables per block.
    pub n: usize,
    /// Number of equations.
    pub m: usize,
    /// Oil variables per block.
    pub o: usize,
    /// Vinegar variables per block (`n - o`).
    pub v: usize,
    /// Number of blocks in a signature.
    pub k: usize,
    /// Field size.
    pub q: usize,
    /// Salt length in bytes.
    pub salt_bytes: usize,
    /// Message digest length in bytes.
    pub digest_bytes: usize,
    /// Public seed length in bytes.
    pub pk_seed_bytes: usize,
    /// Secret seed length in bytes.
    pub sk_seed_bytes: usize,
    /// Encoded verifying key length in bytes.
    pub pk_size: usize,
    /// Encoded signing key length in bytes.
    pub sk_size: usize,
    /// Encoded signature length in bytes.
    pub sig_size: usize,
    /// NIST security category.
    pub security_level: u8,
    /// Low coefficients of the reduction polynomial
    /// `f(z) = z^m + f_tail[3] z^3 + f_tail[2] z^2 + f_tail[1] z + f_tail[0]`.
    pub f_tail: [u8; 4],
    /// Hash used to compress messages.
    pub message_hash: MessageHash,
}

impl ParameterSet {
    /// Bytes of one packed m-vector.
    pub const fn m_bytes(&self) -> usize {
        self.m.div_ceil(2)
    }

    /// `u64` limbs holding one m-vector.
    pub const fn m_vec_limbs(&self) -> usize {
        self.m.div_ceil(16)
    }

    /// Bytes of the packed oil matrix `O`.
    pub const fn o_bytes(&self) -> usize {
        (self.v * self.o).div_ceil(2)
    }

    /// Bytes of one packed vinegar vector.
    pub const fn v_bytes(&self) -> usize {
        self.v.div_ceil(2)
    }

    /// Bytes of the packed random offset `r`.
    pub const fn r_bytes(&self) -> usize {
        (self.k * self.o).div_ceil(2)
    }

    /// Bytes of the packed signature vector `s`.
    pub const fn s_bytes(&self) -> usize {
        (self.k * self.n).div_ceil(2)
    }

    /// Number of m-vector entries in the upper-triangular `P1`.
    pub const fn p1_entries(&self) -> usize {
        self.v * (self.v + 1) / 2
    }

    /// Number of m-vector entries in `P2`.
    pub const fn p2_entries(&self) -> usize {
        self.v * self.o
    }

    /// Number of m-vector entries in the upper-triangular `P3`.
    pub const fn p3_entries(&self) -> usize {
        self.o * (self.o + 1) / 2
    }

    /// Packed size of `P1`.
    pub const fn p1_bytes(&self) -> usize {
        self.p1_entries() * self.m_bytes()
    }

    /// Packed size of `P2`.
    pub const fn p2_bytes(&self) -> usize {
        self.p2_entries() * self.m_bytes()
    }

    /// Packed size of `P3`.
    pub const fn p3_bytes(&self) -> usize {
        self.p3_entries() * self.m_bytes()
    }
}

pub(crate) const MAYO_1: ParameterSet = ParameterSet {
    variant: Variant::Mayo1,
    n: 86,
    m: 78,
    o: 8,
    v: 78,
    k: 10,
    q: Q,
    salt_bytes: 24,
    digest_bytes: 32,
    pk_seed_bytes: 16,
    sk_seed_bytes: 24,
    pk_size: 1420,
    sk_size: 24,
    sig_size: 454,
    security_level: 1,
    f_tail: [8, 1, 1, 0],
    message_hash: MessageHash::Sha256,
};

pub(crate) const MAYO_2: ParameterSet = ParameterSet {
    variant: Variant::Mayo2,
    n: 81,
    m: 64,
    o: 17,
    v: 64,
    k: 4,
    q: Q,
    salt_bytes: 24,
    digest_bytes: 32,
    pk_seed_bytes: 16,
    sk_seed_bytes: 24,
    pk_size: 4912,
    sk_size: 24,
    sig_size: 186,
    security_level: 1,
    f_tail: [8, 0, 2, 8],
    message_hash: MessageHash::Sha256,
};

pub(crate) const MAYO_3: ParameterSet = ParameterSet {
    variant: Variant::Mayo3,
    n: 118,
    m: 108,
    o: 10,
    v: 108,
    k: 11,
    q: Q,
    salt_bytes: 32,
    digest_bytes: 48,
    pk_seed_bytes: 16,
    sk_seed_bytes: 32,
    pk_size: 2986,
    sk_size: 32,
    sig_size: 681,
    security_level: 3,
    f_tail: [8, 0, 1, 7],
    message_hash: MessageHash::Sha384,
};

pub(crate) const MAYO_5: ParameterSet = ParameterSet {
    variant: Variant::Mayo5,
    n: 154,
    m: 142,
    o: 12,
    v: 142,
    k: 12,
    q: Q,
    salt_bytes: 40,
    digest_bytes: 64,
    pk_seed_bytes: 16,
    sk_seed_bytes: 40,
    pk_size: 5554,
    sk_size: 40,
    sig_size: 964,
    security_level: 5,
    f_tail: [4, 0, 8, 1],
    message_hash: MessageHash::Sha512,
};

/// The closed set of supported MAYO parameter sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    /// MAYO_1, NIST category 1.
    Mayo1,
    /// MAYO_2, NIST category 1 with short signatures.
    Mayo2,
    /// MAYO_3, NIST category 3.
    Mayo3,
    /// MAYO_5, NIST category 5.
    Mayo5,
}

impl Variant {
    /// Every variant, in ascending security order.
    pub const ALL: [Variant; 4] = [Self::Mayo1, Self::Mayo2, Self::Mayo3, Self::Mayo5];

    /// The parameter record for this variant.
    pub fn params(self) -> &'static ParameterSet {
        match self {
            Self::Mayo1 => &MAYO_1,
            Self::Mayo2 => &MAYO_2,
            Self::Mayo3 => &MAYO_3,
            Self::Mayo5 => &MAYO_5,
        }
    }

    /// The canonical name, e.g. `"MAYO_2"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mayo1 => "MAYO_1",
            Self::Mayo2 => "MAYO_2",
            Self::Mayo3 => "MAYO_3",
            Self::Mayo5 => "MAYO_5",
        }
    }

    /// Finds the variant whose encoded verifying key has `len` bytes.
    pub fn from_public_key_len(len: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.params().pk_size == len)
    }

    /// Finds the variant whose encoded signature has `len` bytes.
    pub fn from_signature_len(len: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.params().sig_size == len)
    }

    /// Checks an encoded signature length against this variant.
    pub(crate) fn check_signature_len(self, len: usize) -> MayoResult<()> {
        let expected = self.params().sig_size;
        if len == expected {
            return Ok(());
        }
        match Self::from_signature_len(len) {
            Some(found) => Err(Error::VariantMismatch {
                expected: self,
                found,
            }),
            None => Err(Error::MalformedSignature { expected, got: len }),
        }
    }

    /// Checks an encoded verifying key length against this variant.
    pub(crate) fn check_public_key_len(self, len: usize) -> MayoResult<()> {
        let expected = self.params().pk_size;
        if len == expected {
            return Ok(());
        }
        match Self::from_public_key_len(len) {
            Some(found) => Err(Error::VariantMismatch {
                expected: self,
                found,
            }),
            None => Err(Error::InvalidKeyLength { expected, got: len }),
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MAYO_1" => Ok(Self::Mayo1),
            "MAYO_2" => Ok(Self::Mayo2),
            "MAYO_3" => Ok(Self::Mayo3),
            "MAYO_5" => Ok(Self::Mayo5),
            _ => Err(Error::InvalidParameterSet(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait defining a MAYO parameter set at compile time.
pub trait MayoParameter:
    Sized + Clone + Copy + fmt::Debug + Default + Send + Sync + 'static
{
    /// Human-readable name, e.g. "MAYO_1".
    const NAME: &'static str;
    /// The runtime variant tag.
    const VARIANT: Variant;
    /// Signing key length in bytes.
    const SK_LEN: usize;
    /// Verifying key length in bytes.
    const VK_LEN: usize;
    /// Signature length in bytes.
    const SIG_LEN: usize;

    /// The parameter record backing this marker type.
    fn params() -> &'static ParameterSet {
        Self::VARIANT.params()
    }
}

macro_rules! define_mayo_parameter {
    ($name:ident, $str_name:expr, $variant:ident, $record:ident) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[doc = concat!("Parameter set for `", $str_name, "`.")]
        pub struct $name;

        impl MayoParameter for $name {
            const NAME: &'static str = $str_name;
            const VARIANT: Variant = Variant::$variant;
            const SK_LEN: usize = $record.sk_size;
            const VK_LEN: usize = $record.pk_size;
            const SIG_LEN: usize = $record.sig_size;
        }
    };
}

define_mayo_parameter!(Mayo1, "MAYO_1", Mayo1, MAYO_1);
define_mayo_parameter!(Mayo2, "MAYO_2", Mayo2, MAYO_2);
define_mayo_parameter!(Mayo3, "MAYO_3", Mayo3, MAYO_3);
define_mayo_parameter!(Mayo5, "MAYO_5", Mayo5, MAYO_5);
