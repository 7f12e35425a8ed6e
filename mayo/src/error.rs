use crate::params::Variant;

/// Errors used throughout this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The random number generator failed to produce bytes.
    #[error("Entropy source failed")]
    EntropyExhausted,
    /// Every sampled vinegar assignment produced a singular linear system.
    #[error("Signing failed: no solvable system after {attempts} attempts")]
    SigningFailed {
        /// Number of vinegar samples tried.
        attempts: usize,
    },
    /// The provided signature has an incorrect length.
    #[error("Malformed signature: expected {expected} bytes, got {got}")]
    MalformedSignature {
        /// Expected signature length in bytes.
        expected: usize,
        /// Actual signature length in bytes.
        got: usize,
    },
    /// The key or signature was produced under a different parameter set.
    #[error("Variant mismatch: expected {expected}, found {found}")]
    VariantMismatch {
        /// The parameter set the caller asked for.
        expected: Variant,
        /// The parameter set the encoding belongs to.
        found: Variant,
    },
    /// Signature verification failed.
    #[error("Signature verification failed")]
    VerificationFailed,
    /// The provided key has an incorrect length.
    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength {
        /// Expected key length in bytes.
        expected: usize,
        /// Actual key length in bytes.
        got: usize,
    },
    /// The provided seed has an incorrect length.
    #[error("Invalid seed length: expected {expected}, got {got}")]
    InvalidSeedLength {
        /// Expected seed length in bytes.
        expected: usize,
        /// Actual seed length in bytes.
        got: usize,
    },
    /// The parameter set name is not recognized.
    #[error("Invalid parameter set: {0}")]
    InvalidParameterSet(String),
}

/// Result type used by this crate.
pub type MayoResult<T> = Result<T, Error>;
