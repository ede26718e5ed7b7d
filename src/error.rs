//! Error types for feature extraction.
//!
//! Every computation in this crate is deterministic and pure, so there is no
//! transient failure category. The only way an operation fails is a caller
//! contract violation: a bad parameter or a malformed sequence. Those are
//! reported as [`FeatureError`] values instead of panics, and no partial
//! result is ever returned alongside an error.

/// A violated precondition of a feature extraction operation.
///
/// All variants are "invalid argument" errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("input sequence `{0}` is empty")]
    EmptyInput(&'static str),

    #[error("integration degree must be in [2, 4], got {0}")]
    InvalidDegree(u8),

    #[error("degree {degree} integration needs at least {required} samples, got {actual}")]
    TooShort {
        degree: u8,
        required: usize,
        actual: usize,
    },

    #[error("length mismatch: {what} (expected {expected}, got {actual})")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("invalid range {start}..{end} for length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    #[error("cannot normalize a zero-length vector")]
    ZeroNorm,

    #[error("unknown channel `{0}`")]
    UnknownChannel(String),
}

impl FeatureError {
    /// Always true; kept so callers can branch on the error kind without
    /// matching every variant.
    pub fn is_invalid_argument(&self) -> bool {
        true
    }

    pub(crate) fn invalid(name: &'static str, reason: &'static str) -> Self {
        FeatureError::InvalidParameter { name, reason }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Fails with [`FeatureError::EmptyInput`] when `data` has no samples.
pub(crate) fn ensure_non_empty(name: &'static str, data: &[f64]) -> Result<()> {
    if data.is_empty() {
        Err(FeatureError::EmptyInput(name))
    } else {
        Ok(())
    }
}
