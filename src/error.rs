//! Errors of the configuration layer
//!
//! Contract violations between a solver and the numerical kernels
//! (ghost widths, depths) are not represented here, they panic.
use thiserror::Error;

/// Result type of the configuration layer
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Key not found in one of the static registries
    #[error("unknown {kind} {name:?}, expected one of {expected:?}")]
    UnknownKey {
        /// Registry that was queried
        kind: &'static str,
        /// Requested key
        name: String,
        /// Registered keys
        expected: &'static [&'static str],
    },
    /// Parameter outside of its admissible range
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Explanation
        reason: String,
    },
}

impl Error {
    pub(crate) fn unknown_key(
        kind: &'static str,
        name: &str,
        expected: &'static [&'static str],
    ) -> Self {
        Self::UnknownKey {
            kind,
            name: name.to_owned(),
            expected,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
