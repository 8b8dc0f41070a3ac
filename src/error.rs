//! Error types for tensor fills.
//!
//! Every failure is a caller contract violation detected before the output
//! buffer is allocated, or an allocation failure while reserving it.

use thiserror::Error;

use crate::variants::Variant;

/// Errors raised while validating inputs or allocating a Hermite tensor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FockError {
    /// The coupling matrix is not square.
    #[error("coupling matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// The coupling matrix has no rows.
    #[error("coupling matrix must have at least one mode")]
    EmptyCoupling,

    /// The variant requires a fixed number of axes.
    #[error("{variant} requires dim = {expected}, got {got}")]
    DimensionMismatch {
        variant: Variant,
        expected: usize,
        got: usize,
    },

    /// The variant splits axes into bra and ket halves.
    #[error("{variant} requires an even dim, got {dim}")]
    OddDimension { variant: Variant, dim: usize },

    /// The source vector does not have one entry per mode.
    #[error("source vector must have length {expected}, got {got}")]
    SourceLength { expected: usize, got: usize },

    #[error("resolution must be at least 1")]
    ZeroResolution,

    /// `resolution^dim` does not fit in `usize`.
    #[error("tensor with resolution {resolution} and dim {dim} exceeds addressable size")]
    TensorTooLarge { resolution: usize, dim: usize },

    /// The allocator refused the output buffer.
    #[error("failed to allocate tensor of {entries} entries")]
    Allocation { entries: usize },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FockError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(err.to_string(), "coupling matrix must be square, got 2x3");

        let err = FockError::DimensionMismatch {
            variant: Variant::TwoModeSqueezer,
            expected: 4,
            got: 2,
        };
        assert_eq!(err.to_string(), "two-mode squeezer requires dim = 4, got 2");

        let err = FockError::OddDimension {
            variant: Variant::Interferometer,
            dim: 3,
        };
        assert_eq!(err.to_string(), "interferometer requires an even dim, got 3");
    }
}
