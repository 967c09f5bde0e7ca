use morpho_array::{ArrayError, Dim4};
use thiserror::Error;

/// Errors raised by the morphological operations.
///
/// The rank and extent variants are all invalid-argument failures: they are
/// raised synchronously before any output is allocated, so a failing call
/// never produces a partially computed array.
#[derive(Error, Debug, PartialEq)]
pub enum MorphError {
    /// The mask does not have the rank the operation requires.
    #[error("mask must be {expected}-dimensional, got a {actual}-dimensional mask")]
    InvalidMaskRank {
        /// Rank the operation requires (2 for planar ops, 3 for volumetric).
        expected: usize,
        /// Effective rank of the provided mask.
        actual: usize,
    },

    /// The input rank is outside the range the operation supports.
    #[error("input must have between {min} and {max} dimensions, got {actual}")]
    InvalidInputRank {
        /// Minimum supported input rank.
        min: usize,
        /// Maximum supported input rank.
        max: usize,
        /// Effective rank of the provided input.
        actual: usize,
    },

    /// A spatial mask extent is even; neighborhoods must have a center.
    #[error("mask extents must be odd, got {0}")]
    EvenMaskExtent(usize),

    /// The spatial mask extents are not all equal.
    #[error("mask extents must be equal in each spatial dimension, got {0}")]
    NonSquareMask(Dim4),

    /// The mask has no nonzero element, so no neighborhood is defined.
    #[error("mask has no nonzero elements")]
    EmptyMask,

    /// The two operands of a metric do not have the same shape.
    #[error("shape mismatch: {expected} vs {actual}")]
    ShapeMismatch {
        /// Shape of the first operand.
        expected: Dim4,
        /// Shape of the second operand.
        actual: Dim4,
    },

    /// Error propagated from the array container.
    #[error(transparent)]
    ArrayError(#[from] ArrayError),
}
