//! Error types for basis enumeration, operator assembly, and evolution.

use thiserror::Error;

/// All failure modes of the crate.
///
/// Every failure here is synchronous and local to a single call; none are
/// transient, so there is no retry machinery anywhere.
#[derive(Debug, Error, PartialEq)]
pub enum BlockadeError {
    /// A per-site parameter array whose length disagrees with the number of
    /// atoms.
    #[error("per-site parameter has length {got}, expected {expected}")]
    ParamLength { expected: usize, got: usize },

    /// More atoms than fit in the `u64` occupation representation.
    #[error("atom count {0} exceeds the 64-atom occupation limit")]
    AtomCount(usize),

    /// An independent set naming an atom outside the array.
    #[error("independent set references atom {index} of {natoms}")]
    AtomIndex { index: usize, natoms: usize },

    /// A configuration that yields no valid basis states.
    #[error("blockade subspace is empty")]
    EmptyBasis,

    /// A NaN or infinite value at the point it would be written into the
    /// operator.
    #[error("non-finite matrix entry at ({row}, {col})")]
    NonFinite { row: usize, col: usize },

    /// An attempt to store a lower-triangle entry; only the upper triangle
    /// may be populated, with the lower supplied by the Hermitian view.
    #[error("lower-triangle write at ({row}, {col})")]
    LowerTriangle { row: usize, col: usize },
}

pub type BlockadeResult<T> = Result<T, BlockadeError>;
