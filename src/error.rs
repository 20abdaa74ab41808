//! Crate-wide error type.
//!
//! Every failure here is a programming error on the caller's side; the
//! library never retries or recovers, it reports and propagates.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Tensor rank or extent mismatch in a product, contraction or reshape.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("qubit index {index} is out of bounds for {qubits} qubits")]
    QubitIndexOutOfBounds { index: usize, qubits: usize },

    #[error("duplicate qubit index {0} in target list")]
    DuplicateQubitIndex(usize),

    #[error("expected {expected} qubit indices, got {given}")]
    TargetCountMismatch { expected: usize, given: usize },

    #[error("bit value must be 0 or 1, got {0}")]
    NonBinaryBit(u8),

    #[error("a state must contain at least one qubit")]
    NoQubits,

    /// The squared amplitudes of a would-be state do not sum to one.
    #[error("state vector is not normalised: sum of probabilities is {0}")]
    NotNormalised(f64),
}
