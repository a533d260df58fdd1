//! Error types for model validation, decoding, model loading and reporting.
//!
//! Every variant carries the index (row, column, time step) needed to locate
//! the problem without re-running the decode.

use thiserror::Error;

/// A structural or probabilistic defect in the supplied HMM parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The state space or the observation alphabet is empty.
    #[error("{what} must not be empty")]
    Empty { what: &'static str },

    /// A vector or matrix does not have the shape implied by `K` and `M`.
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A probability is negative, greater than one, or not finite.
    ///
    /// For matrices `index` is the row-major position.
    #[error("{what}[{index}] = {value} is not a probability in [0, 1]")]
    ProbabilityOutOfRange {
        what: &'static str,
        index: usize,
        value: f64,
    },

    /// A distribution does not sum to one within the configured tolerance.
    #[error("{what} {index} sums to {sum}, expected 1 within {tolerance}")]
    NotNormalized {
        what: &'static str,
        index: usize,
        sum: f64,
        tolerance: f64,
    },

    /// The normalisation tolerance itself is negative or not finite.
    #[error("invalid normalisation tolerance {0}")]
    InvalidTolerance(f64),
}

/// Failure of a single decode invocation.
///
/// A decode that returns one of these has produced neither a path nor tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("invalid model: {0}")]
    Model(#[from] ModelError),

    /// An observed symbol lies outside `[0, n_symbols)`.
    #[error("observation at t={time} is symbol {symbol}, outside the alphabet of {n_symbols}")]
    ObservationRange {
        time: usize,
        symbol: usize,
        n_symbols: usize,
    },

    /// Every state has zero probability at `time` given the prefix `O[0..=time]`.
    #[error("observation at t={time} cannot be emitted by any reachable state")]
    UnreachableObservation { time: usize },

    #[error("observation sequence is empty")]
    EmptySequence,
}

/// Failure to obtain a model and observation sequence from a [`crate::traits::ModelSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed model document: {0}")]
    Json(#[from] serde_json::Error),

    /// Only 0- and 1-based symbol numbering is understood.
    #[error("index_base must be 0 or 1, found {0}")]
    InvalidIndexBase(usize),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Observation(#[from] DecodeError),
}

/// Failure while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialise report: {0}")]
    Json(#[from] serde_json::Error),
}
