//! Validated hidden Markov model parameters.
//!
//! [`HmmModel`] can only be built through the validator, so a value of this
//! type is proof that:
//! - `K ≥ 1` states and `M ≥ 1` symbols,
//! - `π` has length `K`, `A` is `K×K`, `B` is `M×K`,
//! - every probability is finite and in `[0, 1]`,
//! - `π`, every row of `A` and every state column of `B` sum to one within
//!   the tolerance.
//!
//! Nothing is renormalised. A transition row summing to `0.9` is rejected,
//! not rescaled.

use crate::error::{DecodeError, ModelError};
use crate::utils::ln_prob;

/// Default tolerance for sum-to-one checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A discrete first-order HMM.
///
/// Probability-space parameters are kept for reporting; the scorer reads the
/// log-space copies.
#[derive(Clone, Debug, PartialEq)]
pub struct HmmModel {
    n_states: usize,
    n_symbols: usize,
    tolerance: f64,
    /// π[z]
    initial: Vec<f64>,
    /// A[from][to], row-major `K×K`.
    transition: Vec<f64>,
    /// B[symbol][state], row-major `M×K`.
    emission: Vec<f64>,
    log_initial: Vec<f64>,
    log_transition: Vec<f64>,
    log_emission: Vec<f64>,
}

impl HmmModel {
    /// Validate and build a model with [`DEFAULT_TOLERANCE`].
    ///
    /// `transition[from][to]` and `emission[symbol][state]`.
    pub fn new(
        initial: Vec<f64>,
        transition: Vec<Vec<f64>>,
        emission: Vec<Vec<f64>>,
    ) -> Result<Self, ModelError> {
        Self::with_tolerance(initial, transition, emission, DEFAULT_TOLERANCE)
    }

    /// Validate and build a model with an explicit sum-to-one tolerance.
    pub fn with_tolerance(
        initial: Vec<f64>,
        transition: Vec<Vec<f64>>,
        emission: Vec<Vec<f64>>,
        tolerance: f64,
    ) -> Result<Self, ModelError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ModelError::InvalidTolerance(tolerance));
        }

        let n_states = initial.len();
        if n_states == 0 {
            return Err(ModelError::Empty {
                what: "state space",
            });
        }
        let n_symbols = emission.len();
        if n_symbols == 0 {
            return Err(ModelError::Empty {
                what: "observation alphabet",
            });
        }

        let transition = flatten(
            transition,
            (n_states, "transition rows"),
            (n_states, "transition columns"),
        )?;
        let emission = flatten(
            emission,
            (n_symbols, "emission rows"),
            (n_states, "emission columns"),
        )?;

        check_range(&initial, "initial")?;
        check_range(&transition, "transition")?;
        check_range(&emission, "emission")?;

        check_sum(initial.iter().copied(), "initial distribution", 0, tolerance)?;
        for from in 0..n_states {
            let row = &transition[from * n_states..(from + 1) * n_states];
            check_sum(row.iter().copied(), "transition row", from, tolerance)?;
        }
        for state in 0..n_states {
            let column = (0..n_symbols).map(|sym| emission[sym * n_states + state]);
            check_sum(column, "emission column", state, tolerance)?;
        }

        Ok(Self {
            n_states,
            n_symbols,
            tolerance,
            log_initial: initial.iter().map(|&p| ln_prob(p)).collect(),
            log_transition: transition.iter().map(|&p| ln_prob(p)).collect(),
            log_emission: emission.iter().map(|&p| ln_prob(p)).collect(),
            initial,
            transition,
            emission,
        })
    }

    /// Number of hidden states `K`.
    #[inline]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Number of observable symbols `M`.
    #[inline]
    pub fn n_symbols(&self) -> usize {
        self.n_symbols
    }

    /// Tolerance the model was validated with.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn initial(&self) -> &[f64] {
        &self.initial
    }

    /// `A[from][to]`.
    pub fn transition(&self, from: usize, to: usize) -> f64 {
        self.transition[from * self.n_states + to]
    }

    /// `B[symbol][state]`.
    pub fn emission(&self, symbol: usize, state: usize) -> f64 {
        self.emission[symbol * self.n_states + state]
    }

    #[inline]
    pub fn log_initial(&self, state: usize) -> f64 {
        self.log_initial[state]
    }

    #[inline]
    pub fn log_transition(&self, from: usize, to: usize) -> f64 {
        self.log_transition[from * self.n_states + to]
    }

    #[inline]
    pub fn log_emission(&self, symbol: usize, state: usize) -> f64 {
        self.log_emission[symbol * self.n_states + state]
    }

    /// Log emission probabilities of `symbol` for every state.
    #[inline]
    pub(crate) fn log_emission_row(&self, symbol: usize) -> &[f64] {
        &self.log_emission[symbol * self.n_states..(symbol + 1) * self.n_states]
    }

    /// Check that `observations` is non-empty and every symbol is in `[0, M)`.
    ///
    /// Reports the first offending time step.
    pub fn validate_observations(&self, observations: &[usize]) -> Result<(), DecodeError> {
        if observations.is_empty() {
            return Err(DecodeError::EmptySequence);
        }
        match observations
            .iter()
            .enumerate()
            .find(|&(_, &sym)| sym >= self.n_symbols)
        {
            Some((time, &symbol)) => Err(DecodeError::ObservationRange {
                time,
                symbol,
                n_symbols: self.n_symbols,
            }),
            None => Ok(()),
        }
    }
}

/// Flatten a row-major matrix, rejecting ragged or mis-sized input.
fn flatten(
    rows: Vec<Vec<f64>>,
    (n_rows, rows_what): (usize, &'static str),
    (n_cols, cols_what): (usize, &'static str),
) -> Result<Vec<f64>, ModelError> {
    if rows.len() != n_rows {
        return Err(ModelError::DimensionMismatch {
            what: rows_what,
            expected: n_rows,
            found: rows.len(),
        });
    }
    let mut flat = Vec::with_capacity(n_rows * n_cols);
    for row in rows {
        if row.len() != n_cols {
            return Err(ModelError::DimensionMismatch {
                what: cols_what,
                expected: n_cols,
                found: row.len(),
            });
        }
        flat.extend(row);
    }
    Ok(flat)
}

fn check_range(values: &[f64], what: &'static str) -> Result<(), ModelError> {
    match values
        .iter()
        .enumerate()
        .find(|&(_, &p)| !(0.0..=1.0).contains(&p))
    {
        Some((index, &value)) => Err(ModelError::ProbabilityOutOfRange { what, index, value }),
        None => Ok(()),
    }
}

fn check_sum(
    values: impl Iterator<Item = f64>,
    what: &'static str,
    index: usize,
    tolerance: f64,
) -> Result<(), ModelError> {
    let sum: f64 = values.sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(ModelError::NotNormalized {
            what,
            index,
            sum,
            tolerance,
        });
    }
    Ok(())
}
