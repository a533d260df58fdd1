//! Built-in sample model.
//!
//! Three left-to-right states emitting five symbols. The last state's
//! transition row is an explicit self-loop so that every row sums to one.

use crate::error::ModelError;
use crate::model::{HmmModel, DEFAULT_TOLERANCE};
use crate::traits::Problem;

/// Observed symbols `1, 3, 2, 4, 4, 5` in 0-based form.
pub const THREE_STATE_OBSERVATIONS: [usize; 6] = [0, 2, 1, 3, 3, 4];

/// Viterbi path of [`three_state_example`].
pub const THREE_STATE_PATH: [usize; 6] = [0, 1, 2, 2, 2, 2];

/// Probability of [`THREE_STATE_PATH`] jointly with the observations.
pub const THREE_STATE_PROBABILITY: f64 = 7.3728e-4;

/// The three-state model and its observation sequence.
pub fn three_state_example() -> Result<Problem, ModelError> {
    three_state_example_with_tolerance(DEFAULT_TOLERANCE)
}

/// [`three_state_example`] validated with a caller-chosen sum-to-one tolerance.
pub fn three_state_example_with_tolerance(tolerance: f64) -> Result<Problem, ModelError> {
    let model = HmmModel::with_tolerance(
        vec![1.0, 0.0, 0.0],
        vec![
            vec![0.6, 0.4, 0.0],
            vec![0.0, 0.2, 0.8],
            vec![0.0, 0.0, 1.0],
        ],
        // emission[symbol][state]
        vec![
            vec![0.4, 0.0, 0.0],
            vec![0.2, 0.2, 0.2],
            vec![0.2, 0.6, 0.1],
            vec![0.1, 0.1, 0.4],
            vec![0.1, 0.1, 0.3],
        ],
        tolerance,
    )?;
    Ok(Problem {
        model,
        observations: THREE_STATE_OBSERVATIONS.to_vec(),
    })
}
