//! Viterbi decoding engine.
//!
//! A decode runs three stages strictly in sequence:
//! 1. validation of the model and the observation sequence,
//! 2. a forward pass that fills the score and backpointer tables in log space,
//! 3. a backward pass that follows backpointers from the best terminal state.
//!
//! Nothing is allocated before validation succeeds, and a failed decode
//! returns no tables.

use crate::error::DecodeError;
use crate::model::HmmModel;
use crate::tables::{BackpointerTable, ScoreTable};
use crate::utils::argmax_lowest;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, debug_span, trace};

/// Default state count from which a time step is scored on the rayon pool.
pub const DEFAULT_PARALLEL_MIN_STATES: usize = 64;

/// Tuning knobs for [`ViterbiDecoder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Time steps of models with at least this many states score their states
    /// in parallel (feature `parallel`). Ignored otherwise.
    pub parallel_min_states: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            parallel_min_states: DEFAULT_PARALLEL_MIN_STATES,
        }
    }
}

/// Result of a successful decode.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoding {
    scores: ScoreTable,
    backpointers: BackpointerTable,
    path: Vec<usize>,
    log_probability: f64,
}

impl Decoding {
    /// The score table `T1` (log space).
    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    /// The backpointer table `T2`.
    pub fn backpointers(&self) -> &BackpointerTable {
        &self.backpointers
    }

    /// The most probable state sequence, one state per observation.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Log joint probability of the path and the observations.
    pub fn log_probability(&self) -> f64 {
        self.log_probability
    }

    /// Joint probability in linear space; underflows for long sequences.
    pub fn probability(&self) -> f64 {
        self.log_probability.exp()
    }

    pub fn into_path(self) -> Vec<usize> {
        self.path
    }
}

/// Viterbi MAP decoder.
///
/// Holds configuration only; models and observations are passed per call, so
/// one decoder can be shared across threads.
///
/// ```
/// use hmm_viterbi::{HmmModel, ViterbiDecoder};
///
/// let model = HmmModel::new(
///     vec![0.5, 0.5],
///     vec![vec![0.9, 0.1], vec![0.2, 0.8]],
///     vec![vec![0.8, 0.3], vec![0.2, 0.7]],
/// )
/// .unwrap();
/// let decoding = ViterbiDecoder::new().decode(&model, &[0, 0, 1, 1, 1]).unwrap();
/// assert_eq!(decoding.path().len(), 5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ViterbiDecoder {
    config: DecoderConfig,
}

impl ViterbiDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode `observations` under `model`.
    ///
    /// # Errors
    /// - [`DecodeError::EmptySequence`] if `observations` is empty,
    /// - [`DecodeError::ObservationRange`] for a symbol outside the alphabet,
    /// - [`DecodeError::UnreachableObservation`] if at some step every state
    ///   has zero probability.
    pub fn decode(
        &self,
        model: &HmmModel,
        observations: &[usize],
    ) -> Result<Decoding, DecodeError> {
        let span = debug_span!(
            "viterbi_decode",
            n_states = model.n_states(),
            n_symbols = model.n_symbols(),
            n_steps = observations.len()
        );
        let _enter = span.enter();

        debug_span!("validate").in_scope(|| model.validate_observations(observations))?;

        let (scores, backpointers) =
            debug_span!("forward_score").in_scope(|| self.forward_score(model, observations))?;

        let (path, log_probability) =
            debug_span!("reconstruct").in_scope(|| reconstruct(&scores, &backpointers));

        debug!(log_probability, "decoded");
        Ok(Decoding {
            scores,
            backpointers,
            path,
            log_probability,
        })
    }

    /// Decode and keep only the path.
    pub fn decode_path(
        &self,
        model: &HmmModel,
        observations: &[usize],
    ) -> Result<Vec<usize>, DecodeError> {
        self.decode(model, observations).map(Decoding::into_path)
    }

    fn forward_score(
        &self,
        model: &HmmModel,
        observations: &[usize],
    ) -> Result<(ScoreTable, BackpointerTable), DecodeError> {
        let k = model.n_states();
        let n = observations.len();
        let mut scores = ScoreTable::new(k, n);
        let mut backpointers = BackpointerTable::new(k, n);

        let emit0 = model.log_emission_row(observations[0]);
        for (z, cell) in scores.step_mut(0).iter_mut().enumerate() {
            *cell = model.log_initial(z) + emit0[z];
        }
        check_reachable(scores.step(0), 0)?;

        for (t, &symbol) in observations.iter().enumerate().skip(1) {
            let (prev, cur) = scores.split_step_mut(t);
            let back = backpointers.step_mut(t);
            self.score_step(model, symbol, prev, cur, back);
            check_reachable(cur, t)?;
            trace!(t, best = cur.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        }

        Ok((scores, backpointers))
    }

    /// Fill one time step from the fully materialised previous step.
    fn score_step(
        &self,
        model: &HmmModel,
        symbol: usize,
        prev: &[f64],
        cur: &mut [f64],
        back: &mut [usize],
    ) {
        let emit = model.log_emission_row(symbol);

        #[cfg(feature = "parallel")]
        {
            if model.n_states() >= self.config.parallel_min_states {
                cur.par_iter_mut()
                    .zip(back.par_iter_mut())
                    .enumerate()
                    .for_each(|(z, (score, bp))| {
                        let (s, p) = score_state(model, prev, emit[z], z);
                        *score = s;
                        *bp = BackpointerTable::encode(p);
                    });
                return;
            }
        }

        for (z, (score, bp)) in cur.iter_mut().zip(back.iter_mut()).enumerate() {
            let (s, p) = score_state(model, prev, emit[z], z);
            *score = s;
            *bp = BackpointerTable::encode(p);
        }
    }
}

/// Decode with the default configuration.
pub fn decode(model: &HmmModel, observations: &[usize]) -> Result<Decoding, DecodeError> {
    ViterbiDecoder::new().decode(model, observations)
}

/// Best score and predecessor of state `to`, given the previous step.
#[inline]
fn score_state(
    model: &HmmModel,
    prev: &[f64],
    log_emit: f64,
    to: usize,
) -> (f64, Option<usize>) {
    if log_emit == f64::NEG_INFINITY {
        return (f64::NEG_INFINITY, None);
    }
    let candidates = prev
        .iter()
        .enumerate()
        .map(|(from, &p)| p + model.log_transition(from, to));
    match argmax_lowest(candidates) {
        Some((from, best)) => (best + log_emit, Some(from)),
        None => (f64::NEG_INFINITY, None),
    }
}

fn check_reachable(step: &[f64], time: usize) -> Result<(), DecodeError> {
    if step.iter().all(|&v| v == f64::NEG_INFINITY) {
        debug!(time, "no state can explain the observation");
        return Err(DecodeError::UnreachableObservation { time });
    }
    Ok(())
}

/// Follow backpointers from the best terminal state.
///
/// Requires a fully populated pair of tables whose every step has at least
/// one finite score, which `forward_score` guarantees.
fn reconstruct(scores: &ScoreTable, backpointers: &BackpointerTable) -> (Vec<usize>, f64) {
    let n = scores.n_steps();
    let best = argmax_lowest(scores.step(n - 1).iter().copied());
    debug_assert!(best.is_some(), "terminal step has no finite score");
    let (last, log_probability) = best.unwrap_or((0, f64::NEG_INFINITY));

    let mut path = vec![0; n];
    path[n - 1] = last;
    let mut state = last;
    for t in (1..n).rev() {
        // A finite cell at t ≥ 1 always has a finite predecessor.
        let predecessor = backpointers.predecessor(state, t);
        debug_assert!(predecessor.is_some(), "state {state} at t={t} has no predecessor");
        state = predecessor.unwrap_or(state);
        path[t - 1] = state;
    }
    (path, log_probability)
}
