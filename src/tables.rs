//! Score and backpointer tables produced by a decode.
//!
//! Both tables are `K×N` and stored time-major (`t * K + z`) so that the
//! cells of one time step form a contiguous row the scorer can fill in one
//! pass. They are distinct types on purpose: scores are log-probabilities,
//! backpointers are state indices with an explicit "no predecessor" value.

/// Log best-partial-path probabilities `T1[z, t]`; `-inf` means zero.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreTable {
    n_states: usize,
    n_steps: usize,
    cells: Vec<f64>,
}

impl ScoreTable {
    pub(crate) fn new(n_states: usize, n_steps: usize) -> Self {
        Self {
            n_states,
            n_steps,
            cells: vec![f64::NEG_INFINITY; n_states * n_steps],
        }
    }

    /// Number of states `K` (rows).
    #[inline]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Number of time steps `N` (columns).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// `log T1[state, time]`.
    #[inline]
    pub fn log_score(&self, state: usize, time: usize) -> f64 {
        self.cells[time * self.n_states + state]
    }

    /// `T1[state, time]` in probability space. May underflow to zero for
    /// long sequences even when the log score is finite.
    pub fn probability(&self, state: usize, time: usize) -> f64 {
        self.log_score(state, time).exp()
    }

    /// Scores of every state at `time`.
    #[inline]
    pub fn step(&self, time: usize) -> &[f64] {
        &self.cells[time * self.n_states..(time + 1) * self.n_states]
    }

    /// Previous step (read-only) and current step (writable) for `time ≥ 1`.
    pub(crate) fn split_step_mut(&mut self, time: usize) -> (&[f64], &mut [f64]) {
        let (before, after) = self.cells.split_at_mut(time * self.n_states);
        (&before[(time - 1) * self.n_states..], &mut after[..self.n_states])
    }

    pub(crate) fn step_mut(&mut self, time: usize) -> &mut [f64] {
        &mut self.cells[time * self.n_states..(time + 1) * self.n_states]
    }
}

/// Predecessor states `T2[z, t]`.
///
/// Time 0 has no predecessor, nor does any cell whose score is `-inf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackpointerTable {
    n_states: usize,
    n_steps: usize,
    cells: Vec<usize>,
}

impl BackpointerTable {
    const NONE: usize = usize::MAX;

    pub(crate) fn new(n_states: usize, n_steps: usize) -> Self {
        Self {
            n_states,
            n_steps,
            cells: vec![Self::NONE; n_states * n_steps],
        }
    }

    #[inline]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Predecessor of `state` at `time`, or `None` if there is none.
    #[inline]
    pub fn predecessor(&self, state: usize, time: usize) -> Option<usize> {
        match self.cells[time * self.n_states + state] {
            Self::NONE => None,
            prev => Some(prev),
        }
    }

    /// Mutable raw row for `time`; entries use [`Self::encode`].
    pub(crate) fn step_mut(&mut self, time: usize) -> &mut [usize] {
        &mut self.cells[time * self.n_states..(time + 1) * self.n_states]
    }

    #[inline]
    pub(crate) fn encode(predecessor: Option<usize>) -> usize {
        predecessor.unwrap_or(Self::NONE)
    }
}
