//! Model sources: JSON model files and the built-in sample.
//!
//! A model document looks like:
//!
//! ```json
//! {
//!   "initial": [1.0, 0.0],
//!   "transition": [[0.7, 0.3], [0.0, 1.0]],
//!   "emission": [[0.9, 0.2], [0.1, 0.8]],
//!   "observations": [1, 1, 2],
//!   "index_base": 1,
//!   "tolerance": 1e-6
//! }
//! ```
//!
//! `emission` is indexed `[symbol][state]`. `index_base` (default `0`) says
//! how `observations` are numbered; they are converted to 0-based here.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{DecodeError, SourceError};
use crate::model::{HmmModel, DEFAULT_TOLERANCE};
use crate::samples::three_state_example_with_tolerance;
use crate::traits::{ModelSource, Problem};

/// Serialized form of a [`Problem`].
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    pub initial: Vec<f64>,
    pub transition: Vec<Vec<f64>>,
    pub emission: Vec<Vec<f64>>,
    pub observations: Vec<usize>,
    #[serde(default)]
    pub index_base: usize,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

impl ModelDocument {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Validate the model and convert observations to 0-based symbols.
    ///
    /// `tolerance` overrides the document's own tolerance when given.
    pub fn into_problem(self, tolerance: Option<f64>) -> Result<Problem, SourceError> {
        if self.index_base > 1 {
            return Err(SourceError::InvalidIndexBase(self.index_base));
        }
        let tolerance = tolerance.or(self.tolerance).unwrap_or(DEFAULT_TOLERANCE);
        let model =
            HmmModel::with_tolerance(self.initial, self.transition, self.emission, tolerance)?;

        let base = self.index_base;
        let observations = self
            .observations
            .iter()
            .enumerate()
            .map(|(time, &symbol)| {
                symbol
                    .checked_sub(base)
                    .ok_or_else(|| DecodeError::ObservationRange {
                        time,
                        symbol,
                        n_symbols: model.n_symbols(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        // Range errors carry the symbol as numbered in the document.
        model
            .validate_observations(&observations)
            .map_err(|err| match err {
                DecodeError::ObservationRange {
                    time,
                    symbol,
                    n_symbols,
                } => DecodeError::ObservationRange {
                    time,
                    symbol: symbol + base,
                    n_symbols,
                },
                other => other,
            })?;

        Ok(Problem {
            model,
            observations,
        })
    }
}

/// Loads a [`Problem`] from a JSON model file.
#[derive(Clone, Debug)]
pub struct JsonModelSource {
    path: PathBuf,
    tolerance: Option<f64>,
}

impl JsonModelSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            tolerance: None,
        }
    }

    /// Override the tolerance stated in the file.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for JsonModelSource {
    fn load(&self) -> Result<Problem, SourceError> {
        debug!(path = %self.path.display(), "loading model");
        let file = File::open(&self.path)?;
        ModelDocument::from_reader(BufReader::new(file))?.into_problem(self.tolerance)
    }
}

/// The built-in three-state sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleModelSource {
    tolerance: Option<f64>,
}

impl SampleModelSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}

impl ModelSource for SampleModelSource {
    fn load(&self) -> Result<Problem, SourceError> {
        let tolerance = self.tolerance.unwrap_or(DEFAULT_TOLERANCE);
        Ok(three_state_example_with_tolerance(tolerance)?)
    }
}
