//! Viterbi decoding for discrete first-order hidden Markov models.
//!
//! Given an initial distribution `π`, a transition matrix `A` and an emission
//! matrix `B`, the decoder finds the single most probable hidden-state
//! sequence for a finite sequence of observed symbols.
//!
//! ## Core idea
//! 1. Build an [`HmmModel`]; construction validates dimensions, ranges and
//!    normalisation, so a model value is always decodable.
//! 2. Run [`ViterbiDecoder::decode`] (or [`decode`]) on an observation
//!    sequence. Scoring happens in log space, so long sequences do not
//!    underflow.
//! 3. Read the path, the score table and the backpointer table off the
//!    returned [`Decoding`].
//!
//! Ties between equally good predecessors (and terminal states) always go to
//! the lowest state index, so decoding is fully deterministic.
//!
//! ## Quick start
//! ```
//! use hmm_viterbi::{decode, HmmModel};
//!
//! let model = HmmModel::new(
//!     vec![1.0, 0.0, 0.0],
//!     vec![
//!         vec![0.6, 0.4, 0.0],
//!         vec![0.0, 0.2, 0.8],
//!         vec![0.0, 0.0, 1.0],
//!     ],
//!     vec![
//!         vec![0.4, 0.0, 0.0],
//!         vec![0.2, 0.2, 0.2],
//!         vec![0.2, 0.6, 0.1],
//!         vec![0.1, 0.1, 0.4],
//!         vec![0.1, 0.1, 0.3],
//!     ],
//! )
//! .unwrap();
//! let decoding = decode(&model, &[0, 2, 1, 3, 3, 4]).unwrap();
//! assert_eq!(decoding.path(), &[0, 1, 2, 2, 2, 2]);
//! ```
//!
//! ## Around the engine
//! - [`source`]: load a model and observations from JSON, or use the sample.
//! - [`report`]: render a decoding as CSV, an aligned table, or JSON.
//!
//! With the `parallel` feature (default) the states of one time step are
//! scored on the rayon pool for models with many states.

pub mod builder;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod samples;
pub mod source;
pub mod tables;
pub mod traits;
pub mod utils;

pub use crate::builder::ViterbiDecoderBuilder;
pub use crate::engine::{decode, DecoderConfig, Decoding, ViterbiDecoder};
pub use crate::error::{DecodeError, ModelError, ReportError, SourceError};
pub use crate::model::HmmModel;
pub use crate::tables::{BackpointerTable, ScoreTable};
pub use crate::traits::{ModelSource, Problem, ReportSink};
