//! Seams between the decoding engine and its collaborators.
//!
//! A [`ModelSource`] supplies a validated model together with the observation
//! sequence to decode; a [`ReportSink`] renders the outcome. Neither is needed
//! to decode: [`crate::ViterbiDecoder::decode`] takes plain parameters.

use crate::engine::Decoding;
use crate::error::{ReportError, SourceError};
use crate::model::HmmModel;

/// A model paired with the observation sequence to decode under it.
///
/// Observations are 0-based symbol indices already checked against the
/// model's alphabet.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    pub model: HmmModel,
    pub observations: Vec<usize>,
}

/// Anything that can produce a [`Problem`]: a file, a constant, a service.
pub trait ModelSource {
    fn load(&self) -> Result<Problem, SourceError>;
}

/// Consumer of a finished decode.
///
/// Sinks only read the decoding. Any 1-based presentation of states or
/// symbols happens here, never in the engine.
pub trait ReportSink {
    fn write_report(&mut self, problem: &Problem, decoding: &Decoding) -> Result<(), ReportError>;
}
