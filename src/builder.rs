use crate::engine::{DecoderConfig, ViterbiDecoder};

/// Builder for [`ViterbiDecoder`].
#[derive(Clone, Debug, Default)]
pub struct ViterbiDecoderBuilder {
    parallel_min_states: Option<usize>,
}

impl ViterbiDecoderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score a time step on the rayon pool once the model has this many states.
    /// `0` and `1` parallelise every model.
    pub fn with_parallel_min_states(mut self, n_states: usize) -> Self {
        self.parallel_min_states = Some(n_states);
        self
    }

    /// Never score in parallel.
    pub fn serial(mut self) -> Self {
        self.parallel_min_states = Some(usize::MAX);
        self
    }

    pub fn build(self) -> ViterbiDecoder {
        let mut config = DecoderConfig::default();
        if let Some(n) = self.parallel_min_states {
            config.parallel_min_states = n;
        }
        ViterbiDecoder::with_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::ViterbiDecoderBuilder;
    use crate::engine::DEFAULT_PARALLEL_MIN_STATES;

    #[test]
    fn defaults_match_config_default() {
        let decoder = ViterbiDecoderBuilder::new().build();
        assert_eq!(
            decoder.config().parallel_min_states,
            DEFAULT_PARALLEL_MIN_STATES
        );
    }

    #[test]
    fn overrides_apply() {
        let decoder = ViterbiDecoderBuilder::new()
            .with_parallel_min_states(8)
            .build();
        assert_eq!(decoder.config().parallel_min_states, 8);
        let decoder = ViterbiDecoderBuilder::new().serial().build();
        assert_eq!(decoder.config().parallel_min_states, usize::MAX);
    }
}
