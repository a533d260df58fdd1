#![cfg(feature = "heavy")]
use hmm_viterbi::{HmmModel, ViterbiDecoderBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn uniform_model(n_states: usize, n_symbols: usize, rng: &mut StdRng) -> HmmModel {
    let mut distribution = |n: usize| {
        let raw: Vec<f64> = (0..n).map(|_| rng.gen_range(0.1..1.0)).collect();
        let sum: f64 = raw.iter().sum();
        raw.into_iter().map(|v| v / sum).collect::<Vec<f64>>()
    };
    let initial = distribution(n_states);
    let transition: Vec<Vec<f64>> = (0..n_states).map(|_| distribution(n_states)).collect();
    let columns: Vec<Vec<f64>> = (0..n_states).map(|_| distribution(n_symbols)).collect();
    let emission = (0..n_symbols)
        .map(|sym| columns.iter().map(|col| col[sym]).collect())
        .collect();
    HmmModel::new(initial, transition, emission).unwrap()
}

#[test]
fn heavy_stress_long_sequence() {
    let mut rng = StdRng::seed_from_u64(123);
    let model = uniform_model(128, 20, &mut rng);
    let obs: Vec<usize> = (0..50_000).map(|_| rng.gen_range(0..20)).collect();
    let d = ViterbiDecoderBuilder::new().build().decode(&model, &obs).unwrap();
    assert_eq!(d.path().len(), obs.len());
    assert!(d.log_probability().is_finite());
}
