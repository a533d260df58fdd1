use hmm_viterbi::{decode, DecodeError, HmmModel};

fn make_sym_hmm() -> HmmModel {
    HmmModel::new(
        vec![0.5, 0.5],
        vec![vec![0.5, 0.5], vec![0.5, 0.5]],
        vec![vec![0.5, 0.5], vec![0.5, 0.5]],
    )
    .unwrap()
}

#[test]
fn zero_probabilities_are_respected() {
    let model = HmmModel::new(
        vec![1.0, 0.0], // only state 0 possible initially
        vec![
            vec![1.0, 0.0], // state 1 unreachable
            vec![0.0, 1.0],
        ],
        vec![vec![1.0, 0.5], vec![0.0, 0.5]],
    )
    .unwrap();
    let obs = vec![0, 0, 0];
    let d = decode(&model, &obs).unwrap();
    assert!(d.log_probability().is_finite());
    assert_eq!(d.path(), &[0, 0, 0]);
    for t in 0..obs.len() {
        assert_eq!(d.scores().log_score(1, t), f64::NEG_INFINITY);
    }
}

#[test]
fn ties_are_deterministic() {
    let model = make_sym_hmm();
    let obs = vec![0, 1, 0, 1];
    let d1 = decode(&model, &obs).unwrap();
    let d2 = decode(&model, &obs).unwrap();
    assert_eq!(d1, d2);
}

#[test]
fn fully_symmetric_model_picks_state_zero() {
    let model = make_sym_hmm();
    let obs = vec![1, 0, 0, 1, 1];
    let d = decode(&model, &obs).unwrap();
    assert_eq!(d.path(), &[0, 0, 0, 0, 0]);
    for t in 1..obs.len() {
        assert_eq!(d.backpointers().predecessor(0, t), Some(0));
        assert_eq!(d.backpointers().predecessor(1, t), Some(0));
    }
}

#[test]
fn tie_between_higher_states_goes_to_lower_index() {
    // States 1 and 2 are exact mirrors and both beat state 0.
    let row = vec![0.2, 0.4, 0.4];
    let model = HmmModel::new(
        vec![0.2, 0.4, 0.4],
        vec![row.clone(), row.clone(), row],
        vec![vec![0.5, 0.5, 0.5], vec![0.5, 0.5, 0.5]],
    )
    .unwrap();
    let obs = vec![0, 1, 1, 0];
    let d = decode(&model, &obs).unwrap();
    assert_eq!(d.path(), &[1, 1, 1, 1]);
    for t in 1..obs.len() {
        for z in 0..3 {
            assert_eq!(d.backpointers().predecessor(z, t), Some(1));
        }
    }
}

#[test]
fn short_sequences_with_ties() {
    let model = make_sym_hmm();
    let d = decode(&model, &[1]).unwrap();
    assert_eq!(d.path(), &[0]);
    assert!((d.probability() - 0.25).abs() < 1e-12);
}

#[test]
fn unreachable_observation_reports_time() {
    // Left-to-right model: once in state 1, symbol 0 can never be emitted.
    let model = HmmModel::new(
        vec![1.0, 0.0],
        vec![vec![0.0, 1.0], vec![0.0, 1.0]],
        vec![vec![1.0, 0.0], vec![0.0, 1.0]],
    )
    .unwrap();
    assert_eq!(
        decode(&model, &[0, 1, 1, 0, 1]),
        Err(DecodeError::UnreachableObservation { time: 3 })
    );
    assert_eq!(decode(&model, &[0, 1, 1]).unwrap().path(), &[0, 1, 1]);
}
