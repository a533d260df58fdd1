use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use hmm_viterbi::{HmmModel, ViterbiDecoderBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_obs(rng: &mut StdRng, len: usize, vocab: usize) -> Vec<usize> {
    (0..len).map(|_| rng.gen_range(0..vocab)).collect()
}

fn demo_hmm(n_states: usize, n_symbols: usize) -> HmmModel {
    let mut rng = StdRng::seed_from_u64(7);
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

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory() / 1024,
        None => 0,
    }
}

fn bench_long_sequences(c: &mut Criterion) {
    let model = demo_hmm(2, 2);
    let decoder = ViterbiDecoderBuilder::new().build();
    let mut group = c.benchmark_group("viterbi_long_sequence");
    for &len in &[10_000usize, 50_000] {
        group.bench_function(format!("viterbi_len_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(44);
                    random_obs(&mut rng, len, 2)
                },
                |obs| {
                    let before = rss_kib();
                    let decoding = decoder.decode(&model, &obs);
                    let after = rss_kib();
                    criterion::black_box(decoding.map(|d| d.log_probability()).ok());
                    eprintln!(
                        "RSS KiB delta (viterbi {len}): {}",
                        after.saturating_sub(before)
                    );
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

fn bench_wide_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("viterbi_wide_model");
    for &n_states in &[32usize, 128, 256] {
        let model = demo_hmm(n_states, 8);
        let mut rng = StdRng::seed_from_u64(11);
        let obs = random_obs(&mut rng, 1_000, 8);
        let serial = ViterbiDecoderBuilder::new().serial().build();
        let parallel = ViterbiDecoderBuilder::new()
            .with_parallel_min_states(1)
            .build();
        group.bench_function(format!("serial_k{n_states}"), |b| {
            b.iter(|| criterion::black_box(serial.decode(&model, &obs).ok()))
        });
        group.bench_function(format!("parallel_k{n_states}"), |b| {
            b.iter(|| criterion::black_box(parallel.decode(&model, &obs).ok()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_long_sequences, bench_wide_models);
criterion_main!(benches);
