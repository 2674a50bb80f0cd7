//! Benchmark harness using Criterion.
//!
//! Measures:
//! - Full ranking recompute (flush)
//! - Full scroll (reveal loop with incremental re-ranking)

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use frostboard::{Scoreboard, Verdict};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const PROBLEMS: usize = 10;

const VERDICTS: [Verdict; 4] = [
    Verdict::Accepted,
    Verdict::WrongAnswer,
    Verdict::RuntimeError,
    Verdict::TimeLimitExceed,
];

/// A started contest with `teams` teams and random live submissions.
fn populated_board(teams: usize, submissions: usize, seed: u64) -> Scoreboard {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = Scoreboard::new();
    let names: Vec<String> = (0..teams).map(|i| format!("team{:04}", i)).collect();
    for name in &names {
        board.register_team(name).unwrap();
    }
    board.start_contest(300, PROBLEMS).unwrap();

    let mut time = 1u32;
    for _ in 0..submissions {
        time += rng.gen_range(0..2);
        let team = &names[rng.gen_range(0..teams)];
        let problem = rng.gen_range(0..PROBLEMS);
        let verdict = VERDICTS[rng.gen_range(0..6).min(3)];
        board.apply_submission(team, problem, verdict, time).unwrap();
    }
    board
}

/// Freeze the board and stage more random submissions.
fn frozen_board(teams: usize, seed: u64) -> Scoreboard {
    let mut board = populated_board(teams, teams * 20, seed);
    board.freeze().unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5ca1ab1e);
    let names: Vec<String> = (0..teams).map(|i| format!("team{:04}", i)).collect();
    let mut time = 250u32;
    for _ in 0..teams * 5 {
        time += rng.gen_range(0..2);
        let team = &names[rng.gen_range(0..teams)];
        let problem = rng.gen_range(0..PROBLEMS);
        let verdict = VERDICTS[rng.gen_range(0..6).min(3)];
        board.apply_submission(team, problem, verdict, time).unwrap();
    }
    board
}

fn bench_flush(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush");
    for &teams in [100usize, 1_000].iter() {
        let board = populated_board(teams, teams * 20, 42);
        group.bench_with_input(BenchmarkId::from_parameter(teams), &board, |b, board| {
            b.iter_batched(
                || board.clone(),
                |mut board| black_box(board.flush()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll");
    group.sample_size(20);
    for &teams in [100usize, 1_000].iter() {
        let board = frozen_board(teams, 7);
        group.bench_with_input(BenchmarkId::from_parameter(teams), &board, |b, board| {
            b.iter_batched(
                || board.clone(),
                |mut board| black_box(board.scroll().unwrap()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flush, bench_scroll);
criterion_main!(benches);
