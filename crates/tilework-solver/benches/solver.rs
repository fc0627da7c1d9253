//! Micro-benchmarks for the backtracking placement search.
//!
//! This benchmark suite measures full solve runs on small boards, covering a
//! quick first-fit solve, a run with heavy backtracking, an exhausted run,
//! and trace replay.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::hint;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use tilework_core::{Board, MirrorPolicy, Piece, PieceId, Shape};
use tilework_solver::{BacktrackSolver, CancelToken, Replayer};

fn pieces(drawings: &[&str]) -> Vec<Piece> {
    drawings
        .iter()
        .enumerate()
        .map(|(index, drawing)| {
            let shape: Shape = drawing.parse().unwrap();
            Piece::new(
                PieceId::new(u32::try_from(index).unwrap()),
                shape,
                MirrorPolicy::Include,
            )
        })
        .collect()
}

fn bench_solve(c: &mut Criterion) {
    let configs = [
        (
            "four_squares_4x4",
            pieces(&["##\n##", "##\n##", "##\n##", "##\n##"]),
            4,
            4,
        ),
        (
            "six_trominoes_6x3",
            pieces(&["##\n#.", "##\n#.", "##\n#.", "##\n#.", "##\n#.", "##\n#."]),
            6,
            3,
        ),
        (
            "two_skews_4x2_exhausted",
            pieces(&[".##\n##.", ".##\n##."]),
            4,
            2,
        ),
    ];

    let solver = BacktrackSolver::new();

    for (param, pieces, width, height) in configs {
        c.bench_with_input(BenchmarkId::new("solve", param), &pieces, |b, pieces| {
            b.iter_batched_ref(
                || hint::black_box(Board::new(width, height).unwrap()),
                |board| {
                    let result = solver.solve(pieces, board, &CancelToken::new()).unwrap();
                    hint::black_box(result)
                },
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_replay(c: &mut Criterion) {
    let pieces = pieces(&["##\n##", "##\n##", "##\n##", "##\n##"]);
    let mut board = Board::new(4, 4).unwrap();
    let (_outcome, trace) = BacktrackSolver::new()
        .solve(&pieces, &mut board, &CancelToken::new())
        .unwrap();

    c.bench_with_input(
        BenchmarkId::new("replay", "four_squares_4x4"),
        &trace,
        |b, trace| {
            b.iter_batched(
                || hint::black_box(Board::new(4, 4).unwrap()),
                |board| {
                    let replayed = Replayer::new(&pieces, board, trace)
                        .unwrap()
                        .run_to_end()
                        .unwrap();
                    hint::black_box(replayed)
                },
                BatchSize::SmallInput,
            );
        },
    );
}

criterion_group!(benches, bench_solve, bench_replay);
criterion_main!(benches);
