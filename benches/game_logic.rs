use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proof_tetris::core::{rotate, spawn_shape, Board, EngineConfig, GameEngine, ManualClock};
use proof_tetris::ledger::Ledger;
use proof_tetris::types::{GameSnapshot, MoveType, PieceKind};

fn bench_auto_drop(c: &mut Criterion) {
    let mut engine = GameEngine::new(EngineConfig::seeded(12345), Ledger::new(), ManualClock::new(0));

    c.bench_function("auto_drop_16ms", |b| {
        b.iter(|| {
            if engine.game_over() {
                engine.restart();
            }
            engine.attempt_move(MoveType::AutoDrop, black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_valid_position(c: &mut Criterion) {
    let board = Board::new();
    let shape = spawn_shape(PieceKind::T);

    c.bench_function("is_valid_position", |b| {
        b.iter(|| board.is_valid_position(black_box(&shape), black_box(4), black_box(10)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let shape = spawn_shape(PieceKind::L);

    c.bench_function("rotate", |b| b.iter(|| rotate(black_box(&shape))));
}

fn bench_ledger_append(c: &mut Criterion) {
    let snap = GameSnapshot::default();

    c.bench_function("ledger_append_sha256", |b| {
        let mut ledger = Ledger::new();
        b.iter(|| {
            if ledger.len() >= 10_000 {
                ledger.clear();
            }
            ledger.append(MoveType::AutoDrop, snap, snap, black_box(0));
        })
    });
}

fn bench_verify_all(c: &mut Criterion) {
    let snap = GameSnapshot::default();
    let mut ledger = Ledger::new();
    for i in 0..1_000 {
        ledger.append(MoveType::AutoDrop, snap, snap, i);
    }

    c.bench_function("verify_all_1000", |b| b.iter(|| ledger.verify_all()));
}

criterion_group!(
    benches,
    bench_auto_drop,
    bench_line_clear,
    bench_valid_position,
    bench_rotate,
    bench_ledger_append,
    bench_verify_all
);
criterion_main!(benches);
