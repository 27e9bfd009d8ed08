use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetro_core::{Piece, Playfield};
use tetro_engine::generate_moves;

fn bench_generate_moves(c: &mut Criterion) {
    let board = Playfield::new();
    for piece in Piece::ALL {
        c.bench_function(&format!("generate_moves_{:?}", piece), |b| {
            b.iter(|| generate_moves(black_box(&board), black_box(piece)))
        });
    }
}

fn bench_generate_moves_on_cluttered_board(c: &mut Criterion) {
    let mut board = Playfield::new();
    for x in 0..10i8 {
        if x != 4 {
            board.place(tetro_core::Move::new(
                Piece::O,
                tetro_core::Rotation::North,
                if x >= 8 { 8 } else { x & !1 },
                0,
            ));
        }
    }
    for piece in Piece::ALL {
        c.bench_function(&format!("generate_moves_cluttered_{:?}", piece), |b| {
            b.iter(|| generate_moves(black_box(&board), black_box(piece)))
        });
    }
}

criterion_group!(
    benches,
    bench_generate_moves,
    bench_generate_moves_on_cluttered_board
);
criterion_main!(benches);
