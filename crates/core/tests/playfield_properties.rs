//! Cross-module invariants: packing round-trips and clear-line bookkeeping.

use tetro_core::{Move, Piece, Playfield, Rotation, SpinType};

#[test]
fn move_round_trips_through_bit_packing_for_every_piece_and_rotation() {
    for piece in Piece::ALL {
        for rotation in Rotation::ALL {
            let mv = Move::new(piece, rotation, 3, 7);
            assert_eq!(Move::from_bits(mv.to_bits()).unwrap(), mv);
        }
    }
}

#[test]
fn t_spin_moves_round_trip_with_their_classification() {
    for rotation in Rotation::ALL {
        for spin in [SpinType::Mini, SpinType::Full] {
            let mv = Move::new_t_spin(rotation, 2, 5, spin);
            let decoded = Move::from_bits(mv.to_bits()).unwrap();
            assert_eq!(decoded.spin(), spin);
            assert_eq!(decoded.piece(), Piece::T);
        }
    }
}

#[test]
fn clearing_every_row_empties_the_board() {
    let mut board = Playfield::new();
    for x in 0..10i8 {
        board.place(Move::new(Piece::O, Rotation::North, x & !1, 0));
    }
    assert_eq!(board.line_clears().count_ones(), 2);
    board.clear_lines(board.line_clears());
    assert!(board.empty());
}

#[test]
fn clear_lines_is_a_no_op_on_an_empty_mask() {
    let mut board = Playfield::new();
    board.place(Move::new(Piece::T, Rotation::North, 4, 5));
    let before = *board.columns();
    board.clear_lines(0);
    assert_eq!(*board.columns(), before);
}

#[test]
fn none_sentinel_round_trips() {
    assert_eq!(Move::from_bits(Move::NONE.to_bits()).unwrap(), Move::NONE);
}
