//! The move generator: collision maps, the bitboard reachability search,
//! the move-list façade, and placement scoring.

mod attack;
mod collision;
mod move_list;
mod movegen;

pub use attack::{apply_move, lines_sent, AttackConfig, MoveInfo};
pub use collision::CollisionMap;
pub use move_list::{MoveList, MAX_MOVES};
pub use movegen::generate_into;

use tetro_core::{Piece, Playfield};

/// Every reachable placement of `piece` on `board`.
pub fn generate_moves(board: &Playfield, piece: Piece) -> MoveList {
    MoveList::generate(board, piece)
}

/// Placements for `current`, plus (if distinct, and `current` has at least
/// one placement) placements for `hold`.
pub fn generate_moves_with_hold(
    board: &Playfield,
    current: Piece,
    hold: Option<Piece>,
    force: bool,
) -> MoveList {
    MoveList::with_hold(board, current, hold, force)
}
