//! Per-piece collision precomputation.
//!
//! `CollisionMap` borrows the [`Playfield`] it was built from (the type
//! system enforces the "do not mutate the board while a collision map is
//! alive" rule from the resource-lifetime contract — there is no separate
//! runtime check for it).

use tetro_core::{piece_cells, Piece, Playfield, Rotation};

/// `cmap[x][r]` (x biased by +2 to give rotation kicks headroom past the
/// visible [0, 9] columns) is a bitmap whose set bits are rows at which
/// `piece` rotated to `r` with its anchor in column `x` would collide with
/// `board` or go out of bounds.
pub struct CollisionMap<'b> {
    board: &'b Playfield,
    piece: Piece,
    map: [[u64; 4]; 14],
}

/// Columns are stored biased by this much so that kicks landing at x = -2
/// (the farthest a kick offset ever reaches) still index in bounds.
pub const X_BIAS: i8 = 2;
const MAP_WIDTH: i8 = 14;

fn cell_obstruction(board: &Playfield, nx: i8, dy: i8) -> u64 {
    if !(0..10).contains(&nx) {
        return !0u64;
    }
    let col = board.column(nx);
    if dy < 0 {
        !(!col << (-dy) as u32)
    } else {
        col >> dy as u32
    }
}

impl<'b> CollisionMap<'b> {
    pub fn new(board: &'b Playfield, piece: Piece) -> Self {
        log::trace!("CollisionMap::new: piece={:?}", piece);
        let mut map = [[0u64; 4]; 14];
        let rotations: &[Rotation] = if matches!(piece, Piece::O) {
            &[Rotation::North]
        } else {
            &Rotation::ALL
        };
        for biased_x in 0..MAP_WIDTH {
            let x = biased_x - X_BIAS;
            for &r in rotations {
                let cells = piece_cells(piece, r);
                let mut bitmap = 0u64;
                for (dx, dy) in cells {
                    bitmap |= cell_obstruction(board, x + dx, dy);
                }
                map[biased_x as usize][r.index() as usize] = bitmap;
            }
            if matches!(piece, Piece::O) {
                let v = map[biased_x as usize][Rotation::North.index() as usize];
                for r in &Rotation::ALL[1..] {
                    map[biased_x as usize][r.index() as usize] = v;
                }
            }
        }
        CollisionMap { board, piece, map }
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn board(&self) -> &Playfield {
        self.board
    }

    /// `x` and the result are in real board-column coordinates (no bias).
    pub fn get(&self, x: i8, r: Rotation) -> u64 {
        let biased = x + X_BIAS;
        if !(0..MAP_WIDTH).contains(&biased) {
            return !0u64;
        }
        self.map[biased as usize][r.index() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_t_north_blocked_only_below_floor() {
        let board = Playfield::new();
        let cmap = CollisionMap::new(&board, Piece::T);
        // anchor row -1 doesn't exist; row 0 should be free (floor is below row 0)
        assert_eq!(cmap.get(4, Rotation::North) & 1, 0);
    }

    #[test]
    fn out_of_bounds_column_is_fully_obstructed() {
        let board = Playfield::new();
        let cmap = CollisionMap::new(&board, Piece::I);
        assert_eq!(cmap.get(-5, Rotation::North), !0u64);
        assert_eq!(cmap.get(20, Rotation::North), !0u64);
    }

    #[test]
    fn o_piece_all_rotations_share_the_same_map() {
        let board = Playfield::new();
        let cmap = CollisionMap::new(&board, Piece::O);
        let n = cmap.get(4, Rotation::North);
        for r in Rotation::ALL {
            assert_eq!(cmap.get(4, r), n);
        }
    }

    #[test]
    fn stacked_row_obstructs_landing_above_it() {
        let mut board = Playfield::new();
        for x in [0i8, 2, 4, 6, 8] {
            board.place(tetro_core::Move::new(Piece::O, Rotation::North, x, 0));
        }
        let cmap = CollisionMap::new(&board, Piece::T);
        // with row 0 occupied under column 4, a T anchored at y=0 (cell y=0 present)
        // must collide.
        assert_ne!(cmap.get(4, Rotation::North) & 1, 0);
    }
}
