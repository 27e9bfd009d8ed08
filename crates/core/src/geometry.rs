//! Piece shapes, rotation, and the SRS+ kick tables.
//!
//! Every constant here is part of the external contract: two implementations
//! that disagree on a single kick offset will disagree on reachable squares,
//! so nothing in this file is "close enough" — it is transcribed bit-exact
//! from the reference tables.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Column a new piece spawns in.
pub const SPAWN_COL: i8 = 4;
/// Row a new piece spawns at.
pub const SPAWN_ROW: i8 = 21;

/// One of the seven tetrominoes. Ordering matters: it is the bit pattern
/// stored in the `piece` field of a packed [`crate::Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Piece {
    I = 0,
    O = 1,
    T = 2,
    L = 3,
    J = 4,
    S = 5,
    Z = 6,
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::L,
        Piece::J,
        Piece::S,
        Piece::Z,
    ];

    pub const fn from_index(i: u8) -> Option<Piece> {
        match i {
            0 => Some(Piece::I),
            1 => Some(Piece::O),
            2 => Some(Piece::T),
            3 => Some(Piece::L),
            4 => Some(Piece::J),
            5 => Some(Piece::S),
            6 => Some(Piece::Z),
            _ => None,
        }
    }

    /// Whether this piece's geometry belongs to the I kick family (the other
    /// family, LJSZT, shares one set of kick tables).
    pub const fn is_i_family(self) -> bool {
        matches!(self, Piece::I)
    }
}

/// One of the four facings a piece can be rotated to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Rotation {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub const fn from_index(i: u8) -> Rotation {
        match i & 3 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn cw(self) -> Rotation {
        Rotation::from_index(self.index() + 1)
    }

    pub const fn ccw(self) -> Rotation {
        Rotation::from_index(self.index() + 3)
    }

    pub const fn flip(self) -> Rotation {
        Rotation::from_index(self.index() + 2)
    }
}

/// The four occupied cell offsets of `piece` facing `Rotation::North`,
/// relative to the piece's anchor at `(0, 0)`.
const NORTH_CELLS: [[(i8, i8); 4]; 7] = [
    [(-1, 0), (0, 0), (1, 0), (2, 0)],   // I
    [(0, 0), (1, 0), (0, 1), (1, 1)],    // O
    [(-1, 0), (0, 0), (1, 0), (0, 1)],   // T
    [(-1, 0), (0, 0), (1, 0), (1, 1)],   // L
    [(-1, 0), (0, 0), (1, 0), (-1, 1)],  // J
    [(-1, 0), (0, 0), (0, 1), (1, 1)],   // S
    [(-1, 1), (0, 1), (0, 0), (1, 0)],   // Z
];

const fn rotate_cell(rotation: Rotation, (x, y): (i8, i8)) -> (i8, i8) {
    match rotation {
        Rotation::North => (x, y),
        Rotation::East => (y, -x),
        Rotation::South => (-x, -y),
        Rotation::West => (-y, x),
    }
}

/// The four occupied cell offsets of `(piece, rotation)`, relative to the
/// piece's anchor at `(0, 0)`.
pub fn piece_cells(piece: Piece, rotation: Rotation) -> [(i8, i8); 4] {
    let north = NORTH_CELLS[piece as usize];
    let mut out = [(0i8, 0i8); 4];
    let mut i = 0;
    while i < 4 {
        out[i] = rotate_cell(rotation, north[i]);
        i += 1;
    }
    out
}

type KickTable = [(i8, i8); 5];
type KickTable180 = [(i8, i8); 6];

const LJSZT_CW: [KickTable; 4] = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

const LJSZT_CCW: [KickTable; 4] = [
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

const I_CW: [KickTable; 4] = [
    [(1, 0), (2, 0), (-1, 0), (-1, -1), (2, 2)],
    [(0, -1), (-1, -1), (2, -1), (-1, 1), (2, -2)],
    [(-1, 0), (1, 0), (-2, 0), (1, 1), (-2, -2)],
    [(0, 1), (1, 1), (-2, 1), (1, -1), (-2, 2)],
];

const I_CCW: [KickTable; 4] = [
    [(0, -1), (-1, -1), (2, -1), (2, -2), (-1, 1)],
    [(-1, 0), (-2, 0), (1, 0), (-2, -2), (1, 1)],
    [(0, 1), (-2, 1), (1, 1), (-2, 2), (1, -1)],
    [(1, 0), (2, 0), (-1, 0), (2, 2), (-1, -1)],
];

const LJSZT_180: [KickTable180; 4] = [
    [(0, 0), (0, 1), (1, 1), (-1, 1), (1, 0), (-1, 0)],
    [(0, 0), (1, 0), (1, 2), (1, 1), (0, 2), (0, 1)],
    [(0, 0), (0, -1), (-1, -1), (1, -1), (-1, 0), (1, 0)],
    [(0, 0), (-1, 0), (-1, 2), (-1, 1), (0, 2), (0, 1)],
];

const I_180: [KickTable180; 4] = [
    [(1, -1), (1, 0), (2, 0), (0, 0), (2, -1), (0, -1)],
    [(-1, -1), (0, -1), (0, 1), (0, 0), (-1, 1), (-1, 0)],
    [(-1, 1), (-1, 0), (-2, 0), (0, 0), (-2, 1), (0, 1)],
    [(1, 1), (0, 1), (0, 3), (0, 2), (1, 3), (1, 2)],
];

/// CW kick candidates for the LJSZT family, indexed by starting rotation.
pub fn ljszt_kicks_cw(from: Rotation) -> KickTable {
    LJSZT_CW[from.index() as usize]
}

/// CCW kick candidates for the LJSZT family, indexed by starting rotation.
pub fn ljszt_kicks_ccw(from: Rotation) -> KickTable {
    LJSZT_CCW[from.index() as usize]
}

/// 180 degree kick candidates for the LJSZT family, indexed by starting rotation.
pub fn ljszt_kicks_180(from: Rotation) -> KickTable180 {
    LJSZT_180[from.index() as usize]
}

/// CW kick candidates for the I piece, indexed by starting rotation.
pub fn i_kicks_cw(from: Rotation) -> KickTable {
    I_CW[from.index() as usize]
}

/// CCW kick candidates for the I piece, indexed by starting rotation.
pub fn i_kicks_ccw(from: Rotation) -> KickTable {
    I_CCW[from.index() as usize]
}

/// 180 degree kick candidates for the I piece, indexed by starting rotation.
pub fn i_kicks_180(from: Rotation) -> KickTable180 {
    I_180[from.index() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_north_cells() {
        assert_eq!(
            piece_cells(Piece::T, Rotation::North),
            [(-1, 0), (0, 0), (1, 0), (0, 1)]
        );
    }

    #[test]
    fn t_east_is_rotated_north() {
        let north = NORTH_CELLS[Piece::T as usize];
        let east = piece_cells(Piece::T, Rotation::East);
        for (n, e) in north.iter().zip(east.iter()) {
            assert_eq!(*e, rotate_cell(Rotation::East, *n));
        }
    }

    #[test]
    fn rotation_roundtrips() {
        for r in Rotation::ALL {
            assert_eq!(r.cw().ccw(), r);
            assert_eq!(r.cw().cw(), r.flip());
            assert_eq!(r.flip().flip(), r);
        }
    }

    #[test]
    fn ljszt_cw_first_kick_is_identity() {
        for r in Rotation::ALL {
            assert_eq!(ljszt_kicks_cw(r)[0], (0, 0));
            assert_eq!(ljszt_kicks_ccw(r)[0], (0, 0));
        }
    }

    #[test]
    fn i_kick_tables_do_not_start_with_identity() {
        assert_ne!(i_kicks_cw(Rotation::North)[0], (0, 0));
    }

    #[test]
    fn piece_ordering_matches_bit_pattern() {
        assert_eq!(Piece::from_index(0), Some(Piece::I));
        assert_eq!(Piece::from_index(6), Some(Piece::Z));
        assert_eq!(Piece::from_index(7), None);
    }
}
