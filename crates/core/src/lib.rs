//! Fundamental types shared by the move generator: piece geometry, the
//! bitboard playfield, the packed move value, and game state.

mod error;
mod geometry;
mod mv;
mod playfield;
mod state;

pub use error::CoreError;
pub use geometry::{
    i_kicks_180, i_kicks_cw, i_kicks_ccw, ljszt_kicks_180, ljszt_kicks_cw, ljszt_kicks_ccw,
    piece_cells, Piece, Rotation, SPAWN_COL, SPAWN_ROW,
};
pub use mv::{Move, PieceCoordinates, SpinType};
pub use playfield::Playfield;
pub use state::GameState;
