use crate::geometry::Piece;
use crate::playfield::Playfield;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board plus the bookkeeping the scoring formula needs: the hold slot and
/// the running back-to-back / combo counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState {
    pub board: Playfield,
    /// `None` is the empty hold slot — preferred here over an eighth
    /// `NO_PIECE` enum tag because it is exhaustively checked by the
    /// compiler rather than by a runtime range assertion.
    pub hold: Option<Piece>,
    pub b2b: u32,
    pub combo: u32,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            board: Playfield::new(),
            hold: None,
            b2b: 0,
            combo: 0,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let s = GameState::new();
        assert!(s.board.empty());
        assert_eq!(s.hold, None);
        assert_eq!(s.b2b, 0);
        assert_eq!(s.combo, 0);
    }
}
