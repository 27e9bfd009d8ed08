//! Line-clear application and the attack (garbage) scoring formula.

use tetro_core::{GameState, Move, Piece, SpinType};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scales the whole attack curve without touching the formula itself —
/// lets a caller tune for a house ruleset (e.g. a slower "quick play" curve)
/// without forking this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttackConfig {
    pub multiplier: f64,
}

impl Default for AttackConfig {
    fn default() -> Self {
        AttackConfig { multiplier: 1.0 }
    }
}

/// The result of applying a move to a [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInfo {
    pub piece: Piece,
    pub spin: SpinType,
    pub lines_cleared: u32,
    pub b2b: u32,
    pub combo: u32,
    pub perfect_clear: bool,
}

const ATTACK_TABLE_NONE: [i32; 4] = [0, 1, 2, 4];
const ATTACK_TABLE_MINI: [i32; 4] = [0, 1, 0, 0];
const ATTACK_TABLE_FULL: [i32; 4] = [2, 4, 6, 0];

/// Lines sent for a placement that cleared `clear` lines of classification
/// `spin`, given the state's back-to-back and combo counters *after* the
/// clear, plus whether it was a perfect clear.
///
/// Mirrors the reference `MoveInfo::lines_sent` formula exactly, including
/// its float/int truncation mix; `clear == 0` returns 0 rather than being
/// undefined.
pub fn lines_sent(
    spin: SpinType,
    clear: u32,
    b2b: u32,
    combo: u32,
    perfect_clear: bool,
    config: &AttackConfig,
) -> i32 {
    if clear == 0 || clear > 4 {
        return 0;
    }
    let idx = (clear - 1) as usize;
    let base = match spin {
        SpinType::None => ATTACK_TABLE_NONE[idx],
        SpinType::Mini => ATTACK_TABLE_MINI[idx],
        SpinType::Full => ATTACK_TABLE_FULL[idx],
    };

    let mut lines = base as f64;
    if b2b > 1 {
        let v = ((b2b - 1) as f64 * 0.8).ln_1p();
        lines += (1.0 + v).floor();
        if b2b != 2 {
            lines += (1.0 + v - v.floor()) / 3.0;
        }
    }
    lines *= 1.0 + 0.25 * (combo as f64 - 1.0);
    if combo > 2 {
        let combo_floor = ((combo - 1) as f64 * 1.25).ln_1p();
        lines = lines.max(combo_floor);
    }

    (lines * config.multiplier).floor() as i32
        + (if perfect_clear { 10.0 * config.multiplier } else { 0.0 }).floor() as i32
}

/// Place `mv` on `state`'s board, clear any full lines, and update the
/// hold-independent bookkeeping (back-to-back, combo). Asserts the move is
/// legal and unobstructed — the same contract as the reference
/// `State::do_move`.
pub fn apply_move(state: &mut GameState, mv: Move) -> MoveInfo {
    debug_assert!(!state.board.obstructed_move(mv));
    state.board.place(mv);
    let clears = state.board.line_clears();
    let clear_count = clears.count_ones();

    if clear_count == 0 {
        log::debug!("apply_move: no clear, combo reset from {}", state.combo);
        state.combo = 0;
        return MoveInfo {
            piece: mv.piece(),
            spin: SpinType::None,
            lines_cleared: 0,
            b2b: state.b2b,
            combo: 0,
            perfect_clear: false,
        };
    }

    state.board.clear_lines(clears);
    let spin = mv.spin();
    state.b2b = if spin != SpinType::None || clear_count == 4 {
        state.b2b + 1
    } else {
        0
    };
    state.combo += 1;
    let perfect_clear = state.board.empty();
    log::debug!(
        "apply_move: cleared {} line(s), spin={:?}, b2b={}, combo={}, perfect_clear={}",
        clear_count,
        spin,
        state.b2b,
        state.combo,
        perfect_clear
    );

    MoveInfo {
        piece: mv.piece(),
        spin,
        lines_cleared: clear_count,
        b2b: state.b2b,
        combo: state.combo,
        perfect_clear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetro_core::{Piece, Rotation};

    #[test]
    fn zero_clears_sends_nothing() {
        assert_eq!(
            lines_sent(SpinType::None, 0, 0, 0, false, &AttackConfig::default()),
            0
        );
    }

    #[test]
    fn single_line_no_b2b_no_combo() {
        assert_eq!(
            lines_sent(SpinType::None, 1, 0, 1, false, &AttackConfig::default()),
            1
        );
    }

    #[test]
    fn tetris_no_b2b() {
        assert_eq!(
            lines_sent(SpinType::None, 4, 0, 1, false, &AttackConfig::default()),
            4
        );
    }

    #[test]
    fn full_t_spin_double_sends_more_than_mini() {
        let full = lines_sent(SpinType::Full, 2, 0, 1, false, &AttackConfig::default());
        let mini = lines_sent(SpinType::Mini, 2, 0, 1, false, &AttackConfig::default());
        assert!(full > mini);
    }

    #[test]
    fn perfect_clear_adds_flat_bonus() {
        let base = lines_sent(SpinType::None, 1, 0, 1, false, &AttackConfig::default());
        let pc = lines_sent(SpinType::None, 1, 0, 1, true, &AttackConfig::default());
        assert_eq!(pc - base, 10);
    }

    #[test]
    fn apply_move_without_clear_resets_combo_but_keeps_b2b() {
        let mut state = GameState::new();
        state.b2b = 3;
        state.combo = 5;
        let mv = Move::new(Piece::O, Rotation::North, 0, 0);
        let info = apply_move(&mut state, mv);
        assert_eq!(info.lines_cleared, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.b2b, 3);
    }

    #[test]
    fn apply_move_full_row_clears_and_increments_combo() {
        let mut state = GameState::new();
        // Five O pieces side by side at (0,1),(2,1),(4,1),(6,1),(8,1) fill
        // rows 0 and 1 across all ten columns with no overlap.
        for x in [0i8, 2, 4, 6] {
            state.board.place(Move::new(Piece::O, Rotation::North, x, 0));
        }
        let last = Move::new(Piece::O, Rotation::North, 8, 0);
        let info = apply_move(&mut state, last);
        assert_eq!(info.lines_cleared, 2);
        assert_eq!(state.combo, 1);
    }
}
