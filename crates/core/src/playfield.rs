//! The bitboard playfield: ten 64-bit column words, one bit per row.

use crate::mv::Move;
use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const WIDTH: i8 = 10;
/// Rows below this are the visible floor; rows up to 63 are scratch space a
/// piece may pass through on its way down from spawn.
pub const VISIBLE_HEIGHT: i8 = 20;

/// Ten column bitmaps. Bit `y` of `col[x]` is set iff cell `(x, y)` is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Playfield {
    col: [u64; WIDTH as usize],
}

impl Default for Playfield {
    fn default() -> Self {
        Playfield { col: [0; WIDTH as usize] }
    }
}

impl Playfield {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw column word for `x`. Out-of-bounds columns are "all ones" —
    /// perpetually obstructed — matching the convention the collision map
    /// relies on for off-board neighbor lookups.
    pub fn column(&self, x: i8) -> u64 {
        if (0..WIDTH).contains(&x) {
            self.col[x as usize]
        } else {
            !0u64
        }
    }

    pub fn columns(&self) -> &[u64; WIDTH as usize] {
        &self.col
    }

    pub fn occupied(&self, x: i8, y: i8) -> bool {
        if !(0..WIDTH).contains(&x) || !(0..64).contains(&y) {
            return false;
        }
        (self.col[x as usize] >> y) & 1 != 0
    }

    /// True if `(x, y)` is out of bounds or occupied.
    pub fn obstructed(&self, x: i8, y: i8) -> bool {
        if !(0..WIDTH).contains(&x) || !(0..64).contains(&y) {
            return true;
        }
        self.occupied(x, y)
    }

    /// True if any of the four cells of `mv` are obstructed.
    pub fn obstructed_move(&self, mv: Move) -> bool {
        mv.coordinates()
            .iter()
            .any(|(x, y)| self.obstructed(x, y))
    }

    pub fn empty(&self) -> bool {
        self.col.iter().all(|&c| c == 0)
    }

    /// A bitmap whose set bits are rows that are full across all ten columns.
    pub fn line_clears(&self) -> u64 {
        self.col.iter().fold(!0u64, |acc, &c| acc & c)
    }

    /// Remove exactly the rows set in `lines` and compact rows above down.
    pub fn clear_lines(&mut self, lines: u64) {
        let mut l = lines;
        while l != 0 {
            let lowest = l & l.wrapping_neg();
            let mask = !(lowest.wrapping_sub(1));
            for c in &mut self.col {
                *c ^= (*c ^ (*c >> 1)) & mask;
            }
            l = (l & (l - 1)) >> 1;
        }
    }

    /// Stamp the four cells of `mv` into the board.
    pub fn place(&mut self, mv: Move) {
        for (x, y) in mv.coordinates().iter() {
            if (0..WIDTH).contains(&x) && (0..64).contains(&y) {
                self.col[x as usize] |= 1u64 << y;
            }
        }
    }

    /// Render the visible 21 rows (`VISIBLE_HEIGHT + 1`, so a piece parked
    /// exactly on row 20 is still shown) as a bordered ASCII grid, optionally
    /// drawing `highlight`'s cells as `.` instead of `#`.
    pub fn render(&self, highlight: Option<Move>) -> String {
        let rows = VISIBLE_HEIGHT + 1;
        let highlight_cells: Vec<(i8, i8)> = match highlight {
            Some(mv) => mv.coordinates().iter().collect(),
            None => Vec::new(),
        };

        let mut out = String::new();
        let border = {
            let mut b = String::from(" ");
            for _ in 0..WIDTH {
                b.push_str("+---");
            }
            b.push('+');
            b.push('\n');
            b
        };
        out.push_str(&border);
        for y in (0..rows).rev() {
            out.push('|');
            for x in 0..WIDTH {
                let is_highlight = y <= VISIBLE_HEIGHT && highlight_cells.contains(&(x, y));
                let ch = if is_highlight {
                    '.'
                } else if self.occupied(x, y) {
                    '#'
                } else {
                    ' '
                };
                out.push_str(&format!(" {} |", ch));
            }
            out.push('\n');
            out.push_str(&border);
        }
        out
    }
}

impl fmt::Display for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}
