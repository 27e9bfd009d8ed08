//! The reachability search: every final resting placement of a piece on a
//! board, found by flood-filling a bitboard frontier instead of walking
//! individual (x, y, rotation) states one at a time.

use crate::collision::{CollisionMap, X_BIAS};
use crate::move_list::MoveList;
use tetro_core::{
    i_kicks_180, i_kicks_ccw, i_kicks_cw, ljszt_kicks_180, ljszt_kicks_ccw, ljszt_kicks_cw, Move,
    Piece, Playfield, Rotation, SpinType,
};

const MAP_WIDTH: i8 = 14;
const SPAWN_COL: i8 = tetro_core::SPAWN_COL;
const SPAWN_ROW: i8 = tetro_core::SPAWN_ROW;

#[derive(Clone, Copy)]
enum Dir {
    Cw,
    Ccw,
    Flip,
}

/// Per-piece collapse of a physically-explored (rotation, column, row) cell
/// into the canonical cell the move is actually emitted at. O collapses
/// every rotation to North; I/S/Z collapse two rotations at a time via
/// parity; L/J/T have no collapse.
fn collapse(piece: Piece, r: Rotation, x: i8, y: i8) -> (Rotation, i8, i8) {
    match piece {
        Piece::O => {
            let x1 = x - bool_i8(matches!(r, Rotation::West | Rotation::South));
            let y1 = y - bool_i8(matches!(r, Rotation::East | Rotation::South));
            (Rotation::North, x1, y1)
        }
        Piece::I => {
            let r1 = Rotation::from_index(r.index() & 1);
            let x1 = x - bool_i8(matches!(r, Rotation::South));
            let y1 = y + bool_i8(matches!(r, Rotation::West));
            (r1, x1, y1)
        }
        Piece::S | Piece::Z => {
            let r1 = Rotation::from_index(r.index() & 1);
            let x1 = x - bool_i8(matches!(r, Rotation::West));
            let y1 = y - bool_i8(matches!(r, Rotation::South));
            (r1, x1, y1)
        }
        Piece::L | Piece::J | Piece::T => (r, x, y),
    }
}

fn bool_i8(b: bool) -> i8 {
    if b {
        1
    } else {
        0
    }
}

fn rotations_for(piece: Piece) -> &'static [Rotation] {
    if matches!(piece, Piece::O) {
        &[Rotation::North]
    } else {
        &Rotation::ALL
    }
}

fn range_mask(lo: i8, hi: i8) -> u64 {
    if lo > hi || lo > 63 {
        return 0;
    }
    let hi = hi.min(63);
    let upper = if hi >= 63 { !0u64 } else { (1u64 << (hi + 1)) - 1 };
    let lower = if lo <= 0 { 0u64 } else { (1u64 << lo) - 1 };
    upper & !lower
}

fn highest_occupied_row(board: &Playfield) -> i8 {
    board
        .columns()
        .iter()
        .map(|&c| {
            if c == 0 {
                -1
            } else {
                63 - c.leading_zeros() as i8
            }
        })
        .max()
        .unwrap_or(-1)
}

/// `slot(biased_x, rotation)` flattened into a single index for the
/// `remaining` worklist bitmask.
fn slot_index(biased_x: i8, r: Rotation) -> u32 {
    (biased_x as u32) * 4 + r.index() as u32
}

struct Search<'b> {
    board: &'b Playfield,
    piece: Piece,
    cmap: CollisionMap<'b>,
    to_search: [[u64; 4]; 14],
    searched: [[u64; 4]; 14],
    move_set: [[u64; 4]; 14],
    // [biased_x][rotation][SpinType as usize] — only populated for T.
    spin_set: [[[u64; 3]; 4]; 14],
    remaining: u64,
}

fn spin_idx(s: SpinType) -> usize {
    match s {
        SpinType::None => 0,
        SpinType::Mini => 1,
        SpinType::Full => 2,
    }
}

impl<'b> Search<'b> {
    fn new(board: &'b Playfield, piece: Piece) -> Self {
        let cmap = CollisionMap::new(board, piece);
        Search {
            board,
            piece,
            cmap,
            to_search: [[0u64; 4]; 14],
            searched: [[0u64; 4]; 14],
            move_set: [[0u64; 4]; 14],
            spin_set: [[[0u64; 3]; 4]; 14],
            remaining: 0,
        }
    }

    fn activate(&mut self, biased_x: i8, r: Rotation) {
        if self.to_search[biased_x as usize][r.index() as usize] != 0 {
            self.remaining |= 1u64 << slot_index(biased_x, r);
        }
    }

    fn seed(&mut self, force: bool) {
        let highest = highest_occupied_row(self.board);
        let has_headroom = highest < SPAWN_ROW - 3;

        if has_headroom {
            for real_x in 0..10i8 {
                let biased_x = real_x + X_BIAS;
                for &r in rotations_for(self.piece) {
                    let cm = self.cmap.get(real_x, r);
                    if cm == !0u64 {
                        continue;
                    }
                    let y = if cm == 0 {
                        0
                    } else {
                        64 - cm.leading_zeros() as i8
                    };
                    if y > SPAWN_ROW {
                        continue;
                    }
                    let seeded = range_mask(y, SPAWN_ROW) & !cm;
                    if seeded == 0 {
                        continue;
                    }
                    self.to_search[biased_x as usize][r.index() as usize] = seeded;
                    self.searched[biased_x as usize][r.index() as usize] = seeded | cm;
                    if matches!(self.piece, Piece::T) {
                        self.spin_set[biased_x as usize][r.index() as usize]
                            [spin_idx(SpinType::None)] = seeded;
                    }
                    self.activate(biased_x, r);
                }
            }
            return;
        }

        // Stack too high for a clean top-down sweep: only the spawn pose
        // (or, under `force`, the first open row at/above it) is reachable.
        let biased_spawn = SPAWN_COL + X_BIAS;
        let cm = self.cmap.get(SPAWN_COL, Rotation::North);
        let y = if !force {
            if (cm >> SPAWN_ROW) & 1 != 0 {
                return;
            }
            SPAWN_ROW
        } else {
            let mut y = SPAWN_ROW;
            while y < 64 && (cm >> y) & 1 != 0 {
                y += 1;
            }
            if y >= 64 {
                return;
            }
            y
        };
        let bit = 1u64 << y;
        self.to_search[biased_spawn as usize][Rotation::North.index() as usize] = bit;
        self.searched[biased_spawn as usize][Rotation::North.index() as usize] = bit | cm;
        if matches!(self.piece, Piece::T) {
            self.spin_set[biased_spawn as usize][Rotation::North.index() as usize]
                [spin_idx(SpinType::None)] = bit;
        }
        self.activate(biased_spawn, Rotation::North);
    }

    fn soft_drop(&mut self, biased_x: i8, r: Rotation) {
        let cm = self.cmap.get(biased_x - X_BIAS, r);
        let bx = biased_x as usize;
        let ri = r.index() as usize;

        if matches!(self.piece, Piece::T) {
            // T falls through any cell already searched — a spin can land a
            // T on a row a plain drop had already marked reached by a
            // different path, and the fall must not stop short of the
            // floor just because that row is "done".
            let mut m = (self.to_search[bx][ri] >> 1) & !cm;
            while (m & self.to_search[bx][ri]) != m {
                self.to_search[bx][ri] |= m;
                m |= (m >> 1) & !cm;
            }
            self.spin_set[bx][ri][spin_idx(SpinType::None)] |= m;
            return;
        }

        let mut frontier = self.to_search[bx][ri];
        loop {
            let next = (frontier >> 1) & !cm;
            let fresh = next & !self.searched[bx][ri];
            if fresh == 0 {
                break;
            }
            self.to_search[bx][ri] |= fresh;
            self.searched[bx][ri] |= fresh;
            frontier = fresh;
        }
    }

    fn detect_landings(&mut self, biased_x: i8, r: Rotation) {
        let cm = self.cmap.get(biased_x - X_BIAS, r);
        let resting = (cm << 1) | 1;
        let landing = self.to_search[biased_x as usize][r.index() as usize] & resting;
        self.move_set[biased_x as usize][r.index() as usize] |= landing;
    }

    fn shift(&mut self, biased_x: i8, r: Rotation) {
        let is_t = matches!(self.piece, Piece::T);
        let current = self.to_search[biased_x as usize][r.index() as usize];
        for &delta in &[-1i8, 1] {
            let neighbor = biased_x + delta;
            if !(0..MAP_WIDTH).contains(&neighbor) {
                continue;
            }
            let fresh = current & !self.searched[neighbor as usize][r.index() as usize];
            if fresh == 0 {
                continue;
            }
            self.to_search[neighbor as usize][r.index() as usize] |= fresh;
            self.searched[neighbor as usize][r.index() as usize] |= fresh;
            if is_t {
                self.spin_set[neighbor as usize][r.index() as usize][spin_idx(SpinType::None)] |=
                    fresh;
            }
            self.activate(neighbor, r);
        }
    }

    fn t_spin_corners(&self, real_x: i8) -> [u64; 4] {
        let left = self.board.column(real_x - 1);
        let right = self.board.column(real_x + 1);
        // 0=NW, 1=NE, 2=SE, 3=SW, matching the reference corner ordering.
        [left >> 1, right >> 1, (right << 1) | 1, (left << 1) | 1]
    }

    fn rotate(&mut self, biased_x: i8, r: Rotation) {
        if matches!(self.piece, Piece::O) {
            return;
        }
        let is_t = matches!(self.piece, Piece::T);
        let is_i = self.piece.is_i_family();
        let real_x = biased_x - X_BIAS;

        for dir in [Dir::Cw, Dir::Ccw, Dir::Flip] {
            let r1 = match dir {
                Dir::Cw => r.cw(),
                Dir::Ccw => r.ccw(),
                Dir::Flip => r.flip(),
            };
            let five;
            let six;
            let table: &[(i8, i8)] = match dir {
                Dir::Cw => {
                    five = if is_i { i_kicks_cw(r) } else { ljszt_kicks_cw(r) };
                    &five
                }
                Dir::Ccw => {
                    five = if is_i {
                        i_kicks_ccw(r)
                    } else {
                        ljszt_kicks_ccw(r)
                    };
                    &five
                }
                Dir::Flip => {
                    six = if is_i {
                        i_kicks_180(r)
                    } else {
                        ljszt_kicks_180(r)
                    };
                    &six
                }
            };

            let mut current = self.to_search[biased_x as usize][r.index() as usize];
            for &(dx, dy) in table {
                if current == 0 {
                    break;
                }
                let target_real_x = real_x + dx;
                let target_biased_x = target_real_x + X_BIAS;
                if !(0..MAP_WIDTH).contains(&target_biased_x) {
                    continue;
                }
                let cm1 = self.cmap.get(target_real_x, r1);
                let shift_amount = (3 + dy) as u32;
                let m = (current << shift_amount) >> 3;
                let accepted = m & !cm1;
                if accepted == 0 {
                    continue;
                }
                let consumed = (accepted << 3) >> shift_amount;
                current &= !consumed;

                if is_t {
                    let corners = self.t_spin_corners(target_real_x);
                    let spin_candidates = accepted
                        & ((corners[0] & corners[1] & (corners[2] | corners[3]))
                            | (corners[2] & corners[3] & (corners[0] | corners[1])));
                    let non_spin = accepted & !spin_candidates;
                    let ti = target_biased_x as usize;
                    let r1i = r1.index() as usize;
                    self.spin_set[ti][r1i][spin_idx(SpinType::None)] |= non_spin;
                    if spin_candidates != 0 {
                        // A 5th-or-later kick (index >= 4, the classic
                        // triple fallback) is always a full spin.
                        let kick_idx = table.iter().position(|&k| k == (dx, dy)).unwrap_or(0);
                        if kick_idx >= 4 {
                            self.spin_set[ti][r1i][spin_idx(SpinType::Full)] |= spin_candidates;
                        } else {
                            let front = corners[r1.index() as usize]
                                & corners[r1.cw().index() as usize];
                            let full_mask = spin_candidates & front;
                            self.spin_set[ti][r1i][spin_idx(SpinType::Full)] |= full_mask;
                            self.spin_set[ti][r1i][spin_idx(SpinType::Mini)] |=
                                spin_candidates & !full_mask;
                        }
                    }
                }

                let fresh = accepted & !self.searched[target_biased_x as usize][r1.index() as usize];
                if fresh != 0 {
                    self.to_search[target_biased_x as usize][r1.index() as usize] |= fresh;
                    self.searched[target_biased_x as usize][r1.index() as usize] |= fresh;
                    self.activate(target_biased_x, r1);
                }
            }
        }
    }

    fn run(&mut self, force: bool) {
        self.seed(force);
        while self.remaining != 0 {
            let idx = self.remaining.trailing_zeros();
            let biased_x = (idx / 4) as i8;
            let r = Rotation::from_index((idx % 4) as u8);

            self.soft_drop(biased_x, r);
            self.detect_landings(biased_x, r);
            self.shift(biased_x, r);
            self.rotate(biased_x, r);

            self.searched[biased_x as usize][r.index() as usize] |=
                self.to_search[biased_x as usize][r.index() as usize];
            self.to_search[biased_x as usize][r.index() as usize] = 0;
            self.remaining &= !(1u64 << idx);
        }
    }

    fn emit(&self, out: &mut MoveList) {
        if matches!(self.piece, Piece::T) {
            self.emit_t(out);
        } else {
            self.emit_plain(out);
        }
    }

    fn emit_plain(&self, out: &mut MoveList) {
        let mut emitted = [[0u64; 4]; 14];
        for biased_x in 0..MAP_WIDTH {
            let real_x = biased_x - X_BIAS;
            for &r in rotations_for(self.piece) {
                let mut bits = self.move_set[biased_x as usize][r.index() as usize];
                while bits != 0 {
                    let y = bits.trailing_zeros() as i8;
                    bits &= bits - 1;
                    let (r1, x1, y1) = collapse(self.piece, r, real_x, y);
                    if !(0..10).contains(&x1) || !(0..64).contains(&y1) {
                        continue;
                    }
                    let biased_x1 = x1 + X_BIAS;
                    let r1i = r1.index() as usize;
                    if (emitted[biased_x1 as usize][r1i] >> y1) & 1 != 0 {
                        continue;
                    }
                    emitted[biased_x1 as usize][r1i] |= 1u64 << y1;
                    out.push(Move::new(self.piece, r1, x1, y1));
                }
            }
        }
    }

    fn emit_t(&self, out: &mut MoveList) {
        for biased_x in 0..MAP_WIDTH {
            let real_x = biased_x - X_BIAS;
            if !(0..10).contains(&real_x) {
                continue;
            }
            for &r in &Rotation::ALL {
                let landed = self.move_set[biased_x as usize][r.index() as usize];
                if landed == 0 {
                    continue;
                }
                for spin in [SpinType::None, SpinType::Mini, SpinType::Full] {
                    let mut bits = landed & self.spin_set[biased_x as usize][r.index() as usize]
                        [spin_idx(spin)];
                    while bits != 0 {
                        let y = bits.trailing_zeros() as i8;
                        bits &= bits - 1;
                        out.push(Move::new_t_spin(r, real_x, y, spin));
                    }
                }
            }
        }
    }
}

/// Enumerate every reachable final placement of `piece` on `board` into
/// `out`. If `force` is set and the stack leaves no clean headroom, the
/// piece is still seeded at the first open row at or above the spawn row
/// (used to emit a move even when the board has topped out).
pub fn generate_into(board: &Playfield, piece: Piece, force: bool, out: &mut MoveList) {
    log::trace!("generate_into: piece={:?} force={}", piece, force);
    let mut search = Search::new(board, piece);
    search.run(force);
    search.emit(out);
    log::debug!("generate_into: piece={:?} yielded {} placements", piece, out.len());
}
