//! Board State
//!
//! Two 9-bit occupancy masks plus the mask of empty cells. Cells are
//! indexed row-major:
//!
//! ```text
//! 0 | 1 | 2
//! ---------
//! 3 | 4 | 5
//! ---------
//! 6 | 7 | 8
//! ```
//!
//! Player `round & 1` moves in `round`, so the player at index 1 opens the
//! game and the player at index 0 makes the even moves.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Number of cells.
pub const CELLS: u8 = 9;

/// Last round of a game.
pub const LAST_ROUND: u8 = 9;

/// First round in which a line can be completed.
pub const FIRST_WINNING_ROUND: u8 = 5;

/// All cells empty.
pub const FULL_BOARD: u16 = 0x1FF;

/// Rows, columns and diagonals as cell masks.
pub const WINNING_LINES: [u16; 8] = [
    0x007, // top row
    0x038, // middle row
    0x1C0, // bottom row
    0x049, // left column
    0x092, // center column
    0x124, // right column
    0x111, // main diagonal
    0x054, // anti-diagonal
];

/// Does `mask` fully contain a row, column or diagonal?
#[inline]
pub fn is_winning_board(mask: u16) -> bool {
    (mask & 0x111) == 0x111
        || (mask & 0x092) == 0x092
        || (mask & 0x054) == 0x054
        || (mask & 0x038) == 0x038
        || (mask & 0x007) == 0x007
        || (mask & 0x049) == 0x049
        || (mask & 0x124) == 0x124
        || (mask & 0x1C0) == 0x1C0
}

/// Index of the player who moves in `round`.
#[inline]
pub const fn mover(round: u8) -> usize {
    (round & 1) as usize
}

/// Occupancy of both players.
///
/// Small enough to copy; the tree enumerator passes it by value instead of
/// toggling and reverting a shared board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    positions: [u16; 2],
    available: u16,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Empty board.
    pub const fn new() -> Self {
        Self { positions: [0, 0], available: FULL_BOARD }
    }

    /// Occupancy masks of both players.
    pub fn positions(&self) -> [u16; 2] {
        self.positions
    }

    /// Mask of empty cells.
    pub fn available(&self) -> u16 {
        self.available
    }

    /// Is `cell` empty?
    #[inline]
    pub fn is_available(&self, cell: u8) -> bool {
        cell < CELLS && self.available & (1 << cell) != 0
    }

    /// Number of marks on the board.
    pub fn moves_played(&self) -> u8 {
        (FULL_BOARD ^ self.available).count_ones() as u8
    }

    /// Round of the next move.
    pub fn next_round(&self) -> u8 {
        self.moves_played() + 1
    }

    /// Transposition key: `positions[0] << 9 | positions[1]`.
    ///
    /// Turn parity and empty cells follow from occupancy alone, so two
    /// histories with the same key are the same sub-game.
    #[inline]
    pub fn occupancy_key(&self) -> u32 {
        (self.positions[0] as u32) << 9 | self.positions[1] as u32
    }

    /// Toggle the mover's bit and the empty-cell bit for `cell`.
    #[inline]
    pub fn apply(&mut self, round: u8, cell: u8) {
        let mask = 1u16 << cell;
        self.positions[mover(round)] ^= mask;
        self.available ^= mask;
    }

    /// Copy of this board with the move applied.
    #[inline]
    pub fn with_move(mut self, round: u8, cell: u8) -> Self {
        self.apply(round, cell);
        self
    }

    /// Did the player who moved in `round` complete a line?
    #[inline]
    pub fn is_win_for(&self, round: u8) -> bool {
        is_winning_board(self.positions[mover(round)])
    }

    /// Player index holding a complete line, if any.
    pub fn winner(&self) -> Option<usize> {
        (0..2).find(|&p| is_winning_board(self.positions[p]))
    }

    /// Is the game over (line completed or board full)?
    pub fn is_finished(&self) -> bool {
        self.winner().is_some() || self.available == 0
    }

    /// Empty cells in ascending order.
    pub fn available_cells(&self) -> impl Iterator<Item = u8> + '_ {
        (0..CELLS).filter(move |&cell| self.is_available(cell))
    }

    /// Check the occupancy invariants.
    pub fn is_consistent(&self) -> bool {
        self.positions[0] & self.positions[1] == 0
            && self.available == FULL_BOARD ^ (self.positions[0] | self.positions[1])
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "---------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, "|")?;
                }
                let mask = 1u16 << (row * 3 + col);
                let mark = if self.positions[1] & mask != 0 {
                    " X "
                } else if self.positions[0] & mask != 0 {
                    " O "
                } else {
                    "   "
                };
                write!(f, "{}", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
