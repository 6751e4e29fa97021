//! Zobrist hashing for board fingerprints.
//!
//! Each (cell, player) pair gets a fixed pseudo-random u64; a board's
//! fingerprint is the XOR of the values for its occupied cells plus a
//! side-to-move toggle. XOR is its own inverse, so dropping or undoing
//! a piece is an O(1) hash update during search. Collisions between
//! distinct boards are possible and tolerated; the transposition table
//! treats the fingerprint as probabilistically unique.
//!
//! # Example
//!
//! ```
//! use connect4::board::{Board, Player};
//! use connect4::search::ZobristTable;
//!
//! let zt = ZobristTable::new(6, 7);
//! let mut board = Board::new(6, 7);
//!
//! let before = zt.hash(&board, Player::Red);
//! let row = board.drop_piece(3, Player::Red).unwrap();
//! let after = zt.hash(&board, Player::Yellow);
//!
//! assert_eq!(zt.update_drop(before, row, 3, Player::Red), after);
//! ```

use crate::board::{Board, Player};

/// Zobrist table sized for one board geometry.
pub struct ZobristTable {
    rows: usize,
    cols: usize,
    /// Random values per cell, indexed `[row * cols + col][player]`.
    keys: Vec<[u64; 2]>,
    /// XORed in when Red is to move.
    red_to_move: u64,
}

impl ZobristTable {
    /// Create a table for a `rows x cols` board.
    ///
    /// Values come from an LCG with a fixed seed (Knuth's MMIX
    /// constants), so fingerprints are reproducible across runs.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1);
            seed
        };

        let mut keys = Vec::with_capacity(rows * cols);
        for _ in 0..rows * cols {
            keys.push([next_rand(), next_rand()]);
        }

        Self {
            rows,
            cols,
            keys,
            red_to_move: next_rand(),
        }
    }

    /// Compute the full fingerprint for a position.
    ///
    /// Iterates the whole grid; use [`ZobristTable::update_drop`] for
    /// O(1) incremental updates during search.
    #[must_use]
    pub fn hash(&self, board: &Board, to_move: Player) -> u64 {
        debug_assert_eq!((board.rows(), board.cols()), (self.rows, self.cols));
        let mut h = 0u64;
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(player) = board.get(row, col) {
                    h ^= self.keys[row * self.cols + col][player.index()];
                }
            }
        }
        if to_move == Player::Red {
            h ^= self.red_to_move;
        }
        h
    }

    /// Incrementally update the fingerprint after `player` drops a
    /// piece landing at (row, col). Also toggles side-to-move. XOR is
    /// its own inverse, so applying this again for the same cell
    /// reverses the drop.
    #[inline]
    #[must_use]
    pub fn update_drop(&self, hash: u64, row: usize, col: usize, player: Player) -> u64 {
        hash ^ self.keys[row * self.cols + col][player.index()] ^ self.red_to_move
    }
}
