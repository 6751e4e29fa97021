//! Board representation for the connection game.
//!
//! The board is a `rows x cols` grid with gravity: pieces dropped into a
//! column come to rest on the lowest empty row. Dimensions and the win
//! length are runtime values, not compile-time constants, so the same
//! engine drives classic 7x6 games and larger variants.

pub mod board;

// Re-exports
pub use board::Board;

/// Default win length (classic four-in-a-row).
pub const DEFAULT_WIN_LENGTH: usize = 4;

/// Line directions: horizontal, vertical, both diagonals.
/// Each direction is scanned both ways, so four entries cover all eight rays.
pub(crate) const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// The two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// Get the opposing player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Stable index (0 or 1) used by the hashing tables.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Yellow => 1,
        }
    }
}

/// Outcome classification of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// At least one legal move remains and nobody has connected a line.
    InProgress,
    /// The given player has `win_length` in a row.
    Win(Player),
    /// The board is full with no winner.
    Draw,
}

impl GameStatus {
    /// True for `Win` and `Draw`, false for `InProgress`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}
