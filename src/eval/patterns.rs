//! Score constants for evaluation and search.
//!
//! Two bands share one `i32` scale: heuristic estimates live strictly
//! below `WIN_THRESHOLD` in magnitude, forced-win scores at
//! `WIN - plies` strictly above it. Search orders on the raw numbers,
//! so the separation guarantees a proven win always outranks any
//! "good-looking" position, and a faster win outranks a slower one.

/// Score constants.
pub struct PatternScore;

impl PatternScore {
    /// Base score for a win found at the root (ply 0). A win found
    /// after `k` plies scores `WIN - k`.
    pub const WIN: i32 = 1_000_000;

    /// Lower edge of the win band. `WIN - plies` stays above this for
    /// any reachable game length; the heuristic is clamped below it.
    pub const WIN_THRESHOLD: i32 = 900_000;

    // Window weights; a window is `win_length` consecutive cells in
    // one direction.
    /// Every cell in the window owned (only seen pre-terminal-check).
    pub const WINDOW_COMPLETE: i32 = 100;
    /// One empty cell away from completion.
    pub const WINDOW_MAJOR: i32 = 5;
    /// Two empty cells away from completion.
    pub const WINDOW_MINOR: i32 = 2;

    /// Bonus per own piece in the center column. Center pieces join
    /// more potential windows than any other column.
    pub const CENTER_COLUMN: i32 = 3;
}
