//! Error taxonomy for the engine.
//!
//! The core is pure computation, so only two things can go wrong:
//! a caller hands the board model an unplayable column, or the search
//! is invoked outside its contract (terminal board, negative depth).
//! Fingerprint collisions in the transposition table are tolerated
//! silently and are not represented here.

use thiserror::Error;

/// Errors surfaced by the board model and the search driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A move targeted a full or out-of-range column. Never corrected
    /// silently; the caller must re-validate its input.
    #[error("illegal move: column {col} is full or out of range")]
    IllegalMove { col: usize },

    /// The search was invoked outside its contract (already-terminal
    /// board, invalid depth). A programming error in the caller.
    #[error("search precondition violated: {0}")]
    Precondition(&'static str),
}
