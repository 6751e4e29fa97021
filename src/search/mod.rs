//! Search: zobrist fingerprinting, transposition table, alpha-beta.

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchResult, SearchStats, Searcher};
pub use tt::{Bound, TranspositionTable, TtStats};
pub use zobrist::ZobristTable;
