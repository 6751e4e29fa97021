//! Transposition table for memoized search results.
//!
//! A bounded, direct-mapped cache from board fingerprint to the score
//! and best move of a previous search of the same position. The stored
//! fingerprint is verified on probe, so slot collisions (two positions
//! mapping to the same slot) are detected; full 64-bit fingerprint
//! collisions are not, and a wrong score for a colliding board is a
//! documented, tolerated accuracy trade-off rather than an error.
//!
//! Replacement policy (deterministic): an incoming entry replaces the
//! resident one when the slot is empty, holds the same fingerprint, or
//! the incoming search depth is at least the resident's. Shallow
//! entries are the cheapest to recompute, so they go first.
//!
//! # Example
//!
//! ```
//! use connect4::search::{Bound, TranspositionTable};
//!
//! let mut tt = TranspositionTable::with_capacity(1 << 16);
//! let hash = 0x123456789ABCDEF0;
//!
//! tt.store(hash, 5, 0, 120, Bound::Exact, Some(3));
//! let hit = tt.probe(hash, 5, 0).expect("entry should be present");
//! assert_eq!(hit.score, 120);
//! assert_eq!(hit.best_move, Some(3));
//! ```

use crate::eval::PatternScore;

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside the window: score is the true value.
    Exact,
    /// Beta cutoff: the true value is >= score.
    Lower,
    /// Fail low: the true value is <= score.
    Upper,
}

/// One table slot.
#[derive(Debug, Clone, Copy)]
struct TtEntry {
    hash: u64,
    depth: i8,
    /// Node-relative score (win distances measured from this position).
    score: i32,
    bound: Bound,
    best_move: Option<usize>,
}

/// A usable probe result, already converted back to root-relative.
#[derive(Debug, Clone, Copy)]
pub struct TtHit {
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<usize>,
}

/// Bounded transposition table.
pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    capacity: usize,
}

impl TranspositionTable {
    /// Minimum number of slots regardless of the requested capacity.
    const MIN_CAPACITY: usize = 1024;

    /// Create a table with (at least) the given number of slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(Self::MIN_CAPACITY);
        Self {
            entries: vec![None; capacity],
            capacity,
        }
    }

    /// Probe for a position.
    ///
    /// Returns `Some` only when the slot holds this fingerprint and the
    /// stored search was at least `depth` deep; shallower entries are
    /// never trusted for a deeper query. The caller decides from the
    /// bound type whether the score resolves its window or merely
    /// tightens it.
    ///
    /// Win/loss scores are stored relative to the entry's position and
    /// converted here to root-relative using `ply`, so a forced-win
    /// distance stays correct when the position recurs at a different
    /// ply.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: i8, ply: i32) -> Option<TtHit> {
        let idx = (hash as usize) % self.capacity;
        let entry = self.entries[idx]?;
        if entry.hash != hash || entry.depth < depth {
            return None;
        }
        Some(TtHit {
            score: score_from_tt(entry.score, ply),
            bound: entry.bound,
            best_move: entry.best_move,
        })
    }

    /// Store a search result.
    ///
    /// `score` is root-relative; `ply` converts it to node-relative for
    /// storage (the inverse of [`TranspositionTable::probe`]).
    pub fn store(
        &mut self,
        hash: u64,
        depth: i8,
        ply: i32,
        score: i32,
        bound: Bound,
        best_move: Option<usize>,
    ) {
        let idx = (hash as usize) % self.capacity;

        // Replace if: empty, same position, or at least as deep.
        let should_replace = match &self.entries[idx] {
            None => true,
            Some(resident) => resident.hash == hash || resident.depth <= depth,
        };
        if should_replace {
            self.entries[idx] = Some(TtEntry {
                hash,
                depth,
                score: score_to_tt(score, ply),
                bound,
                best_move,
            });
        }
    }

    /// Drop every entry. The driver calls this at the start of each
    /// decision cycle so stale fingerprints from earlier boards can
    /// never bias a new search.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Occupancy statistics.
    #[must_use]
    pub fn stats(&self) -> TtStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TtStats {
            capacity: self.capacity,
            used,
        }
    }
}

/// Occupancy snapshot.
#[derive(Debug, Clone, Copy)]
pub struct TtStats {
    pub capacity: usize,
    pub used: usize,
}

/// Convert a root-relative score to node-relative for storage.
#[inline]
fn score_to_tt(score: i32, ply: i32) -> i32 {
    if score >= PatternScore::WIN_THRESHOLD {
        score + ply
    } else if score <= -PatternScore::WIN_THRESHOLD {
        score - ply
    } else {
        score
    }
}

/// Convert a stored node-relative score back to root-relative.
#[inline]
fn score_from_tt(score: i32, ply: i32) -> i32 {
    if score >= PatternScore::WIN_THRESHOLD {
        score - ply
    } else if score <= -PatternScore::WIN_THRESHOLD {
        score + ply
    } else {
        score
    }
}
