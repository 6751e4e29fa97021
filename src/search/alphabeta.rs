//! Depth-limited negamax with alpha-beta pruning.
//!
//! The searcher explores move sequences to a fixed depth, scoring
//! leaves with the heuristic and terminal positions exactly. Scores are
//! from the perspective of the side to move at each node; a forced win
//! reached after `k` plies scores `WIN - k`, so a faster win always
//! outranks a slower one and a slower loss outranks a faster one.
//!
//! Pruning here is strictly sound: alpha-beta windows plus
//! transposition-table bounds, nothing speculative. Moves are tried
//! center-out in the order [`Board::legal_moves`] yields them, and the
//! best move only changes on a strictly better score, so the chosen
//! move is deterministic and identical to what an unpruned minimax of
//! the same depth would pick.

use std::time::{Duration, Instant};

use crate::board::{Board, Player};
use crate::error::EngineError;
use crate::eval::{evaluate, PatternScore};

use super::tt::{Bound, TranspositionTable, TtStats};
use super::zobrist::ZobristTable;

/// Sentinel above every reachable score.
const INF: i32 = PatternScore::WIN + 1;

/// How often (in nodes) the deadline is polled.
const DEADLINE_CHECK_MASK: u64 = 0x3FF;

/// Counters for one decision cycle.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    /// Interior and leaf nodes visited.
    pub nodes: u64,
    /// Transposition probes that found a usable entry.
    pub tt_hits: u64,
    /// Probes whose bound alone resolved the node.
    pub tt_cutoffs: u64,
    /// Entries written back.
    pub tt_stores: u64,
    /// Alpha-beta cutoffs taken.
    pub beta_cutoffs: u64,
}

/// Outcome of one fixed-depth search.
#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    /// Column to play, `None` only for depth-0 searches or when the
    /// search was stopped before finishing its first root move.
    pub best_move: Option<usize>,
    /// Score of `best_move` from the searching player's perspective.
    pub score: i32,
    pub depth: i8,
    /// False when the deadline fired mid-search; the caller must
    /// discard the partial result.
    pub completed: bool,
}

/// Fixed-depth alpha-beta searcher with a transposition table.
///
/// One instance serves one board geometry; the zobrist table and the
/// transposition table are sized at construction and reused across
/// decisions.
pub struct Searcher {
    tt: TranspositionTable,
    zobrist: ZobristTable,
    stats: SearchStats,
    deadline: Option<Instant>,
    stopped: bool,
}

impl Searcher {
    /// Create a searcher for a `rows x cols` board.
    #[must_use]
    pub fn new(rows: usize, cols: usize, tt_capacity: usize) -> Self {
        Self {
            tt: TranspositionTable::with_capacity(tt_capacity),
            zobrist: ZobristTable::new(rows, cols),
            stats: SearchStats::default(),
            deadline: None,
            stopped: false,
        }
    }

    /// Reset for a fresh decision: clear the transposition table and
    /// counters, arm the deadline if a budget is given.
    ///
    /// Clearing per decision keeps entries from earlier boards from
    /// ever biasing the new search, at the cost of re-deriving shared
    /// positions.
    pub fn begin_decision(&mut self, time_budget: Option<Duration>) {
        self.tt.clear();
        self.stats = SearchStats::default();
        self.stopped = false;
        self.deadline = time_budget.map(|budget| Instant::now() + budget);
    }

    /// Counters for the current decision cycle.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Transposition table occupancy.
    #[must_use]
    pub fn tt_stats(&self) -> TtStats {
        self.tt.stats()
    }

    /// Search `board` to `depth` plies for `player`.
    ///
    /// The board must be in progress and the depth non-negative; either
    /// violation is a caller bug reported as
    /// [`EngineError::Precondition`]. Depth 0 returns the static
    /// evaluation with no move. The board is mutated during search and
    /// restored before returning.
    pub fn search(
        &mut self,
        board: &mut Board,
        player: Player,
        depth: i8,
    ) -> Result<SearchResult, EngineError> {
        if depth < 0 {
            return Err(EngineError::Precondition("search depth must be non-negative"));
        }
        if board.status().is_terminal() {
            return Err(EngineError::Precondition("cannot search a finished game"));
        }
        if depth == 0 {
            return Ok(SearchResult {
                best_move: None,
                score: evaluate(board, player),
                depth: 0,
                completed: true,
            });
        }

        let hash = self.zobrist.hash(board, player);
        let mut alpha = -INF;
        let beta = INF;
        let mut best_score = -INF;
        let mut best_move = None;

        for col in board.legal_moves() {
            let row = board.drop_piece(col, player)?;
            let score = if board.wins_at(row, col) {
                PatternScore::WIN - 1
            } else if board.is_full() {
                0
            } else {
                let child = self.zobrist.update_drop(hash, row, col, player);
                -self.negamax(board, player.opponent(), depth - 1, 1, -beta, -alpha, child)
            };
            board.undo_drop(col);

            if self.stopped {
                break;
            }
            if score > best_score {
                best_score = score;
                best_move = Some(col);
            }
            alpha = alpha.max(best_score);
        }

        if !self.stopped {
            self.tt.store(hash, depth, 0, best_score, Bound::Exact, best_move);
            self.stats.tt_stores += 1;
        }

        Ok(SearchResult {
            best_move,
            score: best_score,
            depth,
            completed: !self.stopped,
        })
    }

    /// Negamax over the window `(alpha, beta)`.
    ///
    /// Called only on in-progress positions with `depth >= 1`; wins and
    /// draws are scored by the parent right after the move that creates
    /// them, which keeps terminal detection O(win_length) instead of a
    /// full-board scan.
    fn negamax(
        &mut self,
        board: &mut Board,
        player: Player,
        depth: i8,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
        hash: u64,
    ) -> i32 {
        self.stats.nodes += 1;
        if self.stats.nodes & DEADLINE_CHECK_MASK == 0 {
            self.check_deadline();
        }
        if self.stopped {
            return 0;
        }

        if depth == 0 {
            return evaluate(board, player);
        }

        let alpha_orig = alpha;
        if let Some(hit) = self.tt.probe(hash, depth, ply) {
            self.stats.tt_hits += 1;
            match hit.bound {
                Bound::Exact => return hit.score,
                Bound::Lower => alpha = alpha.max(hit.score),
                Bound::Upper => beta = beta.min(hit.score),
            }
            if alpha >= beta {
                self.stats.tt_cutoffs += 1;
                return hit.score;
            }
        }

        let mut best = -INF;
        let mut best_move = None;

        for col in board.legal_moves() {
            // legal_moves guarantees the drop succeeds.
            let Ok(row) = board.drop_piece(col, player) else {
                continue;
            };
            let score = if board.wins_at(row, col) {
                PatternScore::WIN - (ply + 1)
            } else if board.is_full() {
                0
            } else {
                let child = self.zobrist.update_drop(hash, row, col, player);
                -self.negamax(board, player.opponent(), depth - 1, ply + 1, -beta, -alpha, child)
            };
            board.undo_drop(col);

            if self.stopped {
                return 0;
            }
            if score > best {
                best = score;
                best_move = Some(col);
            }
            alpha = alpha.max(best);
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                break;
            }
        }

        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(hash, depth, ply, best, bound, best_move);
        self.stats.tt_stores += 1;

        best
    }

    fn check_deadline(&mut self) {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.stopped = true;
            }
        }
    }
}
