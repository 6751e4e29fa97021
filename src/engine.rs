//! Move-selection driver: iterative deepening over the fixed-depth
//! searcher, with an adaptive depth target.
//!
//! Each decision runs depths 1, 2, ... up to a target derived from the
//! configured base depth and the board: fuller boards and boards with
//! an imminent threat get searched deeper, since their trees are
//! smaller and their tactics sharper. The answer is always the result
//! of the deepest fully completed depth; a depth cut short by the time
//! budget is discarded, never blended.

use std::time::{Duration, Instant};

use crate::board::{Board, GameStatus, Player};
use crate::error::EngineError;
use crate::eval::{has_imminent_threat, PatternScore};
use crate::search::{Searcher, SearchStats, TtStats};

/// Tunables for one engine instance.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Base search depth before adaptive bonuses.
    pub max_depth: u8,
    /// Soft wall-clock budget per decision. `None` searches to the
    /// target depth unconditionally.
    pub time_budget: Option<Duration>,
    /// Transposition table slots.
    pub tt_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            time_budget: None,
            tt_capacity: 1 << 20,
        }
    }
}

/// One chosen move plus how it was found.
#[derive(Debug, Clone, Copy)]
pub struct MoveResult {
    pub best_move: usize,
    /// Score from the engine's perspective at the deepest completed
    /// depth.
    pub score: i32,
    /// Deepest fully completed depth.
    pub depth: i8,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// The engine: owns a searcher sized for one board geometry.
pub struct AiEngine {
    config: EngineConfig,
    searcher: Searcher,
    rows: usize,
    cols: usize,
}

impl AiEngine {
    /// Create an engine for a `rows x cols` board.
    #[must_use]
    pub fn new(rows: usize, cols: usize, config: EngineConfig) -> Self {
        Self {
            searcher: Searcher::new(rows, cols, config.tt_capacity),
            config,
            rows,
            cols,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Search counters from the most recent decision.
    #[must_use]
    pub fn last_stats(&self) -> SearchStats {
        self.searcher.stats()
    }

    /// Transposition table occupancy after the most recent decision.
    #[must_use]
    pub fn tt_stats(&self) -> TtStats {
        self.searcher.tt_stats()
    }

    /// Pick a move for `player`.
    ///
    /// The board must match the engine's geometry and be in progress.
    /// Runs iterative deepening up to the adaptive target, stopping
    /// early when a depth proves a forced win or loss (deeper search
    /// cannot change a proven line) or when the time budget expires.
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Result<MoveResult, EngineError> {
        if board.rows() != self.rows || board.cols() != self.cols {
            return Err(EngineError::Precondition("board geometry does not match engine"));
        }
        if board.status() != GameStatus::InProgress {
            return Err(EngineError::Precondition("no move to choose on a finished game"));
        }

        let started = Instant::now();
        let mut scratch = board.clone();
        self.searcher.begin_decision(self.config.time_budget);

        let target = target_depth(self.config.max_depth, board);
        let mut best: Option<(usize, i32, i8)> = None;

        for depth in 1..=target {
            let result = self.searcher.search(&mut scratch, player, depth)?;
            if !result.completed {
                break;
            }
            if let Some(col) = result.best_move {
                best = Some((col, result.score, depth));
            }
            if result.score.abs() >= PatternScore::WIN_THRESHOLD {
                break;
            }
        }

        // The budget can expire before depth 1 finishes; any legal
        // move beats forfeiting, and the move list leads with the
        // center.
        let (best_move, score, depth) = match best {
            Some(found) => found,
            None => {
                let col = board
                    .legal_moves()
                    .into_iter()
                    .next()
                    .ok_or(EngineError::Precondition("no legal moves on an in-progress board"))?;
                (col, 0, 0)
            }
        };

        Ok(MoveResult {
            best_move,
            score,
            depth,
            nodes: self.searcher.stats().nodes,
            elapsed: started.elapsed(),
        })
    }
}

/// Depth target for one decision.
///
/// Starts from `base` and adds: +1 once the board is at least half
/// full, +2 at three quarters (replacing the +1), and +3 whenever
/// either side is one piece from completing a window. The result is
/// capped at the number of empty cells, since no line of play is
/// longer than that, and floored at 1.
#[must_use]
pub fn target_depth(base: u8, board: &Board) -> i8 {
    let pieces = board.piece_count();
    let total = board.cell_count();

    let fill_bonus: u32 = if pieces * 4 >= total * 3 {
        2
    } else if pieces * 2 >= total {
        1
    } else {
        0
    };
    let threat_bonus: u32 = if has_imminent_threat(board) { 3 } else { 0 };

    let mut depth = u32::from(base) + fill_bonus + threat_bonus;
    depth = depth.min(board.empty_cells() as u32).max(1);
    depth.min(i8::MAX as u32) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.time_budget, None);
        assert_eq!(config.tt_capacity, 1 << 20);
    }

    #[test]
    fn test_target_depth_empty_board() {
        let board = Board::new(6, 7);
        assert_eq!(target_depth(6, &board), 6);
    }

    #[test]
    fn test_target_depth_half_full() {
        // 21 of 42 cells, laid out with no one-away window.
        let mut board = Board::new(6, 7);
        let mut player = Player::Red;
        'fill: for col in 0..7 {
            for _ in 0..3 {
                board.drop_piece(col, player).unwrap();
                player = player.opponent();
                if board.piece_count() == 21 {
                    break 'fill;
                }
            }
        }
        assert_eq!(board.piece_count(), 21);
        let depth = target_depth(6, &board);
        assert!(depth >= 7, "half-full board should deepen, got {depth}");
    }

    #[test]
    fn test_target_depth_threat_bonus() {
        let mut board = Board::new(6, 7);
        for _ in 0..3 {
            board.drop_piece(0, Player::Red).unwrap();
        }
        assert_eq!(target_depth(6, &board), 9);
    }

    #[test]
    fn test_target_depth_capped_by_empty_cells() {
        // Tiny board nearly full: three empty cells left.
        let mut board = Board::with_win_length(2, 3, 3);
        board.drop_piece(0, Player::Red).unwrap();
        board.drop_piece(1, Player::Yellow).unwrap();
        board.drop_piece(2, Player::Red).unwrap();
        assert_eq!(board.empty_cells(), 3);
        assert!(target_depth(8, &board) <= 3);
    }

    #[test]
    fn test_target_depth_floor_of_one() {
        let board = Board::new(6, 7);
        assert_eq!(target_depth(0, &board), 1);
    }

    fn engine(depth: u8) -> AiEngine {
        AiEngine::new(
            6,
            7,
            EngineConfig {
                max_depth: depth,
                ..EngineConfig::default()
            },
        )
    }

    #[test]
    fn test_opening_move_is_center() {
        let board = Board::new(6, 7);
        let mut ai = engine(5);
        let result = ai.choose_move(&board, Player::Red).unwrap();
        assert_eq!(result.best_move, 3);
        assert_eq!(result.depth, 5);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut board = Board::new(6, 7);
        for _ in 0..3 {
            board.drop_piece(2, Player::Red).unwrap();
            board.drop_piece(6, Player::Yellow).unwrap();
        }
        let mut ai = engine(8);
        let result = ai.choose_move(&board, Player::Red).unwrap();
        assert_eq!(result.best_move, 2);
        assert_eq!(result.score, PatternScore::WIN - 1);
        // The win at depth 1 ends deepening early.
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn test_blocks_immediate_loss() {
        let mut board = Board::new(6, 7);
        board.drop_piece(0, Player::Red).unwrap();
        board.drop_piece(6, Player::Yellow).unwrap();
        board.drop_piece(0, Player::Red).unwrap();
        board.drop_piece(5, Player::Yellow).unwrap();
        board.drop_piece(0, Player::Red).unwrap();

        let mut ai = engine(6);
        let result = ai.choose_move(&board, Player::Yellow).unwrap();
        assert_eq!(result.best_move, 0);
    }

    #[test]
    fn test_rejects_finished_game() {
        let mut board = Board::new(6, 7);
        for _ in 0..4 {
            board.drop_piece(0, Player::Red).unwrap();
        }
        let mut ai = engine(4);
        assert!(matches!(
            ai.choose_move(&board, Player::Yellow),
            Err(EngineError::Precondition(_))
        ));
    }

    #[test]
    fn test_rejects_geometry_mismatch() {
        let board = Board::new(8, 8);
        let mut ai = engine(4);
        assert!(matches!(
            ai.choose_move(&board, Player::Red),
            Err(EngineError::Precondition(_))
        ));
    }

    #[test]
    fn test_zero_budget_still_moves() {
        let board = Board::new(6, 7);
        let mut ai = AiEngine::new(
            6,
            7,
            EngineConfig {
                max_depth: 12,
                time_budget: Some(Duration::ZERO),
                ..EngineConfig::default()
            },
        );
        let result = ai.choose_move(&board, Player::Red).unwrap();
        assert!(board.is_column_open(result.best_move));
    }

    #[test]
    fn test_tt_stats_reflect_last_decision() {
        let board = Board::new(6, 7);
        let mut ai = engine(5);
        ai.choose_move(&board, Player::Red).unwrap();
        let tt = ai.tt_stats();
        assert!(tt.used > 0, "a depth-5 decision should populate the table");
        assert!(tt.used <= tt.capacity);
    }

    #[test]
    fn test_board_left_untouched() {
        let board = Board::new(6, 7);
        let copy = board.clone();
        let mut ai = engine(5);
        ai.choose_move(&board, Player::Red).unwrap();
        assert_eq!(board, copy);
    }

    #[test]
    fn test_engine_reusable_across_decisions() {
        let mut board = Board::new(6, 7);
        let mut ai = engine(4);

        let first = ai.choose_move(&board, Player::Red).unwrap();
        board.drop_piece(first.best_move, Player::Red).unwrap();
        board.drop_piece(0, Player::Yellow).unwrap();

        let second = ai.choose_move(&board, Player::Red).unwrap();
        assert!(board.is_column_open(second.best_move));
    }
}
