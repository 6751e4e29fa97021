//! Connect-four style game engine.
//!
//! A gravity board of configurable size, a window-counting heuristic,
//! and a deterministic alpha-beta search with a transposition table,
//! driven by iterative deepening with an adaptive depth target.
//!
//! # Example
//!
//! ```
//! use connect4::{AiEngine, Board, EngineConfig, Player};
//!
//! let mut board = Board::new(6, 7);
//! board.drop_piece(3, Player::Red).unwrap();
//!
//! let mut engine = AiEngine::new(6, 7, EngineConfig { max_depth: 4, ..EngineConfig::default() });
//! let result = engine.choose_move(&board, Player::Yellow).unwrap();
//! assert!(board.is_column_open(result.best_move));
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod search;

pub use board::{Board, GameStatus, Player};
pub use engine::{AiEngine, EngineConfig, MoveResult};
pub use error::EngineError;
pub use eval::evaluate;
