//! Position evaluation.

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, has_imminent_threat};
pub use patterns::PatternScore;
