//! Heuristic evaluation for non-terminal positions.
//!
//! The heuristic slides a window of `win_length` cells along every
//! horizontal, vertical, and diagonal line, scoring windows by how
//! close they are to completion, plus a bonus for center-column
//! occupancy. The net score is the player's total minus the
//! opponent's, which makes the function symmetric by construction:
//! `evaluate(board, a) == -evaluate(board, a.opponent())`. Negamax
//! correctness depends on that symmetry: threat "blocking" pressure
//! comes out of the subtraction, never from asymmetric weights.
//!
//! Terminal boards never reach this function; the search scores
//! win/draw/loss exactly before evaluating leaves.

use crate::board::{Board, Player};

use super::patterns::PatternScore;

/// Evaluate the board from the perspective of `player`.
///
/// Positive favors `player`, negative favors the opponent. The result
/// is clamped strictly inside the heuristic band, so it can never
/// outrank a proven win or loss.
#[must_use]
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let score = side_score(board, player) - side_score(board, player.opponent());
    score.clamp(
        -(PatternScore::WIN_THRESHOLD - 1),
        PatternScore::WIN_THRESHOLD - 1,
    )
}

/// Whether either player has a window one piece away from completion.
///
/// Scans every window for `win_length - 1` same-colored pieces plus a
/// single empty cell. The empty cell need not be immediately playable;
/// the signal is deliberately coarse and cheap.
#[must_use]
pub fn has_imminent_threat(board: &Board) -> bool {
    for &side in &[Player::Red, Player::Yellow] {
        if side_has_threat(board, side) {
            return true;
        }
    }
    false
}

fn side_has_threat(board: &Board, side: Player) -> bool {
    let n = board.win_length();
    let rows = board.rows();
    let cols = board.cols();

    for row in 0..rows {
        for col in 0..=cols.saturating_sub(n) {
            if window_score(board, side, row, col, 0, 1) >= PatternScore::WINDOW_MAJOR {
                return true;
            }
        }
    }
    for col in 0..cols {
        for row in 0..=rows.saturating_sub(n) {
            if window_score(board, side, row, col, 1, 0) >= PatternScore::WINDOW_MAJOR {
                return true;
            }
        }
    }
    if rows >= n && cols >= n {
        for row in 0..=rows - n {
            for col in 0..=cols - n {
                if window_score(board, side, row, col, 1, 1) >= PatternScore::WINDOW_MAJOR
                    || window_score(board, side, row + n - 1, col, -1, 1)
                        >= PatternScore::WINDOW_MAJOR
                {
                    return true;
                }
            }
        }
    }
    false
}

/// One side's raw total: window scores plus the center-column bonus.
fn side_score(board: &Board, side: Player) -> i32 {
    let mut score = center_column_score(board, side);

    let n = board.win_length();
    let rows = board.rows();
    let cols = board.cols();

    // Horizontal windows
    for row in 0..rows {
        for col in 0..=cols.saturating_sub(n) {
            score += window_score(board, side, row, col, 0, 1);
        }
    }

    // Vertical windows
    for col in 0..cols {
        for row in 0..=rows.saturating_sub(n) {
            score += window_score(board, side, row, col, 1, 0);
        }
    }

    // Diagonal windows (both slopes)
    if rows >= n && cols >= n {
        for row in 0..=rows - n {
            for col in 0..=cols - n {
                score += window_score(board, side, row, col, 1, 1);
                score += window_score(board, side, row + n - 1, col, -1, 1);
            }
        }
    }

    score
}

/// Score one window of `win_length` cells starting at (row, col) and
/// stepping by (dr, dc). A window mixing both colors is worth nothing.
fn window_score(board: &Board, side: Player, row: usize, col: usize, dr: i32, dc: i32) -> i32 {
    let n = board.win_length();
    let mut own = 0usize;
    let mut empty = 0usize;
    for i in 0..n {
        let r = (row as i32 + dr * i as i32) as usize;
        let c = (col as i32 + dc * i as i32) as usize;
        match board.get(r, c) {
            Some(p) if p == side => own += 1,
            None => empty += 1,
            Some(_) => return 0,
        }
    }
    if own == n {
        PatternScore::WINDOW_COMPLETE
    } else if own + 1 == n && empty == 1 {
        PatternScore::WINDOW_MAJOR
    } else if own + 2 == n && empty == 2 && own > 0 {
        PatternScore::WINDOW_MINOR
    } else {
        0
    }
}

/// Bonus for pieces in the center column.
fn center_column_score(board: &Board, side: Player) -> i32 {
    let center = board.center_col();
    let mut count = 0;
    for row in 0..board.rows() {
        if board.get(row, center) == Some(side) {
            count += 1;
        }
    }
    count * PatternScore::CENTER_COLUMN
}
