//! Grid with gravity and terminal-state detection.

use std::fmt;

use crate::error::EngineError;

use super::{GameStatus, Player, DEFAULT_WIN_LENGTH, DIRECTIONS};

/// Game board.
///
/// Cells are stored row-major with row 0 at the bottom, so gravity is
/// simply "first empty row in the column". A board is mutated in place
/// during search via [`Board::drop_piece`] / [`Board::undo_drop`]; the
/// search owns its working copy exclusively, nothing is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    win_length: usize,
    cells: Vec<Option<Player>>,
    /// Pieces currently resting in each column.
    heights: Vec<usize>,
    pieces: usize,
}

impl Board {
    /// Create an empty board with the default win length of 4.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_win_length(rows, cols, DEFAULT_WIN_LENGTH)
    }

    /// Create an empty board with a custom win length.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero, or if `win_length < 2` or
    /// exceeds both dimensions (no line of that length would ever fit).
    #[must_use]
    pub fn with_win_length(rows: usize, cols: usize, win_length: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be non-zero");
        assert!(
            win_length >= 2 && (win_length <= rows || win_length <= cols),
            "win length {win_length} does not fit a {rows}x{cols} board"
        );
        Self {
            rows,
            cols,
            win_length,
            cells: vec![None; rows * cols],
            heights: vec![0; cols],
            pieces: 0,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Center column index; for even widths the left of the two middle
    /// columns. This anchors the engine's center-out move ordering.
    #[inline]
    pub fn center_col(&self) -> usize {
        (self.cols - 1) / 2
    }

    /// Get the cell at (row, col). Row 0 is the bottom row.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        self.cells[row * self.cols + col]
    }

    /// Check if a column can accept another piece.
    #[inline]
    pub fn is_column_open(&self, col: usize) -> bool {
        col < self.cols && self.heights[col] < self.rows
    }

    /// Number of pieces on the board.
    #[inline]
    pub fn piece_count(&self) -> usize {
        self.pieces
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of empty cells (drives the driver's depth adaptation).
    #[inline]
    pub fn empty_cells(&self) -> usize {
        self.cell_count() - self.pieces
    }

    /// Check if no column can accept another piece.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.pieces == self.cell_count()
    }

    /// All playable columns, ordered center-out: the center column
    /// first, then distance 1 (left before right), distance 2, and so
    /// on. Central columns participate in more potential lines, so
    /// trying them first improves alpha-beta pruning. The order is the
    /// engine's deterministic tie-break.
    ///
    /// An empty result means the board is full (a draw upstream).
    #[must_use]
    pub fn legal_moves(&self) -> Vec<usize> {
        let center = self.center_col();
        let mut moves = Vec::with_capacity(self.cols);
        if self.is_column_open(center) {
            moves.push(center);
        }
        for d in 1..self.cols {
            if center >= d && self.is_column_open(center - d) {
                moves.push(center - d);
            }
            if center + d < self.cols && self.is_column_open(center + d) {
                moves.push(center + d);
            }
        }
        moves
    }

    /// Drop a piece into a column; it falls to the lowest empty row.
    ///
    /// Returns the landing row, or [`EngineError::IllegalMove`] if the
    /// column is full or out of range. Illegal moves are always
    /// surfaced, never silently corrected.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, EngineError> {
        if !self.is_column_open(col) {
            return Err(EngineError::IllegalMove { col });
        }
        let row = self.heights[col];
        self.cells[row * self.cols + col] = Some(player);
        self.heights[col] += 1;
        self.pieces += 1;
        Ok(row)
    }

    /// Remove the topmost piece of a column, reversing a prior
    /// [`Board::drop_piece`]. The search uses this to walk the game
    /// tree on a single working board.
    pub fn undo_drop(&mut self, col: usize) {
        debug_assert!(col < self.cols && self.heights[col] > 0, "undo on empty column");
        if col < self.cols && self.heights[col] > 0 {
            let row = self.heights[col] - 1;
            self.cells[row * self.cols + col] = None;
            self.heights[col] = row;
            self.pieces -= 1;
        }
    }

    /// Check whether the piece at (row, col) completes a winning line.
    ///
    /// Counts same-player pieces both ways along each of the four
    /// directions. Used incrementally from the last-played cell inside
    /// search, where a full-board scan would dominate the node cost.
    #[must_use]
    pub fn wins_at(&self, row: usize, col: usize) -> bool {
        let Some(player) = self.get(row, col) else {
            return false;
        };
        for &(dr, dc) in &DIRECTIONS {
            let mut count = 1;
            count += self.ray_len(row, col, dr, dc, player);
            count += self.ray_len(row, col, -dr, -dc, player);
            if count >= self.win_length {
                return true;
            }
        }
        false
    }

    /// Number of consecutive `player` pieces strictly beyond (row, col)
    /// in direction (dr, dc).
    fn ray_len(&self, row: usize, col: usize, dr: i32, dc: i32, player: Player) -> usize {
        let mut len = 0;
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        while r >= 0
            && r < self.rows as i32
            && c >= 0
            && c < self.cols as i32
            && self.get(r as usize, c as usize) == Some(player)
        {
            len += 1;
            r += dr;
            c += dc;
        }
        len
    }

    /// Classify the position: win for either player, draw, or in
    /// progress. Scans every occupied cell; callers inside the search
    /// use [`Board::wins_at`] on the last move instead.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(player) = self.get(row, col) {
                    if self.wins_at(row, col) {
                        return GameStatus::Win(player);
                    }
                }
            }
        }
        if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }
}

impl fmt::Display for Board {
    /// Render top row first, the way the grid stands on a table.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                let ch = match self.get(row, col) {
                    Some(Player::Red) => " R",
                    Some(Player::Yellow) => " Y",
                    None => " .",
                };
                f.write_str(ch)?;
            }
            writeln!(f)?;
        }
        for col in 0..self.cols {
            write!(f, "{col:2}")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(6, 7);
        for row in 0..6 {
            for col in 0..7 {
                assert_eq!(board.get(row, col), None);
            }
        }
        assert_eq!(board.piece_count(), 0);
        assert_eq!(board.empty_cells(), 42);
    }

    #[test]
    fn test_gravity_stacks_pieces() {
        let mut board = Board::new(6, 7);
        assert_eq!(board.drop_piece(3, Player::Red).unwrap(), 0);
        assert_eq!(board.drop_piece(3, Player::Yellow).unwrap(), 1);
        assert_eq!(board.drop_piece(3, Player::Red).unwrap(), 2);
        assert_eq!(board.get(0, 3), Some(Player::Red));
        assert_eq!(board.get(1, 3), Some(Player::Yellow));
        assert_eq!(board.get(2, 3), Some(Player::Red));
    }

    #[test]
    fn test_full_column_rejected() {
        let mut board = Board::new(6, 7);
        for _ in 0..6 {
            board.drop_piece(0, Player::Red).unwrap();
        }
        assert!(!board.is_column_open(0));
        assert_eq!(
            board.drop_piece(0, Player::Yellow),
            Err(EngineError::IllegalMove { col: 0 })
        );
    }

    #[test]
    fn test_out_of_range_column_rejected() {
        let mut board = Board::new(6, 7);
        assert_eq!(
            board.drop_piece(7, Player::Red),
            Err(EngineError::IllegalMove { col: 7 })
        );
    }

    #[test]
    fn test_undo_reverses_drop() {
        let mut board = Board::new(6, 7);
        let snapshot = board.clone();
        board.drop_piece(4, Player::Red).unwrap();
        board.undo_drop(4);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_center_out_order_odd_width() {
        let board = Board::new(6, 7);
        assert_eq!(board.legal_moves(), vec![3, 2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn test_center_out_order_even_width() {
        let board = Board::new(6, 8);
        assert_eq!(board.legal_moves(), vec![3, 2, 4, 1, 5, 0, 6, 7]);
    }

    #[test]
    fn test_legal_moves_skip_full_columns() {
        let mut board = Board::new(6, 7);
        for _ in 0..6 {
            board.drop_piece(3, Player::Red).unwrap();
        }
        let moves = board.legal_moves();
        assert!(!moves.contains(&3));
        assert_eq!(moves, vec![2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn test_legal_moves_roundtrip_in_bounds() {
        // Dropping through every reported legal move never yields an
        // out-of-range or full column.
        let mut board = Board::new(4, 5);
        let mut player = Player::Red;
        loop {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            for &col in &moves {
                assert!(col < board.cols());
                assert!(board.is_column_open(col));
            }
            board.drop_piece(moves[0], player).unwrap();
            player = player.opponent();
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new(6, 7);
        for col in 0..4 {
            board.drop_piece(col, Player::Red).unwrap();
        }
        assert!(board.wins_at(0, 2));
        assert_eq!(board.status(), GameStatus::Win(Player::Red));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new(6, 7);
        for _ in 0..4 {
            board.drop_piece(5, Player::Yellow).unwrap();
        }
        assert!(board.wins_at(3, 5));
        assert_eq!(board.status(), GameStatus::Win(Player::Yellow));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new(6, 7);
        // Staircase: Red on the rising diagonal, Yellow as filler.
        board.drop_piece(0, Player::Red).unwrap();
        board.drop_piece(1, Player::Yellow).unwrap();
        board.drop_piece(1, Player::Red).unwrap();
        board.drop_piece(2, Player::Yellow).unwrap();
        board.drop_piece(2, Player::Yellow).unwrap();
        board.drop_piece(2, Player::Red).unwrap();
        board.drop_piece(3, Player::Yellow).unwrap();
        board.drop_piece(3, Player::Yellow).unwrap();
        board.drop_piece(3, Player::Yellow).unwrap();
        let row = board.drop_piece(3, Player::Red).unwrap();
        assert!(board.wins_at(row, 3));
        assert_eq!(board.status(), GameStatus::Win(Player::Red));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new(6, 7);
        board.drop_piece(6, Player::Red).unwrap();
        board.drop_piece(5, Player::Yellow).unwrap();
        board.drop_piece(5, Player::Red).unwrap();
        board.drop_piece(4, Player::Yellow).unwrap();
        board.drop_piece(4, Player::Yellow).unwrap();
        board.drop_piece(4, Player::Red).unwrap();
        board.drop_piece(3, Player::Yellow).unwrap();
        board.drop_piece(3, Player::Yellow).unwrap();
        board.drop_piece(3, Player::Yellow).unwrap();
        let row = board.drop_piece(3, Player::Red).unwrap();
        assert!(board.wins_at(row, 3));
    }

    #[test]
    fn test_three_in_a_row_is_not_a_win() {
        let mut board = Board::new(6, 7);
        for col in 0..3 {
            board.drop_piece(col, Player::Red).unwrap();
        }
        assert!(!board.wins_at(0, 1));
        assert_eq!(board.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_custom_win_length_five() {
        let mut board = Board::with_win_length(6, 9, 5);
        for col in 0..4 {
            board.drop_piece(col, Player::Red).unwrap();
        }
        assert_eq!(board.status(), GameStatus::InProgress, "four is not enough at N=5");
        board.drop_piece(4, Player::Red).unwrap();
        assert_eq!(board.status(), GameStatus::Win(Player::Red));
    }

    #[test]
    fn test_win_on_small_board() {
        let mut board = Board::with_win_length(4, 4, 3);
        board.drop_piece(0, Player::Yellow).unwrap();
        board.drop_piece(1, Player::Yellow).unwrap();
        board.drop_piece(2, Player::Yellow).unwrap();
        assert_eq!(board.status(), GameStatus::Win(Player::Yellow));
    }

    #[test]
    fn test_draw_detection() {
        // 2x3 at win length 3: columns alternate so no row, column, or
        // diagonal ever lines up three of a color.
        let mut board = Board::with_win_length(2, 3, 3);
        board.drop_piece(0, Player::Red).unwrap();
        board.drop_piece(0, Player::Yellow).unwrap();
        board.drop_piece(1, Player::Yellow).unwrap();
        board.drop_piece(1, Player::Red).unwrap();
        board.drop_piece(2, Player::Red).unwrap();
        board.drop_piece(2, Player::Yellow).unwrap();
        assert!(board.is_full());
        assert_eq!(board.status(), GameStatus::Draw);
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_display_renders_grid() {
        let mut board = Board::with_win_length(2, 3, 3);
        board.drop_piece(0, Player::Red).unwrap();
        board.drop_piece(2, Player::Yellow).unwrap();
        let out = board.to_string();
        assert!(out.contains(" R"));
        assert!(out.contains(" Y"));
        assert!(out.lines().next().unwrap().contains('.'));
    }
}
