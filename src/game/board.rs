use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::error::MoveError;

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;

/// Number of consecutive pieces needed to win.
pub const CONNECT: usize = 4;

/// Row/column steps of the four line directions: horizontal, vertical,
/// diagonal down-right and diagonal down-left. Row indices grow downwards.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The occupying player, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// A cell coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// A `height` x `width` grid, stored row-major with row 0 at the top.
/// Pieces enter a column from the top and settle on the lowest empty row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.in_bounds(row, col)
            .then(|| self.cells[self.index(row, col)])
    }

    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Iterate over the rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // chunks(0) panics; a zero-width board has no cells anyway
        self.cells.chunks(self.width.max(1))
    }

    /// The row a piece dropped into `col` would land on, `None` if the column
    /// is full or does not exist
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.cells[self.index(row, col)].is_empty())
    }

    /// Check if a column is full. Columns outside the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.lowest_empty_row(col).is_none()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.width {
            return Err(MoveError::InvalidColumn {
                column: col,
                width: self.width,
            });
        }

        let row = self
            .lowest_empty_row(col)
            .ok_or(MoveError::ColumnFull { column: col })?;
        let idx = self.index(row, col);
        self.cells[idx] = player.to_cell();
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Number of cells occupied by `player`
    pub fn pieces_of(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Occupied(player))
            .count()
    }

    /// Check whether `player` has four in a row anywhere on the board
    pub fn has_line(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// Find a line of four for `player`.
    ///
    /// Every cell is tried as the start of a line in each of the four
    /// directions. A line only counts when all of its cells lie on the board,
    /// so runs never wrap around an edge. Scan order is row-major, then
    /// direction order, and the first match is returned.
    pub fn winning_line(&self, player: Player) -> Option<[Position; CONNECT]> {
        (0..self.height).find_map(|row| {
            (0..self.width).find_map(|col| {
                DIRECTIONS
                    .iter()
                    .find_map(|&dir| self.line_from(Position::new(row, col), dir, player))
            })
        })
    }

    fn line_from(
        &self,
        start: Position,
        (dr, dc): (isize, isize),
        player: Player,
    ) -> Option<[Position; CONNECT]> {
        let mut line = [start; CONNECT];
        for (step, slot) in line.iter_mut().enumerate() {
            let row = start.row.checked_add_signed(dr * step as isize)?;
            let col = start.col.checked_add_signed(dc * step as isize)?;
            if self.get(row, col)? != Cell::Occupied(player) {
                return None;
            }
            *slot = Position::new(row, col);
        }
        Some(line)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| {
                    cell.player()
                        .map_or_else(|| ".".to_string(), |player| player.id().to_string())
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: Player = Player::One;
    const TWO: Player = Player::Two;

    fn bottom(board: &Board) -> usize {
        board.height() - 1
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.width(), 7);
        assert_eq!(board.height(), 6);
        for row in 0..6 {
            for col in 0..7 {
                assert_eq!(board.get(row, col), Some(Cell::Empty));
            }
        }
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::default();
        assert_eq!(board.get(6, 0), None);
        assert_eq!(board.get(0, 7), None);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::default();

        let row = board.drop_piece(3, ONE).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Some(Cell::Occupied(ONE)));

        let row = board.drop_piece(3, TWO).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Some(Cell::Occupied(TWO)));
    }

    #[test]
    fn test_lowest_empty_row() {
        let mut board = Board::default();
        assert_eq!(board.lowest_empty_row(0), Some(5));
        board.drop_piece(0, ONE).unwrap();
        assert_eq!(board.lowest_empty_row(0), Some(4));
        assert_eq!(board.lowest_empty_row(7), None);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::default();

        for _ in 0..6 {
            board.drop_piece(0, ONE).unwrap();
        }

        assert!(board.is_column_full(0));
        let before = board.clone();
        assert_eq!(
            board.drop_piece(0, TWO),
            Err(MoveError::ColumnFull { column: 0 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::default();
        assert_eq!(
            board.drop_piece(7, ONE),
            Err(MoveError::InvalidColumn {
                column: 7,
                width: 7
            })
        );
        assert!(board.is_column_full(7));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::default();
        for col in 0..7 {
            for _ in 0..6 {
                board.drop_piece(col, ONE).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.piece_count(), 42);
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::default();
        for col in 0..4 {
            board.drop_piece(col, ONE).unwrap();
        }
        let line = board.winning_line(ONE).unwrap();
        let row = bottom(&board);
        assert_eq!(
            line,
            [
                Position::new(row, 0),
                Position::new(row, 1),
                Position::new(row, 2),
                Position::new(row, 3)
            ]
        );
        assert!(!board.has_line(TWO));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::default();
        for _ in 0..4 {
            board.drop_piece(3, TWO).unwrap();
        }
        let line = board.winning_line(TWO).unwrap();
        assert_eq!(line[0], Position::new(2, 3));
        assert_eq!(line[3], Position::new(5, 3));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::default();
        // Create diagonal / pattern
        board.drop_piece(0, ONE).unwrap();

        board.drop_piece(1, TWO).unwrap();
        board.drop_piece(1, ONE).unwrap();

        board.drop_piece(2, TWO).unwrap();
        board.drop_piece(2, TWO).unwrap();
        board.drop_piece(2, ONE).unwrap();

        board.drop_piece(3, TWO).unwrap();
        board.drop_piece(3, TWO).unwrap();
        board.drop_piece(3, TWO).unwrap();
        assert!(!board.has_line(ONE));
        board.drop_piece(3, ONE).unwrap();

        // Scanned from the top cell going down-left
        let line = board.winning_line(ONE).unwrap();
        assert_eq!(line[0], Position::new(2, 3));
        assert_eq!(line[3], Position::new(5, 0));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::default();
        // Create diagonal \ pattern
        board.drop_piece(6, ONE).unwrap();

        board.drop_piece(5, TWO).unwrap();
        board.drop_piece(5, ONE).unwrap();

        board.drop_piece(4, TWO).unwrap();
        board.drop_piece(4, TWO).unwrap();
        board.drop_piece(4, ONE).unwrap();

        board.drop_piece(3, TWO).unwrap();
        board.drop_piece(3, TWO).unwrap();
        board.drop_piece(3, TWO).unwrap();
        board.drop_piece(3, ONE).unwrap();

        let line = board.winning_line(ONE).unwrap();
        assert_eq!(line[0], Position::new(2, 3));
        assert_eq!(line[3], Position::new(5, 6));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::default();
        for col in 0..3 {
            board.drop_piece(col, ONE).unwrap();
        }
        assert!(!board.has_line(ONE));
    }

    #[test]
    fn test_horizontal_does_not_wrap_rows() {
        // The right end of the top row and the left end of the bottom row
        // are adjacent in row-major storage only.
        let mut board = Board::new(7, 2);
        board.drop_piece(5, TWO).unwrap();
        board.drop_piece(6, TWO).unwrap();
        board.drop_piece(5, ONE).unwrap();
        board.drop_piece(6, ONE).unwrap();
        board.drop_piece(0, ONE).unwrap();
        board.drop_piece(1, ONE).unwrap();
        assert_eq!(board.to_string(), ". . . . . 1 1\n1 1 . . . 2 2\n");
        assert!(!board.has_line(ONE));
    }

    #[test]
    fn test_small_boards_never_win() {
        let mut board = Board::new(3, 3);
        for col in 0..3 {
            for _ in 0..3 {
                board.drop_piece(col, ONE).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(!board.has_line(ONE));
    }

    #[test]
    fn test_zero_sized_board() {
        let mut board = Board::new(0, 6);
        assert!(board.is_full());
        assert_eq!(board.rows().count(), 0);
        assert!(matches!(
            board.drop_piece(0, ONE),
            Err(MoveError::InvalidColumn { .. })
        ));

        let mut board = Board::new(7, 0);
        assert!(board.is_full());
        assert_eq!(board.drop_piece(0, ONE), Err(MoveError::ColumnFull { column: 0 }));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3, 2);
        board.drop_piece(0, ONE).unwrap();
        board.drop_piece(2, TWO).unwrap();
        board.drop_piece(2, ONE).unwrap();
        assert_eq!(board.to_string(), ". . 1\n1 . 2\n");
        assert_eq!(board.get(0, 2).and_then(Cell::player), Some(ONE));
        assert_eq!(board.get(0, 0).and_then(Cell::player), None);
    }
}
