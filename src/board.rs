//! Playfield: fixed grid of locked cells, row clearing and the top-out check.

use crate::piece::Piece;

/// Playfield height in rows.
pub const BOARD_HEIGHT: usize = 20;
/// Playfield width in columns.
pub const BOARD_WIDTH: usize = 14;

/// Single cell: empty or a locked block carrying the colour id of the piece that wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Block(u8),
}

impl Cell {
    #[inline]
    pub fn is_occupied(self) -> bool {
        matches!(self, Self::Block(_))
    }

    #[inline]
    pub fn color_id(self) -> Option<u8> {
        match self {
            Self::Empty => None,
            Self::Block(id) => Some(id),
        }
    }
}

pub type Row = [Cell; BOARD_WIDTH];

/// Playfield: rows[y][x], rows[0] is the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    #[inline]
    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < BOARD_WIDTH && (y as usize) < BOARD_HEIGHT
    }

    /// Bounds-checked read.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::in_bounds(x, y).then(|| self.rows[y as usize][x as usize])
    }

    /// Whether the cell is filled. Coordinates must be inside the grid; the
    /// movement rules do the range checks before asking.
    #[inline]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows[y][x].is_occupied()
    }

    /// Writes a cell; out-of-range coordinates are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if Self::in_bounds(x, y) {
            self.rows[y as usize][x as usize] = cell;
        }
    }

    pub fn row(&self, y: usize) -> &Row {
        &self.rows[y]
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|c| c.is_occupied()))
    }

    /// Writes the piece's colour into every cell under an occupied matrix cell.
    /// The piece position must already be validated.
    pub fn lock_piece(&mut self, piece: &Piece) {
        let tag = Cell::Block(piece.color_id());
        for (x, y) in piece.occupied() {
            debug_assert!(Self::in_bounds(x, y), "locking outside the grid at ({x}, {y})");
            self.set(x, y, tag);
        }
    }

    /// Removes every full row at once and drops the rows above into the gap.
    /// Full rows are picked from the board as it stands, so a row moved down
    /// by the compaction is never examined twice. Returns the number removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_y = BOARD_HEIGHT;

        for read_y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                self.rows[write_y] = self.rows[read_y];
            }
        }

        for row in &mut self.rows[..write_y] {
            *row = [Cell::Empty; BOARD_WIDTH];
        }
        cleared
    }

    /// Top-out: any block in row 0.
    pub fn top_row_filled(&self) -> bool {
        self.rows[0].iter().any(|c| c.is_occupied())
    }

    /// Builds a board from ASCII rows ('.' empty, digit = colour id, anything else = 1),
    /// aligned to the bottom of the grid.
    #[cfg(test)]
    pub fn from_ascii(lines: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    d if d.is_ascii_digit() => Cell::Block(d as u8 - b'0'),
                    _ => Cell::Block(1),
                };
                board.set(x as i32, (offset + i) as i32, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.set(x as i32, y as i32, Cell::Block(2));
        }
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert!(board.rows().iter().flatten().all(|c| *c == Cell::Empty));
        assert!(!board.top_row_filled());
    }

    #[test]
    fn get_is_bounds_checked() {
        let board = Board::new();
        assert_eq!(board.get(0, 0), Some(Cell::Empty));
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
    }

    #[test]
    #[should_panic]
    fn is_occupied_out_of_range_panics() {
        let board = Board::new();
        let _ = board.is_occupied(BOARD_WIDTH, 0);
    }

    #[test]
    fn lock_writes_colour_tag() {
        let mut board = Board::new();
        let piece = Piece::at(PieceKind::T, 3, 10);
        board.lock_piece(&piece);
        // T: 010 / 111
        assert_eq!(board.get(4, 10), Some(Cell::Block(3)));
        assert_eq!(board.get(3, 11), Some(Cell::Block(3)));
        assert_eq!(board.get(4, 11), Some(Cell::Block(3)));
        assert_eq!(board.get(5, 11), Some(Cell::Block(3)));
        assert_eq!(board.get(3, 10), Some(Cell::Empty));
    }

    #[test]
    fn clear_full_rows_compacts_in_one_pass() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        board.set(3, 1, Cell::Block(5));
        board.set(9, 1, Cell::Block(6));
        fill_row(&mut board, 2);

        assert_eq!(board.clear_full_rows(), 2);
        assert!(board.row(0).iter().all(|c| *c == Cell::Empty));
        assert!(board.row(1).iter().all(|c| *c == Cell::Empty));
        assert_eq!(board.get(3, 2), Some(Cell::Block(5)));
        assert_eq!(board.get(9, 2), Some(Cell::Block(6)));
        assert_eq!(board.row(2).iter().filter(|c| c.is_occupied()).count(), 2);
    }

    #[test]
    fn clear_four_stacked_rows() {
        let mut board = Board::from_ascii(&[
            "5.............",
            "22222222222222",
            "22222222222222",
            "22222222222222",
            "22222222222222",
        ]);
        assert_eq!(board.clear_full_rows(), 4);
        assert_eq!(board.get(0, (BOARD_HEIGHT - 1) as i32), Some(Cell::Block(5)));
        assert_eq!(board.clear_full_rows(), 0);
    }

    #[test]
    fn top_row_detects_any_colour() {
        let mut board = Board::new();
        board.set(13, 0, Cell::Block(7));
        assert!(board.top_row_filled());
    }
}
