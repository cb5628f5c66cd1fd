//! Per-frame overlay: the live piece and its landing preview, laid over the board
//! without touching it.

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Board};
use crate::piece::Piece;
use crate::rules::landing_position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayCell {
    #[default]
    Empty,
    /// Live piece cell, with its colour id.
    Active(u8),
    /// Landing preview cell, with the colour id of the piece it previews.
    Ghost(u8),
}

/// Board-sized render buffer, rebuilt every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    cells: [[OverlayCell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Overlay {
    pub fn empty() -> Self {
        Self {
            cells: [[OverlayCell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Live piece first, then the ghost wherever the live piece is not.
    pub fn compose(piece: &Piece, board: &Board, with_ghost: bool) -> Self {
        let mut overlay = Self::empty();
        let color = piece.color_id();
        for (x, y) in piece.occupied() {
            overlay.put(x, y, OverlayCell::Active(color));
        }
        if with_ghost {
            let landed = landing_position(piece, board);
            for (x, y) in landed.occupied() {
                if !matches!(overlay.get(x, y), Some(OverlayCell::Active(_))) {
                    overlay.put(x, y, OverlayCell::Ghost(color));
                }
            }
        }
        overlay
    }

    fn put(&mut self, x: i32, y: i32, cell: OverlayCell) {
        if Board::in_bounds(x, y) {
            self.cells[y as usize][x as usize] = cell;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<OverlayCell> {
        Board::in_bounds(x, y).then(|| self.cells[y as usize][x as usize])
    }

    pub fn rows(&self) -> &[[OverlayCell; BOARD_WIDTH]] {
        &self.cells
    }

    pub fn count(&self, pred: impl Fn(OverlayCell) -> bool) -> usize {
        self.cells.iter().flatten().filter(|c| pred(**c)).count()
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::empty()
    }
}
