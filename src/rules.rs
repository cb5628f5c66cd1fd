//! Collision and movement rules: predicates over (piece, board) plus the two
//! mutating operations built on them, single-step moves and rotation.
//!
//! A rejected move or rotation is normal play, not an error: the piece is left
//! untouched and the caller gets `false` back.

use crate::board::Board;
use crate::piece::Piece;

/// Rotation attempts before giving up; four clockwise turns come back to the start.
const MAX_ROTATION_ATTEMPTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Left,
    Right,
    /// Internal repositioning only; never bound to a key.
    Up,
}

/// Out of the grid or on a locked cell.
#[inline]
fn blocked(board: &Board, x: i32, y: i32) -> bool {
    !Board::in_bounds(x, y) || board.is_occupied(x as usize, y as usize)
}

/// Moving down one would leave the grid or overlap a locked cell.
pub fn touches_below(piece: &Piece, board: &Board) -> bool {
    piece.occupied().any(|(x, y)| blocked(board, x, y + 1))
}

pub fn touches_left(piece: &Piece, board: &Board) -> bool {
    piece.occupied().any(|(x, y)| blocked(board, x - 1, y))
}

pub fn touches_right(piece: &Piece, board: &Board) -> bool {
    piece.occupied().any(|(x, y)| blocked(board, x + 1, y))
}

/// Every occupied cell is inside the grid and on an empty cell.
pub fn can_place(piece: &Piece, board: &Board) -> bool {
    piece.occupied().all(|(x, y)| !blocked(board, x, y))
}

/// Validity of an already-rotated piece.
#[inline]
pub fn can_rotate(rotated: &Piece, board: &Board) -> bool {
    can_place(rotated, board)
}

/// Translates the piece one cell. Returns whether it moved.
pub fn move_piece(piece: &mut Piece, direction: Direction, board: &Board) -> bool {
    let allowed = match direction {
        Direction::Down => !touches_below(piece, board),
        Direction::Left => !touches_left(piece, board),
        Direction::Right => !touches_right(piece, board),
        Direction::Up => piece.y > 0,
    };
    if !allowed {
        return false;
    }
    let (dx, dy) = match direction {
        Direction::Down => (0, 1),
        Direction::Left => (-1, 0),
        Direction::Right => (1, 0),
        Direction::Up => (0, -1),
    };
    *piece = piece.shifted(dx, dy);
    true
}

/// Drops a copy of the piece until it rests on the floor or the stack.
pub fn landing_position(piece: &Piece, board: &Board) -> Piece {
    let mut landed = *piece;
    while move_piece(&mut landed, Direction::Down, board) {}
    landed
}

/// Clockwise rotation. When the next orientation does not fit, keeps turning
/// from the rotated matrix and takes the first one that does. If none of the
/// other three fits the piece is left exactly as it was and `false` is returned.
pub fn rotate(piece: &mut Piece, board: &Board) -> bool {
    let original = *piece;
    let mut candidate = original;
    for _ in 1..MAX_ROTATION_ATTEMPTS {
        candidate.rotate_cw();
        if can_rotate(&candidate, board) {
            *piece = candidate;
            return true;
        }
    }
    *piece = original;
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Cell};
    use crate::piece::PieceKind;

    #[test]
    fn left_wall_stops_movement() {
        let board = Board::new();
        let mut o = Piece::at(PieceKind::O, 0, 5);
        assert!(touches_left(&o, &board));
        assert!(!move_piece(&mut o, Direction::Left, &board));
        assert_eq!(o.x, 0);
    }

    #[test]
    fn right_wall_stops_movement() {
        let board = Board::new();
        let mut o = Piece::at(PieceKind::O, (BOARD_WIDTH - 2) as i32, 5);
        assert!(!move_piece(&mut o, Direction::Right, &board));
        assert_eq!(o.x, (BOARD_WIDTH - 2) as i32);
    }

    #[test]
    fn locked_cells_block_sideways() {
        let mut board = Board::new();
        board.set(4, 6, Cell::Block(1));
        let mut o = Piece::at(PieceKind::O, 5, 5);
        assert!(touches_left(&o, &board));
        assert!(!move_piece(&mut o, Direction::Left, &board));
        assert!(move_piece(&mut o, Direction::Right, &board));
        assert_eq!(o.x, 6);
    }

    #[test]
    fn up_only_while_below_row_zero() {
        let board = Board::new();
        let mut t = Piece::at(PieceKind::T, 3, 1);
        assert!(move_piece(&mut t, Direction::Up, &board));
        assert_eq!(t.y, 0);
        assert!(!move_piece(&mut t, Direction::Up, &board));
        assert_eq!(t.y, 0);
    }

    #[test]
    fn empty_matrix_columns_may_hang_off_the_edge() {
        let board = Board::new();
        let mut i = Piece::at(PieceKind::I, 0, 0);
        assert!(rotate(&mut i, &board));
        // vertical bar lives in matrix column 3
        while move_piece(&mut i, Direction::Left, &board) {}
        assert_eq!(i.x, -3);
        assert!(can_place(&i, &board));
    }

    #[test]
    fn landing_position_rests_on_stack() {
        let mut board = Board::new();
        board.set(2, (BOARD_HEIGHT - 1) as i32, Cell::Block(4));
        let t = Piece::at(PieceKind::T, 1, 0);
        let landed = landing_position(&t, &board);
        assert_eq!(landed.x, 1);
        // bottom row of T sits on row 18 above the block at (2, 19)
        assert_eq!(landed.y, (BOARD_HEIGHT - 3) as i32);
        assert!(touches_below(&landed, &board));
    }

    #[test]
    fn rotation_retries_from_the_rotated_matrix() {
        let mut board = Board::new();
        // L turned once needs (2, 12); turned twice it does not.
        board.set(2, 12, Cell::Block(2));
        let mut l = Piece::at(PieceKind::L, 0, 10);
        assert!(rotate(&mut l, &board));

        let mut expected = Piece::at(PieceKind::L, 0, 10);
        expected.rotate_cw();
        expected.rotate_cw();
        assert_eq!(l, expected);
    }

    #[test]
    fn rotation_gives_up_when_no_orientation_fits() {
        let mut board = Board::new();
        // every other T orientation needs (1, 12)
        board.set(1, 12, Cell::Block(2));
        let mut t = Piece::at(PieceKind::T, 0, 10);
        assert!(!rotate(&mut t, &board));
        assert_eq!(t, Piece::at(PieceKind::T, 0, 10));
    }
}
