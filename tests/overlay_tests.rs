use brickgame::board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell};
use brickgame::overlay::{Overlay, OverlayCell};
use brickgame::piece::{Piece, PieceKind};
use brickgame::rules::{Direction, move_piece};

fn assert_no_double_marking(overlay: &Overlay, piece: &Piece) {
    for (x, y) in piece.occupied() {
        assert!(
            matches!(overlay.get(x, y), Some(OverlayCell::Active(_))),
            "live cell ({x}, {y}) lost"
        );
    }
}

#[test]
fn live_piece_wins_as_it_falls_onto_its_ghost() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let mut piece = Piece::at(kind, 4, 0);
        loop {
            let overlay = Overlay::compose(&piece, &board, true);
            assert_no_double_marking(&overlay, &piece);
            let active = overlay.count(|c| matches!(c, OverlayCell::Active(_)));
            let ghost = overlay.count(|c| matches!(c, OverlayCell::Ghost(_)));
            assert_eq!(active, 4, "{kind:?}");
            assert!(ghost <= 4, "{kind:?}");
            if !move_piece(&mut piece, Direction::Down, &board) {
                // resting piece is its own ghost
                assert_eq!(ghost, 0, "{kind:?}");
                break;
            }
        }
    }
}

#[test]
fn ghost_lands_on_stack_with_piece_colour() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH {
        board.set(x as i32, (BOARD_HEIGHT - 1) as i32, Cell::Block(2));
    }
    let t = Piece::at(PieceKind::T, 5, 0);
    let overlay = Overlay::compose(&t, &board, true);
    // T bottom row rests on row 18, its nub on row 17
    assert_eq!(overlay.get(5, 18), Some(OverlayCell::Ghost(3)));
    assert_eq!(overlay.get(7, 18), Some(OverlayCell::Ghost(3)));
    assert_eq!(overlay.get(6, 17), Some(OverlayCell::Ghost(3)));
    assert_eq!(overlay.get(6, 19), Some(OverlayCell::Empty));
    // board untouched
    assert_eq!(board.get(6, 18), Some(Cell::Empty));
}
