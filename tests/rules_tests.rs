use brickgame::board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell};
use brickgame::piece::{Piece, PieceKind};
use brickgame::rules::{Direction, can_place, landing_position, move_piece, rotate, touches_below};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_inside_and_free(piece: &Piece, board: &Board) {
    for (x, y) in piece.occupied() {
        assert!((0..BOARD_WIDTH as i32).contains(&x), "x out of range: {x}");
        assert!((0..BOARD_HEIGHT as i32).contains(&y), "y out of range: {y}");
        assert!(!board.is_occupied(x as usize, y as usize), "overlap at ({x}, {y})");
    }
}

#[test]
fn four_rotations_return_to_start() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let start = Piece::at(kind, 5, 5);
        let mut piece = start;
        for _ in 0..4 {
            assert!(rotate(&mut piece, &board), "{kind:?}");
        }
        assert_eq!(piece, start, "{kind:?}");
    }
}

#[test]
fn random_moves_never_leave_grid_or_overlap() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut board = Board::new();
    // scattered obstacles in the lower half
    for _ in 0..25 {
        let x = rng.gen_range(0..BOARD_WIDTH) as i32;
        let y = rng.gen_range(10..BOARD_HEIGHT) as i32;
        board.set(x, y, Cell::Block(1));
    }

    for _ in 0..50 {
        let mut piece = Piece::spawn(&mut rng);
        if !can_place(&piece, &board) {
            continue;
        }
        for _ in 0..60 {
            match rng.gen_range(0..4) {
                0 => move_piece(&mut piece, Direction::Left, &board),
                1 => move_piece(&mut piece, Direction::Right, &board),
                2 => move_piece(&mut piece, Direction::Down, &board),
                _ => rotate(&mut piece, &board),
            };
            assert_inside_and_free(&piece, &board);
        }
    }
}

#[test]
fn o_piece_falls_to_the_floor_and_locks() {
    let mut board = Board::new();
    let mut o = Piece::at(PieceKind::O, 6, 0);
    while !touches_below(&o, &board) {
        assert!(move_piece(&mut o, Direction::Down, &board));
    }
    assert_eq!(o.y, (BOARD_HEIGHT - 2) as i32);
    assert_eq!(landing_position(&Piece::at(PieceKind::O, 6, 0), &board), o);

    board.lock_piece(&o);
    for y in [18, 19] {
        for x in [6, 7] {
            assert_eq!(board.get(x, y), Some(Cell::Block(1)));
        }
    }
    let occupied = board.rows().iter().flatten().filter(|c| c.is_occupied()).count();
    assert_eq!(occupied, 4);
}

#[test]
fn down_is_refused_on_the_floor() {
    let board = Board::new();
    let mut i = Piece::at(PieceKind::I, 0, (BOARD_HEIGHT - 1) as i32);
    assert!(touches_below(&i, &board));
    assert!(!move_piece(&mut i, Direction::Down, &board));
    assert_eq!(i.y, (BOARD_HEIGHT - 1) as i32);
}
