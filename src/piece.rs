//! Tetromino templates and the square occupancy matrix a piece rotates in.

use crate::board::BOARD_WIDTH;
use rand::Rng;

/// Largest bounding box (the I piece).
pub const MAX_PIECE_WIDTH: usize = 4;

/// Occupancy matrix; only the top-left `width × width` block is meaningful.
pub type Matrix = [[bool; MAX_PIECE_WIDTH]; MAX_PIECE_WIDTH];

/// Tetromino kinds in colour-id order (O = 1 … I = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    Z,
    T,
    S,
    J,
    L,
    I,
}

/// Read-only spawn shape. Pieces copy it; nothing ever mutates a template.
#[derive(Debug)]
pub struct Template {
    pub width: usize,
    pub cells: Matrix,
}

const fn template(width: usize, rows: [[u8; MAX_PIECE_WIDTH]; MAX_PIECE_WIDTH]) -> Template {
    let mut cells = [[false; MAX_PIECE_WIDTH]; MAX_PIECE_WIDTH];
    let mut r = 0;
    while r < MAX_PIECE_WIDTH {
        let mut c = 0;
        while c < MAX_PIECE_WIDTH {
            cells[r][c] = rows[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    Template { width, cells }
}

static TEMPLATES: [Template; 7] = [
    template(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    template(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
    template(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    template(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    template(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    template(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    template(4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]),
];

impl PieceKind {
    pub const ALL: [Self; 7] = [Self::O, Self::Z, Self::T, Self::S, Self::J, Self::L, Self::I];

    pub fn template(self) -> &'static Template {
        &TEMPLATES[self as usize]
    }

    /// Colour id written into the board when the piece locks (1..=7, never 0).
    pub fn color_id(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_color_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id.checked_sub(1)?)).copied()
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// A tetromino: copied template matrix plus the top-left of its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub x: i32,
    pub y: i32,
    kind: PieceKind,
    width: usize,
    cells: Matrix,
}

impl Piece {
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, 0, 0)
    }

    pub fn at(kind: PieceKind, x: i32, y: i32) -> Self {
        let t = kind.template();
        Self {
            x,
            y,
            kind,
            width: t.width,
            cells: t.cells,
        }
    }

    /// Random kind in a random column on the top row, fully inside the grid.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = PieceKind::random(rng);
        let max_x = BOARD_WIDTH - kind.template().width;
        Self::at(kind, rng.gen_range(0..=max_x) as i32, 0)
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn color_id(&self) -> u8 {
        self.kind.color_id()
    }

    pub fn cells(&self) -> &Matrix {
        &self.cells
    }

    #[inline]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.width && col < self.width && self.cells[row][col]
    }

    /// Occupied cells as (col, row) inside the matrix.
    pub fn offsets(&self) -> impl Iterator<Item = (usize, usize)> {
        let piece = *self;
        (0..piece.width).flat_map(move |row| {
            (0..piece.width).filter_map(move |col| piece.cells[row][col].then_some((col, row)))
        })
    }

    /// Occupied cells in board coordinates (x, y).
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x, y) = (self.x, self.y);
        self.offsets()
            .map(move |(col, row)| (x + col as i32, y + row as i32))
    }

    /// Same shape shifted by (dx, dy).
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// 90° clockwise in place: transpose, then reverse each row.
    pub fn rotate_cw(&mut self) {
        let w = self.width;
        for i in 0..w {
            for j in (i + 1)..w {
                let tmp = self.cells[i][j];
                self.cells[i][j] = self.cells[j][i];
                self.cells[j][i] = tmp;
            }
        }
        for row in &mut self.cells[..w] {
            row[..w].reverse();
        }
    }
}
