use rand::Rng;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;
pub const POINTS_PER_LINE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceColor {
    Cyan,
    Yellow,
    Purple,
    Orange,
    Blue,
    Green,
    Red,
}

#[derive(Debug, Clone)]
pub struct Piece {
    shape: Vec<Vec<u8>>,
    color: PieceColor,
    x: i32,
    y: i32,
}

impl Piece {
    pub fn shape(&self) -> &[Vec<u8>] {
        &self.shape
    }

    pub fn color(&self) -> PieceColor {
        self.color
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// The seven tetrominoes in spawn orientation.
const SHAPES: [(&[&[u8]], PieceColor); 7] = [
    (&[&[1, 1, 1, 1]], PieceColor::Cyan),
    (&[&[1, 1], &[1, 1]], PieceColor::Yellow),
    (&[&[0, 1, 0], &[1, 1, 1]], PieceColor::Purple),
    (&[&[1, 0, 0], &[1, 1, 1]], PieceColor::Orange),
    (&[&[0, 0, 1], &[1, 1, 1]], PieceColor::Blue),
    (&[&[0, 1, 1], &[1, 1, 0]], PieceColor::Green),
    (&[&[1, 1, 0], &[0, 1, 1]], PieceColor::Red),
];

fn random_piece(rng: &mut impl Rng) -> Piece {
    let (rows, color) = SHAPES[rng.gen_range(0..SHAPES.len())];
    Piece {
        shape: rows.iter().map(|row| row.to_vec()).collect(),
        color,
        x: 3,
        y: 0,
    }
}

/// Falling-blocks game on a 10x20 well. Pieces spawn at column 3 and may
/// poke above the top edge mid-rotation; only cells at y >= 0 are merged
/// into the board.
#[derive(Debug, Clone)]
pub struct TetrisGame {
    board: Vec<Vec<Option<PieceColor>>>,
    piece: Piece,
    next: Piece,
    score: u32,
    lines: u32,
    game_over: bool,
}

impl TetrisGame {
    pub fn new(rng: &mut impl Rng) -> Self {
        TetrisGame {
            board: vec![vec![None; BOARD_WIDTH]; BOARD_HEIGHT],
            piece: random_piece(rng),
            next: random_piece(rng),
            score: 0,
            lines: 0,
            game_over: false,
        }
    }

    pub fn board(&self) -> &[Vec<Option<PieceColor>>] {
        &self.board
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// The piece queued to spawn after the active one locks.
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn collides(&self, shape: &[Vec<u8>], x: i32, y: i32) -> bool {
        for (row, cells) in shape.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let bx = x + col as i32;
                let by = y + row as i32;
                if bx < 0 || bx >= BOARD_WIDTH as i32 || by >= BOARD_HEIGHT as i32 {
                    return true;
                }
                // Cells above the well are legal until they land.
                if by >= 0 && self.board[by as usize][bx as usize].is_some() {
                    return true;
                }
            }
        }
        false
    }

    /// Drops the piece one row, locking it and spawning the next piece when
    /// it cannot fall further. Returns true while the game is still live.
    pub fn tick(&mut self, rng: &mut impl Rng) -> bool {
        if self.game_over {
            return false;
        }
        if !self.collides(&self.piece.shape, self.piece.x, self.piece.y + 1) {
            self.piece.y += 1;
            return true;
        }
        self.lock_piece(rng);
        !self.game_over
    }

    pub fn move_left(&mut self) {
        self.shift(-1);
    }

    pub fn move_right(&mut self) {
        self.shift(1);
    }

    fn shift(&mut self, dx: i32) {
        if self.game_over {
            return;
        }
        if !self.collides(&self.piece.shape, self.piece.x + dx, self.piece.y) {
            self.piece.x += dx;
        }
    }

    /// Rotates the piece clockwise if the rotated footprint fits.
    pub fn rotate(&mut self) {
        if self.game_over {
            return;
        }
        let shape = &self.piece.shape;
        let rows = shape.len();
        let cols = shape[0].len();
        let mut rotated = vec![vec![0u8; rows]; cols];
        for (y, row) in shape.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                rotated[x][rows - 1 - y] = cell;
            }
        }
        if !self.collides(&rotated, self.piece.x, self.piece.y) {
            self.piece.shape = rotated;
        }
    }

    /// Slams the piece to the bottom and locks it immediately.
    pub fn hard_drop(&mut self, rng: &mut impl Rng) {
        if self.game_over {
            return;
        }
        while !self.collides(&self.piece.shape, self.piece.x, self.piece.y + 1) {
            self.piece.y += 1;
        }
        self.lock_piece(rng);
    }

    fn lock_piece(&mut self, rng: &mut impl Rng) {
        for (row, cells) in self.piece.shape.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let by = self.piece.y + row as i32;
                let bx = self.piece.x + col as i32;
                if by >= 0 {
                    self.board[by as usize][bx as usize] = Some(self.piece.color);
                }
            }
        }
        self.sweep_lines();
        let spawned = std::mem::replace(&mut self.next, random_piece(rng));
        if self.collides(&spawned.shape, spawned.x, spawned.y) {
            self.game_over = true;
        }
        self.piece = spawned;
    }

    fn sweep_lines(&mut self) {
        let before = self.board.len();
        self.board.retain(|row| row.iter().any(|cell| cell.is_none()));
        let cleared = (before - self.board.len()) as u32;
        for _ in 0..cleared {
            self.board.insert(0, vec![None; BOARD_WIDTH]);
        }
        self.lines += cleared;
        self.score += cleared * POINTS_PER_LINE;
    }
}
