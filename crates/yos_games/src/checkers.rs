use rand::Rng;
use thiserror::Error;

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Forward row direction: black marches down the board, red up.
    fn forward(self) -> i32 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }

    fn king_row(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Black => BOARD_SIZE - 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerPiece {
    pub side: Side,
    pub king: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: (usize, usize),
    pub to: (usize, usize),
    /// Square of the jumped piece, when this move is a capture.
    pub capture: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal move")]
pub struct IllegalMove;

/// American checkers on the dark squares of an 8x8 board, red against a
/// computer-driven black. Captures are forced, jumps chain until the
/// capturing piece runs out of jumps, and promotion ends a chain.
#[derive(Debug, Clone)]
pub struct CheckersGame {
    board: [[Option<CheckerPiece>; BOARD_SIZE]; BOARD_SIZE],
    turn: Side,
    winner: Option<Side>,
    /// Square of a piece mid-jump; while set, only its captures are legal.
    chain: Option<(usize, usize)>,
}

impl CheckersGame {
    pub fn new() -> Self {
        let mut board = [[None; BOARD_SIZE]; BOARD_SIZE];
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 != 1 {
                    continue;
                }
                if row < 3 {
                    board[row][col] = Some(CheckerPiece { side: Side::Black, king: false });
                } else if row > 4 {
                    board[row][col] = Some(CheckerPiece { side: Side::Red, king: false });
                }
            }
        }
        CheckersGame { board, turn: Side::Red, winner: None, chain: None }
    }

    pub fn piece_at(&self, row: usize, col: usize) -> Option<CheckerPiece> {
        self.board[row][col]
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// The piece that must continue jumping, if a chain is in progress.
    pub fn chain_piece(&self) -> Option<(usize, usize)> {
        self.chain
    }

    fn directions(piece: CheckerPiece) -> Vec<(i32, i32)> {
        let mut dirs = vec![(piece.side.forward(), -1), (piece.side.forward(), 1)];
        if piece.king {
            let back = -piece.side.forward();
            dirs.push((back, -1));
            dirs.push((back, 1));
        }
        dirs
    }

    fn on_board(row: i32, col: i32) -> bool {
        (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
    }

    /// Raw moves for the piece on a square, ignoring the forced-capture rule.
    fn raw_moves(&self, row: usize, col: usize) -> Vec<Move> {
        let Some(piece) = self.board[row][col] else {
            return Vec::new();
        };
        let mut moves = Vec::new();
        for (dr, dc) in Self::directions(piece) {
            let (sr, sc) = (row as i32 + dr, col as i32 + dc);
            if !Self::on_board(sr, sc) {
                continue;
            }
            match self.board[sr as usize][sc as usize] {
                None => moves.push(Move {
                    from: (row, col),
                    to: (sr as usize, sc as usize),
                    capture: None,
                }),
                Some(other) if other.side != piece.side => {
                    let (jr, jc) = (sr + dr, sc + dc);
                    if Self::on_board(jr, jc) && self.board[jr as usize][jc as usize].is_none() {
                        moves.push(Move {
                            from: (row, col),
                            to: (jr as usize, jc as usize),
                            capture: Some((sr as usize, sc as usize)),
                        });
                    }
                }
                Some(_) => {}
            }
        }
        moves
    }

    /// All legal moves for a side, with forced capture and any in-progress
    /// chain applied.
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        if self.winner.is_some() || side != self.turn {
            return Vec::new();
        }
        if let Some((row, col)) = self.chain {
            return self
                .raw_moves(row, col)
                .into_iter()
                .filter(|mv| mv.capture.is_some())
                .collect();
        }
        let mut all = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.board[row][col].map(|p| p.side) == Some(side) {
                    all.extend(self.raw_moves(row, col));
                }
            }
        }
        if all.iter().any(|mv| mv.capture.is_some()) {
            all.retain(|mv| mv.capture.is_some());
        }
        all
    }

    /// Legal moves restricted to one square, for driving a board cursor.
    pub fn legal_moves_from(&self, row: usize, col: usize) -> Vec<Move> {
        self.legal_moves(self.turn)
            .into_iter()
            .filter(|mv| mv.from == (row, col))
            .collect()
    }

    /// Applies a move for the side to play. Rejects anything outside the
    /// legal set, including simple moves while a capture is available.
    pub fn apply(&mut self, mv: Move) -> Result<(), IllegalMove> {
        if !self.legal_moves(self.turn).contains(&mv) {
            return Err(IllegalMove);
        }
        let mut piece = self.board[mv.from.0][mv.from.1].ok_or(IllegalMove)?;
        self.board[mv.from.0][mv.from.1] = None;
        if let Some((cr, cc)) = mv.capture {
            self.board[cr][cc] = None;
        }
        let promoted = !piece.king && mv.to.0 == piece.side.king_row();
        if promoted {
            piece.king = true;
        }
        self.board[mv.to.0][mv.to.1] = Some(piece);

        let chain_continues = mv.capture.is_some()
            && !promoted
            && self
                .raw_moves(mv.to.0, mv.to.1)
                .iter()
                .any(|next| next.capture.is_some());
        if chain_continues {
            self.chain = Some(mv.to);
            return Ok(());
        }
        self.chain = None;
        let mover = self.turn;
        self.turn = mover.opponent();
        if !self.side_has_pieces(self.turn) || self.legal_moves(self.turn).is_empty() {
            self.winner = Some(mover);
        }
        Ok(())
    }

    fn side_has_pieces(&self, side: Side) -> bool {
        self.board
            .iter()
            .flatten()
            .any(|cell| cell.map(|p| p.side) == Some(side))
    }

    /// Picks black's next move uniformly at random from the legal set. The
    /// forced-capture rule already narrows the set to jumps when any exist.
    pub fn ai_move(&self, rng: &mut impl Rng) -> Option<Move> {
        let moves = self.legal_moves(Side::Black);
        if moves.is_empty() {
            None
        } else {
            Some(moves[rng.gen_range(0..moves.len())])
        }
    }
}

impl Default for CheckersGame {
    fn default() -> Self {
        CheckersGame::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn empty_game(turn: Side) -> CheckersGame {
        CheckersGame {
            board: [[None; BOARD_SIZE]; BOARD_SIZE],
            turn,
            winner: None,
            chain: None,
        }
    }

    fn put(game: &mut CheckersGame, row: usize, col: usize, side: Side, king: bool) {
        game.board[row][col] = Some(CheckerPiece { side, king });
    }

    fn simple(from: (usize, usize), to: (usize, usize)) -> Move {
        Move { from, to, capture: None }
    }

    fn jump(from: (usize, usize), to: (usize, usize), over: (usize, usize)) -> Move {
        Move { from, to, capture: Some(over) }
    }

    #[test]
    fn new_game_places_twelve_pieces_per_side_on_dark_squares() {
        let game = CheckersGame::new();
        let mut red = 0;
        let mut black = 0;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(piece) = game.piece_at(row, col) {
                    assert_eq!((row + col) % 2, 1);
                    assert!(!piece.king);
                    match piece.side {
                        Side::Red => red += 1,
                        Side::Black => black += 1,
                    }
                }
            }
        }
        assert_eq!((red, black), (12, 12));
        assert_eq!(game.turn(), Side::Red);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn a_simple_move_passes_the_turn() {
        let mut game = CheckersGame::new();
        game.apply(simple((5, 0), (4, 1))).unwrap();
        assert_eq!(game.turn(), Side::Black);
        assert!(game.piece_at(5, 0).is_none());
        assert_eq!(
            game.piece_at(4, 1),
            Some(CheckerPiece { side: Side::Red, king: false })
        );
    }

    #[test]
    fn men_cannot_move_backwards() {
        let mut game = empty_game(Side::Red);
        put(&mut game, 4, 3, Side::Red, false);
        let moves = game.legal_moves_from(4, 3);
        assert!(moves.iter().all(|mv| mv.to.0 == 3));
    }

    #[test]
    fn kings_move_in_all_four_diagonals() {
        let mut game = empty_game(Side::Red);
        put(&mut game, 4, 3, Side::Red, true);
        let moves = game.legal_moves_from(4, 3);
        let targets: Vec<_> = moves.iter().map(|mv| mv.to).collect();
        assert!(targets.contains(&(3, 2)));
        assert!(targets.contains(&(3, 4)));
        assert!(targets.contains(&(5, 2)));
        assert!(targets.contains(&(5, 4)));
    }

    #[test]
    fn capture_removes_the_jumped_piece() {
        let mut game = empty_game(Side::Red);
        put(&mut game, 5, 2, Side::Red, false);
        put(&mut game, 4, 3, Side::Black, false);
        game.apply(jump((5, 2), (3, 4), (4, 3))).unwrap();
        assert!(game.piece_at(4, 3).is_none());
        assert!(game.piece_at(5, 2).is_none());
        assert_eq!(
            game.piece_at(3, 4),
            Some(CheckerPiece { side: Side::Red, king: false })
        );
    }

    #[test]
    fn available_captures_exclude_simple_moves() {
        let mut game = empty_game(Side::Red);
        put(&mut game, 5, 2, Side::Red, false);
        put(&mut game, 5, 6, Side::Red, false);
        put(&mut game, 4, 3, Side::Black, false);
        let moves = game.legal_moves(Side::Red);
        assert_eq!(moves, vec![jump((5, 2), (3, 4), (4, 3))]);
        assert_eq!(game.apply(simple((5, 6), (4, 5))), Err(IllegalMove));
        // The rejected move left the board untouched.
        assert!(game.piece_at(5, 6).is_some());
        assert_eq!(game.turn(), Side::Red);
    }

    #[test]
    fn a_chain_keeps_the_turn_and_pins_the_jumping_piece() {
        let mut game = empty_game(Side::Red);
        put(&mut game, 6, 1, Side::Red, false);
        put(&mut game, 5, 2, Side::Black, false);
        put(&mut game, 3, 4, Side::Black, false);
        game.apply(jump((6, 1), (4, 3), (5, 2))).unwrap();
        assert_eq!(game.turn(), Side::Red);
        assert_eq!(game.chain_piece(), Some((4, 3)));
        // Mid-chain, only the continuation jump is legal.
        assert_eq!(game.legal_moves(Side::Red), vec![jump((4, 3), (2, 5), (3, 4))]);
        game.apply(jump((4, 3), (2, 5), (3, 4))).unwrap();
        assert_eq!(game.chain_piece(), None);
        assert_eq!(game.turn(), Side::Black);
    }

    #[test]
    fn reaching_the_far_rank_promotes_and_ends_the_chain() {
        let mut game = empty_game(Side::Red);
        put(&mut game, 2, 1, Side::Red, false);
        put(&mut game, 1, 2, Side::Black, false);
        // Another black piece sits where a chained jump would continue; the
        // promotion still hands the turn over.
        put(&mut game, 1, 4, Side::Black, false);
        game.apply(jump((2, 1), (0, 3), (1, 2))).unwrap();
        assert_eq!(
            game.piece_at(0, 3),
            Some(CheckerPiece { side: Side::Red, king: true })
        );
        assert_eq!(game.chain_piece(), None);
        assert_eq!(game.turn(), Side::Black);
    }

    #[test]
    fn a_piece_is_promoted_only_once() {
        let mut game = empty_game(Side::Red);
        put(&mut game, 1, 2, Side::Red, true);
        put(&mut game, 5, 6, Side::Black, false);
        game.apply(simple((1, 2), (0, 3))).unwrap();
        game.turn = Side::Red;
        game.apply(simple((0, 3), (1, 4))).unwrap();
        assert_eq!(
            game.piece_at(1, 4),
            Some(CheckerPiece { side: Side::Red, king: true })
        );
    }

    #[test]
    fn capturing_the_last_piece_wins() {
        let mut game = empty_game(Side::Red);
        put(&mut game, 5, 2, Side::Red, false);
        put(&mut game, 4, 3, Side::Black, false);
        game.apply(jump((5, 2), (3, 4), (4, 3))).unwrap();
        assert_eq!(game.winner(), Some(Side::Red));
        assert!(game.legal_moves(Side::Black).is_empty());
    }

    #[test]
    fn blocked_opponent_loses_immediately() {
        let mut game = empty_game(Side::Red);
        // The black king in the corner is pinned: its only step lands on the
        // red king at 6,1 and the jump square 5,2 is occupied too.
        put(&mut game, 7, 0, Side::Black, true);
        put(&mut game, 6, 1, Side::Red, true);
        put(&mut game, 5, 2, Side::Red, true);
        put(&mut game, 4, 1, Side::Red, true);
        game.apply(simple((4, 1), (5, 0))).unwrap();
        assert_eq!(game.winner(), Some(Side::Red));
    }

    #[test]
    fn moves_after_a_win_are_rejected() {
        let mut game = empty_game(Side::Red);
        put(&mut game, 5, 2, Side::Red, false);
        put(&mut game, 4, 3, Side::Black, false);
        game.apply(jump((5, 2), (3, 4), (4, 3))).unwrap();
        assert_eq!(game.apply(simple((3, 4), (2, 5))), Err(IllegalMove));
    }

    #[test]
    fn ai_is_forced_into_the_only_capture() {
        let mut game = empty_game(Side::Black);
        put(&mut game, 2, 3, Side::Black, false);
        put(&mut game, 2, 7, Side::Black, false);
        put(&mut game, 3, 4, Side::Red, false);
        let mut rng = StdRng::seed_from_u64(1);
        let mv = game.ai_move(&mut rng).unwrap();
        assert_eq!(mv, jump((2, 3), (4, 5), (3, 4)));
    }

    #[test]
    fn ai_has_no_move_when_the_game_is_over() {
        let mut game = empty_game(Side::Red);
        put(&mut game, 5, 2, Side::Red, false);
        put(&mut game, 4, 3, Side::Black, false);
        game.apply(jump((5, 2), (3, 4), (4, 3))).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(game.ai_move(&mut rng).is_none());
    }
}
