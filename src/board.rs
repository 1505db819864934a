use crate::errors::FenParseError;
use crate::piece::{Piece, PieceId, PieceKind, Side};
use crate::r#move::{MoveKind, Movement};
use crate::square::Square;
use std::fmt::{Display, Formatter};

pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
pub(crate) const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];
pub(crate) const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// The 8x8 position store: a rank-major mailbox of piece instances, with
/// each side's king square tracked for O(1) check-testing.
///
/// Invariants: every occupied cell's `piece.position` equals the cell's
/// coordinate, and `kings` points at the cell holding each side's king.
/// Cloning a board deep-copies the position; the legality oracle relies on
/// simulating moves on such clones without ever touching the live board.
#[derive(Clone)]
pub struct Board {
    squares: [Option<Piece>; 64],
    kings: [Option<Square>; 2],
    side_to_move: Side,
    ep_target: Option<Square>,
    halfmove_clock: u32,
    fullmove: u32,
    ply: u32,
    next_id: u16,
}

impl Board {
    /// An empty board, White to move. Test scaffolding and FEN loading
    /// start from here.
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
            kings: [None; 2],
            side_to_move: Side::White,
            ep_target: None,
            halfmove_clock: 0,
            fullmove: 1,
            ply: 0,
            next_id: 0,
        }
    }

    /// The standard starting position.
    pub fn new() -> Board {
        use PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Board::empty();
        for side in [Side::White, Side::Black] {
            for (file, kind) in back.iter().enumerate() {
                board.place(*kind, side, Square::new(file as i8, side.back_rank()));
            }
            for file in 0..8 {
                board.place(PieceKind::Pawn, side, Square::new(file, side.pawn_rank()));
            }
        }
        board
    }

    /// Places a new piece, assigning it the next stable id. The id
    /// counter only ever grows, so ids are unique for the lifetime of the
    /// board and all of its clones.
    pub fn place(&mut self, kind: PieceKind, side: Side, square: Square) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.put(Piece {
            id,
            kind,
            side,
            position: square,
            has_moved: false,
        });
        id
    }

    fn put(&mut self, piece: Piece) {
        if piece.kind == PieceKind::King {
            self.kings[piece.side.index()] = Some(piece.position);
        }
        self.squares[piece.position.index()] = Some(piece);
    }

    /// Clears the given square, returning the piece that has been removed
    /// if any.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        if !square.is_valid() {
            return None;
        }
        let removed = self.squares[square.index()].take();
        if let Some(p) = removed {
            if p.kind == PieceKind::King {
                self.kings[p.side.index()] = None;
            }
        }
        removed
    }

    /// The piece occupying a square. Off-board squares are simply empty,
    /// so callers that validity-check first never observe a difference.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        if !square.is_valid() {
            return None;
        }
        self.squares[square.index()].as_ref()
    }

    pub(crate) fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        if !square.is_valid() {
            return None;
        }
        self.squares[square.index()].as_mut()
    }

    pub fn side_at(&self, square: Square) -> Option<Side> {
        self.piece_at(square).map(|p| p.side)
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.kings[side.index()]
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.ep_target
    }

    /// Executes a movement: relocates the piece, removes any capture
    /// victim, swaps in the promoted kind, moves the castling rook, and
    /// flips the side to move. The movement is expected to come from the
    /// move generator; applying a malformed plan whose origin is empty
    /// leaves the board untouched.
    pub fn apply(&mut self, movement: &Movement) {
        let mut piece = match self.remove_piece(movement.origin) {
            Some(p) => p,
            None => return,
        };
        let mover = piece.side;
        let was_pawn = piece.kind == PieceKind::Pawn;

        if let MoveKind::EnPassant {
            captured_square, ..
        } = movement.kind
        {
            self.remove_piece(captured_square);
        }
        let captured = self.remove_piece(movement.target);

        if let MoveKind::Promotion(p) | MoveKind::PromotionCapture(p) = movement.kind {
            piece.kind = p;
        }
        piece.position = movement.target;
        piece.has_moved = true;
        self.put(piece);

        match movement.kind {
            MoveKind::KingSideCastle => {
                let rank = mover.back_rank();
                self.relocate(Square::new(7, rank), Square::new(5, rank));
            }
            MoveKind::QueenSideCastle => {
                let rank = mover.back_rank();
                self.relocate(Square::new(0, rank), Square::new(3, rank));
            }
            _ => (),
        }

        self.ep_target = if movement.kind == MoveKind::DoublePush {
            Some(movement.origin.offset(0, mover.forward()))
        } else {
            None
        };
        if was_pawn || captured.is_some() || movement.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if mover == Side::Black {
            self.fullmove += 1;
        }
        self.ply += 1;
        self.side_to_move = mover.opposite();
    }

    fn relocate(&mut self, from: Square, to: Square) {
        if let Some(mut p) = self.remove_piece(from) {
            p.position = to;
            p.has_moved = true;
            self.put(p);
        }
    }

    /// Checks whether any piece of `attacker` attacks the given square:
    /// pawn and knight and king offsets, plus ray walks for the sliders.
    pub fn square_attacked_by(&self, target: Square, attacker: Side) -> bool {
        let fwd = attacker.forward();
        for df in [-1, 1] {
            let sq = target.offset(df, -fwd);
            if let Some(p) = self.piece_at(sq) {
                if p.side == attacker && p.kind == PieceKind::Pawn {
                    return true;
                }
            }
        }
        for (df, dr) in KNIGHT_JUMPS {
            if let Some(p) = self.piece_at(target.offset(df, dr)) {
                if p.side == attacker && p.kind == PieceKind::Knight {
                    return true;
                }
            }
        }
        for (df, dr) in KING_STEPS {
            if let Some(p) = self.piece_at(target.offset(df, dr)) {
                if p.side == attacker && p.kind == PieceKind::King {
                    return true;
                }
            }
        }
        for (df, dr) in KING_STEPS {
            let slider = if df != 0 && dr != 0 {
                PieceKind::Bishop
            } else {
                PieceKind::Rook
            };
            let mut sq = target.offset(df, dr);
            while sq.is_valid() {
                if let Some(p) = self.piece_at(sq) {
                    if p.side == attacker && (p.kind == slider || p.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
                sq = sq.offset(df, dr);
            }
        }
        false
    }

    /// True iff the given side's king is under attack. A kingless side
    /// (bare test set-ups) is vacuously safe.
    pub fn in_check(&self, side: Side) -> bool {
        match self.king_square(side) {
            Some(king_square) => self.square_attacked_by(king_square, side.opposite()),
            None => false,
        }
    }

    /// Reconstructs the double pawn push implied by the en passant field
    /// of a loaded FEN, so an external loader can seed its move history
    /// with it and keep en passant eligibility across round trips.
    pub fn en_passant_seed(&self) -> Option<Movement> {
        let ep = self.ep_target?;
        let mover = self.side_to_move.opposite();
        let pawn_square = ep.offset(0, mover.forward());
        let pawn = self.piece_at(pawn_square)?;
        if pawn.kind != PieceKind::Pawn || pawn.side != mover {
            return None;
        }
        Some(Movement::new_double_push(
            ep.offset(0, -mover.forward()),
            pawn_square,
            pawn.id,
        ))
    }

    /*
    FEN STRING OPERATIONS
     */

    /// Creates a board from its FEN representation.
    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenParseError::InvalidNumberOfFields(fields.len()));
        }
        let mut board = Board::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenParseError::InvalidRankCount(ranks.len()));
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as i8;
            let mut file: i8 = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err(FenParseError::InvalidPiecePlacementChar(c));
                    }
                    file += skip as i8;
                } else if let Some((kind, side)) = Piece::from_char(c) {
                    if file >= 8 {
                        return Err(FenParseError::InvalidRankWidth(rank as usize + 1));
                    }
                    board.place(kind, side, Square::new(file, rank));
                    file += 1;
                } else {
                    return Err(FenParseError::InvalidPiecePlacementChar(c));
                }
            }
            if file != 8 {
                return Err(FenParseError::InvalidRankWidth(rank as usize + 1));
            }
        }
        for side in [Side::White, Side::Black] {
            let kings = Square::all()
                .filter_map(|sq| board.piece_at(sq))
                .filter(|p| p.side == side && p.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(FenParseError::KingCount { side, count: kings });
            }
        }
        // A pawn off its starting rank necessarily has moved.
        for sq in Square::all() {
            if let Some(p) = board.piece_at_mut(sq) {
                if p.kind == PieceKind::Pawn && p.position.rank != p.side.pawn_rank() {
                    p.has_moved = true;
                }
            }
        }

        board.side_to_move = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            s => return Err(FenParseError::InvalidSideToMove(s.to_owned())),
        };

        let mut rights = [[false; 2]; 2];
        if fields[2] != "-" {
            for c in fields[2].chars() {
                match c {
                    'K' => rights[Side::White.index()][0] = true,
                    'Q' => rights[Side::White.index()][1] = true,
                    'k' => rights[Side::Black.index()][0] = true,
                    'q' => rights[Side::Black.index()][1] = true,
                    _ => return Err(FenParseError::InvalidCastlingChar(c)),
                }
            }
        }
        // A revoked right is represented by marking the corner rook as
        // having moved already.
        for side in [Side::White, Side::Black] {
            let rank = side.back_rank();
            for (granted, rook_file) in [(rights[side.index()][0], 7), (rights[side.index()][1], 0)]
            {
                if granted {
                    continue;
                }
                if let Some(p) = board.piece_at_mut(Square::new(rook_file, rank)) {
                    if p.kind == PieceKind::Rook && p.side == side {
                        p.has_moved = true;
                    }
                }
            }
        }

        board.ep_target = match fields[3] {
            "-" => None,
            s => {
                let sq: Square = s
                    .parse()
                    .map_err(|_| FenParseError::InvalidEnPassantSquare(s.to_owned()))?;
                if sq.rank != 2 && sq.rank != 5 {
                    return Err(FenParseError::InvalidEnPassantSquare(s.to_owned()));
                }
                Some(sq)
            }
        };

        board.halfmove_clock = fields[4]
            .parse()
            .map_err(|_| FenParseError::InvalidHalfmoveClock(fields[4].to_owned()))?;
        board.fullmove = fields[5]
            .parse()
            .map_err(|_| FenParseError::InvalidFullmoveNumber(fields[5].to_owned()))?;
        if board.fullmove == 0 {
            return Err(FenParseError::InvalidFullmoveNumber(fields[5].to_owned()));
        }
        board.ply =
            (board.fullmove - 1) * 2 + if board.side_to_move == Side::Black { 1 } else { 0 };

        Ok(board)
    }

    pub fn fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8).rev() {
            let mut empty_counter = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(p) => {
                        if empty_counter != 0 {
                            fen.push_str(&empty_counter.to_string());
                        }
                        empty_counter = 0;
                        fen.push_str(&p.to_string());
                    }
                    None => empty_counter += 1,
                }
            }
            if empty_counter != 0 {
                fen.push_str(&empty_counter.to_string());
            }
            if rank != 0 {
                fen.push('/');
            }
        }

        fen.push_str(if self.side_to_move == Side::White {
            " w "
        } else {
            " b "
        });
        let castling = self.castling_field();
        fen.push_str(&castling);
        match self.ep_target {
            Some(sq) => fen.push_str(&format!(" {} ", sq)),
            None => fen.push_str(" - "),
        }
        fen.push_str(&(self.halfmove_clock.to_string() + " "));
        fen.push_str(&self.fullmove.to_string());
        fen
    }

    fn castling_field(&self) -> String {
        let mut field = String::new();
        for (side, letters) in [(Side::White, ['K', 'Q']), (Side::Black, ['k', 'q'])] {
            let rank = side.back_rank();
            let king_ready = matches!(
                self.piece_at(Square::new(4, rank)),
                Some(k) if k.kind == PieceKind::King && k.side == side && !k.has_moved
            );
            for (letter, rook_file) in [(letters[0], 7), (letters[1], 0)] {
                let rook_ready = matches!(
                    self.piece_at(Square::new(rook_file, rank)),
                    Some(r) if r.kind == PieceKind::Rook && r.side == side && !r.has_moved
                );
                if king_ready && rook_ready {
                    field.push(letter);
                }
            }
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    None => write!(f, ". ")?,
                    Some(p) => write!(f, "{} ", p)?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "side to move: {}", self.side_to_move)?;
        writeln!(
            f,
            "en passant: {}",
            match self.ep_target {
                Some(sq) => sq.to_string(),
                None => String::from("-"),
            }
        )?;
        writeln!(f, "ply: {}", self.ply)?;
        write!(f, "fen: {}", self.fen())
    }
}
