use crate::square::Square;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank step of this side's pawn advance.
    pub fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    pub fn back_rank(self) -> i8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// Starting rank of this side's pawns.
    pub fn pawn_rank(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// Rank a pawn promotes on.
    pub fn promotion_rank(self) -> i8 {
        self.opposite().back_rank()
    }

    /// Rank a pawn must stand on to capture en passant (its fifth,
    /// relative to its own advancing direction).
    pub fn en_passant_rank(self) -> i8 {
        match self {
            Side::White => 4,
            Side::Black => 3,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if *self == Side::Black { "b" } else { "w" })
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// A pawn may promote to these, and nothing else.
    pub fn can_promote_to(self) -> bool {
        !matches!(self, PieceKind::Pawn | PieceKind::King)
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PieceKind::Pawn => "p",
                PieceKind::Knight => "n",
                PieceKind::Bishop => "b",
                PieceKind::Rook => "r",
                PieceKind::Queen => "q",
                PieceKind::King => "k",
            }
        )
    }
}

/// Stable identity of a piece instance, assigned by the board from a
/// monotonically increasing counter and preserved across board clones.
/// Comparing ids is the deterministic replacement for the original
/// engine's reference-identity checks.
#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct PieceId(pub u16);

impl Display for PieceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One piece instance on the board.
///
/// Legal-move sets are not stored here; they are recomputed and returned
/// by the move generator on demand.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub side: Side,
    pub position: Square,
    pub has_moved: bool,
}

impl Piece {
    pub fn from_char(c: char) -> Option<(PieceKind, Side)> {
        let kind = PieceKind::from_char(c)?;
        let side = if c.is_lowercase() {
            Side::Black
        } else {
            Side::White
        };
        Some((kind, side))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.kind.to_string();
        write!(
            f,
            "{}",
            if self.side == Side::White {
                s.to_uppercase()
            } else {
                s
            }
        )
    }
}
