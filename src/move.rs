use crate::errors::ParseMovementError;
use crate::piece::{PieceId, PieceKind, Side};
use crate::square::Square;
use std::fmt::{Display, Formatter};

/// A planned transition of one piece: origin, target, the moving piece's
/// id, and a kind-specific payload. A movement never mutates a board by
/// itself; [`crate::board::Board::apply`] consumes it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Movement {
    pub origin: Square,
    pub target: Square,
    pub piece: PieceId,
    pub kind: MoveKind,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    /// Two-square pawn advance; the en passant trigger.
    DoublePush,
    Capture,
    /// Captures the pawn on `captured_square`, which is not the target
    /// square.
    EnPassant {
        captured: PieceId,
        captured_square: Square,
    },
    Promotion(PieceKind),
    PromotionCapture(PieceKind),
    KingSideCastle,
    QueenSideCastle,
}

impl Movement {
    pub fn new_quiet(origin: Square, target: Square, piece: PieceId) -> Movement {
        Movement {
            origin,
            target,
            piece,
            kind: MoveKind::Quiet,
        }
    }
    pub fn new_double_push(origin: Square, target: Square, piece: PieceId) -> Movement {
        Movement {
            origin,
            target,
            piece,
            kind: MoveKind::DoublePush,
        }
    }
    pub fn new_capture(origin: Square, target: Square, piece: PieceId) -> Movement {
        Movement {
            origin,
            target,
            piece,
            kind: MoveKind::Capture,
        }
    }
    pub fn new_en_passant(
        origin: Square,
        target: Square,
        piece: PieceId,
        captured: PieceId,
        captured_square: Square,
    ) -> Movement {
        Movement {
            origin,
            target,
            piece,
            kind: MoveKind::EnPassant {
                captured,
                captured_square,
            },
        }
    }
    pub fn new_promotion(
        origin: Square,
        target: Square,
        piece: PieceId,
        promote_to: PieceKind,
    ) -> Movement {
        Movement {
            origin,
            target,
            piece,
            kind: MoveKind::Promotion(promote_to),
        }
    }
    pub fn new_promotion_capture(
        origin: Square,
        target: Square,
        piece: PieceId,
        promote_to: PieceKind,
    ) -> Movement {
        Movement {
            origin,
            target,
            piece,
            kind: MoveKind::PromotionCapture(promote_to),
        }
    }
    pub fn new_kingside_castle(side: Side, piece: PieceId) -> Movement {
        let rank = side.back_rank();
        Movement {
            origin: Square::new(4, rank),
            target: Square::new(6, rank),
            piece,
            kind: MoveKind::KingSideCastle,
        }
    }
    pub fn new_queenside_castle(side: Side, piece: PieceId) -> Movement {
        let rank = side.back_rank();
        Movement {
            origin: Square::new(4, rank),
            target: Square::new(2, rank),
            piece,
            kind: MoveKind::QueenSideCastle,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::EnPassant { .. } | MoveKind::PromotionCapture(_)
        )
    }

    pub fn promotion_target(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(p) | MoveKind::PromotionCapture(p) => Some(p),
            _ => None,
        }
    }

    /// Parses a move formatted in long algebraic notation.
    /// Since no information can be given on flags, it simply returns
    /// origin, target and the potential piece kind to promote to.
    /// ```
    /// use arbiter::r#move::Movement;
    /// use arbiter::piece::PieceKind;
    /// use arbiter::square::Square;
    /// let (origin, target, promotion) = Movement::parse("d7d8q").unwrap();
    /// assert_eq!(origin, Square::new(3, 6));
    /// assert_eq!(target, Square::new(3, 7));
    /// assert_eq!(promotion, Some(PieceKind::Queen));
    /// assert!(Movement::parse("d9d8").is_err());
    /// ```
    pub fn parse(mv: &str) -> Result<(Square, Square, Option<PieceKind>), ParseMovementError> {
        let len = mv.chars().count();
        if len != 4 && len != 5 {
            return Err(ParseMovementError::InvalidLength(len));
        }
        let mut chars = mv.chars();
        let origin: Square = chars.by_ref().take(2).collect::<String>().parse()?;
        let target: Square = chars.by_ref().take(2).collect::<String>().parse()?;
        let promotion = match chars.next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(kind) if kind.can_promote_to() => Some(kind),
                _ => return Err(ParseMovementError::InvalidPromotionChar(c)),
            },
        };
        Ok((origin, target, promotion))
    }
}

impl Display for Movement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(p) = self.promotion_target() {
            write!(f, "{}{}{}", self.origin, self.target, p)
        } else {
            write!(f, "{}{}", self.origin, self.target)
        }
    }
}
