use crate::piece::{PieceKind, Side};
use crate::square::Square;

/// Supplies the piece kind a pawn promotes to when it reaches the far
/// rank. This is the single point where user input enters the core; a UI
/// implements it, and [`QueenPromotion`] is the documented default.
pub trait PromotionProvider {
    fn elect(&self, side: Side, target: Square) -> PieceKind;
}

/// Always elects a queen.
#[derive(Debug, Default, Copy, Clone)]
pub struct QueenPromotion;

impl PromotionProvider for QueenPromotion {
    fn elect(&self, _side: Side, _target: Square) -> PieceKind {
        PieceKind::Queen
    }
}

/// Sanitizes a provider's election: a kind a pawn cannot promote to falls
/// back to the default queen rather than being treated as an error.
pub fn elected_or_default(
    provider: &dyn PromotionProvider,
    side: Side,
    target: Square,
) -> PieceKind {
    let kind = provider.elect(side, target);
    if kind.can_promote_to() {
        kind
    } else {
        PieceKind::Queen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct KingElection;
    impl PromotionProvider for KingElection {
        fn elect(&self, _side: Side, _target: Square) -> PieceKind {
            PieceKind::King
        }
    }

    struct KnightElection;
    impl PromotionProvider for KnightElection {
        fn elect(&self, _side: Side, _target: Square) -> PieceKind {
            PieceKind::Knight
        }
    }

    #[test]
    fn invalid_election_falls_back_to_queen() {
        let target: Square = "d8".parse().unwrap();
        assert_eq!(
            elected_or_default(&KingElection, Side::White, target),
            PieceKind::Queen
        );
        assert_eq!(
            elected_or_default(&KnightElection, Side::White, target),
            PieceKind::Knight
        );
        assert_eq!(
            elected_or_default(&QueenPromotion, Side::White, target),
            PieceKind::Queen
        );
    }
}
