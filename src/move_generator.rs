use crate::board::{Board, BISHOP_DIRS, KING_STEPS, KNIGHT_JUMPS, ROOK_DIRS};
use crate::history::MoveHistory;
use crate::movelist::MoveList;
use crate::piece::{Piece, PieceKind, Side};
use crate::promotion::{elected_or_default, PromotionProvider};
use crate::r#move::Movement;
use crate::rules;
use crate::square::Square;

struct MoveGenInfo<'a> {
    board: &'a Board,
    history: &'a MoveHistory,
    provider: &'a dyn PromotionProvider,
    move_list: MoveList,
}

impl MoveGenInfo<'_> {
    /// Runs a candidate through the legality oracle and keeps it if it
    /// survives.
    fn try_push(&mut self, side: Side, movement: Movement) {
        if rules::move_obeys_rules(self.board, &movement, side) {
            self.move_list.push(movement);
        }
    }

    /// A capture candidate must land on an enemy piece, and never on the
    /// enemy king's own square: check resolution is the opponent's
    /// problem on their turn, not a capture of the king.
    fn capturable(&self, side: Side, target: Square) -> bool {
        target.is_valid()
            && self.board.side_at(target) == Some(side.opposite())
            && self.board.king_square(side.opposite()) != Some(target)
    }
}

/// Generates every legal move for the side to move.
pub fn legal_moves(
    board: &Board,
    history: &MoveHistory,
    provider: &dyn PromotionProvider,
) -> MoveList {
    let mut info = MoveGenInfo {
        board,
        history,
        provider,
        move_list: MoveList::default(),
    };
    for square in Square::all() {
        let piece = match board.piece_at(square) {
            Some(p) if p.side == board.side_to_move() => *p,
            _ => continue,
        };
        piece_moves(&piece, &mut info);
    }
    info.move_list
}

/// Generates every legal move for the piece standing on the given square,
/// returning a freshly produced list. An empty (or off-board) square, or
/// one held by the side not on the move, yields an empty list.
pub fn legal_moves_from(
    board: &Board,
    square: Square,
    history: &MoveHistory,
    provider: &dyn PromotionProvider,
) -> MoveList {
    let piece = match board.piece_at(square) {
        Some(p) if p.side == board.side_to_move() => *p,
        _ => return MoveList::default(),
    };
    let mut info = MoveGenInfo {
        board,
        history,
        provider,
        move_list: MoveList::default(),
    };
    piece_moves(&piece, &mut info);
    info.move_list
}

fn piece_moves(piece: &Piece, info: &mut MoveGenInfo) {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(piece, info),
        PieceKind::Knight => knight_moves(piece, info),
        PieceKind::Bishop => slider_moves(piece, &BISHOP_DIRS, info),
        PieceKind::Rook => slider_moves(piece, &ROOK_DIRS, info),
        PieceKind::Queen => {
            slider_moves(piece, &BISHOP_DIRS, info);
            slider_moves(piece, &ROOK_DIRS, info);
        }
        PieceKind::King => king_moves(piece, info),
    }
}

fn pawn_moves(piece: &Piece, info: &mut MoveGenInfo) {
    let side = piece.side;
    let forward = side.forward();

    // Forward advances. The double push requires both the intermediate
    // and the destination square to be empty.
    let one_ahead = piece.position.offset(0, forward);
    if one_ahead.is_valid() && info.board.piece_at(one_ahead).is_none() {
        if one_ahead.rank == side.promotion_rank() {
            let elected = elected_or_default(info.provider, side, one_ahead);
            info.try_push(
                side,
                Movement::new_promotion(piece.position, one_ahead, piece.id, elected),
            );
        } else {
            info.try_push(side, Movement::new_quiet(piece.position, one_ahead, piece.id));
            if !piece.has_moved {
                let two_ahead = one_ahead.offset(0, forward);
                if two_ahead.is_valid() && info.board.piece_at(two_ahead).is_none() {
                    info.try_push(
                        side,
                        Movement::new_double_push(piece.position, two_ahead, piece.id),
                    );
                }
            }
        }
    }

    // Diagonal captures.
    for df in [-1, 1] {
        let target = piece.position.offset(df, forward);
        if !info.capturable(side, target) {
            continue;
        }
        if target.rank == side.promotion_rank() {
            let elected = elected_or_default(info.provider, side, target);
            info.try_push(
                side,
                Movement::new_promotion_capture(piece.position, target, piece.id, elected),
            );
        } else {
            info.try_push(side, Movement::new_capture(piece.position, target, piece.id));
        }
    }

    en_passant_moves(piece, info);
}

/// En passant: only from the pawn's fifth relative rank, only against a
/// lateral enemy pawn, and only when that pawn's two-square advance is
/// the most recent entry in the history.
fn en_passant_moves(piece: &Piece, info: &mut MoveGenInfo) {
    let side = piece.side;
    if piece.position.rank != side.en_passant_rank() {
        return;
    }
    for df in [-1, 1] {
        let beside = piece.position.offset(df, 0);
        if !beside.is_valid() {
            continue;
        }
        let neighbor = match info.board.piece_at(beside) {
            Some(p) if p.kind == PieceKind::Pawn && p.side != side => *p,
            _ => continue,
        };
        if !info.history.just_double_pushed(neighbor.id) {
            continue;
        }
        let target = beside.offset(0, side.forward());
        info.try_push(
            side,
            Movement::new_en_passant(piece.position, target, piece.id, neighbor.id, beside),
        );
    }
}

fn knight_moves(piece: &Piece, info: &mut MoveGenInfo) {
    for (df, dr) in KNIGHT_JUMPS {
        let target = piece.position.offset(df, dr);
        if !target.is_valid() {
            continue;
        }
        if info.board.piece_at(target).is_none() {
            info.try_push(
                piece.side,
                Movement::new_quiet(piece.position, target, piece.id),
            );
        } else if info.capturable(piece.side, target) {
            info.try_push(
                piece.side,
                Movement::new_capture(piece.position, target, piece.id),
            );
        }
    }
}

fn slider_moves(piece: &Piece, directions: &[(i8, i8)], info: &mut MoveGenInfo) {
    for &(df, dr) in directions {
        let mut target = piece.position.offset(df, dr);
        while target.is_valid() {
            if info.board.piece_at(target).is_none() {
                info.try_push(
                    piece.side,
                    Movement::new_quiet(piece.position, target, piece.id),
                );
                target = target.offset(df, dr);
                continue;
            }
            if info.capturable(piece.side, target) {
                info.try_push(
                    piece.side,
                    Movement::new_capture(piece.position, target, piece.id),
                );
            }
            break;
        }
    }
}

fn king_moves(piece: &Piece, info: &mut MoveGenInfo) {
    for (df, dr) in KING_STEPS {
        let target = piece.position.offset(df, dr);
        if !target.is_valid() {
            continue;
        }
        if info.board.piece_at(target).is_none() {
            info.try_push(
                piece.side,
                Movement::new_quiet(piece.position, target, piece.id),
            );
        } else if info.capturable(piece.side, target) {
            info.try_push(
                piece.side,
                Movement::new_capture(piece.position, target, piece.id),
            );
        }
    }
    castling_moves(piece, info);
}

/// Castling: king and rook unmoved, the squares between them empty, the
/// king neither in check nor crossing or landing on an attacked square.
fn castling_moves(piece: &Piece, info: &mut MoveGenInfo) {
    let side = piece.side;
    let rank = side.back_rank();
    if piece.has_moved
        || piece.position != Square::new(4, rank)
        || info.board.in_check(side)
    {
        return;
    }
    let enemy = side.opposite();
    let board = info.board;

    let rook_ready = |file: i8| {
        matches!(
            board.piece_at(Square::new(file, rank)),
            Some(r) if r.kind == PieceKind::Rook && r.side == side && !r.has_moved
        )
    };
    let clear = |files: &[i8]| {
        files
            .iter()
            .all(|&f| board.piece_at(Square::new(f, rank)).is_none())
    };
    let safe = |files: &[i8]| {
        files
            .iter()
            .all(|&f| !board.square_attacked_by(Square::new(f, rank), enemy))
    };

    if rook_ready(7) && clear(&[5, 6]) && safe(&[5, 6]) {
        info.try_push(side, Movement::new_kingside_castle(side, piece.id));
    }
    if rook_ready(0) && clear(&[1, 2, 3]) && safe(&[2, 3]) {
        info.try_push(side, Movement::new_queenside_castle(side, piece.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::QueenPromotion;
    use crate::r#move::MoveKind;

    fn moves_from(fen: &str, square: &str) -> MoveList {
        let board = Board::from_fen(fen).unwrap();
        let mut history = MoveHistory::new();
        if let Some(seed) = board.en_passant_seed() {
            history.push(seed);
        }
        legal_moves_from(
            &board,
            square.parse().unwrap(),
            &history,
            &QueenPromotion,
        )
    }

    fn targets(moves: &MoveList) -> Vec<String> {
        let mut t: Vec<String> = moves
            .as_slice()
            .iter()
            .map(|m| m.target.to_string())
            .collect();
        t.sort();
        t
    }

    #[test]
    fn pawn_on_starting_rank_has_both_advances() {
        let moves = moves_from("4k3/8/8/8/8/8/3P4/4K3 w - - 0 1", "d2");
        assert_eq!(targets(&moves), ["d3", "d4"]);
        assert!(moves.iter().all(|m| m.promotion_target().is_none()));
        let double_push = moves.towards("d4".parse().unwrap());
        assert_eq!(double_push.map(|m| m.kind), Some(MoveKind::DoublePush));
    }

    #[test]
    fn off_turn_pieces_generate_nothing() {
        // White to move: querying a black piece yields an empty list.
        let board = Board::new();
        let history = MoveHistory::new();
        let moves =
            legal_moves_from(&board, "e7".parse().unwrap(), &history, &QueenPromotion);
        assert!(moves.is_empty());
        let moves =
            legal_moves_from(&board, "e2".parse().unwrap(), &history, &QueenPromotion);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn blocked_intermediate_square_forbids_both_advances() {
        let moves = moves_from("4k3/8/8/8/8/3p4/3P4/4K3 w - - 0 1", "d2");
        assert!(moves.is_empty());
    }

    #[test]
    fn blocked_destination_still_allows_single_advance() {
        let moves = moves_from("4k3/8/8/8/3p4/8/3P4/4K3 w - - 0 1", "d2");
        assert_eq!(targets(&moves), ["d3"]);
    }

    #[test]
    fn moved_pawn_loses_the_double_push() {
        let moves = moves_from("4k3/8/8/8/8/3P4/8/4K3 w - - 0 1", "d3");
        assert_eq!(targets(&moves), ["d4"]);
    }

    #[test]
    fn promotion_advance_yields_promotion_move_only() {
        let moves = moves_from("4k3/3P4/8/8/8/8/8/4K3 w - - 0 1", "d7");
        assert_eq!(moves.len(), 1);
        let mv = moves.get(0).unwrap();
        assert_eq!(mv.target, "d8".parse().unwrap());
        assert_eq!(mv.kind, MoveKind::Promotion(PieceKind::Queen));
    }

    #[test]
    fn promotion_capture_yields_promotion_move_only() {
        // c8 is capturable; e8 holds the enemy king and is never a
        // candidate target.
        let moves = moves_from("2r1k3/3P4/8/8/8/8/8/4K3 w - - 0 1", "d7");
        let promotion_captures: Vec<_> = moves
            .iter()
            .filter(|m| m.target == "c8".parse().unwrap())
            .collect();
        assert_eq!(promotion_captures.len(), 1);
        assert_eq!(
            promotion_captures[0].kind,
            MoveKind::PromotionCapture(PieceKind::Queen)
        );
        assert!(moves.iter().all(|m| m.target != "e8".parse().unwrap()));
        assert!(moves.iter().all(|m| m.promotion_target().is_some()));
    }

    struct RookElection;
    impl PromotionProvider for RookElection {
        fn elect(&self, _side: Side, _target: Square) -> PieceKind {
            PieceKind::Rook
        }
    }

    #[test]
    fn promotion_election_is_injected() {
        let board = Board::from_fen("4k3/3P4/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let history = MoveHistory::new();
        let moves = legal_moves_from(&board, "d7".parse().unwrap(), &history, &RookElection);
        assert_eq!(
            moves.get(0).unwrap().kind,
            MoveKind::Promotion(PieceKind::Rook)
        );
    }

    #[test]
    fn en_passant_after_adjacent_double_push() {
        // Black just played d7d5; the e5 pawn may capture in passing.
        let moves = moves_from("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5");
        let ep: Vec<_> = moves
            .iter()
            .filter(|m| matches!(m.kind, MoveKind::EnPassant { .. }))
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].target, "d6".parse().unwrap());
        match ep[0].kind {
            MoveKind::EnPassant {
                captured_square, ..
            } => assert_eq!(captured_square, "d5".parse().unwrap()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn en_passant_requires_the_push_to_be_the_last_move() {
        // Same position, but the history ends with an unrelated move.
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1").unwrap();
        let d5_pawn = *board.piece_at("d5".parse().unwrap()).unwrap();
        let mut history = MoveHistory::new();
        history.push(Movement::new_double_push(
            "d7".parse().unwrap(),
            "d5".parse().unwrap(),
            d5_pawn.id,
        ));
        history.push(Movement::new_quiet(
            "f8".parse().unwrap(),
            "e8".parse().unwrap(),
            board.piece_at("e8".parse().unwrap()).unwrap().id,
        ));
        let moves = legal_moves_from(
            &board,
            "e5".parse().unwrap(),
            &history,
            &QueenPromotion,
        );
        assert!(moves
            .iter()
            .all(|m| !matches!(m.kind, MoveKind::EnPassant { .. })));
    }

    #[test]
    fn en_passant_requires_empty_history_guard() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1").unwrap();
        let history = MoveHistory::new();
        let moves = legal_moves_from(
            &board,
            "e5".parse().unwrap(),
            &history,
            &QueenPromotion,
        );
        assert!(moves
            .iter()
            .all(|m| !matches!(m.kind, MoveKind::EnPassant { .. })));
    }

    #[test]
    fn en_passant_requires_the_fifth_relative_rank() {
        // The white pawn stands on e4, not e5; its neighbor just
        // double-pushed, but no en passant exists.
        let board = Board::from_fen("4k3/8/8/8/3pP3/8/8/4K3 w - - 0 1").unwrap();
        let d4_pawn = *board.piece_at("d4".parse().unwrap()).unwrap();
        let mut history = MoveHistory::new();
        history.push(Movement::new_double_push(
            "d6".parse().unwrap(),
            "d4".parse().unwrap(),
            d4_pawn.id,
        ));
        let moves = legal_moves_from(
            &board,
            "e4".parse().unwrap(),
            &history,
            &QueenPromotion,
        );
        assert!(moves
            .iter()
            .all(|m| !matches!(m.kind, MoveKind::EnPassant { .. })));
    }

    #[test]
    fn pinned_pieces_stay_put() {
        // Knight and bishop pinned on the e-file generate nothing; a
        // pinned rook may still slide along the pin ray.
        let moves = moves_from("4k3/8/8/8/8/4r3/4N3/4K3 w - - 0 1", "e2");
        assert!(moves.is_empty());
        let moves = moves_from("4k3/8/8/8/8/4r3/4B3/4K3 w - - 0 1", "e2");
        assert!(moves.is_empty());
        let moves = moves_from("4k3/8/8/8/4r3/8/4R3/4K3 w - - 0 1", "e2");
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.target.file == 4));
        assert!(moves
            .iter()
            .any(|m| m.kind == MoveKind::Capture && m.target == "e4".parse().unwrap()));
    }

    #[test]
    fn king_never_steps_into_attack() {
        let moves = moves_from("4r2k/8/8/8/8/8/8/4K3 w - - 0 1", "e1");
        assert!(moves.iter().all(|m| m.target != "e2".parse().unwrap()));
        assert!(moves
            .iter()
            .any(|m| m.target == "d1".parse().unwrap()));
    }

    #[test]
    fn castling_both_wings_when_clear() {
        let moves = moves_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1");
        assert!(moves.iter().any(|m| m.kind == MoveKind::KingSideCastle));
        assert!(moves.iter().any(|m| m.kind == MoveKind::QueenSideCastle));
    }

    #[test]
    fn castling_forbidden_through_attacked_square() {
        // A black rook on f8 covers f1, barring the kingside castle only.
        let moves = moves_from("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1", "e1");
        assert!(moves.iter().all(|m| m.kind != MoveKind::KingSideCastle));
        assert!(moves.iter().any(|m| m.kind == MoveKind::QueenSideCastle));
    }

    #[test]
    fn castling_forbidden_in_check() {
        let moves = moves_from("r3k2r/8/8/8/4r3/8/8/R3K2R w KQkq - 0 1", "e1");
        assert!(moves.iter().all(|m| {
            m.kind != MoveKind::KingSideCastle && m.kind != MoveKind::QueenSideCastle
        }));
    }

    #[test]
    fn castling_requires_unmoved_rook() {
        // Only the kingside right remains.
        let moves = moves_from("4k3/8/8/8/8/8/8/R3K2R w K - 0 1", "e1");
        assert!(moves.iter().any(|m| m.kind == MoveKind::KingSideCastle));
        assert!(moves.iter().all(|m| m.kind != MoveKind::QueenSideCastle));
    }

    #[test]
    fn generated_targets_are_always_on_the_board() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ] {
            let board = Board::from_fen(fen).unwrap();
            let history = MoveHistory::new();
            for m in &legal_moves(&board, &history, &QueenPromotion) {
                assert!(m.origin.is_valid());
                assert!(m.target.is_valid());
            }
        }
    }

    #[test]
    fn no_legal_move_leaves_own_king_in_check() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ] {
            let board = Board::from_fen(fen).unwrap();
            let history = MoveHistory::new();
            let side = board.side_to_move();
            for m in &legal_moves(&board, &history, &QueenPromotion) {
                let mut simulated = board.clone();
                simulated.apply(m);
                assert!(!simulated.in_check(side), "{} exposes the king", m);
            }
        }
    }

    // Verification against published node counts, restricted to depths
    // that produce no promotions (the provider elects a single kind per
    // promotion square, so promotion fan-out differs from engine perft).
    // https://www.chessprogramming.org/Perft_Results
    #[test]
    fn perft_verification() {
        let initial = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        let history = MoveHistory::new();
        assert_eq!(crate::perft(&initial, &history, 1), 20);
        assert_eq!(crate::perft(&initial, &history, 2), 400);
        assert_eq!(crate::perft(&initial, &history, 3), 8902);
        assert_eq!(crate::perft(&initial, &history, 4), 197281);

        let kiwipete = Board::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(crate::perft(&kiwipete, &history, 1), 48);
        assert_eq!(crate::perft(&kiwipete, &history, 2), 2039);
    }
}
