//! A mailbox chess move-legality and move-generation library.
//!
//! Given a board position, a piece, the move history and the side to
//! move, the crate enumerates every legal move for that piece: movement
//! geometry, capture rules, the special moves (promotion, en passant,
//! castling), and the overriding constraint that no move may leave the
//! moving side's own king in check. Applying moves permanently, game
//! outcome adjudication and any presentation concern belong to external
//! collaborators.

use crate::board::Board;
use crate::history::MoveHistory;
use crate::move_generator::legal_moves;
use crate::promotion::QueenPromotion;

pub mod board;
pub mod boardlist;
pub mod errors;
pub mod history;
pub mod r#move;
pub mod move_generator;
pub mod movelist;
pub mod piece;
pub mod promotion;
pub mod rules;
pub mod square;

/// Counts the positions reachable in exactly `depth` plies, exercising
/// the generator and the legality oracle end to end.
///
/// Each explored move is simulated on an owned clone of the board and
/// history, matching the core's copy-then-discard resource model; there
/// is no unmake.
pub fn perft(board: &Board, history: &MoveHistory, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(board, history, &QueenPromotion);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in &moves {
        let mut next_board = board.clone();
        next_board.apply(mv);
        let mut next_history = history.clone();
        next_history.push(*mv);
        nodes += perft(&next_board, &next_history, depth - 1);
    }
    nodes
}
