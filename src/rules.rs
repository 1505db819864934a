use crate::board::Board;
use crate::piece::Side;
use crate::r#move::Movement;

/// The legality chokepoint: every candidate a piece generates must pass
/// through here before it counts as a legal move.
///
/// The candidate is simulated on an isolated clone of the board; the live
/// board is never mutated. A movement obeys the rules iff it moves one of
/// `side`'s own pieces and the resulting position does not leave `side`'s
/// king under attack.
pub fn move_obeys_rules(board: &Board, movement: &Movement, side: Side) -> bool {
    match board.piece_at(movement.origin) {
        Some(p) if p.side == side && p.id == movement.piece => (),
        _ => return false,
    }
    let mut simulated = board.clone();
    simulated.apply(movement);
    !simulated.in_check(side)
}
