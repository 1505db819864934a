use crate::piece::PieceId;
use crate::r#move::{MoveKind, Movement};

/// The ordered log of movements played so far, one entry per ply.
///
/// The move generator only ever reads it; the external game loop owns
/// appending. En passant eligibility hinges on its last entry.
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    moves: Vec<Movement>,
}

impl MoveHistory {
    pub fn new() -> MoveHistory {
        MoveHistory {
            moves: Vec::with_capacity(64),
        }
    }

    pub fn push(&mut self, movement: Movement) {
        self.moves.push(movement)
    }

    /// The most recent movement, if any has been played.
    pub fn last(&self) -> Option<&Movement> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movement> {
        self.moves.iter()
    }

    /// True iff the piece with the given id made a two-square pawn advance
    /// on the immediately preceding ply. This is the en passant condition:
    /// the capture window closes as soon as any other move is played.
    pub fn just_double_pushed(&self, id: PieceId) -> bool {
        match self.last() {
            Some(m) => m.piece == id && m.kind == MoveKind::DoublePush,
            None => false,
        }
    }
}
