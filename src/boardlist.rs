use crate::board::Board;

/// An append-only log of board snapshots, one owned deep copy per ply.
/// Supports retracing a game outside the core; nothing in the move
/// generation path reads from it.
#[derive(Clone, Default)]
pub struct BoardList {
    boards: Vec<Board>,
}

impl BoardList {
    pub fn new() -> BoardList {
        BoardList { boards: Vec::new() }
    }

    /// Appends an owned copy of the given board.
    pub fn push(&mut self, board: &Board) {
        self.boards.push(board.clone())
    }

    pub fn last(&self) -> Option<&Board> {
        self.boards.last()
    }

    /// The snapshot recorded at the given ply, zero-based.
    pub fn get(&self, ply: usize) -> Option<&Board> {
        self.boards.get(ply)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}
