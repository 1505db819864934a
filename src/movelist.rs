use crate::r#move::Movement;
use arrayvec::ArrayVec;

/// An upper bound on the number of legal moves in any reachable position.
pub const MAX_MOVELIST_CAPACITY: usize = 255;

/// A fixed-capacity container of movements, filled by the move generator
/// and returned by value. A fresh list is produced on every generation
/// call; nothing is kept or mutated between turns.
#[derive(Clone)]
pub struct MoveList(ArrayVec<Movement, MAX_MOVELIST_CAPACITY>);

impl Default for MoveList {
    fn default() -> Self {
        MoveList(ArrayVec::new())
    }
}

impl MoveList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn push(&mut self, m: Movement) {
        self.0.push(m)
    }
    pub fn get(&self, i: usize) -> Option<&Movement> {
        self.0.get(i)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Movement> {
        self.0.iter()
    }
    pub fn as_slice(&self) -> &[Movement] {
        self.0.as_slice()
    }
    /// Finds the movement reaching `target`, if the list holds one.
    pub fn towards(&self, target: crate::square::Square) -> Option<&Movement> {
        self.iter().find(|m| m.target == target)
    }
}

impl From<Vec<Movement>> for MoveList {
    fn from(v: Vec<Movement>) -> Self {
        let mut mv_list = MoveList::default();
        for m in v {
            mv_list.push(m)
        }
        mv_list
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Movement;
    type IntoIter = std::slice::Iter<'a, Movement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        let mut s = String::new();
        for m in self.0.iter() {
            s.push_str(&format!("{} ", m))
        }
        write!(f, "{}", s.trim())
    }
}
