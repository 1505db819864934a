use crate::errors::ParseSquareError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A board coordinate as a (file, rank) pair, both 0-based.
///
/// Coordinates are signed so that candidate generation can step off the
/// board transiently; [`Square::is_valid`] is the bounds predicate and must
/// be checked before any occupancy lookup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Square {
    pub file: i8,
    pub rank: i8,
}

impl Square {
    pub const fn new(file: i8, rank: i8) -> Square {
        Square { file, rank }
    }

    /// Returns this square displaced by the given file/rank deltas.
    /// The result may be off the board.
    /// ```
    /// use arbiter::square::Square;
    /// assert_eq!(Square::new(4, 1).offset(0, 2), Square::new(4, 3));
    /// assert!(!Square::new(0, 0).offset(-1, 0).is_valid());
    /// ```
    pub const fn offset(self, df: i8, dr: i8) -> Square {
        Square {
            file: self.file + df,
            rank: self.rank + dr,
        }
    }

    /// Checks whether the square lies on the 8x8 board
    /// ```
    /// use arbiter::square::Square;
    /// assert!(Square::new(0, 7).is_valid());
    /// assert!(!Square::new(8, 3).is_valid());
    /// ```
    pub const fn is_valid(self) -> bool {
        self.file >= 0 && self.file < 8 && self.rank >= 0 && self.rank < 8
    }

    /// Index of the square in a 64-cell, rank-major board array.
    /// Only meaningful for valid squares.
    pub fn index(self) -> usize {
        debug_assert!(self.is_valid());
        (self.rank * 8 + self.file) as usize
    }

    pub fn from_index(i: usize) -> Square {
        Square {
            file: (i % 8) as i8,
            rank: (i / 8) as i8,
        }
    }

    /// Iterates over all 64 valid squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

/// Parses a square from algebraic notation
/// ```
/// use arbiter::square::Square;
/// assert_eq!("e4".parse(), Ok(Square::new(4, 3)));
/// assert_eq!("a1".parse(), Ok(Square::new(0, 0)));
/// assert!("k9".parse::<Square>().is_err());
/// ```
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        let mut chars = s.chars();
        let (file_char, rank_char) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(ParseSquareError::InvalidLength(s.chars().count())),
        };
        let file = match file_char {
            'a'..='h' => file_char as i8 - 'a' as i8,
            _ => return Err(ParseSquareError::InvalidFileChar(file_char)),
        };
        let rank = match rank_char {
            '1'..='8' => rank_char as i8 - '1' as i8,
            _ => return Err(ParseSquareError::InvalidRankChar(rank_char)),
        };
        Ok(Square { file, rank })
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.is_valid() {
            return write!(f, "**");
        }
        let file = (b'a' + self.file as u8) as char;
        let rank = (b'1' + self.rank as u8) as char;
        write!(f, "{}{}", file, rank)
    }
}
