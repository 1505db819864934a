use crate::piece::Side;
use thiserror::Error;

/// Errors raised when parsing a square from algebraic notation ("e4").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSquareError {
    #[error("invalid square string length: {0}, expected 2")]
    InvalidLength(usize),
    #[error("invalid file character: '{0}', expected 'a'-'h'")]
    InvalidFileChar(char),
    #[error("invalid rank character: '{0}', expected '1'-'8'")]
    InvalidRankChar(char),
}

/// Errors raised when parsing a movement from long algebraic notation
/// ("e2e4", "d7d8q").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMovementError {
    #[error("invalid movement string length: {0}, expected 4 or 5")]
    InvalidLength(usize),
    #[error(transparent)]
    InvalidSquare(#[from] ParseSquareError),
    #[error("invalid promotion character: '{0}', expected one of 'nbrq'")]
    InvalidPromotionChar(char),
}

/// Errors raised when loading a position from a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenParseError {
    #[error("FEN string must have 6 whitespace-separated fields, found {0}")]
    InvalidNumberOfFields(usize),
    #[error("invalid character in FEN piece placement: '{0}'")]
    InvalidPiecePlacementChar(char),
    #[error("FEN piece placement must describe 8 ranks, found {0}")]
    InvalidRankCount(usize),
    #[error("rank {0} of the FEN piece placement does not describe 8 files")]
    InvalidRankWidth(usize),
    #[error("invalid side to move: '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),
    #[error("invalid character in FEN castling field: '{0}'")]
    InvalidCastlingChar(char),
    #[error("invalid en passant target square: '{0}'")]
    InvalidEnPassantSquare(String),
    #[error("invalid halfmove clock: '{0}'")]
    InvalidHalfmoveClock(String),
    #[error("invalid fullmove number: '{0}'")]
    InvalidFullmoveNumber(String),
    #[error("position has {count} {side} kings, expected exactly 1")]
    KingCount { side: Side, count: usize },
}
