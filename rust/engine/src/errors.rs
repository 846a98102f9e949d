use thiserror::Error;

use crate::board::MatchStatus;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Hand index {index} out of range (hand holds {hand_size} cards)")]
    HandIndexOutOfRange { index: usize, hand_size: usize },
    #[error("Board index {index} out of range (board has {cells} places)")]
    BoardIndexOutOfRange { index: usize, cells: usize },
    #[error("Card cannot be placed on board place {index}")]
    InvalidPlacement { index: usize },
    #[error("No card has been played this turn")]
    NoCardInPlay,
    #[error("Draw and discard piles are both empty")]
    DeckExhausted,
    #[error("Operation not allowed while match status is {status:?}")]
    OutOfTurn { status: MatchStatus },
    #[error("Match is over")]
    MatchOver,
    #[error("A match is already in progress")]
    MatchInProgress,
    #[error("No match has been started")]
    NoMatch,
    #[error("Malformed move: {0}")]
    MalformedMove(String),
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
    #[error("Invalid rules: {0}")]
    InvalidRules(String),
}
