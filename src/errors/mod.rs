use thiserror::Error;

use crate::domain::EventId;

/// Failures of the pure matchday and placement logic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("roster has {actual} players but the matchday seats {expected}")]
    RosterMismatch { expected: usize, actual: usize },
    #[error("player `{0}` appears more than once")]
    DuplicatePlayer(String),
    #[error("player names must not be blank")]
    BlankPlayer,
    #[error("guided matchdays support 4 to 8 players, not {0}")]
    UnsupportedSize(u8),
    #[error("rank {rank} carries no award for a {size}-player matchday")]
    IllegalRank { size: u8, rank: u8 },
    #[error("rank {rank} must list one or two players, got {count}")]
    FinisherCount { rank: u8, count: usize },
    #[error("a team needs exactly two distinct players")]
    MalformedTeam,
    #[error("no match is waiting for a score")]
    NoActiveMatch,
    #[error("tied score {0}-{0}: a match needs a winner")]
    TiedScore(u32),
    #[error("match `{0}` has no recorded result yet")]
    UnresolvedReference(String),
    #[error("letter {0} is not assigned in this matchday")]
    UnknownLetter(char),
}

/// Failures of ledger mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("no event with id {0}")]
    UnknownEvent(EventId),
    #[error("event id {0} is used more than once")]
    DuplicateId(EventId),
}

/// Add context to store errors
pub fn store_context(operation: &str, location: &str) -> String {
    format!("Failed to {} ledger at: {}", operation, location)
}

/// Add context to import errors
pub fn import_context(format: &str, source: &str) -> String {
    format!("Failed to import {} payload from: {}", format, source)
}
