use crate::player::MAX_NAME_LENGTH;
use schema::{MoveClass, MoveSlot, Type};
use thiserror::Error;

/// Main error type for the Poke-Go battle core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// Error related to catalog data lookup or validation
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// Error related to building a roster
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
    /// Error related to player names
    #[error("Name error: {0}")]
    Name(#[from] NameError),
    /// Error related to an inconsistent battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error related to driving a match
    #[error("Match error: {0}")]
    Match(#[from] MatchError),
    /// Error related to reading or writing the leaderboard
    #[error("Leaderboard error: {0}")]
    Leaderboard(#[from] LeaderboardError),
    /// Error related to loading game configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to character and move data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog text could not be parsed
    #[error("Malformed catalog data: {0}")]
    MalformedData(String),
    /// A character references a move id that does not exist
    #[error("Move not found: {0}")]
    MoveNotFound(u32),
    /// No character with the requested id exists
    #[error("Character not found: {0}")]
    CharacterNotFound(u32),
    /// Two entries share an id
    #[error("Duplicate id {0} in catalog")]
    DuplicateId(u32),
    /// A move was placed into a slot it cannot occupy
    #[error("{character}: {slot} slot needs a {expected_class} move, got {found_class} {found_type} move '{move_name}'")]
    WrongMoveForSlot {
        character: String,
        slot: MoveSlot,
        expected_class: MoveClass,
        expected_type: Option<Type>,
        found_class: MoveClass,
        found_type: Type,
        move_name: String,
    },
    /// Attack damage or block value must be positive
    #[error("Move '{0}' must have a positive damage value")]
    NonPositiveStat(String),
}

/// Errors related to supplying a roster
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// More distinct characters were requested than the catalog holds
    #[error("Requested {requested} characters but only {available} are available")]
    NotEnoughCharacters { requested: usize, available: usize },
    /// A player cannot start a match without characters
    #[error("Roster is empty")]
    EmptyRoster,
}

/// Errors related to player names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Player name cannot be more than {} characters.", MAX_NAME_LENGTH)]
    TooLong,
    #[error("Player name cannot be empty")]
    Empty,
    #[error("Players cannot have the same name.")]
    Duplicate,
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// A character removal was attempted on an empty roster
    #[error("Cannot remove a character from {0}'s empty roster")]
    EmptyRoster(String),
    /// Battle state is in an inconsistent or corrupted state
    #[error("Inconsistent battle state: {0}")]
    InconsistentState(String),
}

/// Errors related to running a match to completion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Match did not finish within {0} ticks")]
    TickLimitExceeded(u64),
}

/// Errors related to persisting the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[error("Could not access leaderboard file {0}")]
    Io(String),
    #[error("Malformed leaderboard data: {0}")]
    Malformed(String),
}

/// Errors related to the game configuration file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Could not read config file {0}")]
    Io(String),
    #[error("Malformed config: {0}")]
    Malformed(String),
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
