//! Poke-Go Battle Core
//!
//! A tick-driven, two-player elemental battle engine. Each round both players
//! pick a move inside a short selection window, damage is resolved at once,
//! fainted characters are replaced from the roster, and the match ends when a
//! player runs out of characters.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod catalog;
pub mod character;
pub mod config;
pub mod errors;
pub mod leaderboard;
pub mod moves;
pub mod player;
pub mod roster;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{Effectiveness, MoveClass, MoveSlot, PlayerSide, Type};

// --- From this crate's modules (`src/`) ---

// Match control and the phase machine.
pub use battle::damage::{damage_breakdown, damage_received, DamageBreakdown};
pub use battle::phase::{GamePhase, PhaseTiming};
pub use battle::runner::{start_match, MatchHandle, MatchReport, OutcomeSink};
pub use battle::state::{BattleEvent, InputSnapshot, MatchOutcome, MatchStatus, RoundContext};

// Input sources.
pub use battle::ai::{GreedyInput, InputSource, PassInput, RandomInput, ScriptedInput};

// Core runtime types for a battle.
pub use character::{Character, MoveSet};
pub use moves::{AnimationHandle, Move, MoveKind};
pub use player::Player;

// Data, rosters and persistence.
pub use catalog::Catalog;
pub use config::GameConfig;
pub use leaderboard::Leaderboard;
pub use roster::{FixedRoster, RandomRoster, RosterSupplier};

// Crate-specific error and result types.
pub use errors::{
    BattleEngineError, BattleResult, BattleStateError, CatalogError, CatalogResult, ConfigError,
    LeaderboardError, MatchError, NameError, RosterError,
};
