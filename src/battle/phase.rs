use crate::battle::state::MatchOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of the round phases, in the order a round visits them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    RoundStart,
    RoundTextMoves,
    RoundDisplayMoves,
    RoundLowerHp,
    RoundDisplayFainted,
    RoundDisplayNextChar,
    RoundEnd,
    MatchOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::RoundStart => "ROUND_START",
            GamePhase::RoundTextMoves => "ROUND_TEXT_MOVES",
            GamePhase::RoundDisplayMoves => "ROUND_DISPLAY_MOVES",
            GamePhase::RoundLowerHp => "ROUND_LOWER_HP",
            GamePhase::RoundDisplayFainted => "ROUND_DISPLAY_FAINTED",
            GamePhase::RoundDisplayNextChar => "ROUND_DISPLAY_NEXT_CHAR",
            GamePhase::RoundEnd => "ROUND_END",
            GamePhase::MatchOver => "MATCH_OVER",
        };
        write!(f, "{}", name)
    }
}

/// Pacing of the phase machine, in seconds.
///
/// Every phase after the move window holds for `text_scroll` plus its buffer.
/// The text-moves phase uses the short buffer, the others the long one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PhaseTiming {
    pub round_window: f32,
    pub text_scroll: f32,
    pub text_moves_buffer: f32,
    pub phase_buffer: f32,
}

impl Default for PhaseTiming {
    fn default() -> Self {
        Self {
            round_window: 3.0,
            text_scroll: 1.0,
            text_moves_buffer: 0.1,
            phase_buffer: 0.5,
        }
    }
}

impl PhaseTiming {
    /// Total hold time of a gated phase.
    pub fn hold_for(&self, phase: GamePhase) -> f32 {
        match phase {
            GamePhase::RoundStart => self.round_window,
            GamePhase::RoundTextMoves => self.text_scroll + self.text_moves_buffer,
            GamePhase::MatchOver => 0.0,
            _ => self.text_scroll + self.phase_buffer,
        }
    }

    /// Shortest possible round with no fainting, useful for sizing tick budgets.
    pub fn min_round_duration(&self) -> f32 {
        self.hold_for(GamePhase::RoundStart)
            + self.hold_for(GamePhase::RoundTextMoves)
            + self.hold_for(GamePhase::RoundDisplayMoves)
            + self.hold_for(GamePhase::RoundLowerHp)
    }
}

/// Holds a phase until strictly more than `hold` seconds have passed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HoldGate {
    elapsed: f32,
    hold: f32,
}

impl HoldGate {
    pub fn new(hold: f32) -> Self {
        Self { elapsed: 0.0, hold }
    }

    /// Add `dt` and report whether the gate is now open.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed > self.hold
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// The move-selection window. Closes once nothing is left on the clock.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Self { remaining: duration }
    }

    /// Subtract `dt` and report whether the window has closed.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.has_ended()
    }

    pub fn has_ended(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Time left, never negative. What a timer widget would show.
    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

/// Which sides lost their active character this round, indexed by `PlayerSide::index`.
pub type FaintedSides = [bool; 2];

/// The phase machine's state, carrying whatever each phase needs between ticks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Phase {
    RoundStart { window: Countdown },
    RoundTextMoves { gate: HoldGate },
    RoundDisplayMoves { gate: HoldGate },
    RoundLowerHp { gate: HoldGate },
    RoundDisplayFainted { gate: HoldGate, fainted: FaintedSides },
    RoundDisplayNextChar { gate: HoldGate, fainted: FaintedSides },
    RoundEnd { gate: HoldGate },
    MatchOver { outcome: MatchOutcome },
}

impl Phase {
    pub fn name(&self) -> GamePhase {
        match self {
            Phase::RoundStart { .. } => GamePhase::RoundStart,
            Phase::RoundTextMoves { .. } => GamePhase::RoundTextMoves,
            Phase::RoundDisplayMoves { .. } => GamePhase::RoundDisplayMoves,
            Phase::RoundLowerHp { .. } => GamePhase::RoundLowerHp,
            Phase::RoundDisplayFainted { .. } => GamePhase::RoundDisplayFainted,
            Phase::RoundDisplayNextChar { .. } => GamePhase::RoundDisplayNextChar,
            Phase::RoundEnd { .. } => GamePhase::RoundEnd,
            Phase::MatchOver { .. } => GamePhase::MatchOver,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::MatchOver { .. })
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self, Phase::RoundStart { .. })
    }
}
