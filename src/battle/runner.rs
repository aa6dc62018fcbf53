use crate::battle::ai::InputSource;
use crate::battle::engine::{advance, begin_match};
use crate::battle::phase::{GamePhase, Phase, PhaseTiming};
use crate::battle::state::{
    BattleEvent, EventBus, InputSnapshot, MatchOutcome, MatchStatus, RoundContext,
};
use crate::errors::{BattleResult, MatchError};
use crate::player::Player;
use schema::PlayerSide;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Summary of a finished match, handed to outcome sinks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    pub winner_name: Option<String>,
    pub loser_name: Option<String>,
    pub player_names: [String; 2],
    pub characters_left: [usize; 2],
    pub rounds: u32,
}

/// Anything that wants to hear about finished matches.
pub trait OutcomeSink {
    fn record(&mut self, report: &MatchReport);
}

/// A match in progress. Owns the round context and the current phase and
/// drives them one tick at a time.
#[derive(Debug, Clone)]
pub struct MatchHandle {
    context: RoundContext,
    phase: Phase,
    timing: PhaseTiming,
    events: EventBus,
    ticks: u64,
    polled_round: u32,
}

/// Set up a match between two players and enter the first round.
pub fn start_match(player_one: Player, player_two: Player, timing: PhaseTiming) -> MatchHandle {
    let mut context = RoundContext::new(player_one, player_two);
    let mut events = EventBus::new();
    debug!(
        player_one = context.player(PlayerSide::PlayerOne).name(),
        player_two = context.player(PlayerSide::PlayerTwo).name(),
        "Starting match"
    );
    let phase = begin_match(&mut context, &timing, &mut events);

    MatchHandle {
        context,
        phase,
        timing,
        events,
        ticks: 0,
        polled_round: 0,
    }
}

impl MatchHandle {
    /// Advance the match by `dt` seconds with this tick's input.
    pub fn tick(&mut self, dt: f32, input: &InputSnapshot) -> BattleResult<MatchStatus> {
        let next = advance(
            self.phase.clone(),
            &mut self.context,
            dt,
            input,
            &self.timing,
            &mut self.events,
        )?;
        self.phase = next;
        self.ticks += 1;
        Ok(self.status())
    }

    pub fn status(&self) -> MatchStatus {
        match &self.phase {
            Phase::MatchOver { outcome } => MatchStatus::Finished(*outcome),
            _ => MatchStatus::Ongoing,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.name()
    }

    /// The full phase state, including timers.
    pub fn phase_state(&self) -> &Phase {
        &self.phase
    }

    pub fn context(&self) -> &RoundContext {
        &self.context
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.context.players
    }

    pub fn round_number(&self) -> u32 {
        self.context.round_number
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn timing(&self) -> &PhaseTiming {
        &self.timing
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.events.drain()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// `None` while the match is still being played.
    pub fn report(&self) -> Option<MatchReport> {
        let MatchStatus::Finished(outcome) = self.status() else {
            return None;
        };
        let name_of = |side: PlayerSide| self.context.player(side).name().to_string();
        let (winner_name, loser_name) = match outcome {
            MatchOutcome::Winner(side) => (Some(name_of(side)), Some(name_of(side.opponent()))),
            MatchOutcome::Draw => (None, None),
        };

        Some(MatchReport {
            outcome,
            winner_name,
            loser_name,
            player_names: PlayerSide::BOTH.map(name_of),
            characters_left: PlayerSide::BOTH
                .map(|side| self.context.player(side).characters_left()),
            rounds: self.context.round_number,
        })
    }

    /// Hand the report to `sink` if the match is over. Returns whether it did.
    pub fn publish(&self, sink: &mut dyn OutcomeSink) -> bool {
        match self.report() {
            Some(report) => {
                sink.record(&report);
                true
            }
            None => false,
        }
    }

    /// Input for this tick: each source is asked once per round, on the
    /// first tick of the selection window.
    fn poll_sources(&mut self, sources: &mut [&mut dyn InputSource; 2]) -> InputSnapshot {
        if !self.phase.accepts_input() || self.polled_round == self.context.round_number {
            return InputSnapshot::none();
        }
        self.polled_round = self.context.round_number;
        let mut snapshot = InputSnapshot::none();
        for side in PlayerSide::BOTH {
            snapshot.selections[side.index()] = sources[side.index()].choose(side, &self.context);
        }
        snapshot
    }

    /// Tick with a fixed `dt` until the match ends or `max_ticks` ticks have run.
    pub fn run_to_completion(
        &mut self,
        mut sources: [&mut dyn InputSource; 2],
        dt: f32,
        max_ticks: u64,
    ) -> BattleResult<MatchOutcome> {
        for _ in 0..max_ticks {
            if let MatchStatus::Finished(outcome) = self.status() {
                return Ok(outcome);
            }
            let input = self.poll_sources(&mut sources);
            self.tick(dt, &input)?;
        }
        match self.status() {
            MatchStatus::Finished(outcome) => Ok(outcome),
            MatchStatus::Ongoing => Err(MatchError::TickLimitExceeded(max_ticks).into()),
        }
    }
}
