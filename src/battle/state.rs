use crate::battle::phase::GamePhase;
use crate::moves::Move;
use crate::player::Player;
use schema::{MoveSlot, PlayerSide};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    Winner(PlayerSide),
    Draw,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Ongoing,
    Finished(MatchOutcome),
}

impl MatchStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, MatchStatus::Finished(_))
    }
}

/// Move selections made during one tick, at most one per side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub selections: [Option<MoveSlot>; 2],
}

impl InputSnapshot {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn both(player_one: Option<MoveSlot>, player_two: Option<MoveSlot>) -> Self {
        Self {
            selections: [player_one, player_two],
        }
    }

    pub fn only(side: PlayerSide, slot: MoveSlot) -> Self {
        let mut snapshot = Self::default();
        snapshot.selections[side.index()] = Some(slot);
        snapshot
    }

    pub fn selection(&self, side: PlayerSide) -> Option<MoveSlot> {
        self.selections[side.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.selections.iter().all(Option::is_none)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum BattleEvent {
    PhaseEntered {
        phase: GamePhase,
        round: u32,
        narration: Option<String>,
    },
    MoveSelected {
        side: PlayerSide,
        slot: MoveSlot,
    },
    MoveCast {
        side: PlayerSide,
        move_name: String,
        target: PlayerSide,
    },
    DamageDealt {
        side: PlayerSide,
        character: String,
        damage: u32,
        remaining_hp: u32,
    },
    CharacterFainted {
        side: PlayerSide,
        character: String,
    },
    CharacterSentOut {
        side: PlayerSide,
        character: String,
    },
    PlayerDefeated {
        side: PlayerSide,
    },
    MatchEnded {
        outcome: MatchOutcome,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable line using the round context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, context: &RoundContext) -> Option<String> {
        match self {
            BattleEvent::PhaseEntered { narration, .. } => narration.clone(),
            BattleEvent::MoveSelected { .. } => None,
            BattleEvent::MoveCast { .. } => None,
            BattleEvent::DamageDealt {
                side,
                character,
                damage,
                ..
            } => {
                if *damage == 0 {
                    return None;
                }
                Some(format!(
                    "{}'s {} took {} damage!",
                    context.player(*side).name(),
                    character,
                    damage
                ))
            }
            // Faints, send-outs, defeats and the result are already part of the phase narration
            BattleEvent::CharacterFainted { .. } => None,
            BattleEvent::CharacterSentOut { .. } => None,
            BattleEvent::PlayerDefeated { .. } => None,
            BattleEvent::MatchEnded { .. } => None,
        }
    }
}

/// Event bus for collecting battle events between ticks.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Take every collected event, leaving the bus empty.
    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Narration lines in the order the phases were entered.
    pub fn narrations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BattleEvent::PhaseEntered {
                    narration: Some(text),
                    ..
                } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Shared, round-scoped state the phase machine reads and mutates.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RoundContext {
    pub players: [Player; 2],
    pub selected_moves: [Option<MoveSlot>; 2],
    pub round_number: u32,
    winners: [bool; 2],
}

impl RoundContext {
    pub fn new(player_one: Player, player_two: Player) -> Self {
        Self {
            players: [player_one, player_two],
            selected_moves: [None, None],
            round_number: 0,
            winners: [false, false],
        }
    }

    pub fn player(&self, side: PlayerSide) -> &Player {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: PlayerSide) -> &mut Player {
        &mut self.players[side.index()]
    }

    pub fn selected(&self, side: PlayerSide) -> Option<MoveSlot> {
        self.selected_moves[side.index()]
    }

    /// The move a side picked this round, resolved against its active character.
    pub fn active_move(&self, side: PlayerSide) -> Option<&Move> {
        let slot = self.selected(side)?;
        self.player(side)
            .current_character()
            .map(|character| character.move_in(slot))
    }

    pub fn clear_selections(&mut self) {
        self.selected_moves = [None, None];
    }

    pub fn set_winner(&mut self, side: PlayerSide) {
        self.winners[side.index()] = true;
    }

    /// Both flags set means a draw.
    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self.winners {
            [true, true] => Some(MatchOutcome::Draw),
            [true, false] => Some(MatchOutcome::Winner(PlayerSide::PlayerOne)),
            [false, true] => Some(MatchOutcome::Winner(PlayerSide::PlayerTwo)),
            [false, false] => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_context, TestCharacterBuilder};
    use pretty_assertions::assert_eq;
    use schema::Type;

    #[test]
    fn test_winner_flags_resolve_to_outcome() {
        let mut ctx = create_test_context(
            vec![TestCharacterBuilder::new("Charmander", Type::Fire).build()],
            vec![TestCharacterBuilder::new("Squirtle", Type::Water).build()],
        );
        assert_eq!(ctx.outcome(), None);

        ctx.set_winner(PlayerSide::PlayerTwo);
        assert_eq!(ctx.outcome(), Some(MatchOutcome::Winner(PlayerSide::PlayerTwo)));

        ctx.set_winner(PlayerSide::PlayerOne);
        assert_eq!(ctx.outcome(), Some(MatchOutcome::Draw));
    }

    #[test]
    fn test_active_move_follows_selection() {
        let mut ctx = create_test_context(
            vec![TestCharacterBuilder::new("Charmander", Type::Fire).build()],
            vec![TestCharacterBuilder::new("Squirtle", Type::Water).build()],
        );
        assert!(ctx.active_move(PlayerSide::PlayerOne).is_none());

        ctx.selected_moves[0] = Some(MoveSlot::Grass);
        let chosen = ctx.active_move(PlayerSide::PlayerOne).unwrap();
        assert_eq!(chosen.move_type(), Type::Grass);

        ctx.clear_selections();
        assert!(ctx.active_move(PlayerSide::PlayerOne).is_none());
    }

    #[test]
    fn test_event_bus_collects_narration() {
        let mut bus = EventBus::new();
        bus.push(BattleEvent::PhaseEntered {
            phase: GamePhase::RoundStart,
            round: 1,
            narration: Some("Choose your move...".to_string()),
        });
        bus.push(BattleEvent::PhaseEntered {
            phase: GamePhase::RoundLowerHp,
            round: 1,
            narration: None,
        });
        bus.push(BattleEvent::PlayerDefeated {
            side: PlayerSide::PlayerOne,
        });

        assert_eq!(bus.len(), 3);
        assert_eq!(bus.narrations(), vec!["Choose your move..."]);
        assert!(format!("{}", bus).contains("PlayerDefeated"));

        let drained = bus.drain();
        assert_eq!(drained.len(), 3);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_event_formatting() {
        let ctx = create_test_context(
            vec![TestCharacterBuilder::new("Charmander", Type::Fire).build()],
            vec![TestCharacterBuilder::new("Squirtle", Type::Water).build()],
        );
        let hit = BattleEvent::DamageDealt {
            side: PlayerSide::PlayerTwo,
            character: "Squirtle".to_string(),
            damage: 15,
            remaining_hp: 85,
        };
        assert_eq!(
            hit.format(&ctx),
            Some("Gary's Squirtle took 15 damage!".to_string())
        );

        let blocked = BattleEvent::DamageDealt {
            side: PlayerSide::PlayerOne,
            character: "Charmander".to_string(),
            damage: 0,
            remaining_hp: 100,
        };
        assert_eq!(blocked.format(&ctx), None);
        assert_eq!(
            BattleEvent::MatchEnded {
                outcome: MatchOutcome::Draw
            }
            .format(&ctx),
            None
        );
    }

    #[test]
    fn test_input_snapshot_helpers() {
        let snapshot = InputSnapshot::only(PlayerSide::PlayerTwo, MoveSlot::Defense);
        assert_eq!(snapshot.selection(PlayerSide::PlayerOne), None);
        assert_eq!(snapshot.selection(PlayerSide::PlayerTwo), Some(MoveSlot::Defense));
        assert!(!snapshot.is_empty());
        assert!(InputSnapshot::none().is_empty());
    }
}
