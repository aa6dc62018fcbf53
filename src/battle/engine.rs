use crate::battle::damage::damage_breakdown;
use crate::battle::narration::narration_for;
use crate::battle::phase::{Countdown, FaintedSides, GamePhase, HoldGate, Phase, PhaseTiming};
use crate::battle::state::{BattleEvent, EventBus, InputSnapshot, MatchOutcome, RoundContext};
use crate::character::Character;
use crate::errors::{BattleResult, BattleStateError};
use schema::{MoveSlot, PlayerSide};
use tracing::{debug, info, warn};

/// Advance the phase machine by one tick.
///
/// Makes at most one transition. Time left over after a phase ends is dropped,
/// the next phase starts counting from zero on the following tick.
pub fn advance(
    phase: Phase,
    ctx: &mut RoundContext,
    dt: f32,
    input: &InputSnapshot,
    timing: &PhaseTiming,
    bus: &mut EventBus,
) -> BattleResult<Phase> {
    if !phase.accepts_input() && !input.is_empty() {
        warn!(
            phase = %phase.name(),
            "Ignoring move selection outside the selection window"
        );
    }

    match phase {
        Phase::RoundStart { mut window } => {
            // Input first, so a selection in the closing tick still counts
            record_input(ctx, input, bus);
            if window.advance(dt) {
                close_selection_window(ctx, bus);
                let gate = HoldGate::new(timing.hold_for(GamePhase::RoundTextMoves));
                Ok(enter(Phase::RoundTextMoves { gate }, ctx, bus))
            } else {
                Ok(Phase::RoundStart { window })
            }
        }
        Phase::RoundTextMoves { mut gate } => {
            if gate.advance(dt) {
                let gate = HoldGate::new(timing.hold_for(GamePhase::RoundDisplayMoves));
                Ok(enter(Phase::RoundDisplayMoves { gate }, ctx, bus))
            } else {
                Ok(Phase::RoundTextMoves { gate })
            }
        }
        Phase::RoundDisplayMoves { mut gate } => {
            if gate.advance(dt) {
                stop_animations(ctx);
                enter_lower_hp(ctx, timing, bus)
            } else {
                Ok(Phase::RoundDisplayMoves { gate })
            }
        }
        Phase::RoundLowerHp { mut gate } => {
            if !gate.advance(dt) {
                return Ok(Phase::RoundLowerHp { gate });
            }
            let fainted = fainted_sides(ctx)?;
            if fainted.iter().any(|f| *f) {
                Ok(enter_display_fainted(fainted, ctx, timing, bus))
            } else {
                Ok(enter_round_start(ctx, timing, bus))
            }
        }
        Phase::RoundDisplayFainted { mut gate, fainted } => {
            if gate.advance(dt) {
                enter_next_character(fainted, ctx, timing, bus)
            } else {
                Ok(Phase::RoundDisplayFainted { gate, fainted })
            }
        }
        Phase::RoundDisplayNextChar { mut gate, fainted } => {
            if gate.advance(dt) {
                let gate = HoldGate::new(timing.hold_for(GamePhase::RoundEnd));
                Ok(enter(Phase::RoundEnd { gate }, ctx, bus))
            } else {
                Ok(Phase::RoundDisplayNextChar { gate, fainted })
            }
        }
        Phase::RoundEnd { mut gate } => {
            if gate.advance(dt) {
                Ok(finish_round(ctx, timing, bus))
            } else {
                Ok(Phase::RoundEnd { gate })
            }
        }
        Phase::MatchOver { outcome } => Ok(Phase::MatchOver { outcome }),
    }
}

/// Enter the first round of a fresh match.
pub fn begin_match(ctx: &mut RoundContext, timing: &PhaseTiming, bus: &mut EventBus) -> Phase {
    enter_round_start(ctx, timing, bus)
}

fn enter(phase: Phase, ctx: &RoundContext, bus: &mut EventBus) -> Phase {
    debug!(phase = %phase.name(), round = ctx.round_number, "Entering phase");
    bus.push(BattleEvent::PhaseEntered {
        phase: phase.name(),
        round: ctx.round_number,
        narration: narration_for(&phase, ctx),
    });
    phase
}

fn enter_round_start(ctx: &mut RoundContext, timing: &PhaseTiming, bus: &mut EventBus) -> Phase {
    ctx.round_number += 1;
    ctx.clear_selections();
    for side in PlayerSide::BOTH {
        if let Some(character) = ctx.player_mut(side).current_character_mut() {
            for slot in MoveSlot::ALL {
                character.move_in_mut(slot).reset_cast();
            }
        }
    }
    let window = Countdown::new(timing.round_window);
    enter(Phase::RoundStart { window }, ctx, bus)
}

fn record_input(ctx: &mut RoundContext, input: &InputSnapshot, bus: &mut EventBus) {
    for side in PlayerSide::BOTH {
        if let Some(slot) = input.selection(side) {
            debug!(%side, %slot, "Move selected");
            ctx.selected_moves[side.index()] = Some(slot);
            bus.push(BattleEvent::MoveSelected { side, slot });
        }
    }
}

fn close_selection_window(ctx: &mut RoundContext, bus: &mut EventBus) {
    for side in PlayerSide::BOTH {
        let Some(slot) = ctx.selected(side) else {
            debug!(%side, "No move selected, passing");
            continue;
        };
        let target = side.opponent();
        if let Some(character) = ctx.player_mut(side).current_character_mut() {
            let used = character.move_in_mut(slot);
            used.cast(target);
            bus.push(BattleEvent::MoveCast {
                side,
                move_name: used.name().to_string(),
                target,
            });
        }
    }
}

fn stop_animations(ctx: &mut RoundContext) {
    for side in PlayerSide::BOTH {
        let Some(slot) = ctx.selected(side) else {
            continue;
        };
        if let Some(character) = ctx.player_mut(side).current_character_mut() {
            character.move_in_mut(slot).stop_animating();
        }
    }
}

fn active<'a>(ctx: &'a RoundContext, side: PlayerSide) -> BattleResult<&'a Character> {
    ctx.player(side).current_character().ok_or_else(|| {
        BattleStateError::InconsistentState(format!(
            "{} has no active character",
            ctx.player(side).name()
        ))
        .into()
    })
}

fn enter_lower_hp(
    ctx: &mut RoundContext,
    timing: &PhaseTiming,
    bus: &mut EventBus,
) -> BattleResult<Phase> {
    // Both numbers are worked out before either side is hurt
    let mut damage = [0u32; 2];
    for side in PlayerSide::BOTH {
        let defender = active(ctx, side)?;
        let attacker = active(ctx, side.opponent())?;
        let breakdown = damage_breakdown(
            defender,
            attacker,
            ctx.active_move(side.opponent()),
            ctx.active_move(side),
        );
        debug!(
            %side,
            base = breakdown.base,
            after_stab = breakdown.after_stab,
            effectiveness = ?breakdown.effectiveness,
            blocked = breakdown.blocked,
            total = breakdown.total,
            "Damage calculated"
        );
        damage[side.index()] = breakdown.total;
    }

    for side in PlayerSide::BOTH {
        let amount = damage[side.index()];
        if let Some(character) = ctx.player_mut(side).current_character_mut() {
            character.take_damage(amount);
            bus.push(BattleEvent::DamageDealt {
                side,
                character: character.name().to_string(),
                damage: amount,
                remaining_hp: character.hp(),
            });
        }
    }

    let gate = HoldGate::new(timing.hold_for(GamePhase::RoundLowerHp));
    Ok(enter(Phase::RoundLowerHp { gate }, ctx, bus))
}

fn fainted_sides(ctx: &RoundContext) -> BattleResult<FaintedSides> {
    let mut fainted = [false; 2];
    for side in PlayerSide::BOTH {
        fainted[side.index()] = active(ctx, side)?.is_fainted();
    }
    Ok(fainted)
}

fn enter_display_fainted(
    fainted: FaintedSides,
    ctx: &mut RoundContext,
    timing: &PhaseTiming,
    bus: &mut EventBus,
) -> Phase {
    for side in PlayerSide::BOTH {
        if !fainted[side.index()] {
            continue;
        }
        if let Some(character) = ctx.player(side).current_character() {
            info!(%side, character = character.name(), "Character fainted");
            bus.push(BattleEvent::CharacterFainted {
                side,
                character: character.name().to_string(),
            });
        }
    }
    let gate = HoldGate::new(timing.hold_for(GamePhase::RoundDisplayFainted));
    enter(Phase::RoundDisplayFainted { gate, fainted }, ctx, bus)
}

fn enter_next_character(
    fainted: FaintedSides,
    ctx: &mut RoundContext,
    timing: &PhaseTiming,
    bus: &mut EventBus,
) -> BattleResult<Phase> {
    for side in PlayerSide::BOTH {
        if !fainted[side.index()] {
            continue;
        }
        let player = ctx.player_mut(side);
        player.knock_out_active()?;
        match player.current_character() {
            Some(next) => {
                debug!(%side, character = next.name(), "Sending out next character");
                bus.push(BattleEvent::CharacterSentOut {
                    side,
                    character: next.name().to_string(),
                });
            }
            None => {
                info!(%side, player = player.name(), "Player has no characters left");
                bus.push(BattleEvent::PlayerDefeated { side });
            }
        }
    }
    let gate = HoldGate::new(timing.hold_for(GamePhase::RoundDisplayNextChar));
    Ok(enter(Phase::RoundDisplayNextChar { gate, fainted }, ctx, bus))
}

fn finish_round(ctx: &mut RoundContext, timing: &PhaseTiming, bus: &mut EventBus) -> Phase {
    let defeated = PlayerSide::BOTH.map(|side| ctx.player(side).is_defeated());
    if !defeated.iter().any(|d| *d) {
        return enter_round_start(ctx, timing, bus);
    }

    match defeated {
        [true, true] => {
            ctx.set_winner(PlayerSide::PlayerOne);
            ctx.set_winner(PlayerSide::PlayerTwo);
        }
        [true, false] => ctx.set_winner(PlayerSide::PlayerTwo),
        _ => ctx.set_winner(PlayerSide::PlayerOne),
    }

    let outcome = ctx.outcome().unwrap_or(MatchOutcome::Draw);
    info!(?outcome, rounds = ctx.round_number, "Match ended");
    bus.push(BattleEvent::MatchEnded { outcome });
    enter(Phase::MatchOver { outcome }, ctx, bus)
}
