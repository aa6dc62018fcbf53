//! Text shown to the players while a round plays out.
//!
//! Every function here only reads the round context, so calling one twice in a
//! row yields the same string.

use crate::battle::phase::{FaintedSides, Phase};
use crate::battle::state::{MatchOutcome, RoundContext};
use schema::PlayerSide;

pub const CHOOSE_MOVE_TEXT: &str = "Choose your move...";
pub const DRAW_TEXT: &str = "WINNER: DRAW, please play again.";

fn active_name(ctx: &RoundContext, side: PlayerSide) -> &str {
    ctx.player(side)
        .current_character()
        .map(|c| c.name())
        .unwrap_or("")
}

fn move_line(ctx: &RoundContext, side: PlayerSide) -> String {
    let character = active_name(ctx, side);
    match ctx.active_move(side) {
        Some(m) => format!("{} used {}.", character, m.name()),
        None => format!("{} did not use any move.", character),
    }
}

pub fn text_moves(ctx: &RoundContext) -> String {
    PlayerSide::BOTH
        .iter()
        .map(|side| move_line(ctx, *side))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read before the fainted characters leave the roster.
pub fn fainted(ctx: &RoundContext, fainted: &FaintedSides) -> String {
    PlayerSide::BOTH
        .iter()
        .filter(|side| fainted[side.index()])
        .map(|side| format!("{} has fainted.", active_name(ctx, *side)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read after the fainted characters left the roster.
pub fn next_character(ctx: &RoundContext, fainted: &FaintedSides) -> String {
    let sides: Vec<PlayerSide> = PlayerSide::BOTH
        .into_iter()
        .filter(|side| fainted[side.index()])
        .collect();

    let eliminated: Vec<String> = sides
        .iter()
        .filter(|side| ctx.player(**side).is_defeated())
        .map(|side| format!("{} has no more Poke-mon to fight!", ctx.player(*side).name()))
        .collect();
    if !eliminated.is_empty() {
        return eliminated.join("\n");
    }

    sides
        .iter()
        .map(|side| {
            let player = ctx.player(*side);
            format!("{} sent out {}.", player.name(), active_name(ctx, *side))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn winner(ctx: &RoundContext, outcome: MatchOutcome) -> String {
    match outcome {
        MatchOutcome::Winner(side) => format!("WINNER: {}", ctx.player(side).name()),
        MatchOutcome::Draw => DRAW_TEXT.to_string(),
    }
}

/// The text a phase shows while it is active, if it has any.
pub fn narration_for(phase: &Phase, ctx: &RoundContext) -> Option<String> {
    match phase {
        Phase::RoundStart { .. } => Some(CHOOSE_MOVE_TEXT.to_string()),
        Phase::RoundTextMoves { .. } => Some(text_moves(ctx)),
        Phase::RoundDisplayFainted { fainted: f, .. } => Some(fainted(ctx, f)),
        Phase::RoundDisplayNextChar { fainted, .. } => Some(next_character(ctx, fainted)),
        Phase::MatchOver { outcome } => Some(winner(ctx, *outcome)),
        Phase::RoundDisplayMoves { .. } | Phase::RoundLowerHp { .. } | Phase::RoundEnd { .. } => {
            None
        }
    }
}
