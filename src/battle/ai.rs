//! Move pickers that stand in for a player during the selection window.

use crate::battle::damage::damage_breakdown;
use crate::battle::state::RoundContext;
use crate::character::Character;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{MoveSlot, PlayerSide};
use std::collections::VecDeque;

/// Anything that can pick a move for one side. Asked once per round while
/// the selection window is open. `None` is a pass.
pub trait InputSource {
    fn choose(&mut self, side: PlayerSide, ctx: &RoundContext) -> Option<MoveSlot>;
}

/// Never selects anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassInput;

impl InputSource for PassInput {
    fn choose(&mut self, _side: PlayerSide, _ctx: &RoundContext) -> Option<MoveSlot> {
        None
    }
}

/// Picks a slot uniformly at random, passing with probability `pass_chance`.
pub struct RandomInput<R: Rng> {
    rng: R,
    pass_chance: f64,
}

impl RandomInput<StdRng> {
    pub fn new(pass_chance: f64) -> Self {
        Self::with_rng(StdRng::from_os_rng(), pass_chance)
    }

    pub fn seeded(seed: u64, pass_chance: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), pass_chance)
    }
}

impl<R: Rng> RandomInput<R> {
    pub fn with_rng(rng: R, pass_chance: f64) -> Self {
        Self {
            rng,
            pass_chance: pass_chance.clamp(0.0, 1.0),
        }
    }
}

impl<R: Rng> InputSource for RandomInput<R> {
    fn choose(&mut self, _side: PlayerSide, _ctx: &RoundContext) -> Option<MoveSlot> {
        if self.rng.random_bool(self.pass_chance) {
            return None;
        }
        let pick = self.rng.random_range(0..MoveSlot::ALL.len());
        Some(MoveSlot::ALL[pick])
    }
}

/// Scores every slot against the opposing character and takes the best one.
pub struct GreedyInput<R: Rng> {
    rng: R,
}

impl GreedyInput<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyInput<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GreedyInput<R> {
    /// Worst hit the opponent could land on `own` this round.
    fn biggest_threat(own: &Character, opponent: &Character) -> u32 {
        opponent
            .moves()
            .iter()
            .filter(|(_, m)| m.is_attack())
            .map(|(_, m)| damage_breakdown(own, opponent, Some(m), None).total)
            .max()
            .unwrap_or(0)
    }

    fn score_slot(&self, slot: MoveSlot, own: &Character, opponent: &Character) -> f32 {
        let chosen = own.move_in(slot);
        if chosen.is_attack() {
            let dealt = damage_breakdown(opponent, own, Some(chosen), None).total;
            // A knockout beats anything else on the table
            if dealt >= opponent.hp() {
                return 1000.0 + dealt as f32;
            }
            dealt as f32
        } else {
            let threat = Self::biggest_threat(own, opponent);
            if threat >= own.hp() {
                // Only worth it when blocking keeps us standing
                let saved = chosen.damage_blocked().min(threat);
                if threat - saved < own.hp() {
                    return 500.0 + saved as f32;
                }
            }
            chosen.damage_blocked().min(threat) as f32 * 0.5
        }
    }
}

impl<R: Rng> InputSource for GreedyInput<R> {
    fn choose(&mut self, side: PlayerSide, ctx: &RoundContext) -> Option<MoveSlot> {
        let own = ctx.player(side).current_character()?;
        let opponent = ctx.player(side.opponent()).current_character()?;

        let mut best: Option<(MoveSlot, f32)> = None;
        for slot in MoveSlot::ALL {
            // Small random factor to break ties, +/- 5%
            let jitter = 1.0 + (self.rng.random::<f32>() * 0.1 - 0.05);
            let score = self.score_slot(slot, own, opponent) * jitter;
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((slot, score));
            }
        }
        best.map(|(slot, _)| slot)
    }
}

/// Plays back a fixed list of selections, one per round, then passes.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<Option<MoveSlot>>,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = Option<MoveSlot>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// The same slot every round, forever.
    pub fn repeating(slot: MoveSlot, rounds: usize) -> Self {
        Self::new(std::iter::repeat(Some(slot)).take(rounds))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn choose(&mut self, _side: PlayerSide, _ctx: &RoundContext) -> Option<MoveSlot> {
        self.script.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_context, TestCharacterBuilder};
    use pretty_assertions::assert_eq;
    use schema::Type;

    fn fire_vs_grass() -> RoundContext {
        create_test_context(
            vec![TestCharacterBuilder::new("Charmander", Type::Fire).build()],
            vec![TestCharacterBuilder::new("Bulbasaur", Type::Grass).build()],
        )
    }

    #[test]
    fn test_pass_input_never_selects() {
        let ctx = fire_vs_grass();
        assert_eq!(PassInput.choose(PlayerSide::PlayerOne, &ctx), None);
    }

    #[test]
    fn test_random_input_respects_pass_chance() {
        let ctx = fire_vs_grass();
        let mut always_pass = RandomInput::seeded(3, 1.0);
        let mut never_pass = RandomInput::seeded(3, 0.0);
        for _ in 0..20 {
            assert_eq!(always_pass.choose(PlayerSide::PlayerOne, &ctx), None);
            assert!(never_pass.choose(PlayerSide::PlayerOne, &ctx).is_some());
        }
    }

    #[test]
    fn test_greedy_prefers_super_effective_stab() {
        let ctx = fire_vs_grass();
        let mut greedy = GreedyInput::seeded(11);
        // Fire STAB into Grass: 30 -> 60, far ahead of the rest
        assert_eq!(greedy.choose(PlayerSide::PlayerOne, &ctx), Some(MoveSlot::Fire));
    }

    #[test]
    fn test_greedy_goes_for_the_knockout() {
        let mut ctx = fire_vs_grass();
        ctx.player_mut(PlayerSide::PlayerTwo)
            .current_character_mut()
            .unwrap()
            .set_hp(5);
        let mut greedy = GreedyInput::seeded(5);
        let chosen = greedy.choose(PlayerSide::PlayerOne, &ctx).unwrap();
        assert_ne!(chosen, MoveSlot::Defense);
    }

    #[test]
    fn test_greedy_passes_without_an_opponent() {
        let mut ctx = fire_vs_grass();
        ctx.player_mut(PlayerSide::PlayerTwo).knock_out_active().unwrap();
        let mut greedy = GreedyInput::seeded(1);
        assert_eq!(greedy.choose(PlayerSide::PlayerOne, &ctx), None);
    }

    #[test]
    fn test_scripted_input_plays_back_then_passes() {
        let ctx = fire_vs_grass();
        let mut script = ScriptedInput::new([Some(MoveSlot::Water), None, Some(MoveSlot::Defense)]);
        assert_eq!(script.choose(PlayerSide::PlayerTwo, &ctx), Some(MoveSlot::Water));
        assert_eq!(script.choose(PlayerSide::PlayerTwo, &ctx), None);
        assert_eq!(script.choose(PlayerSide::PlayerTwo, &ctx), Some(MoveSlot::Defense));
        assert_eq!(script.remaining(), 0);
        assert_eq!(script.choose(PlayerSide::PlayerTwo, &ctx), None);
    }
}
