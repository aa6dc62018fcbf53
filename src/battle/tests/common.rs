use crate::battle::phase::PhaseTiming;
use crate::battle::runner::{start_match, MatchHandle};
use crate::battle::state::{InputSnapshot, MatchStatus, RoundContext};
use crate::character::{Character, MoveSet};
use crate::errors::BattleResult;
use crate::moves::{AnimationHandle, Move};
use crate::player::Player;
use schema::Type;

/// A builder for creating test characters with common defaults.
///
/// Every attack hits for 20 and the defense blocks 10 unless overridden.
///
/// # Example
/// ```ignore
/// let charmander = TestCharacterBuilder::new("Charmander", Type::Fire)
///     .with_attack_damage(35)
///     .with_hp(40)
///     .build();
/// ```ignore
pub struct TestCharacterBuilder {
    name: String,
    character_type: Type,
    attack_damage: u32,
    damage_blocked: u32,
    current_hp: Option<u32>,
}

impl TestCharacterBuilder {
    pub fn new(name: &str, character_type: Type) -> Self {
        Self {
            name: name.to_string(),
            character_type,
            attack_damage: 20,
            damage_blocked: 10,
            current_hp: None,
        }
    }

    /// Base damage used by all three attacks.
    pub fn with_attack_damage(mut self, damage: u32) -> Self {
        self.attack_damage = damage;
        self
    }

    pub fn with_damage_blocked(mut self, blocked: u32) -> Self {
        self.damage_blocked = blocked;
        self
    }

    /// Sets the current HP. If not set, the character starts at full HP.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Character {
        let attack = |name: &str, t: Type| {
            Move::attack(name, t, self.attack_damage, AnimationHandle::default())
                .unwrap_or_else(|err| panic!("Failed to build test move {}: {}", name, err))
        };
        let moves = MoveSet {
            fire: attack("Test Fire Attack", Type::Fire),
            water: attack("Test Water Attack", Type::Water),
            grass: attack("Test Grass Attack", Type::Grass),
            defense: Move::defense(
                "Test Guard",
                self.character_type,
                self.damage_blocked,
                AnimationHandle::default(),
            )
            .unwrap_or_else(|err| panic!("Failed to build test guard: {}", err)),
        };

        let mut character = match Character::new(&self.name, self.character_type, moves) {
            Ok(c) => c,
            Err(err) => panic!("Failed to build test character {}: {}", self.name, err),
        };
        if let Some(hp) = self.current_hp {
            character.set_hp(hp);
        }
        character
    }
}

/// Creates a test player with the given roster.
pub fn create_test_player(name: &str, roster: Vec<Character>) -> Player {
    match Player::new(name, roster) {
        Ok(player) => player,
        Err(err) => panic!("Failed to build test player {}: {}", name, err),
    }
}

/// A round context for "Ash" versus "Gary".
pub fn create_test_context(ash: Vec<Character>, gary: Vec<Character>) -> RoundContext {
    RoundContext::new(create_test_player("Ash", ash), create_test_player("Gary", gary))
}

/// A fresh match for "Ash" versus "Gary" with default timings.
pub fn create_test_match(ash: Vec<Character>, gary: Vec<Character>) -> MatchHandle {
    start_match(
        create_test_player("Ash", ash),
        create_test_player("Gary", gary),
        PhaseTiming::default(),
    )
}

/// Timings small enough that each phase ends on its first 1.0s tick.
pub fn one_tick_timing() -> PhaseTiming {
    PhaseTiming {
        round_window: 1.0,
        text_scroll: 0.5,
        text_moves_buffer: 0.1,
        phase_buffer: 0.1,
    }
}

/// Tick with no input until the phase changes, returning the status after the change.
/// Panics if the phase never changes within `max_ticks`.
pub fn tick_until_phase_changes(handle: &mut MatchHandle, dt: f32, max_ticks: usize) -> MatchStatus {
    let start = handle.phase();
    for _ in 0..max_ticks {
        let status = assert_ok(handle.tick(dt, &InputSnapshot::none()));
        if handle.phase() != start {
            return status;
        }
    }
    panic!("Phase {} never ended within {} ticks", start, max_ticks);
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
