use crate::errors::{CatalogError, CatalogResult};
use crate::moves::Move;
use schema::{MoveClass, MoveSlot, Type};
use serde::{Deserialize, Serialize};

pub const CHARACTER_STARTING_HP: u32 = 100;

/// The four moves every character carries: one attack per type and one defense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSet {
    pub fire: Move,
    pub water: Move,
    pub grass: Move,
    pub defense: Move,
}

impl MoveSet {
    pub fn get(&self, slot: MoveSlot) -> &Move {
        match slot {
            MoveSlot::Fire => &self.fire,
            MoveSlot::Water => &self.water,
            MoveSlot::Grass => &self.grass,
            MoveSlot::Defense => &self.defense,
        }
    }

    pub fn get_mut(&mut self, slot: MoveSlot) -> &mut Move {
        match slot {
            MoveSlot::Fire => &mut self.fire,
            MoveSlot::Water => &mut self.water,
            MoveSlot::Grass => &mut self.grass,
            MoveSlot::Defense => &mut self.defense,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MoveSlot, &Move)> {
        MoveSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    /// Check every slot holds the right kind of move.
    fn validate(&self, character: &str) -> CatalogResult<()> {
        for (slot, move_) in self.iter() {
            let (expected_class, expected_type) = match slot.attack_type() {
                Some(t) => (MoveClass::Attack, Some(t)),
                None => (MoveClass::Defense, None),
            };
            let class_ok = move_.move_class() == expected_class;
            let type_ok = expected_type.map_or(true, |t| move_.move_type() == t);
            if !class_ok || !type_ok {
                return Err(CatalogError::WrongMoveForSlot {
                    character: character.to_string(),
                    slot,
                    expected_class,
                    expected_type,
                    found_class: move_.move_class(),
                    found_type: move_.move_type(),
                    move_name: move_.name().to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    character_type: Type,
    health_points: u32,
    moves: MoveSet,
}

impl Character {
    /// Create a character at full HP. Fails if any move sits in the wrong slot.
    pub fn new(name: impl Into<String>, character_type: Type, moves: MoveSet) -> CatalogResult<Self> {
        let name = name.into();
        moves.validate(&name)?;
        Ok(Character {
            name,
            character_type,
            health_points: CHARACTER_STARTING_HP,
            moves,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn character_type(&self) -> Type {
        self.character_type
    }

    pub fn hp(&self) -> u32 {
        self.health_points
    }

    pub fn is_alive(&self) -> bool {
        self.health_points > 0
    }

    pub fn is_fainted(&self) -> bool {
        !self.is_alive()
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    pub fn move_in(&self, slot: MoveSlot) -> &Move {
        self.moves.get(slot)
    }

    pub fn move_in_mut(&mut self, slot: MoveSlot) -> &mut Move {
        self.moves.get_mut(slot)
    }

    /// Lower HP by `amount`, stopping at 0. Returns true if this faints the character.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.health_points = self.health_points.saturating_sub(amount);
        was_alive && self.is_fainted()
    }

    #[cfg(test)]
    pub(crate) fn set_hp(&mut self, hp: u32) {
        self.health_points = hp.min(CHARACTER_STARTING_HP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::AnimationHandle;
    use pretty_assertions::assert_eq;

    fn attack(name: &str, t: Type, dmg: u32) -> Move {
        Move::attack(name, t, dmg, AnimationHandle::default()).unwrap()
    }

    fn standard_moves() -> MoveSet {
        MoveSet {
            fire: attack("Ember", Type::Fire, 20),
            water: attack("Bubble", Type::Water, 20),
            grass: attack("Vine Whip", Type::Grass, 20),
            defense: Move::defense("Protect", Type::Fire, 10, AnimationHandle::default()).unwrap(),
        }
    }

    #[test]
    fn test_new_character_starts_at_full_hp() {
        let c = Character::new("Charmander", Type::Fire, standard_moves()).unwrap();
        assert_eq!(c.hp(), CHARACTER_STARTING_HP);
        assert!(c.is_alive());
        assert_eq!(c.move_in(MoveSlot::Grass).name(), "Vine Whip");
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut c = Character::new("Charmander", Type::Fire, standard_moves()).unwrap();

        assert!(!c.take_damage(40));
        assert_eq!(c.hp(), 60);

        assert!(c.take_damage(500));
        assert_eq!(c.hp(), 0);
        assert!(c.is_fainted());

        // Already fainted: no second faint reported
        assert!(!c.take_damage(10));
        assert_eq!(c.hp(), 0);
    }

    #[test]
    fn test_attack_in_defense_slot_is_rejected() {
        let mut moves = standard_moves();
        moves.defense = attack("Flamethrower", Type::Fire, 30);
        let err = Character::new("Charmander", Type::Fire, moves).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::WrongMoveForSlot {
                slot: MoveSlot::Defense,
                ..
            }
        ));
    }

    #[test]
    fn test_mistyped_attack_is_rejected() {
        let mut moves = standard_moves();
        moves.water = attack("Ember", Type::Fire, 20);
        let err = Character::new("Squirtle", Type::Water, moves).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::WrongMoveForSlot {
                slot: MoveSlot::Water,
                found_type: Type::Fire,
                ..
            }
        ));
    }
}
