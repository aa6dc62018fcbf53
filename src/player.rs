use crate::character::Character;
use crate::errors::{BattleStateError, NameError, RosterError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NO_CHARACTERS: usize = 6;
pub const MAX_NAME_LENGTH: usize = 25;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Player {
    name: String,

    // Send-out order. The front character is the active one.
    roster: Vec<Character>,
}

impl Player {
    /// Create a new Player. The roster must not be empty.
    pub fn new(name: impl Into<String>, roster: Vec<Character>) -> Result<Self, RosterError> {
        if roster.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        Ok(Player {
            name: name.into(),
            roster,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The active character, or `None` once the player is defeated.
    pub fn current_character(&self) -> Option<&Character> {
        self.roster.first()
    }

    pub fn current_character_mut(&mut self) -> Option<&mut Character> {
        self.roster.first_mut()
    }

    pub fn roster(&self) -> &[Character] {
        &self.roster
    }

    pub fn characters_left(&self) -> usize {
        self.roster.len()
    }

    pub fn is_defeated(&self) -> bool {
        self.roster.is_empty()
    }

    /// Remove the front character. The next one, if any, becomes active.
    pub fn knock_out_active(&mut self) -> Result<Character, BattleStateError> {
        if self.roster.is_empty() {
            return Err(BattleStateError::EmptyRoster(self.name.clone()));
        }
        Ok(self.roster.remove(0))
    }
}

/// Validate both player names the way the pre-game screen does.
pub fn validate_player_names(player_one: &str, player_two: &str) -> Result<(), NameError> {
    for name in [player_one, player_two] {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(NameError::TooLong);
        }
    }
    if player_one.trim() == player_two.trim() {
        return Err(NameError::Duplicate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestCharacterBuilder;
    use pretty_assertions::assert_eq;
    use schema::Type;

    #[test]
    fn test_new_player_tracks_roster() {
        let roster = vec![
            TestCharacterBuilder::new("Charmander", Type::Fire).build(),
            TestCharacterBuilder::new("Squirtle", Type::Water).build(),
        ];
        let player = Player::new("Ash", roster).unwrap();

        assert_eq!(player.characters_left(), 2);
        assert!(!player.is_defeated());
        assert_eq!(player.current_character().unwrap().name(), "Charmander");
    }

    #[test]
    fn test_empty_roster_is_rejected() {
        assert_eq!(Player::new("Ash", vec![]), Err(RosterError::EmptyRoster));
    }

    #[test]
    fn test_knock_out_advances_to_next_character() {
        let roster = vec![
            TestCharacterBuilder::new("Charmander", Type::Fire).build(),
            TestCharacterBuilder::new("Squirtle", Type::Water)
                .with_hp(40)
                .build(),
        ];
        let mut player = Player::new("Ash", roster).unwrap();

        let removed = player.knock_out_active().unwrap();
        assert_eq!(removed.name(), "Charmander");
        assert_eq!(player.characters_left(), 1);
        let next = player.current_character().unwrap();
        assert_eq!(next.name(), "Squirtle");
        assert_eq!(next.hp(), 40);

        player.knock_out_active().unwrap();
        assert!(player.is_defeated());
        assert!(player.current_character().is_none());
        assert_eq!(
            player.knock_out_active(),
            Err(BattleStateError::EmptyRoster("Ash".to_string()))
        );
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(validate_player_names("Ash", "Gary"), Ok(()));
        assert_eq!(validate_player_names("", "Gary"), Err(NameError::Empty));
        assert_eq!(validate_player_names("Ash", "   "), Err(NameError::Empty));
        assert_eq!(
            validate_player_names(&"A".repeat(26), "Gary"),
            Err(NameError::TooLong)
        );
        assert_eq!(validate_player_names(&"A".repeat(25), "Gary"), Ok(()));
        assert_eq!(validate_player_names("Ash", "Ash"), Err(NameError::Duplicate));
    }
}
