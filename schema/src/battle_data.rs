use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

use crate::element_types::Type;

/// One of the two seats in a match.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PlayerSide {
    PlayerOne,
    PlayerTwo,
}

impl PlayerSide {
    pub const BOTH: [PlayerSide; 2] = [PlayerSide::PlayerOne, PlayerSide::PlayerTwo];

    pub fn opponent(self) -> PlayerSide {
        match self {
            PlayerSide::PlayerOne => PlayerSide::PlayerTwo,
            PlayerSide::PlayerTwo => PlayerSide::PlayerOne,
        }
    }

    /// Position of this side in `[T; 2]` arrays.
    pub fn index(self) -> usize {
        match self {
            PlayerSide::PlayerOne => 0,
            PlayerSide::PlayerTwo => 1,
        }
    }
}

impl fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            PlayerSide::PlayerOne => "Player 1",
            PlayerSide::PlayerTwo => "Player 2",
        };
        write!(f, "{}", display_name)
    }
}

/// The four moves a character carries, addressed by slot.
/// A move selection from an input source names one of these.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum MoveSlot {
    Fire,
    Water,
    Grass,
    Defense,
}

impl MoveSlot {
    pub const ALL: [MoveSlot; 4] = [
        MoveSlot::Fire,
        MoveSlot::Water,
        MoveSlot::Grass,
        MoveSlot::Defense,
    ];

    /// The attack type a slot must hold, or `None` for the defense slot.
    pub fn attack_type(self) -> Option<Type> {
        match self {
            MoveSlot::Fire => Some(Type::Fire),
            MoveSlot::Water => Some(Type::Water),
            MoveSlot::Grass => Some(Type::Grass),
            MoveSlot::Defense => None,
        }
    }
}

impl fmt::Display for MoveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
