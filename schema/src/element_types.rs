use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// Elemental type of a character or a move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(ascii_case_insensitive)]
pub enum Type {
    Fire,
    Water,
    Grass,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Fire => "FIRE",
            Type::Water => "WATER",
            Type::Grass => "GRASS",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of matching an attacking type against a defending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effectiveness {
    SuperEffective,
    Neutral,
    NotVeryEffective,
}

impl Type {
    /// The type this one beats.
    pub fn beats(self) -> Type {
        match self {
            Type::Fire => Type::Grass,
            Type::Grass => Type::Water,
            Type::Water => Type::Fire,
        }
    }

    /// Effectiveness of an attack of this type against a defender of `defending` type.
    pub fn effectiveness_against(self, defending: Type) -> Effectiveness {
        use Type::*;

        match (self, defending) {
            (Fire, Grass) | (Grass, Water) | (Water, Fire) => Effectiveness::SuperEffective,
            (Fire, Water) | (Grass, Fire) | (Water, Grass) => Effectiveness::NotVeryEffective,
            _ => Effectiveness::Neutral,
        }
    }

    /// Iterate every type in declaration order.
    pub fn iter_all() -> impl Iterator<Item = Type> {
        Type::iter()
    }
}

impl Effectiveness {
    /// Apply the multiplier to an integer damage value.
    /// Halving truncates and doubling saturates.
    pub fn apply(self, damage: u32) -> u32 {
        match self {
            Effectiveness::SuperEffective => damage.saturating_mul(2),
            Effectiveness::NotVeryEffective => damage / 2,
            Effectiveness::Neutral => damage,
        }
    }
}

/// Whether a move deals damage or blocks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MoveClass {
    Attack,
    Defense,
}

impl fmt::Display for MoveClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveClass::Attack => write!(f, "ATTACK"),
            MoveClass::Defense => write!(f, "DEFENSE"),
        }
    }
}
