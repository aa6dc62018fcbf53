//! Character and move catalog.
//!
//! The catalog is plain RON data: a list of move records and a list of
//! character records that point at moves by id. Characters are built fresh on
//! every lookup, so each roster gets its own HP and cast state.

use crate::character::{Character, MoveSet};
use crate::errors::{CatalogError, CatalogResult};
use crate::moves::{AnimationHandle, Move};
use schema::{MoveClass, Type};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.ron");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: u32,
    pub name: String,
    pub move_type: Type,
    pub class: MoveClass,
    #[serde(default)]
    pub base_damage: u32,
    #[serde(default)]
    pub damage_blocked: u32,
    #[serde(default)]
    pub animation: String,
}

impl MoveRecord {
    fn to_move(&self) -> CatalogResult<Move> {
        let animation = AnimationHandle(self.animation.clone());
        match self.class {
            MoveClass::Attack => Move::attack(&self.name, self.move_type, self.base_damage, animation),
            MoveClass::Defense => {
                Move::defense(&self.name, self.move_type, self.damage_blocked, animation)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: u32,
    pub name: String,
    pub character_type: Type,
    pub fire_move: u32,
    pub water_move: u32,
    pub grass_move: u32,
    pub defense_move: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    moves: Vec<MoveRecord>,
    characters: Vec<CharacterRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    moves: BTreeMap<u32, MoveRecord>,
    characters: BTreeMap<u32, CharacterRecord>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_ron_str(BUILTIN_CATALOG)
    }

    /// Load a catalog from a RON file on disk.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::MalformedData(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&content)
    }

    /// Parse and validate a catalog. Every character is built once here so a
    /// bad record fails at load time rather than in the middle of a match.
    pub fn from_ron_str(content: &str) -> CatalogResult<Self> {
        let file: CatalogFile =
            ron::from_str(content).map_err(|e| CatalogError::MalformedData(e.to_string()))?;

        let mut moves = BTreeMap::new();
        for record in file.moves {
            let id = record.id;
            if moves.insert(id, record).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }

        let mut characters = BTreeMap::new();
        for record in file.characters {
            let id = record.id;
            if characters.insert(id, record).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }

        let catalog = Catalog { moves, characters };
        for id in catalog.characters.keys() {
            catalog.character(*id)?;
        }
        Ok(catalog)
    }

    fn build_move(&self, id: u32) -> CatalogResult<Move> {
        self.moves
            .get(&id)
            .ok_or(CatalogError::MoveNotFound(id))?
            .to_move()
    }

    /// Build a fresh, full-HP character by id.
    pub fn character(&self, id: u32) -> CatalogResult<Character> {
        let record = self
            .characters
            .get(&id)
            .ok_or(CatalogError::CharacterNotFound(id))?;

        let moves = MoveSet {
            fire: self.build_move(record.fire_move)?,
            water: self.build_move(record.water_move)?,
            grass: self.build_move(record.grass_move)?,
            defense: self.build_move(record.defense_move)?,
        };
        Character::new(&record.name, record.character_type, moves)
    }

    pub fn character_ids(&self) -> Vec<u32> {
        self.characters.keys().copied().collect()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn move_record(&self, id: u32) -> Option<&MoveRecord> {
        self.moves.get(&id)
    }
}
