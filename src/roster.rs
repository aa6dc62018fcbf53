use crate::catalog::Catalog;
use crate::character::Character;
use crate::errors::{BattleEngineError, BattleResult, RosterError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything that can hand out a list of ready-to-battle characters.
pub trait RosterSupplier {
    fn supply(&mut self, count: usize) -> BattleResult<Vec<Character>>;
}

/// Draws distinct characters from a catalog in random order.
pub struct RandomRoster<'a, R: Rng> {
    catalog: &'a Catalog,
    rng: R,
}

impl<'a> RandomRoster<'a, StdRng> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Same draws every time for a given seed.
    pub fn seeded(catalog: &'a Catalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<'a, R: Rng> RandomRoster<'a, R> {
    pub fn with_rng(catalog: &'a Catalog, rng: R) -> Self {
        Self { catalog, rng }
    }
}

impl<R: Rng> RosterSupplier for RandomRoster<'_, R> {
    fn supply(&mut self, count: usize) -> BattleResult<Vec<Character>> {
        let ids = self.catalog.character_ids();
        if count > ids.len() {
            return Err(RosterError::NotEnoughCharacters {
                requested: count,
                available: ids.len(),
            }
            .into());
        }

        rand::seq::index::sample(&mut self.rng, ids.len(), count)
            .into_iter()
            .map(|i| self.catalog.character(ids[i]).map_err(BattleEngineError::from))
            .collect()
    }
}

/// Hands out a predetermined list, front first.
#[derive(Debug, Clone, Default)]
pub struct FixedRoster {
    characters: Vec<Character>,
}

impl FixedRoster {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Look up catalog characters by id, keeping the given order.
    pub fn from_ids(catalog: &Catalog, ids: &[u32]) -> BattleResult<Self> {
        let characters = ids
            .iter()
            .map(|id| catalog.character(*id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { characters })
    }
}

impl RosterSupplier for FixedRoster {
    fn supply(&mut self, count: usize) -> BattleResult<Vec<Character>> {
        if count > self.characters.len() {
            return Err(RosterError::NotEnoughCharacters {
                requested: count,
                available: self.characters.len(),
            }
            .into());
        }
        Ok(self.characters.drain(..count).collect())
    }
}
