use crate::errors::{CatalogError, CatalogResult};
use schema::{MoveClass, PlayerSide, Type};
use serde::{Deserialize, Serialize};

/// Class-specific numbers of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Attack { base_damage: u32 },
    Defense { damage_blocked: u32 },
}

/// Opaque key the presentation layer uses to find a move's animation.
/// The core never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AnimationHandle(pub String);

/// A move a character can use during a round.
///
/// Name, type and damage numbers are fixed at construction; only the cast
/// state (`cast_towards`, `animating`) changes while a round plays out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    name: String,
    move_type: Type,
    kind: MoveKind,
    animation: AnimationHandle,
    cast_towards: Option<PlayerSide>,
    animating: bool,
}

impl Move {
    /// Create an attacking move. `base_damage` must be positive.
    pub fn attack(
        name: impl Into<String>,
        move_type: Type,
        base_damage: u32,
        animation: AnimationHandle,
    ) -> CatalogResult<Self> {
        let name = name.into();
        if base_damage == 0 {
            return Err(CatalogError::NonPositiveStat(name));
        }
        Ok(Self::from_parts(
            name,
            move_type,
            MoveKind::Attack { base_damage },
            animation,
        ))
    }

    /// Create a defensive move. `damage_blocked` must be positive.
    pub fn defense(
        name: impl Into<String>,
        move_type: Type,
        damage_blocked: u32,
        animation: AnimationHandle,
    ) -> CatalogResult<Self> {
        let name = name.into();
        if damage_blocked == 0 {
            return Err(CatalogError::NonPositiveStat(name));
        }
        Ok(Self::from_parts(
            name,
            move_type,
            MoveKind::Defense { damage_blocked },
            animation,
        ))
    }

    fn from_parts(name: String, move_type: Type, kind: MoveKind, animation: AnimationHandle) -> Self {
        Self {
            name,
            move_type,
            kind,
            animation,
            cast_towards: None,
            animating: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn move_type(&self) -> Type {
        self.move_type
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn animation(&self) -> &AnimationHandle {
        &self.animation
    }

    pub fn move_class(&self) -> MoveClass {
        match self.kind {
            MoveKind::Attack { .. } => MoveClass::Attack,
            MoveKind::Defense { .. } => MoveClass::Defense,
        }
    }

    /// Damage before modifiers. Always 0 for defensive moves.
    pub fn base_damage(&self) -> u32 {
        match self.kind {
            MoveKind::Attack { base_damage } => base_damage,
            MoveKind::Defense { .. } => 0,
        }
    }

    /// Damage subtracted from an incoming attack. Always 0 for attacking moves.
    pub fn damage_blocked(&self) -> u32 {
        match self.kind {
            MoveKind::Attack { .. } => 0,
            MoveKind::Defense { damage_blocked } => damage_blocked,
        }
    }

    pub fn is_attack(&self) -> bool {
        matches!(self.kind, MoveKind::Attack { .. })
    }

    pub fn cast_towards(&self) -> Option<PlayerSide> {
        self.cast_towards
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Mark the move as cast at `target` and start its animation cue.
    pub fn cast(&mut self, target: PlayerSide) {
        self.cast_towards = Some(target);
        self.animating = true;
    }

    pub fn stop_animating(&mut self) {
        self.animating = false;
    }

    /// Clear the cast state left over from a previous round.
    pub fn reset_cast(&mut self) {
        self.cast_towards = None;
        self.animating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attack_move_views() {
        let ember = Move::attack("Ember", Type::Fire, 20, AnimationHandle::default()).unwrap();
        assert_eq!(ember.move_class(), MoveClass::Attack);
        assert_eq!(ember.base_damage(), 20);
        assert_eq!(ember.damage_blocked(), 0);
        assert!(ember.is_attack());
    }

    #[test]
    fn test_defense_move_views() {
        let protect = Move::defense("Protect", Type::Water, 10, AnimationHandle::default()).unwrap();
        assert_eq!(protect.move_class(), MoveClass::Defense);
        assert_eq!(protect.base_damage(), 0);
        assert_eq!(protect.damage_blocked(), 10);
    }

    #[test]
    fn test_zero_stats_are_rejected() {
        assert_eq!(
            Move::attack("Dud", Type::Fire, 0, AnimationHandle::default()),
            Err(CatalogError::NonPositiveStat("Dud".to_string()))
        );
        assert!(Move::defense("Paper Wall", Type::Grass, 0, AnimationHandle::default()).is_err());
    }

    #[test]
    fn test_cast_state_lifecycle() {
        let mut vine = Move::attack("Vine Whip", Type::Grass, 15, AnimationHandle::default()).unwrap();
        assert_eq!(vine.cast_towards(), None);

        vine.cast(PlayerSide::PlayerTwo);
        assert_eq!(vine.cast_towards(), Some(PlayerSide::PlayerTwo));
        assert!(vine.is_animating());

        vine.stop_animating();
        assert!(!vine.is_animating());
        assert_eq!(vine.cast_towards(), Some(PlayerSide::PlayerTwo));

        vine.reset_cast();
        assert_eq!(vine.cast_towards(), None);
        assert_eq!(vine.base_damage(), 15);
    }
}
