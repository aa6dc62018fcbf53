use crate::character::Character;
use crate::moves::Move;
use schema::{Effectiveness, MoveClass};
use serde::{Deserialize, Serialize};

/// Every intermediate value of one damage calculation.
///
/// Each step truncates to an integer before the next is applied, so the
/// intermediate values are exactly what the final number was built from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageBreakdown {
    pub base: u32,
    pub after_stab: u32,
    pub effectiveness: Effectiveness,
    pub after_effectiveness: u32,
    pub blocked: u32,
    pub total: u32,
}

impl DamageBreakdown {
    fn nothing() -> Self {
        Self {
            base: 0,
            after_stab: 0,
            effectiveness: Effectiveness::Neutral,
            after_effectiveness: 0,
            blocked: 0,
            total: 0,
        }
    }

    pub fn is_stab(&self) -> bool {
        self.after_stab != self.base
    }
}

/// Same-type attack bonus: ×1.5, truncated. Saturates at `u32::MAX`.
fn apply_stab(damage: u32) -> u32 {
    damage.saturating_mul(3) / 2
}

/// Damage `defender` takes from `incoming`, thrown by `attacker`, while the
/// defender itself used `own_move`. Neither move being present is legal.
pub fn damage_breakdown(
    defender: &Character,
    attacker: &Character,
    incoming: Option<&Move>,
    own_move: Option<&Move>,
) -> DamageBreakdown {
    let incoming = match incoming {
        Some(m) if m.move_class() == MoveClass::Attack => m,
        _ => return DamageBreakdown::nothing(),
    };

    let base = incoming.base_damage();
    let after_stab = if incoming.move_type() == attacker.character_type() {
        apply_stab(base)
    } else {
        base
    };

    let effectiveness = incoming
        .move_type()
        .effectiveness_against(defender.character_type());
    let after_effectiveness = effectiveness.apply(after_stab);

    let blocked = match own_move {
        Some(m) if m.move_class() == MoveClass::Defense => m.damage_blocked(),
        _ => 0,
    };

    DamageBreakdown {
        base,
        after_stab,
        effectiveness,
        after_effectiveness,
        blocked,
        total: after_effectiveness.saturating_sub(blocked),
    }
}

/// Final damage only. See [`damage_breakdown`].
pub fn damage_received(
    defender: &Character,
    attacker: &Character,
    incoming: Option<&Move>,
    own_move: Option<&Move>,
) -> u32 {
    damage_breakdown(defender, attacker, incoming, own_move).total
}
