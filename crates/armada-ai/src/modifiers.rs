//! Buff and debuff arithmetic.
//!
//! Modifiers stack: each entry multiplies independently and expires on its own.

use armada_core::components::{Modifier, Modifiers};

/// Count every entry down by one tick and drop the ones that reach zero.
pub fn tick(list: &mut Vec<Modifier>) {
    for m in list.iter_mut() {
        m.remaining_ticks = m.remaining_ticks.saturating_sub(1);
    }
    list.retain(|m| m.remaining_ticks > 0);
}

/// Advance both lists by one tick.
pub fn tick_all(mods: &mut Modifiers) {
    tick(&mut mods.buffs);
    tick(&mut mods.debuffs);
}

/// Product of all factors; 1.0 for an empty list.
pub fn product(list: &[Modifier]) -> f64 {
    list.iter().map(|m| m.factor).product()
}

/// Speed multiplier: every buff and every debuff applies.
pub fn speed_multiplier(mods: &Modifiers) -> f64 {
    product(&mods.debuffs) * product(&mods.buffs)
}

/// Outgoing damage multiplier: buffs only.
pub fn damage_multiplier(mods: &Modifiers) -> f64 {
    product(&mods.buffs)
}
