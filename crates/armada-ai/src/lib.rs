//! Ship AI for ARMADA.
//!
//! Implements the ship behaviour state machine, steering geometry,
//! and buff/debuff arithmetic.

pub mod fsm;
pub mod modifiers;
pub mod steering;

pub use armada_core as core;

#[cfg(test)]
mod tests;
