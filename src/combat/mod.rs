//! Combat resolution.
//!
//! `CombatResolver` owns attack legality (frozen, summoning sickness,
//! attack counts, rush, stealth, taunt) and the damage exchange: both
//! sides strike simultaneously with their pre-combat attack, divine shield
//! absorbs before health is touched, freeze-on-damage is applied, and hero
//! attacks wear down the weapon. Deaths are left to the effect engine's
//! sweep, which runs as part of the attack's cascade.

mod resolver;

pub use resolver::CombatResolver;
