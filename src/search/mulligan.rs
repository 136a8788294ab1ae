//! Opening hand selection.

use crate::cards::{CardKind, CardRegistry};
use crate::core::{GameState, PlayerId};

/// Most expensive card kept in an opening hand.
const KEEP_MINION_COST: u8 = 3;
const KEEP_SPELL_COST: u8 = 2;

/// Hand indices to send back: anything that will not be played in the
/// first turns. Cheap minions stay, and so do cheap spells, weapons and
/// secrets.
#[must_use]
pub fn mulligan_choices(state: &GameState, registry: &CardRegistry, player: PlayerId) -> Vec<usize> {
    state
        .player(player)
        .hand
        .iter()
        .enumerate()
        .filter(|(_, &card)| {
            let Some(def) = registry.get(card) else {
                return true;
            };
            let keep = match def.kind {
                CardKind::Minion { .. } => (1..=KEEP_MINION_COST).contains(&def.cost),
                CardKind::HeroPower => false,
                _ => def.cost <= KEEP_SPELL_COST,
            };
            !keep
        })
        .map(|(i, _)| i)
        .collect()
}
