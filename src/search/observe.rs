//! The information set the search plans over.
//!
//! The planner must not peek at what its player could not know. `observe`
//! copies the state with the opponent's hand and secrets replaced by
//! unknown cards, both decks reshuffled, and the RNG swapped for a stream
//! derived from the live one. Planning on the copy therefore cannot predict
//! a real draw or a real random roll.

use crate::cards::CardId;
use crate::core::{GameState, PlayerId};

/// Redacted copy of `state` as `viewer` may know it.
#[must_use]
pub fn observe(state: &GameState, viewer: PlayerId, seed: u64) -> GameState {
    let mut view = state.clone();
    let mut shuffler = state.rng.for_context(&format!("observe/{seed}"));

    let them = view.player_mut(viewer.opponent());
    them.hand = them.hand.iter().map(|_| CardId::UNKNOWN).collect();
    for secret in them.secrets.iter_mut() {
        secret.card = CardId::UNKNOWN;
    }
    shuffler.shuffle_vector(&mut them.deck);
    shuffler.shuffle_vector(&mut view.player_mut(viewer).deck);

    view.rng = state.rng.for_context(&format!("plan/{seed}"));
    view
}
