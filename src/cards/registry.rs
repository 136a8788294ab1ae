//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card definition a game can reference,
//! indexed by `CardId` and by name. It also owns deck validation, since
//! deck legality depends only on the definitions.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::definition::{CardDefinition, CardId, Rarity};
use crate::core::{DeckError, PlayerId, Ruleset};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use battler_core::cards::{CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::minion(CardId::new(500), "Murloc Raider", 1, 2, 1));
///
/// let found = registry.get(CardId::new(500)).unwrap();
/// assert_eq!(found.name, "Murloc Raider");
/// assert_eq!(registry.id_of("Murloc Raider"), Some(CardId::new(500)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    by_name: FxHashMap<String, CardId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition, replacing any previous card with the same id.
    pub fn register(&mut self, card: CardDefinition) {
        if let Some(previous) = self.cards.get(&card.id) {
            warn!(id = %card.id, old = %previous.name, new = %card.name, "card id re-registered");
            self.by_name.remove(&previous.name);
        }
        self.by_name.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, card);
    }

    /// Builder form of `register`.
    #[must_use]
    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.register(card);
        self
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Look a card up by its exact name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.by_name.get(name).and_then(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Collectible cards, sorted by id.
    #[must_use]
    pub fn collectible(&self) -> Vec<&CardDefinition> {
        let mut cards: Vec<_> = self.cards.values().filter(|c| c.collectible).collect();
        cards.sort_by_key(|c| c.id);
        cards
    }

    /// Check a deck against the ruleset: exact size, known and collectible
    /// cards, and per-card copy limits.
    pub fn validate_deck(
        &self,
        player: PlayerId,
        deck: &[CardId],
        ruleset: &Ruleset,
    ) -> Result<(), DeckError> {
        if deck.len() != ruleset.deck_size {
            return Err(DeckError::WrongSize {
                player,
                expected: ruleset.deck_size,
                actual: deck.len(),
            });
        }

        let mut counts: FxHashMap<CardId, usize> = FxHashMap::default();
        for &card in deck {
            let def = self
                .get(card)
                .ok_or(DeckError::UnknownCard { player, card })?;
            if !def.collectible {
                return Err(DeckError::NotCollectible { player, card });
            }
            let count = counts.entry(card).or_insert(0);
            *count += 1;

            let max = if def.rarity == Rarity::Legendary {
                ruleset.max_legendary_copies
            } else {
                ruleset.max_copies
            };
            if *count > max {
                return Err(DeckError::TooManyCopies {
                    player,
                    card,
                    count: *count,
                    max,
                });
            }
        }
        Ok(())
    }
}
