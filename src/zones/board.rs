//! The ordered minion board.
//!
//! Board order *is* the adjacency relation. Neighbours are never stored;
//! they are read off the sequence each time, so removing a minion closes the
//! gap and the minions on either side become adjacent with no bookkeeping.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Minion;
use crate::core::EntityId;

/// One player's board, left to right.
///
/// ## Example
///
/// ```
/// use battler_core::cards::{CardDefinition, CardId, Minion};
/// use battler_core::core::{EntityId, PlayerId};
/// use battler_core::zones::Board;
///
/// let card = CardDefinition::minion(CardId::new(1), "Wisp", 0, 1, 1);
/// let wisp = |id| Minion::from_card(EntityId(id), PlayerId::new(0), &card).unwrap();
///
/// let mut board = Board::new();
/// board.insert(0, wisp(10));
/// board.insert(1, wisp(12));
/// board.insert(1, wisp(11)); // dropped between the two
/// assert_eq!(board.ids(), vec![EntityId(10), EntityId(11), EntityId(12)]);
///
/// board.remove(EntityId(11));
/// assert_eq!(board.neighbor_ids(0), vec![EntityId(12)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    minions: Vector<Minion>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.minions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.minions.is_empty()
    }

    /// Minions left to right.
    pub fn iter(&self) -> impl Iterator<Item = &Minion> {
        self.minions.iter()
    }

    /// Mutable access to every minion, left to right.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Minion> {
        self.minions.iter_mut()
    }

    /// Entity ids left to right.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.minions.iter().map(|m| m.id).collect()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Minion> {
        self.minions.get(position)
    }

    #[must_use]
    pub fn position_of(&self, id: EntityId) -> Option<usize> {
        self.minions.iter().position(|m| m.id == id)
    }

    #[must_use]
    pub fn find(&self, id: EntityId) -> Option<&Minion> {
        self.minions.iter().find(|m| m.id == id)
    }

    pub fn find_mut(&mut self, id: EntityId) -> Option<&mut Minion> {
        let position = self.position_of(id)?;
        self.minions.get_mut(position)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.position_of(id).is_some()
    }

    /// Insert at `position`, clamped to the right end. Returns the index used.
    pub fn insert(&mut self, position: usize, minion: Minion) -> usize {
        let at = position.min(self.minions.len());
        self.minions.insert(at, minion);
        at
    }

    /// Append at the right end. Returns the index used.
    pub fn push(&mut self, minion: Minion) -> usize {
        self.minions.push_back(minion);
        self.minions.len() - 1
    }

    /// Remove a minion, closing the gap. Returns its former position.
    pub fn remove(&mut self, id: EntityId) -> Option<(usize, Minion)> {
        let position = self.position_of(id)?;
        Some((position, self.minions.remove(position)))
    }

    /// Ids of the minions immediately left and right of `position`.
    #[must_use]
    pub fn neighbor_ids(&self, position: usize) -> Vec<EntityId> {
        let mut ids = Vec::with_capacity(2);
        if position > 0 {
            if let Some(left) = self.minions.get(position - 1) {
                ids.push(left.id);
            }
        }
        if let Some(right) = self.minions.get(position + 1) {
            ids.push(right.id);
        }
        ids
    }

    /// Whether the minions at positions `a` and `b` are neighbours.
    #[must_use]
    pub fn adjacent(a: usize, b: usize) -> bool {
        a.abs_diff(b) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId};
    use crate::core::PlayerId;

    fn minion(id: u32) -> Minion {
        let card = CardDefinition::minion(CardId::new(1), "Wisp", 0, 1, 1);
        Minion::from_card(EntityId(id), PlayerId::new(0), &card).unwrap()
    }

    fn board(ids: &[u32]) -> Board {
        let mut b = Board::new();
        for &id in ids {
            b.push(minion(id));
        }
        b
    }

    #[test]
    fn test_insert_clamps_to_end() {
        let mut b = board(&[1, 2]);
        assert_eq!(b.insert(9, minion(3)), 2);
        assert_eq!(b.insert(0, minion(4)), 0);
        assert_eq!(b.ids(), vec![EntityId(4), EntityId(1), EntityId(2), EntityId(3)]);
    }

    #[test]
    fn test_remove_closes_gap() {
        let mut b = board(&[1, 2, 3]);
        assert_eq!(b.neighbor_ids(1), vec![EntityId(1), EntityId(3)]);

        let (pos, removed) = b.remove(EntityId(2)).unwrap();
        assert_eq!((pos, removed.id), (1, EntityId(2)));
        assert_eq!(b.neighbor_ids(0), vec![EntityId(3)]);
        assert!(b.remove(EntityId(2)).is_none());
    }

    #[test]
    fn test_edges_have_one_neighbor() {
        let b = board(&[1, 2, 3]);
        assert_eq!(b.neighbor_ids(0), vec![EntityId(2)]);
        assert_eq!(b.neighbor_ids(2), vec![EntityId(2)]);
        assert!(board(&[1]).neighbor_ids(0).is_empty());
    }

    #[test]
    fn test_find_mut() {
        let mut b = board(&[1, 2]);
        b.find_mut(EntityId(2)).unwrap().damage = 1;
        assert_eq!(b.find(EntityId(2)).unwrap().damage, 1);
        assert_eq!(b.find(EntityId(1)).unwrap().damage, 0);
    }

    #[test]
    fn test_clone_is_isolated() {
        let original = board(&[1, 2]);
        let mut copy = original.clone();
        copy.find_mut(EntityId(1)).unwrap().damage = 5;
        copy.remove(EntityId(2));
        assert_eq!(original.len(), 2);
        assert_eq!(original.find(EntityId(1)).unwrap().damage, 0);
    }

    #[test]
    fn test_adjacent() {
        assert!(Board::adjacent(2, 3));
        assert!(Board::adjacent(3, 2));
        assert!(!Board::adjacent(1, 3));
    }
}
