//! Read-only views of a game for collaborators.
//!
//! A `Snapshot` is what a renderer or a remote client gets: effective stats
//! (auras and adjacency already applied), status flags and zone sizes, with
//! hidden information removed for the viewer. It owns its data and shares
//! nothing with the live state.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardRegistry, HeroClass, Keywords};
use crate::core::{EntityId, GamePhase, GameState, PlayerId};
use crate::effects::aura;
use crate::rules::GameResult;
use crate::zones::Zone;

/// A minion as it currently plays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinionView {
    pub id: EntityId,
    pub card: CardId,
    pub position: usize,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub keywords: Keywords,
    pub frozen: bool,
    pub silenced: bool,
    pub summoned_this_turn: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroView {
    pub class: HeroClass,
    pub health: i32,
    pub max_health: i32,
    pub armor: i32,
    /// Weapon attack while equipped.
    pub attack: i32,
    pub frozen: bool,
    pub power_used: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponView {
    pub id: EntityId,
    pub card: CardId,
    pub attack: i32,
    pub durability: i32,
}

/// One player's side of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub player: PlayerId,
    pub hero: HeroView,
    pub mana: u8,
    pub max_mana: u8,
    /// Hand contents, only for the viewer's own side.
    pub hand: Option<Vec<CardId>>,
    pub hand_size: usize,
    pub deck_size: usize,
    pub board: Vec<MinionView>,
    pub weapon: Option<WeaponView>,
    /// Secret cards, only for the viewer's own side.
    pub secrets: Option<Vec<CardId>>,
    pub secret_count: usize,
    pub graveyard: Vec<CardId>,
}

/// The game as one player may see it.
///
/// ## Example
///
/// ```
/// use battler_core::cards::HeroClass;
/// use battler_core::core::PlayerId;
/// use battler_core::rules::{Battler, Snapshot};
///
/// let battler = Battler::standard();
/// let state = battler.sandbox([HeroClass::Mage, HeroClass::Rogue], 7);
/// let snapshot = battler.snapshot(&state, PlayerId::new(0));
///
/// assert!(snapshot.me().hand.is_some());
/// assert!(snapshot.opponent().hand.is_none());
///
/// let bytes = snapshot.to_bytes().unwrap();
/// assert_eq!(Snapshot::from_bytes(&bytes).unwrap(), snapshot);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub viewer: PlayerId,
    pub active_player: PlayerId,
    pub turn: u32,
    pub phase: GamePhase,
    pub result: Option<GameResult>,
    /// Seat order.
    pub players: [PlayerView; 2],
}

impl Snapshot {
    /// Capture `state` as seen by `viewer`.
    #[must_use]
    pub fn capture(state: &GameState, registry: &CardRegistry, viewer: PlayerId) -> Self {
        let view = |player: PlayerId| player_view(state, registry, player, player == viewer);
        Self {
            viewer,
            active_player: state.active_player,
            turn: state.turn,
            phase: state.phase,
            result: state.result,
            players: [view(PlayerId::FIRST), view(PlayerId::SECOND)],
        }
    }

    /// The viewer's side.
    #[must_use]
    pub fn me(&self) -> &PlayerView {
        &self.players[self.viewer.index()]
    }

    #[must_use]
    pub fn opponent(&self) -> &PlayerView {
        &self.players[self.viewer.opponent().index()]
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

fn player_view(state: &GameState, registry: &CardRegistry, player: PlayerId, own: bool) -> PlayerView {
    let ps = state.player(player);
    let reveal = |zone: Zone| own || zone.is_public();

    let board = ps
        .board
        .iter()
        .enumerate()
        .filter_map(|(position, m)| {
            let stats = aura::minion_stats(&ps.board, position, registry)?;
            Some(MinionView {
                id: m.id,
                card: m.card,
                position,
                attack: stats.attack,
                health: stats.health,
                max_health: stats.max_health,
                keywords: m.keywords,
                frozen: m.frozen,
                silenced: m.silenced,
                summoned_this_turn: m.summoned_this_turn,
            })
        })
        .collect();

    PlayerView {
        player,
        hero: HeroView {
            class: ps.hero.class,
            health: ps.hero.health,
            max_health: ps.hero.max_health,
            armor: ps.hero.armor,
            attack: aura::attack_of(state, registry, EntityId::hero(player)),
            frozen: ps.hero.frozen,
            power_used: ps.hero.power_used,
        },
        mana: ps.mana,
        max_mana: ps.max_mana,
        hand: reveal(Zone::Hand).then(|| ps.hand.iter().copied().collect()),
        hand_size: ps.zone_len(Zone::Hand),
        deck_size: ps.zone_len(Zone::Deck),
        board,
        weapon: ps.weapon.as_ref().map(|w| WeaponView {
            id: w.id,
            card: w.card,
            attack: w.attack,
            durability: w.durability,
        }),
        secrets: reveal(Zone::SecretSlot).then(|| ps.secrets.iter().map(|s| s.card).collect()),
        secret_count: ps.zone_len(Zone::SecretSlot),
        graveyard: ps.graveyard.iter().copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::{self, standard_registry};
    use crate::cards::{Minion, Secret};

    fn setup() -> (GameState, CardRegistry) {
        let registry = standard_registry();
        let mut state = GameState::new(11, [HeroClass::Hunter, HeroClass::Warrior], 30);
        let p1 = PlayerId::new(1);

        for card in [catalog::DIRE_WOLF_ALPHA, catalog::RIVER_CROCOLISK] {
            let id = state.alloc_entity();
            let m = Minion::from_card(id, p1, registry.get(card).unwrap()).unwrap();
            state.player_mut(p1).board.push(m);
        }
        let id = state.alloc_entity();
        state.player_mut(p1).secrets.push_back(Secret {
            id,
            card: catalog::EXPLOSIVE_TRAP,
        });
        state.player_mut(p1).hand.push_back(catalog::FIREBALL_LITE);
        (state, registry)
    }

    #[test]
    fn test_hidden_information_removed() {
        let (state, registry) = setup();
        let snap = Snapshot::capture(&state, &registry, PlayerId::new(0));

        let them = snap.opponent();
        assert_eq!(them.hand, None);
        assert_eq!(them.hand_size, 1);
        assert_eq!(them.secrets, None);
        assert_eq!(them.secret_count, 1);

        let own = Snapshot::capture(&state, &registry, PlayerId::new(1));
        assert_eq!(own.me().secrets, Some(vec![catalog::EXPLOSIVE_TRAP]));
        assert_eq!(own.me().hand, Some(vec![catalog::FIREBALL_LITE]));
    }

    #[test]
    fn test_effective_stats() {
        let (state, registry) = setup();
        let snap = Snapshot::capture(&state, &registry, PlayerId::new(0));
        let croc = &snap.opponent().board[1];
        // 2/3 next to the alpha.
        assert_eq!((croc.attack, croc.health), (3, 3));
    }

    #[test]
    fn test_json_roundtrip() {
        let (state, registry) = setup();
        let snap = Snapshot::capture(&state, &registry, PlayerId::new(1));
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
