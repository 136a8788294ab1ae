//! Static position evaluation.
//!
//! The search never rolls games out; it scores positions with an
//! `Evaluator`. `BoardHeuristic` is a weighted sum over hero health, board
//! presence (effective stats, so auras and adjacency count), card and
//! mana advantage, weapons, secrets and the lethal threat the opponent's
//! board poses.

use serde::{Deserialize, Serialize};

use crate::cards::{CardRegistry, Keyword, Minion};
use crate::core::{GameState, PlayerId, PlayerState};
use crate::effects::aura;

/// Score assigned to a won position. Lost positions get the negation.
pub const WIN_SCORE: f64 = 1.0e6;

/// Scores a position from one player's point of view. Higher is better.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, state: &GameState, registry: &CardRegistry, perspective: PlayerId) -> f64;
}

/// Weights of the board heuristic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    /// Per point of own hero health (armor included).
    pub my_health: f64,
    /// Per point of enemy hero health (armor included), subtracted.
    pub enemy_health: f64,
    /// Per point of effective minion attack.
    pub attack: f64,
    /// Per point of effective minion health.
    pub health: f64,
    pub taunt: f64,
    pub divine_shield: f64,
    /// Bonus for a minion that can still attack this turn.
    pub ready: f64,
    /// Per card of hand size difference.
    pub hand: f64,
    /// Per mana spent this turn.
    pub tempo: f64,
    /// Per point of weapon attack times durability.
    pub weapon: f64,
    /// Per secret in play.
    pub secret: f64,
    /// Penalty when the enemy board could kill our hero next turn and no
    /// friendly taunt stands in the way.
    pub lethal_threat: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            my_health: 2.0,
            enemy_health: 2.2,
            attack: 1.8,
            health: 0.9,
            taunt: 1.0,
            divine_shield: 1.0,
            ready: 0.5,
            hand: 0.1,
            tempo: 0.05,
            weapon: 0.6,
            secret: 1.5,
            lethal_threat: 15.0,
        }
    }
}

/// The default evaluator.
#[derive(Clone, Debug, Default)]
pub struct BoardHeuristic {
    pub weights: HeuristicWeights,
}

impl BoardHeuristic {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    fn board_value(&self, ps: &PlayerState, registry: &CardRegistry) -> f64 {
        let w = &self.weights;
        (0..ps.board.len())
            .filter_map(|pos| {
                let m = ps.board.get(pos)?;
                let stats = aura::minion_stats(&ps.board, pos, registry)?;
                let mut value = f64::from(stats.attack) * w.attack + f64::from(stats.health) * w.health;
                if m.has(Keyword::Taunt) {
                    value += w.taunt;
                }
                if m.has_divine_shield() {
                    value += w.divine_shield;
                }
                if can_attack(m) {
                    value += w.ready;
                }
                Some(value)
            })
            .sum()
    }

    fn side_value(&self, ps: &PlayerState, registry: &CardRegistry) -> f64 {
        let w = &self.weights;
        let weapon = ps
            .weapon
            .as_ref()
            .map_or(0.0, |wp| f64::from(wp.attack.max(0) * wp.durability.max(0)) * w.weapon);
        self.board_value(ps, registry) + weapon + ps.secrets.len() as f64 * w.secret
    }
}

impl Evaluator for BoardHeuristic {
    fn evaluate(&self, state: &GameState, registry: &CardRegistry, perspective: PlayerId) -> f64 {
        if let Some(result) = state.result {
            return if result.is_winner(perspective) {
                WIN_SCORE
            } else if result.is_winner(perspective.opponent()) {
                -WIN_SCORE
            } else {
                0.0
            };
        }

        let w = &self.weights;
        let me = state.player(perspective);
        let them = state.player(perspective.opponent());

        let mut score = f64::from(effective_health(me)) * w.my_health
            - f64::from(effective_health(them)) * w.enemy_health;
        score += self.side_value(me, registry) - self.side_value(them, registry);
        score += (me.hand.len() as f64 - them.hand.len() as f64) * w.hand;
        score += f64::from(me.mana_spent) * w.tempo;

        if threat(them, registry) >= effective_health(me) && !me.board.iter().any(|m| m.has(Keyword::Taunt)) {
            score -= w.lethal_threat;
        }
        score
    }
}

fn effective_health(ps: &PlayerState) -> i32 {
    ps.hero.health + ps.hero.armor
}

fn can_attack(m: &Minion) -> bool {
    !m.frozen && m.attacks_this_turn < m.max_attacks() && (!m.summoned_this_turn || m.has(Keyword::Charge))
}

/// Damage a side could push into the enemy hero on its next turn, ignoring
/// taunts.
fn threat(ps: &PlayerState, registry: &CardRegistry) -> i32 {
    let minions: i32 = (0..ps.board.len())
        .filter_map(|pos| {
            let m = ps.board.get(pos)?;
            let attacks = if m.has(Keyword::Windfury) { 2 } else { 1 };
            Some(aura::minion_stats(&ps.board, pos, registry)?.attack * attacks)
        })
        .sum();
    minions + ps.weapon.as_ref().map_or(0, |w| w.attack.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::{self, standard_registry};
    use crate::cards::HeroClass;
    use crate::core::EntityId;
    use crate::rules::GameResult;

    fn place(state: &mut GameState, registry: &CardRegistry, player: PlayerId, card: crate::cards::CardId) {
        let id: EntityId = state.alloc_entity();
        let m = Minion::from_card(id, player, registry.get(card).unwrap()).unwrap();
        state.player_mut(player).board.push(m);
    }

    fn state() -> GameState {
        GameState::new(3, [HeroClass::Mage, HeroClass::Warrior], 30)
    }

    #[test]
    fn test_symmetric_position_favors_nobody_but_health_weights() {
        let registry = standard_registry();
        let s = state();
        let h = BoardHeuristic::default();
        let a = h.evaluate(&s, &registry, PlayerId::FIRST);
        // 30 * 2.0 - 30 * 2.2
        assert!((a + 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_board_presence_scores() {
        let registry = standard_registry();
        let mut s = state();
        let h = BoardHeuristic::default();
        let before = h.evaluate(&s, &registry, PlayerId::FIRST);
        place(&mut s, &registry, PlayerId::FIRST, catalog::CHILLWIND_YETI);
        let after = h.evaluate(&s, &registry, PlayerId::FIRST);
        assert!(after > before);
        assert!(h.evaluate(&s, &registry, PlayerId::SECOND) < h.evaluate(&state(), &registry, PlayerId::SECOND));
    }

    #[test]
    fn test_auras_count() {
        let registry = standard_registry();
        let h = BoardHeuristic::default();

        let mut alone = state();
        place(&mut alone, &registry, PlayerId::FIRST, catalog::RIVER_CROCOLISK);
        place(&mut alone, &registry, PlayerId::FIRST, catalog::CHILLWIND_YETI);

        let mut buffed = state();
        place(&mut buffed, &registry, PlayerId::FIRST, catalog::RIVER_CROCOLISK);
        place(&mut buffed, &registry, PlayerId::FIRST, catalog::DIRE_WOLF_ALPHA);
        place(&mut buffed, &registry, PlayerId::FIRST, catalog::CHILLWIND_YETI);

        let mut unbuffed = state();
        place(&mut unbuffed, &registry, PlayerId::FIRST, catalog::RIVER_CROCOLISK);
        place(&mut unbuffed, &registry, PlayerId::FIRST, catalog::CHILLWIND_YETI);
        place(&mut unbuffed, &registry, PlayerId::FIRST, catalog::DIRE_WOLF_ALPHA);

        let p = PlayerId::FIRST;
        assert!(h.evaluate(&buffed, &registry, p) > h.evaluate(&unbuffed, &registry, p));
        assert!(h.evaluate(&unbuffed, &registry, p) > h.evaluate(&alone, &registry, p));
    }

    #[test]
    fn test_terminal_scores() {
        let registry = standard_registry();
        let mut s = state();
        s.result = Some(GameResult::Winner(PlayerId::SECOND));
        let h = BoardHeuristic::default();
        assert_eq!(h.evaluate(&s, &registry, PlayerId::SECOND), WIN_SCORE);
        assert_eq!(h.evaluate(&s, &registry, PlayerId::FIRST), -WIN_SCORE);
        s.result = Some(GameResult::Draw);
        assert_eq!(h.evaluate(&s, &registry, PlayerId::FIRST), 0.0);
    }

    #[test]
    fn test_lethal_threat_penalty() {
        let registry = standard_registry();
        let mut s = state();
        s.player_mut(PlayerId::FIRST).hero.health = 4;
        let h = BoardHeuristic::default();
        let safe = h.evaluate(&s, &registry, PlayerId::FIRST);
        place(&mut s, &registry, PlayerId::SECOND, catalog::CHILLWIND_YETI);
        let threatened = h.evaluate(&s, &registry, PlayerId::FIRST);
        assert!(safe - threatened > h.weights.lethal_threat);
    }
}
