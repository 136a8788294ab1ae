//! Secret resolution.
//!
//! Runs once per action, after the action's own cascade has settled. The
//! opponent of the acting player scans their face-down secrets in the order
//! they were played; each secret whose watch matches an event from the
//! action is revealed: removed from the secret slot, moved to the graveyard,
//! and its reveal bindings resolved through the effect engine.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::watch::{SecretWatch, Sighting};
use crate::cards::CardId;
use crate::core::{EntityId, GameState, PlayerId, Result, SecretPolicy};
use crate::effects::{EffectContext, EffectEngine};
use crate::triggers::{GameEvent, TriggerKind};

/// Reveals secrets in response to an opposing action.
#[derive(Clone, Copy, Debug)]
pub struct SecretResolver<'a> {
    engine: EffectEngine<'a>,
}

impl<'a> SecretResolver<'a> {
    #[must_use]
    pub fn new(engine: EffectEngine<'a>) -> Self {
        Self { engine }
    }

    /// Check `events` (everything `actor`'s action produced) against the
    /// opponent's secrets. Returns the events of every reveal cascade.
    pub fn resolve(
        &self,
        state: &mut GameState,
        actor: PlayerId,
        events: &[GameEvent],
    ) -> Result<Vec<GameEvent>> {
        let owner = actor.opponent();
        let policy = self.engine.ruleset.secret_policy;
        let mut fired: FxHashSet<SecretWatch> = FxHashSet::default();
        let mut out = Vec::new();

        let secrets: Vec<_> = state.player(owner).secrets.iter().cloned().collect();
        for secret in secrets {
            if policy == SecretPolicy::OnePerAction && !fired.is_empty() {
                break;
            }
            // Unknown placeholders have no definition and never fire.
            let Some(watch) = self
                .engine
                .registry
                .get(secret.card)
                .and_then(|def| def.secret_watch())
            else {
                continue;
            };
            if policy == SecretPolicy::OnePerTriggerClass && fired.contains(&watch) {
                trace!(card = %secret.card, ?watch, "class already fired this action");
                continue;
            }
            // A secret may have left the slot during an earlier reveal.
            if !state.player(owner).secrets.iter().any(|s| s.id == secret.id) {
                continue;
            }
            let Some(sighting) = events.iter().find_map(|e| watch.matches(e, owner)) else {
                continue;
            };

            fired.insert(watch);
            out.extend(self.reveal(state, owner, secret.id, secret.card, sighting)?);
        }

        Ok(out)
    }

    fn reveal(
        &self,
        state: &mut GameState,
        owner: PlayerId,
        secret: EntityId,
        card: CardId,
        sighting: Sighting,
    ) -> Result<Vec<GameEvent>> {
        debug!(%owner, %card, subject = ?sighting.subject, "secret revealed");
        let ps = state.player_mut(owner);
        ps.secrets.retain(|s| s.id != secret);
        ps.graveyard.push_back(card);

        let ctx = EffectContext::new(owner, card)
            .with_subject(sighting.subject, sighting.card)
            .spell();
        let mut events = vec![GameEvent::SecretRevealed {
            player: owner,
            secret,
            card,
        }];
        events.extend(self.engine.run_bindings(state, ctx, TriggerKind::Reveal)?);
        self.engine.resolve_all(state, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardRegistry, CardType, HeroClass, Minion, Secret};
    use crate::core::Ruleset;
    use crate::effects::{EffectAction, EffectBinding, TargetSelector};

    const TRAP: CardId = CardId(1);
    const MIRROR: CardId = CardId(2);
    const SNIPE: CardId = CardId(3);
    const YETI: CardId = CardId(4);

    fn registry() -> CardRegistry {
        CardRegistry::new()
            .with_card(
                CardDefinition::secret(TRAP, "Trap", 2, SecretWatch::MinionSummoned).with_effect(
                    EffectBinding::reveal(TargetSelector::EnemyHero, EffectAction::Damage(2)),
                ),
            )
            .with_card(
                CardDefinition::secret(MIRROR, "Mirror", 3, SecretWatch::MinionSummoned).with_effect(
                    EffectBinding::reveal(
                        TargetSelector::Controller,
                        EffectAction::SummonCopy { health: None },
                    ),
                ),
            )
            .with_card(
                CardDefinition::secret(SNIPE, "Snipe", 2, SecretWatch::MinionPlayed).with_effect(
                    EffectBinding::reveal(TargetSelector::Subject, EffectAction::Damage(4)),
                ),
            )
            .with_card(CardDefinition::minion(YETI, "Yeti", 4, 4, 5))
    }

    fn setup(secrets: &[CardId]) -> (GameState, EntityId) {
        let mut state = GameState::new(5, [HeroClass::Mage, HeroClass::Hunter], 30);
        let owner = PlayerId::new(1);
        for &card in secrets {
            let id = state.alloc_entity();
            state.player_mut(owner).secrets.push_back(Secret { id, card });
        }
        let yeti_id = state.alloc_entity();
        let reg = registry();
        let yeti = Minion::from_card(yeti_id, PlayerId::new(0), reg.get(YETI).unwrap()).unwrap();
        state.player_mut(PlayerId::new(0)).board.push(yeti);
        (state, yeti_id)
    }

    fn played(yeti: EntityId) -> Vec<GameEvent> {
        vec![
            GameEvent::CardPlayed {
                player: PlayerId::new(0),
                card: YETI,
                card_type: CardType::Minion,
                entity: Some(yeti),
            },
            GameEvent::MinionSummoned {
                player: PlayerId::new(0),
                minion: yeti,
                card: YETI,
            },
        ]
    }

    #[test]
    fn test_mirror_copies_summoned_minion() {
        let reg = registry();
        let rules = Ruleset::default();
        let resolver = SecretResolver::new(EffectEngine::new(&reg, &rules));
        let (mut state, yeti) = setup(&[MIRROR]);

        let events = resolver.resolve(&mut state, PlayerId::new(0), &played(yeti)).unwrap();
        assert!(matches!(events[0], GameEvent::SecretRevealed { card: MIRROR, .. }));

        let owner = state.player(PlayerId::new(1));
        assert!(owner.secrets.is_empty());
        assert_eq!(owner.graveyard.iter().cloned().collect::<Vec<_>>(), vec![MIRROR]);
        assert_eq!(owner.board.get(0).unwrap().card, YETI);
    }

    #[test]
    fn test_one_per_trigger_class() {
        let reg = registry();
        let rules = Ruleset::default();
        let resolver = SecretResolver::new(EffectEngine::new(&reg, &rules));
        let (mut state, yeti) = setup(&[TRAP, MIRROR, SNIPE]);

        resolver.resolve(&mut state, PlayerId::new(0), &played(yeti)).unwrap();
        // Trap fires for "summoned", Mirror shares the class and waits,
        // Snipe is a different class and fires too.
        let left: Vec<CardId> = state.player(PlayerId::new(1)).secrets.iter().map(|s| s.card).collect();
        assert_eq!(left, vec![MIRROR]);
        assert_eq!(state.player(PlayerId::new(0)).hero.health, 28);
        assert_eq!(state.minion(yeti).unwrap().damage, 4);
    }

    #[test]
    fn test_all_matching_and_one_per_action() {
        let reg = registry();

        let all = Ruleset::default().with_secret_policy(SecretPolicy::AllMatching);
        let resolver = SecretResolver::new(EffectEngine::new(&reg, &all));
        let (mut state, yeti) = setup(&[TRAP, MIRROR, SNIPE]);
        resolver.resolve(&mut state, PlayerId::new(0), &played(yeti)).unwrap();
        assert!(state.player(PlayerId::new(1)).secrets.is_empty());

        let one = Ruleset::default().with_secret_policy(SecretPolicy::OnePerAction);
        let resolver = SecretResolver::new(EffectEngine::new(&reg, &one));
        let (mut state, yeti) = setup(&[TRAP, MIRROR, SNIPE]);
        resolver.resolve(&mut state, PlayerId::new(0), &played(yeti)).unwrap();
        assert_eq!(state.player(PlayerId::new(1)).secrets.len(), 2);
    }

    #[test]
    fn test_own_actions_and_unknown_secrets_never_fire() {
        let reg = registry();
        let rules = Ruleset::default();
        let resolver = SecretResolver::new(EffectEngine::new(&reg, &rules));
        let (mut state, yeti) = setup(&[TRAP, CardId::UNKNOWN]);

        // Player 1 acting does not consult player 1's own secrets.
        let events = resolver.resolve(&mut state, PlayerId::new(1), &played(yeti)).unwrap();
        assert!(events.is_empty());

        let (mut state, yeti) = setup(&[CardId::UNKNOWN]);
        let events = resolver.resolve(&mut state, PlayerId::new(0), &played(yeti)).unwrap();
        assert!(events.is_empty());
        assert_eq!(state.player(PlayerId::new(1)).secrets.len(), 1);
    }
}
