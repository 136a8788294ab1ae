//! Turn planning.
//!
//! A turn is built one action at a time. At each step every legal
//! non-ending action is applied to a clone of the observed state and
//! scored. A winning action is taken at once. Otherwise the best few
//! candidates get a short beam lookahead over the same player's follow-up
//! actions, and the candidate with the best reachable score is taken if it
//! beats the current position by more than the threshold. The plan always
//! closes with `EndTurn` unless the game ended during it.
//!
//! Opponent turns are never simulated.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, error, trace};

use crate::core::{Action, GamePhase, GameState, PlayerId, Result};
use crate::rules::RulesEngine;

use super::config::SearchConfig;
use super::heuristic::{BoardHeuristic, Evaluator};
use super::observe::observe;
use super::stats::SearchStats;

/// The outcome of planning one turn.
#[derive(Clone, Debug)]
pub struct TurnPlan {
    /// Actions to submit in order.
    pub actions: Vec<Action>,
    /// Evaluation of the planned end position.
    pub score: f64,
    pub stats: SearchStats,
}

struct Candidate {
    action: Action,
    state: GameState,
    score: f64,
}

/// Greedy turn planner with beam lookahead.
///
/// ## Example
///
/// ```
/// use battler_core::cards::{catalog, HeroClass};
/// use battler_core::core::Action;
/// use battler_core::rules::Battler;
/// use battler_core::search::{SearchConfig, TurnSearch};
///
/// let battler = Battler::standard();
/// let mut state = battler.sandbox([HeroClass::Mage, HeroClass::Warrior], 1);
/// let me = state.active_player;
/// battler.put_in_hand(&mut state, me, catalog::RIVER_CROCOLISK);
/// battler.set_mana(&mut state, me, 2);
///
/// let search = TurnSearch::new(SearchConfig::default().with_depth(1));
/// let plan = search.choose_turn(&battler, &state).unwrap();
///
/// assert!(plan.actions[0].is_play());
/// assert_eq!(plan.actions.last(), Some(&Action::EndTurn));
/// ```
pub struct TurnSearch {
    config: SearchConfig,
    evaluator: Box<dyn Evaluator>,
}

impl Default for TurnSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl std::fmt::Debug for TurnSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnSearch").field("config", &self.config).finish_non_exhaustive()
    }
}

impl TurnSearch {
    /// Create a planner using the board heuristic.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            evaluator: Box::new(BoardHeuristic::default()),
        }
    }

    /// Set a custom evaluator.
    pub fn with_evaluator<V: Evaluator + 'static>(mut self, evaluator: V) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Plan the whole turn of the player to act.
    ///
    /// Works on an observed copy: the live state is not touched and hidden
    /// information is not used. Outside the main phase the plan is empty.
    ///
    /// Candidates the rules reject are skipped. An `InvariantViolation`
    /// from any branch aborts the search and is returned.
    pub fn choose_turn<R: RulesEngine + Sync>(&self, rules: &R, state: &GameState) -> Result<TurnPlan> {
        let start = Instant::now();
        let me = rules.current_player(state);
        let mut stats = SearchStats::new();
        let mut actions = Vec::new();

        if rules.is_terminal(state).is_some() || state.phase != GamePhase::Main {
            return Ok(TurnPlan {
                actions,
                score: self.score(rules, state, me, &mut stats),
                stats,
            });
        }

        let mut current = observe(state, me, self.config.seed);
        let mut score = self.score(rules, &current, me, &mut stats);

        while actions.len() < self.config.max_actions {
            let mut candidates = self.expand(rules, &current, me, &mut stats)?;
            if candidates.is_empty() {
                break;
            }

            if let Some(i) = candidates
                .iter()
                .position(|c| c.state.result.is_some_and(|r| r.is_winner(me)))
            {
                let win = candidates.swap_remove(i);
                debug!(player = %me, action = %win.action, "lethal found");
                actions.push(win.action);
                score = win.score;
                current = win.state;
                break;
            }

            let Some((best, value)) = self.pick(rules, candidates, me, &mut stats)? else {
                break;
            };
            if value <= score + self.config.threshold {
                break;
            }
            trace!(player = %me, action = %best.action, value, "planned");
            actions.push(best.action);
            score = best.score;
            current = best.state;
            if current.is_over() || current.active_player != me {
                break;
            }
        }

        if !current.is_over() && current.active_player == me {
            actions.push(Action::EndTurn);
        }

        stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            player = %me,
            actions = actions.len(),
            expanded = stats.states_expanded,
            time_us = stats.time_us,
            "turn planned"
        );
        Ok(TurnPlan {
            actions,
            score,
            stats,
        })
    }

    fn score<R: RulesEngine>(&self, rules: &R, state: &GameState, me: PlayerId, stats: &mut SearchStats) -> f64 {
        stats.evaluations += 1;
        self.evaluator.evaluate(state, rules.registry(), me)
    }

    /// Apply every legal action except `EndTurn` to its own clone.
    fn expand<R: RulesEngine>(
        &self,
        rules: &R,
        state: &GameState,
        me: PlayerId,
        stats: &mut SearchStats,
    ) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();
        for action in rules.legal_actions(state) {
            if action.is_end_turn() {
                continue;
            }
            let mut next = state.clone();
            match rules.apply_action(&mut next, &action) {
                Ok(_) => {
                    stats.states_expanded += 1;
                    let score = self.score(rules, &next, me, stats);
                    candidates.push(Candidate {
                        action,
                        state: next,
                        score,
                    });
                }
                Err(err) if err.is_recoverable() => {
                    stats.rejected += 1;
                    trace!(%action, %err, "candidate rejected");
                }
                Err(err) => {
                    error!(%action, %err, "engine failed while planning");
                    return Err(err);
                }
            }
        }
        Ok(candidates)
    }

    /// Best-first, enumeration order among equals.
    fn rank(&self, candidates: &mut Vec<Candidate>) {
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(self.config.beam_width.max(1));
    }

    /// The root candidate with the best reachable score.
    ///
    /// Ties go to the earlier candidate, so the parallel and serial
    /// searches agree.
    fn pick<R: RulesEngine + Sync>(
        &self,
        rules: &R,
        mut candidates: Vec<Candidate>,
        me: PlayerId,
        stats: &mut SearchStats,
    ) -> Result<Option<(Candidate, f64)>> {
        self.rank(&mut candidates);

        let explore = |c: &Candidate| -> Result<(f64, SearchStats)> {
            let mut branch = SearchStats::new();
            let value = self.lookahead(rules, &c.state, c.score, me, self.config.depth, 1, &mut branch)?;
            Ok((value, branch))
        };
        let values: Vec<(f64, SearchStats)> = if self.config.parallel {
            candidates.par_iter().map(explore).collect::<Result<_>>()?
        } else {
            candidates.iter().map(explore).collect::<Result<_>>()?
        };

        let mut best: Option<(usize, f64)> = None;
        for (i, (value, branch)) in values.iter().enumerate() {
            stats.merge(branch);
            if best.map_or(true, |(_, b)| *value > b) {
                best = Some((i, *value));
            }
        }
        Ok(best.map(|(i, value)| (candidates.swap_remove(i), value)))
    }

    #[allow(clippy::too_many_arguments)]
    fn lookahead<R: RulesEngine>(
        &self,
        rules: &R,
        state: &GameState,
        here: f64,
        me: PlayerId,
        remaining: u32,
        level: u32,
        stats: &mut SearchStats,
    ) -> Result<f64> {
        stats.max_depth = stats.max_depth.max(level);
        if remaining == 0 || state.is_over() || state.active_player != me {
            return Ok(here);
        }
        let mut children = self.expand(rules, state, me, stats)?;
        self.rank(&mut children);
        let mut best = here;
        for child in &children {
            let value = self.lookahead(rules, &child.state, child.score, me, remaining - 1, level + 1, stats)?;
            best = best.max(value);
        }
        Ok(best)
    }
}
