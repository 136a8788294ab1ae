//! Deterministic random number generation.
//!
//! Every random outcome in a game (deck shuffles, random targets, random
//! missiles) is drawn from the `GameRng` stored inside the `GameState`, so
//! the same seed and the same action sequence always replay the same game.
//!
//! The AI never sees the live stream: it plans against a state whose RNG has
//! been replaced by a derived stream (`for_context`), so it cannot foresee
//! how random effects will actually land.
//!
//! ```
//! use battler_core::core::GameRng;
//!
//! let mut live = GameRng::new(42);
//! let mut planning = live.for_context("search");
//!
//! // Derived streams are independent of the live stream...
//! let a: Vec<_> = (0..8).map(|_| live.gen_range_usize(0..100)).collect();
//! let b: Vec<_> = (0..8).map(|_| planning.gen_range_usize(0..100)).collect();
//! assert_ne!(a, b);
//!
//! // ...but still reproducible.
//! let mut again = GameRng::new(42).for_context("search");
//! let c: Vec<_> = (0..8).map(|_| again.gen_range_usize(0..100)).collect();
//! assert_eq!(b, c);
//! ```

use std::hash::{Hash, Hasher};

use im::Vector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// Seedable game RNG.
///
/// Serializes as its `GameRngState`, so a state snapshot carries the exact
/// stream position.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "GameRngState", from = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent stream for a named purpose.
    ///
    /// Depends on the seed and the current stream position, so two derived
    /// streams taken at different points of a game differ.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        self.inner.get_word_pos().hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Random index into a collection of `len` items, `None` when empty.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.gen_range(0..len))
        }
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Shuffle a persistent vector (decks are `im::Vector`s).
    pub fn shuffle_vector<T: Clone>(&mut self, vector: &mut Vector<T>) {
        let mut items: Vec<T> = vector.iter().cloned().collect();
        self.shuffle(&mut items);
        *vector = items.into_iter().collect();
    }

    /// Current position, for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a checkpoint.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
    }
}

impl Eq for GameRng {}

/// Serializable RNG position.
///
/// The ChaCha8 word position makes this O(1) regardless of how many numbers
/// have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}
