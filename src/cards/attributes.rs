//! Minion tribes and keywords.
//!
//! Both are small closed sets, stored as bitsets so they are `Copy` and
//! cheap to test inside the effect engine's hot loops.

use serde::{Deserialize, Serialize};

/// Minion tribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tribe {
    Mech,
    Beast,
    Demon,
    Dragon,
    Murloc,
    Pirate,
    Totem,
    Elemental,
    Naga,
    Undead,
}

impl Tribe {
    /// Every tribe, in declaration order.
    pub const ALL: [Tribe; 10] = [
        Tribe::Mech,
        Tribe::Beast,
        Tribe::Demon,
        Tribe::Dragon,
        Tribe::Murloc,
        Tribe::Pirate,
        Tribe::Totem,
        Tribe::Elemental,
        Tribe::Naga,
        Tribe::Undead,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// A set of tribes.
///
/// The empty set is a minion with no tribe; `TribeSet::all()` is the "All"
/// tribe, a member of every tribe at once.
///
/// ```
/// use battler_core::cards::{Tribe, TribeSet};
///
/// let amalgam = TribeSet::all();
/// assert!(amalgam.contains(Tribe::Murloc));
/// assert!(amalgam.contains(Tribe::Beast));
///
/// let wolf = TribeSet::of(Tribe::Beast);
/// assert!(!wolf.contains(Tribe::Murloc));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TribeSet(u16);

impl TribeSet {
    /// No tribe.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Membership in every tribe.
    #[must_use]
    pub const fn all() -> Self {
        Self((1 << Tribe::ALL.len()) - 1)
    }

    /// A single tribe.
    #[must_use]
    pub const fn of(tribe: Tribe) -> Self {
        Self(tribe.bit())
    }

    #[must_use]
    pub const fn with(self, tribe: Tribe) -> Self {
        Self(self.0 | tribe.bit())
    }

    #[must_use]
    pub const fn contains(self, tribe: Tribe) -> bool {
        self.0 & tribe.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_all(self) -> bool {
        self.0 == Self::all().0
    }

    /// Iterate over member tribes.
    pub fn iter(self) -> impl Iterator<Item = Tribe> {
        Tribe::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl FromIterator<Tribe> for TribeSet {
    fn from_iter<I: IntoIterator<Item = Tribe>>(iter: I) -> Self {
        iter.into_iter().fold(TribeSet::none(), TribeSet::with)
    }
}

/// Minion keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Enemies must attack this minion first.
    Taunt,
    /// Absorbs the next instance of damage.
    DivineShield,
    /// Can attack the turn it is summoned.
    Charge,
    /// Can attack minions the turn it is summoned.
    Rush,
    /// Can attack twice per turn.
    Windfury,
    /// Cannot be targeted or attacked by enemies until it attacks.
    Stealth,
    /// Freezes any character it damages.
    Freeze,
}

impl Keyword {
    pub const ALL: [Keyword; 7] = [
        Keyword::Taunt,
        Keyword::DivineShield,
        Keyword::Charge,
        Keyword::Rush,
        Keyword::Windfury,
        Keyword::Stealth,
        Keyword::Freeze,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// A set of keywords.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keywords(u16);

impl Keywords {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn with(self, keyword: Keyword) -> Self {
        Self(self.0 | keyword.bit())
    }

    #[must_use]
    pub const fn has(self, keyword: Keyword) -> bool {
        self.0 & keyword.bit() != 0
    }

    pub fn insert(&mut self, keyword: Keyword) {
        self.0 |= keyword.bit();
    }

    pub fn remove(&mut self, keyword: Keyword) {
        self.0 &= !keyword.bit();
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Keyword> {
        Keyword::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

impl FromIterator<Keyword> for Keywords {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        iter.into_iter().fold(Keywords::empty(), Keywords::with)
    }
}
