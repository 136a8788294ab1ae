//! Card definitions, live instances and the card registry.
//!
//! ## Key Types
//!
//! - `CardId`: identifies a card type
//! - `CardDefinition`: immutable template (cost, kind, stats, tribes,
//!   keywords, effect bindings, auras)
//! - `Minion`, `Hero`, `Weapon`, `Secret`: live instances
//! - `CardRegistry`: lookup by id or name, deck validation
//! - `catalog`: the standard card pool

pub mod attributes;
pub mod catalog;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::{Keyword, Keywords, Tribe, TribeSet};
pub use definition::{CardDefinition, CardId, CardKind, CardType, HeroClass, Rarity};
pub use instance::{Hero, Minion, Secret, Weapon};
pub use registry::CardRegistry;
