//! Typed event stream and trigger matching.
//!
//! ## Key Components
//!
//! - [`GameEvent`]: everything the engine reports, one variant per kind of
//!   state change
//! - [`TriggerKind`]: when an effect binding fires
//! - [`Listener`]: the on-board entity a "whenever" binding belongs to
//!
//! ## Example
//!
//! ```
//! use battler_core::cards::{CardId, CardRegistry};
//! use battler_core::core::{EntityId, PlayerId};
//! use battler_core::effects::Side;
//! use battler_core::triggers::{GameEvent, Listener, TriggerKind};
//!
//! let registry = CardRegistry::new();
//! let imp_master = Listener {
//!     entity: EntityId(12),
//!     owner: PlayerId::new(0),
//!     card: CardId::new(1),
//! };
//!
//! let at_my_end = TriggerKind::OnTurnEnd(Side::Friendly);
//! let event = GameEvent::TurnEnded { player: PlayerId::new(0) };
//! assert!(at_my_end.matches(&event, &imp_master, &registry));
//! ```

mod condition;
mod event;

pub use condition::{Listener, TriggerKind};
pub use event::GameEvent;
