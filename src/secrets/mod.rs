//! Secrets: face-down reactive effects.
//!
//! - `SecretWatch`: the class of opposing action a secret waits for
//! - `SecretResolver`: scans the opponent's secrets after each action and
//!   reveals the ones that match, subject to the ruleset's `SecretPolicy`
//!
//! A secret's reveal effect is an ordinary effect binding with the
//! `Reveal` trigger; the matched event's subject becomes the binding's
//! `Subject` target (the minion to snipe, the minion to copy, ...).

mod resolver;
mod watch;

pub use resolver::SecretResolver;
pub use watch::{SecretWatch, Sighting};
