//! Interactive note browser.
//!
//! A [`Session`] is a pure state machine over keys and loaded notes. The
//! [`EffectRunner`] carries out what it asks for against a store, and
//! [`drive`] ties both to a [`Frontend`].

mod fuzzy;
mod runner;
mod state;
mod terminal;

pub use fuzzy::{FuzzyMatcher, SubsequenceMatcher};
pub use runner::{EffectRunner, Frontend, drive};
pub use state::{Effect, Event, Key, Mode, Session, StartMode};
pub use terminal::TerminalFrontend;
