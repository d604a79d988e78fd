//! Scripts de operações para exercitar um cache.

mod runner;
mod script;

pub use runner::{Outcome, OutcomeKind, Replayer};
pub use script::{parse_script, Command, ScriptLine};
