//! Regex front end: pattern → syntax tree → NFA → DFA.

pub mod dfa;
pub mod nfa;
pub mod regex;

use lexgen_machine::Automaton;

pub use dfa::determinize;
pub use nfa::build_nfa;
pub use regex::{SyntaxError, SyntaxTree};

/// Parses a pattern and builds its Thompson NFA in one step.
pub fn regex_to_nfa(pattern: &str) -> Result<Automaton, SyntaxError> {
    Ok(build_nfa(&regex::parse(pattern)?))
}
