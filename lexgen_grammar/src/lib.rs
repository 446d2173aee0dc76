//! Right-/left-linear grammar to Moore-machine conversion.
//!
//! Productions are matched line by line:
//!
//! ```text
//! right-linear:  <A> -> t <B> | t
//! left-linear:   <A> -> <B> t | t
//! ```
//!
//! Terminals are single word characters or `ε`; an `ε` terminal becomes an
//! epsilon transition. A grammar where every `->` line fits the
//! right-linear shape is converted as right-linear, otherwise the
//! left-linear shape is tried; anything else is rejected.

use std::fmt;

use either::{Either, Left, Right};
use regex::Regex;

use lexgen_machine::{Automaton, State, EPSILON};

const RIGHT_RULE: &str =
    r"(?m)^\s*<(\w+)>\s*->\s*([\wε](?:\s+<\w+>)?(?:\s*\|\s*[\wε](?:\s+<\w+>)?)*)\s*$";
const LEFT_RULE: &str =
    r"(?m)^\s*<(\w+)>\s*->\s*((?:<\w+>\s+)?[\wε](?:\s*\|\s*(?:<\w+>\s+)?[\wε])*)\s*$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The text fits neither the right-linear nor the left-linear shape.
    Unclassifiable,
    /// One production alternative could not be interpreted.
    BadProduction(String),
    /// A production references a nonterminal that never appears as a
    /// left-hand side.
    UnknownNonterminal(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Unclassifiable => {
                write!(f, "grammar is neither right-linear nor left-linear")
            }
            GrammarError::BadProduction(alt) => {
                write!(f, "cannot interpret production alternative '{alt}'")
            }
            GrammarError::UnknownNonterminal(name) => {
                write!(f, "production references undefined nonterminal '<{name}>'")
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// Converts grammar text into a Moore machine. The machine may contain
/// epsilon transitions (from `ε` terminals) and nondeterministic targets;
/// feeding it to the determinizer is the caller's business.
pub fn convert(text: &str) -> Result<Automaton, GrammarError> {
    let right = Regex::new(RIGHT_RULE).unwrap();
    let left = Regex::new(LEFT_RULE).unwrap();
    let productions = text.matches("->").count();

    if productions == 0 {
        return Err(GrammarError::Unclassifiable);
    }
    if right.captures_iter(text).count() == productions {
        convert_right_linear(&right, text)
    } else if left.captures_iter(text).count() == productions {
        convert_left_linear(&left, text)
    } else {
        Err(GrammarError::Unclassifiable)
    }
}

fn note_symbol(alphabet: &mut Vec<String>, terminal: &str) {
    if terminal != EPSILON && !alphabet.iter().any(|s| s == terminal) {
        alphabet.push(terminal.to_owned());
    }
}

/// Splits one alternative into terminal + nonterminal (`Left`) or a bare
/// terminal (`Right`). `pattern` anchors the side-specific shape.
fn split_alternative_right(
    pattern: &Regex,
    alternative: &str,
) -> Result<Either<(String, String), String>, GrammarError> {
    let caps = pattern
        .captures(alternative)
        .ok_or_else(|| GrammarError::BadProduction(alternative.to_owned()))?;
    match caps.get(2) {
        Some(nonterminal) => Ok(Left((caps[1].to_owned(), nonterminal.as_str().to_owned()))),
        None => Ok(Right(caps[1].to_owned())),
    }
}

fn convert_right_linear(rule: &Regex, text: &str) -> Result<Automaton, GrammarError> {
    let alternative = Regex::new(r"^([\wε])(?:\s+<(\w+)>)?$").unwrap();

    // A left-hand side may repeat across lines; all its alternatives
    // belong to the one state.
    let mut states: Vec<State> = Vec::new();
    for caps in rule.captures_iter(text) {
        if !states.iter().any(|s| s.name() == &caps[1]) {
            states.push(State::new(&caps[1], false));
        }
    }
    states.push(State::new("F", true));
    let mut alphabet: Vec<String> = Vec::new();

    for caps in rule.captures_iter(text) {
        let lhs = caps[1].to_owned();
        for alt in caps[2].split('|').map(str::trim) {
            let (terminal, target) = match split_alternative_right(&alternative, alt)? {
                Left((terminal, nonterminal)) => {
                    if !states.iter().any(|s| *s.name() == nonterminal) {
                        return Err(GrammarError::UnknownNonterminal(nonterminal));
                    }
                    (terminal, nonterminal)
                }
                Right(terminal) => (terminal, "F".to_owned()),
            };
            note_symbol(&mut alphabet, &terminal);
            if let Some(state) = states.iter_mut().find(|s| *s.name() == lhs) {
                state.add_target(&terminal, &target);
            }
        }
    }

    Ok(Automaton::new(alphabet, states))
}

fn convert_left_linear(rule: &Regex, text: &str) -> Result<Automaton, GrammarError> {
    let alternative = Regex::new(r"^(?:<(\w+)>\s+)?([\wε])$").unwrap();

    // Fresh start state first, then one state per distinct left-hand side.
    let mut states: Vec<State> = vec![State::new("H", false)];
    for caps in rule.captures_iter(text) {
        if !states.iter().any(|s| s.name() == &caps[1]) {
            states.push(State::new(&caps[1], false));
        }
    }
    let mut alphabet: Vec<String> = Vec::new();

    for caps in rule.captures_iter(text) {
        let lhs = caps[1].to_owned();
        for alt in caps[2].split('|').map(str::trim) {
            // The left-linear alternative regex captures in the other
            // order, so swap the groups back into (terminal, source).
            let (terminal, source) = match split_alternative_left(&alternative, alt)? {
                Left((nonterminal, terminal)) => (terminal, nonterminal),
                Right(terminal) => (terminal, "H".to_owned()),
            };
            note_symbol(&mut alphabet, &terminal);
            let Some(state) = states.iter_mut().find(|s| *s.name() == source) else {
                return Err(GrammarError::UnknownNonterminal(source));
            };
            state.add_target(&terminal, &lhs);
        }
    }

    // A state with nowhere to go is an accept state.
    for state in &mut states {
        if state.transitions().is_empty() {
            state.set_accepting(true);
        }
    }

    Ok(Automaton::new(alphabet, states))
}

fn split_alternative_left(
    pattern: &Regex,
    alternative: &str,
) -> Result<Either<(String, String), String>, GrammarError> {
    let caps = pattern
        .captures(alternative)
        .ok_or_else(|| GrammarError::BadProduction(alternative.to_owned()))?;
    match caps.get(1) {
        Some(nonterminal) => Ok(Left((nonterminal.as_str().to_owned(), caps[2].to_owned()))),
        None => Ok(Right(caps[2].to_owned())),
    }
}
