use derive_getters::Getters;
use itertools::Itertools;

use crate::error::StructuralError;

/// Reserved symbol for transitions that consume no input. Never part of an
/// automaton's alphabet; it only appears as a transition-table key.
pub const EPSILON: &str = "ε";

/// All targets reachable from one state on one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Transition {
    symbol: String,
    targets: Vec<String>,
}

/// A Moore-machine state: name, output marker, transition table.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct State {
    name: String,
    accepting: bool,
    transitions: Vec<Transition>,
}

impl State {
    pub fn new(name: &str, accepting: bool) -> Self {
        State {
            name: name.to_owned(),
            accepting,
            transitions: Vec::new(),
        }
    }

    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Records `symbol -> target`. Targets for the same symbol are merged
    /// into a single list, deduplicated, insertion order preserved.
    pub fn add_target(&mut self, symbol: &str, target: &str) {
        match self.transitions.iter_mut().find(|t| t.symbol == symbol) {
            Some(t) => {
                if !t.targets.iter().any(|existing| existing == target) {
                    t.targets.push(target.to_owned());
                }
            }
            None => self.transitions.push(Transition {
                symbol: symbol.to_owned(),
                targets: vec![target.to_owned()],
            }),
        }
    }

    pub fn targets_for(&self, symbol: &str) -> Option<&[String]> {
        self.transitions
            .iter()
            .find(|t| t.symbol == symbol)
            .map(|t| t.targets.as_slice())
    }
}

/// An automaton over an ordered alphabet. The first state is the start
/// state; the alphabet never contains [`EPSILON`].
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Automaton {
    alphabet: Vec<String>,
    states: Vec<State>,
}

impl Automaton {
    pub fn new(alphabet: Vec<String>, states: Vec<State>) -> Self {
        Automaton { alphabet, states }
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn has_epsilon(&self) -> bool {
        self.states.iter().any(|s| s.targets_for(EPSILON).is_some())
    }

    /// Checks that every transition target names a declared state.
    pub fn validate(&self) -> Result<(), StructuralError> {
        for state in &self.states {
            for transition in &state.transitions {
                for target in transition.targets() {
                    if self.state(target).is_none() {
                        return Err(StructuralError {
                            from: state.name.clone(),
                            symbol: transition.symbol().clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Canonical name of a composite state: member names sorted
/// lexicographically and concatenated. Doubles as the dedup key during
/// subset construction.
pub fn canonical_name(members: &[String]) -> String {
    members.iter().sorted().join("")
}

#[test]
fn targets_merge_per_symbol() {
    let mut state = State::new("q0", false);
    state.add_target("a", "q1");
    state.add_target("a", "q2");
    state.add_target("a", "q1");
    state.add_target("b", "q1");
    assert_eq!(
        state.targets_for("a"),
        Some(&["q1".to_owned(), "q2".to_owned()][..])
    );
    assert_eq!(state.targets_for("b"), Some(&["q1".to_owned()][..]));
    assert_eq!(state.transitions().len(), 2);
}

#[test]
fn validate_rejects_dangling_target() {
    let mut q0 = State::new("q0", false);
    q0.add_target("a", "q9");
    let machine = Automaton::new(vec!["a".to_owned()], vec![q0]);
    let err = machine.validate().unwrap_err();
    assert_eq!(err.target, "q9");
}

#[test]
fn canonical_name_sorts_members() {
    let members = vec!["q2".to_owned(), "q0".to_owned(), "q10".to_owned()];
    assert_eq!(canonical_name(&members), "q0q10q2");
}
