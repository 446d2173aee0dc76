//! Subset construction: epsilon-NFA to DFA.

use std::collections::{HashSet, VecDeque};

use itertools::Itertools;
use lexgen_machine::{canonical_name, epsilon_closure, Automaton, State, StructuralError};

/// Determinizes `nfa` into a fresh machine with no epsilon transitions and
/// at most one target per (state, symbol) pair. The input is not mutated.
///
/// Composite states are named by the sorted concatenation of their member
/// names; the name doubles as the seen-set key, so every reachable subset
/// is processed exactly once and the worklist terminates. The DFA start is
/// the epsilon-closure of the NFA start (the first state); a composite
/// state accepts iff any member accepts.
pub fn determinize(nfa: &Automaton) -> Result<Automaton, StructuralError> {
    nfa.validate()?;

    let mut dfa_states: Vec<State> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<Vec<String>> = VecDeque::new();

    if let Some(start) = nfa.states().first() {
        let closure = epsilon_closure(nfa, &[start.name().clone()]);
        seen.insert(canonical_name(&closure));
        queue.push_back(closure);
    }

    while let Some(members) = queue.pop_front() {
        // Queued sets are already epsilon-closed and sorted.
        let accepting = members
            .iter()
            .filter_map(|name| nfa.state(name))
            .any(|s| *s.accepting());
        let mut composite = State::new(&canonical_name(&members), accepting);

        for symbol in nfa.alphabet() {
            let moved: Vec<String> = members
                .iter()
                .filter_map(|name| nfa.state(name))
                .filter_map(|s| s.targets_for(symbol))
                .flatten()
                .cloned()
                .unique()
                .collect();
            if moved.is_empty() {
                continue;
            }
            let next = epsilon_closure(nfa, &moved);
            let next_name = canonical_name(&next);
            if seen.insert(next_name.clone()) {
                queue.push_back(next);
            }
            composite.add_target(symbol, &next_name);
        }

        dfa_states.push(composite);
    }

    Ok(Automaton::new(nfa.alphabet().clone(), dfa_states))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nfa::build_nfa, regex};
    use lexgen_machine::EPSILON;

    fn dfa(pattern: &str) -> Automaton {
        determinize(&build_nfa(&regex::parse(pattern).unwrap())).unwrap()
    }

    /// Table walker for assertions only; matching is not an engine feature.
    fn accepts(machine: &Automaton, input: &str) -> bool {
        let Some(mut state) = machine.states().first() else {
            return false;
        };
        for c in input.chars() {
            match state.targets_for(&c.to_string()) {
                Some(targets) => state = machine.state(&targets[0]).unwrap(),
                None => return false,
            }
        }
        *state.accepting()
    }

    #[test]
    fn alternation_start_branches_to_terminal_accept_states() {
        // One composite accept per branch; the branches stay separate
        // because the construction never minimizes.
        let machine = dfa("a|b");
        assert_eq!(machine.states().len(), 3);
        let start = &machine.states()[0];
        assert!(!start.accepting());
        for symbol in ["a", "b"] {
            let target = &start.targets_for(symbol).unwrap()[0];
            let accept = machine.state(target).unwrap();
            assert!(*accept.accepting());
            assert!(accept.transitions().is_empty());
        }
    }

    #[test]
    fn star_start_is_accepting_and_loops() {
        let machine = dfa("a*");
        assert_eq!(machine.states().len(), 2);
        let start = &machine.states()[0];
        assert!(*start.accepting(), "skip edge must make start accepting");
        let next = &start.targets_for("a").unwrap()[0];
        let looped = machine.state(next).unwrap();
        assert_eq!(looped.targets_for("a"), Some(&[next.clone()][..]));
        assert!(*looped.accepting());
    }

    #[test]
    fn plus_rejects_the_empty_string() {
        let machine = dfa("(ab)+");
        assert!(!accepts(&machine, ""));
        assert!(!accepts(&machine, "a"));
        assert!(accepts(&machine, "ab"));
        assert!(accepts(&machine, "abab"));
        assert!(!accepts(&machine, "aba"));
    }

    #[test]
    fn output_has_no_epsilon_and_single_targets() {
        for pattern in ["a|b", "a*", "(ab)+", "(a|b)*abb", "((a|())bc)+"] {
            let machine = dfa(pattern);
            assert!(!machine.has_epsilon());
            for state in machine.states() {
                for transition in state.transitions() {
                    assert_ne!(transition.symbol(), EPSILON);
                    assert_eq!(transition.targets().len(), 1);
                }
            }
        }
    }

    #[test]
    fn determinization_is_reproducible() {
        let nfa = build_nfa(&regex::parse("(a|b)*abb").unwrap());
        assert_eq!(determinize(&nfa).unwrap(), determinize(&nfa).unwrap());
    }

    #[test]
    fn alphabet_is_preserved_in_order() {
        let nfa = build_nfa(&regex::parse("c(a|b)c*").unwrap());
        let machine = determinize(&nfa).unwrap();
        assert_eq!(machine.alphabet(), nfa.alphabet());
    }

    #[test]
    fn dangling_target_is_a_structural_error() {
        let mut q0 = State::new("q0", false);
        q0.add_target("a", "ghost");
        let broken = Automaton::new(vec!["a".to_owned()], vec![q0]);
        assert!(determinize(&broken).is_err());
    }

    /// Bounded language equivalence against the `regex` crate: every string
    /// up to length 4 over the pattern's alphabet must get the same verdict.
    #[test]
    fn matches_reference_engine_on_short_strings() {
        for pattern in ["a|b", "a*", "(ab)+", "(a|b)*abb", "a(b|())a", "(0|1)*110"] {
            let machine = dfa(pattern);
            let reference = ::regex::Regex::new(&format!("^(?:{pattern})$")).unwrap();
            let symbols: Vec<&String> = machine.alphabet().iter().collect();
            assert_eq!(accepts(&machine, ""), reference.is_match(""), "{pattern}: empty");
            for len in 1..=4 {
                for word in (0..len).map(|_| symbols.iter()).multi_cartesian_product() {
                    let candidate: String = word.iter().map(|s| s.as_str()).collect();
                    assert_eq!(
                        accepts(&machine, &candidate),
                        reference.is_match(&candidate),
                        "{pattern} disagrees on {candidate:?}"
                    );
                }
            }
        }
    }
}
