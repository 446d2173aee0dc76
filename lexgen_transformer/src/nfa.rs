//! Thompson-style translation from a syntax tree to an epsilon-NFA.
//!
//! Construction runs between a fixed outer start `q0` and a single
//! accepting state `qF`. Every operator node allocates fresh intermediate
//! states from a counter owned by the builder, so names stay unique across
//! one build. Concatenation splices its halves through an extra epsilon hop
//! (new-start -ε-> new-finite) instead of sharing a state.

use std::collections::{HashMap, HashSet, VecDeque};

use lexgen_machine::{Automaton, State, EPSILON};

use crate::regex::SyntaxTree;

const START: usize = 0;
const ACCEPT: usize = 1;

struct NfaBuilder {
    states: Vec<State>,
    alphabet: Vec<String>,
    counter: usize,
}

impl NfaBuilder {
    fn new() -> Self {
        NfaBuilder {
            states: vec![State::new("q0", false), State::new("qF", true)],
            alphabet: Vec::new(),
            counter: 0,
        }
    }

    fn fresh(&mut self) -> usize {
        self.counter += 1;
        self.states.push(State::new(&format!("q{}", self.counter), false));
        self.states.len() - 1
    }

    fn link(&mut self, from: usize, symbol: &str, to: usize) {
        if symbol != EPSILON && !self.alphabet.iter().any(|s| s == symbol) {
            self.alphabet.push(symbol.to_owned());
        }
        let target = self.states[to].name().clone();
        self.states[from].add_target(symbol, &target);
    }

    fn connect(&mut self, tree: &SyntaxTree, start: usize, accept: usize) {
        match tree {
            SyntaxTree::Symbol(c) => {
                self.link(start, &c.to_string(), accept);
            }
            SyntaxTree::Epsilon => {
                self.link(start, EPSILON, accept);
            }
            SyntaxTree::Concat(left, right) => {
                let new_start = self.fresh();
                let new_finite = self.fresh();
                self.connect(left, start, new_start);
                self.connect(right, new_finite, accept);
                self.link(new_start, EPSILON, new_finite);
            }
            SyntaxTree::Alternate(left, right) => {
                let left_start = self.fresh();
                let left_finite = self.fresh();
                let right_start = self.fresh();
                let right_finite = self.fresh();
                self.connect(left, left_start, left_finite);
                self.connect(right, right_start, right_finite);
                self.link(start, EPSILON, left_start);
                self.link(start, EPSILON, right_start);
                self.link(left_finite, EPSILON, accept);
                self.link(right_finite, EPSILON, accept);
            }
            SyntaxTree::Star(inner) => {
                let inner_start = self.fresh();
                let inner_finite = self.fresh();
                self.connect(inner, inner_start, inner_finite);
                self.link(start, EPSILON, inner_start);
                self.link(inner_finite, EPSILON, accept);
                self.link(inner_finite, EPSILON, inner_start);
                self.link(start, EPSILON, accept);
            }
            SyntaxTree::Plus(inner) => {
                let inner_start = self.fresh();
                let inner_finite = self.fresh();
                self.connect(inner, inner_start, inner_finite);
                self.link(start, EPSILON, inner_start);
                self.link(inner_finite, EPSILON, accept);
                self.link(inner_finite, EPSILON, inner_start);
            }
        }
    }

    /// Orders states breadth-first from `q0`, which fixes the column order
    /// of the rendered table. All constructed states are reachable.
    fn finish(self) -> Automaton {
        let index: HashMap<String, usize> = self
            .states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name().clone(), i))
            .collect();

        let mut order: Vec<usize> = Vec::with_capacity(self.states.len());
        let mut seen: HashSet<usize> = HashSet::new();
        let mut queue: VecDeque<usize> = VecDeque::new();
        seen.insert(START);
        queue.push_back(START);
        while let Some(current) = queue.pop_front() {
            order.push(current);
            for transition in self.states[current].transitions() {
                for target in transition.targets() {
                    if let Some(&next) = index.get(target) {
                        if seen.insert(next) {
                            queue.push_back(next);
                        }
                    }
                }
            }
        }

        let mut states = self.states;
        let ordered = order
            .into_iter()
            .map(|i| std::mem::replace(&mut states[i], State::new("", false)))
            .collect();
        Automaton::new(self.alphabet, ordered)
    }
}

/// Builds the NFA for a parsed regular expression. Translation is total:
/// once parsing has succeeded there is no failure path.
pub fn build_nfa(tree: &SyntaxTree) -> Automaton {
    let mut builder = NfaBuilder::new();
    builder.connect(tree, START, ACCEPT);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex;
    use itertools::Itertools;

    fn nfa(pattern: &str) -> Automaton {
        build_nfa(&regex::parse(pattern).unwrap())
    }

    #[test]
    fn symbol_is_one_edge_between_start_and_accept() {
        let machine = nfa("a");
        assert_eq!(machine.states().len(), 2);
        assert_eq!(
            machine.state("q0").unwrap().targets_for("a"),
            Some(&["qF".to_owned()][..])
        );
        assert!(*machine.state("qF").unwrap().accepting());
    }

    #[test]
    fn alternation_branches_from_start_and_merges_at_accept() {
        let machine = nfa("a|b");
        let branches = machine.state("q0").unwrap().targets_for(EPSILON).unwrap();
        assert_eq!(branches.len(), 2);
        for branch in branches {
            let inner = machine.state(branch).unwrap();
            let symbol = if branch == "q1" { "a" } else { "b" };
            let finite = &inner.targets_for(symbol).unwrap()[0];
            assert_eq!(
                machine.state(finite).unwrap().targets_for(EPSILON),
                Some(&["qF".to_owned()][..])
            );
        }
    }

    #[test]
    fn star_has_skip_edge_and_loop_back() {
        let machine = nfa("a*");
        let q0 = machine.state("q0").unwrap();
        let eps = q0.targets_for(EPSILON).unwrap();
        assert!(eps.contains(&"q1".to_owned()));
        assert!(eps.contains(&"qF".to_owned()), "skip edge missing");
        let q2 = machine.state("q2").unwrap();
        let back = q2.targets_for(EPSILON).unwrap();
        assert!(back.contains(&"q1".to_owned()), "loop-back edge missing");
        assert!(back.contains(&"qF".to_owned()));
    }

    #[test]
    fn plus_omits_the_skip_edge() {
        let machine = nfa("a+");
        let eps = machine.state("q0").unwrap().targets_for(EPSILON).unwrap();
        assert_eq!(eps, &["q1".to_owned()][..]);
    }

    #[test]
    fn state_names_are_unique_across_nested_subtrees() {
        let machine = nfa("(a|b)*(cd)+");
        let names: Vec<&String> = machine.states().iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), names.iter().unique().count());
    }

    #[test]
    fn alphabet_keeps_first_encounter_order_without_epsilon() {
        let machine = nfa("b(a|c)b*");
        assert_eq!(
            machine.alphabet(),
            &["b".to_owned(), "a".to_owned(), "c".to_owned()]
        );
    }

    #[test]
    fn built_machines_are_structurally_valid() {
        for pattern in ["a", "a|b", "a*", "(ab)+", "(a|())b*c"] {
            nfa(pattern).validate().unwrap();
        }
    }
}
