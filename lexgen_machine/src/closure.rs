use std::collections::{HashSet, VecDeque};

use itertools::Itertools;

use crate::model::{Automaton, EPSILON};

/// States reachable from `seed` through zero or more epsilon transitions.
///
/// Worklist fixpoint: each state enters the queue at most once, so the loop
/// terminates on any finite machine. The result is sorted lexicographically
/// by name, which makes the closure directly usable as a composite-state
/// member list.
pub fn epsilon_closure(machine: &Automaton, seed: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    for name in seed {
        if seen.insert(name.clone()) {
            queue.push_back(name.clone());
        }
    }

    while let Some(name) = queue.pop_front() {
        let Some(state) = machine.state(&name) else {
            continue;
        };
        if let Some(targets) = state.targets_for(EPSILON) {
            for target in targets {
                if seen.insert(target.clone()) {
                    queue.push_back(target.clone());
                }
            }
        }
    }

    seen.into_iter().sorted().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::State;

    fn chain() -> Automaton {
        // q0 -ε-> q1 -ε-> q2, q2 -ε-> q0 (cycle), q3 detached
        let mut q0 = State::new("q0", false);
        q0.add_target(EPSILON, "q1");
        let mut q1 = State::new("q1", false);
        q1.add_target(EPSILON, "q2");
        let mut q2 = State::new("q2", true);
        q2.add_target(EPSILON, "q0");
        let q3 = State::new("q3", false);
        Automaton::new(Vec::new(), vec![q0, q1, q2, q3])
    }

    #[test]
    fn closure_follows_epsilon_chains_and_cycles() {
        let machine = chain();
        let closure = epsilon_closure(&machine, &["q0".to_owned()]);
        assert_eq!(closure, vec!["q0", "q1", "q2"]);
    }

    #[test]
    fn closure_is_idempotent() {
        let machine = chain();
        let once = epsilon_closure(&machine, &["q1".to_owned()]);
        let twice = epsilon_closure(&machine, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn closure_of_detached_state_is_itself() {
        let machine = chain();
        let closure = epsilon_closure(&machine, &["q3".to_owned()]);
        assert_eq!(closure, vec!["q3"]);
    }
}
