//! Semicolon-delimited Moore-table text format.
//!
//! Row 1 holds the per-state output markers (`F` or empty), row 2 the state
//! names, then one row per symbol with the comma-joined targets for each
//! state. NFAs additionally carry an `ε` row; it is written last and is
//! never part of the alphabet when read back.

use crate::error::TableError;
use crate::model::{Automaton, State, EPSILON};

/// Renders a machine as table text. Inverse of [`parse`].
pub fn render(machine: &Automaton) -> String {
    let states = machine.states();
    let mut out = String::new();

    for state in states {
        out.push(';');
        if *state.accepting() {
            out.push('F');
        }
    }
    out.push('\n');

    for state in states {
        out.push(';');
        out.push_str(state.name());
    }
    out.push('\n');

    let mut symbols: Vec<&str> = machine.alphabet().iter().map(String::as_str).collect();
    if machine.has_epsilon() {
        symbols.push(EPSILON);
    }
    for symbol in symbols {
        out.push_str(symbol);
        for state in states {
            out.push(';');
            if let Some(targets) = state.targets_for(symbol) {
                out.push_str(&targets.join(","));
            }
        }
        out.push('\n');
    }

    out
}

/// Parses table text back into a machine.
pub fn parse(text: &str) -> Result<Automaton, TableError> {
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));
    let outs_row = lines.next().ok_or(TableError::MissingHeader)?;
    let names_row = lines.next().ok_or(TableError::MissingHeader)?;

    let outs: Vec<&str> = outs_row.split(';').skip(1).collect();
    let names: Vec<&str> = names_row.split(';').skip(1).collect();
    if outs.len() != names.len() || names.is_empty() {
        return Err(TableError::MissingHeader);
    }

    let mut states: Vec<State> = names
        .iter()
        .zip(&outs)
        .map(|(name, out)| State::new(name, out.trim() == "F"))
        .collect();
    let mut alphabet: Vec<String> = Vec::new();

    for (offset, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.split(';');
        let symbol = parts.next().unwrap_or("").trim();
        let cells: Vec<&str> = parts.collect();
        if cells.len() != states.len() {
            return Err(TableError::ColumnMismatch { line: offset + 3 });
        }
        if symbol != EPSILON && !alphabet.iter().any(|s| s == symbol) {
            alphabet.push(symbol.to_owned());
        }
        for (state, cell) in states.iter_mut().zip(&cells) {
            for target in cell.split(',').filter(|t| !t.trim().is_empty()) {
                state.add_target(symbol, target.trim());
            }
        }
    }

    Ok(Automaton::new(alphabet, states))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nfa() -> Automaton {
        let mut q0 = State::new("q0", false);
        q0.add_target("a", "q1");
        q0.add_target("a", "qF");
        q0.add_target(EPSILON, "qF");
        let mut q1 = State::new("q1", false);
        q1.add_target("b", "qF");
        let q_f = State::new("qF", true);
        Automaton::new(vec!["a".to_owned(), "b".to_owned()], vec![q0, q1, q_f])
    }

    #[test]
    fn renders_expected_rows() {
        let text = render(&sample_nfa());
        assert_eq!(
            text,
            ";;;F\n\
             ;q0;q1;qF\n\
             a;q1,qF;;\n\
             b;;qF;\n\
             ε;qF;;\n"
        );
    }

    #[test]
    fn round_trips_through_text() {
        let machine = sample_nfa();
        let reparsed = parse(&render(&machine)).unwrap();
        assert_eq!(reparsed, machine);
    }

    #[test]
    fn epsilon_row_stays_out_of_the_alphabet() {
        let reparsed = parse(&render(&sample_nfa())).unwrap();
        assert_eq!(reparsed.alphabet(), &["a".to_owned(), "b".to_owned()]);
        assert!(reparsed.has_epsilon());
    }

    #[test]
    fn missing_rows_are_rejected() {
        assert_eq!(parse(""), Err(TableError::MissingHeader));
        assert_eq!(parse(";F\n"), Err(TableError::MissingHeader));
    }

    #[test]
    fn ragged_symbol_row_is_rejected() {
        let text = ";;F\n;q0;q1\na;q1\n";
        assert_eq!(parse(text), Err(TableError::ColumnMismatch { line: 3 }));
    }
}
