//! Shared Moore-machine model for the lexgen tools.
//!
//! An [`Automaton`] is an ordered alphabet plus an ordered list of states,
//! each carrying an accepting marker and a per-symbol transition table.
//! The same structure represents both NFAs (epsilon transitions allowed,
//! several targets per symbol) and DFAs (no epsilon, one target per symbol).

pub mod closure;
pub mod error;
pub mod model;
pub mod table;

pub use closure::epsilon_closure;
pub use error::{StructuralError, TableError};
pub use model::{canonical_name, Automaton, State, Transition, EPSILON};
