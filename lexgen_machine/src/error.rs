use std::fmt;

/// A transition references a state that was never declared. Callers are
/// expected to hand over well-formed machines, so this aborts the whole
/// operation rather than producing a partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralError {
    pub from: String,
    pub symbol: String,
    pub target: String,
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transition '{}' from state '{}' references undeclared state '{}'",
            self.symbol, self.from, self.target
        )
    }
}

impl std::error::Error for StructuralError {}

/// Malformed Moore-table text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The table is missing the output row or the state-name row.
    MissingHeader,
    /// A row has a different number of cells than the state-name row.
    ColumnMismatch { line: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::MissingHeader => {
                write!(f, "machine table needs an output row and a state row")
            }
            TableError::ColumnMismatch { line } => {
                write!(f, "row at line {line} does not match the state row width")
            }
        }
    }
}

impl std::error::Error for TableError {}
