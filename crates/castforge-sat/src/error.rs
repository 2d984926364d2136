//! Error types for malformed SAT input.

use thiserror::Error;

use crate::literal::{Literal, Variable};

/// Validation failures reported by [`Expression::check`](crate::Expression::check)
/// and by solvers refusing their input.
///
/// An unsatisfiable expression is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SatError {
    #[error("expression has no clauses")]
    EmptyExpression,

    #[error("clause {clause} has no literals")]
    EmptyClause { clause: usize },

    #[error("clause {clause} duplicates clause {original}")]
    DuplicateClause { clause: usize, original: usize },

    #[error("clause {clause} repeats literal {literal}")]
    DuplicateLiteral { clause: usize, literal: Literal },

    #[error("clause {clause} contains both polarities of {variable}")]
    ContradictoryLiteral { clause: usize, variable: Variable },

    #[error("clause {clause} references {variable} but only {variable_count} variables are registered")]
    UnregisteredVariable {
        clause: usize,
        variable: Variable,
        variable_count: usize,
    },

    #[error("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{count} variables exceeds the limit of {limit}")]
    TooManyVariables { count: usize, limit: usize },
}
