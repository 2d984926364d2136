//! Expressions: conjunctions of clauses.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::clause::{Clause, ClauseState};
use crate::error::SatError;

/// A boolean expression in conjunctive normal form.
///
/// [`insert`](Expression::insert) treats the expression as a set and ignores
/// clauses already present; [`push`](Expression::push) appends unconditionally
/// so malformed input can be represented and rejected by [`check`](Expression::check).
///
/// # Example
///
/// ```
/// use castforge_sat::{Clause, Expression, Variable};
///
/// let (a, b) = (Variable(0), Variable(1));
/// let mut expression = Expression::new();
/// expression.insert(Clause::new([a.positive(), b.positive()]));
/// expression.insert(Clause::unit(a.negative()));
///
/// assert!(expression.check(2).is_ok());
/// assert_eq!(expression.evaluate(&[false, true]), Ok(true));
/// assert_eq!(expression.evaluate(&[true, true]), Ok(false));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Expression {
    clauses: Vec<Clause>,
    index: HashSet<Clause>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an expression from clauses, keeping duplicates.
    pub fn from_clauses(clauses: impl IntoIterator<Item = Clause>) -> Self {
        let mut expression = Self::new();
        for clause in clauses {
            expression.push(clause);
        }
        expression
    }

    /// Adds a clause unless an equal clause is already present.
    pub fn insert(&mut self, clause: Clause) -> bool {
        if self.index.contains(&clause) {
            return false;
        }
        self.push(clause);
        true
    }

    /// Appends a clause even if it is already present.
    pub fn push(&mut self, clause: Clause) {
        self.index.insert(clause.clone());
        self.clauses.push(clause);
    }

    /// Inserts every clause, skipping ones already present.
    pub fn extend(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        for clause in clauses {
            self.insert(clause);
        }
    }

    #[inline]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Total number of literals across all clauses.
    pub fn literal_count(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// Validates structure against the number of registered variables.
    ///
    /// Rejects an empty expression, empty clauses, duplicate clauses,
    /// repeated literals, clauses containing both polarities of a variable
    /// and references to unregistered variables. Nothing is repaired.
    pub fn check(&self, variable_count: usize) -> Result<(), SatError> {
        if self.clauses.is_empty() {
            return Err(SatError::EmptyExpression);
        }
        let mut seen: HashMap<&Clause, usize> = HashMap::with_capacity(self.clauses.len());
        for (index, clause) in self.clauses.iter().enumerate() {
            if clause.is_empty() {
                return Err(SatError::EmptyClause { clause: index });
            }
            if let Some(&original) = seen.get(clause) {
                return Err(SatError::DuplicateClause {
                    clause: index,
                    original,
                });
            }
            seen.insert(clause, index);

            // Literals are sorted, so equal and opposite literals are adjacent.
            for pair in clause.literals().windows(2) {
                if pair[0] == pair[1] {
                    return Err(SatError::DuplicateLiteral {
                        clause: index,
                        literal: pair[0],
                    });
                }
                if pair[0].variable == pair[1].variable {
                    return Err(SatError::ContradictoryLiteral {
                        clause: index,
                        variable: pair[0].variable,
                    });
                }
            }
            if let Some(literal) = clause
                .literals()
                .iter()
                .find(|l| l.variable.0 >= variable_count)
            {
                return Err(SatError::UnregisteredVariable {
                    clause: index,
                    variable: literal.variable,
                    variable_count,
                });
            }
        }
        Ok(())
    }

    /// Evaluates the expression against a complete assignment.
    pub fn evaluate(&self, assignment: &[bool]) -> Result<bool, SatError> {
        let required = self.variable_bound();
        if assignment.len() < required {
            return Err(SatError::LengthMismatch {
                expected: required,
                actual: assignment.len(),
            });
        }
        Ok(self.clauses.iter().all(|c| c.is_satisfied(assignment)))
    }

    /// Evaluates the expression against a partial assignment.
    ///
    /// Returns `None` while the outcome still depends on unassigned variables.
    pub fn evaluate_partial(&self, assignment: &[Option<bool>]) -> Option<bool> {
        let mut undecided = false;
        for clause in &self.clauses {
            match clause.state(assignment) {
                ClauseState::Conflict => return Some(false),
                ClauseState::Satisfied => {}
                ClauseState::Unit(_) | ClauseState::Unresolved => undecided = true,
            }
        }
        if undecided {
            None
        } else {
            Some(true)
        }
    }

    /// One past the highest variable index referenced.
    pub fn variable_bound(&self) -> usize {
        self.clauses
            .iter()
            .flat_map(|c| c.literals())
            .map(|l| l.variable.0 + 1)
            .max()
            .unwrap_or(0)
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.clauses == other.clauses
    }
}

impl Eq for Expression {}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " ∧ ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
