//! Clauses: disjunctions of literals.

use std::fmt;

use smallvec::SmallVec;

use crate::literal::Literal;

/// State of a clause under a partial assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseState {
    /// At least one literal is true.
    Satisfied,
    /// Every literal is false.
    Conflict,
    /// Exactly one literal is unassigned and the rest are false.
    Unit(Literal),
    /// Two or more literals are unassigned and none is true.
    Unresolved,
}

/// A disjunction of literals.
///
/// Literals are kept sorted, so two clauses over the same literals compare
/// equal regardless of construction order. Duplicates are kept so that
/// [`Expression::check`](crate::Expression::check) can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clause {
    literals: SmallVec<[Literal; 4]>,
}

impl Clause {
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: SmallVec<[Literal; 4]> = literals.into_iter().collect();
        literals.sort_unstable();
        Self { literals }
    }

    /// A clause forcing a single literal.
    pub fn unit(literal: Literal) -> Self {
        Self::new([literal])
    }

    #[inline]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Evaluates the clause against a complete assignment.
    pub fn is_satisfied(&self, assignment: &[bool]) -> bool {
        self.literals
            .iter()
            .any(|l| assignment[l.variable.0] == l.polarity)
    }

    /// Classifies the clause under a partial assignment.
    pub fn state(&self, assignment: &[Option<bool>]) -> ClauseState {
        let mut unassigned = None;
        let mut unassigned_count = 0;
        for &literal in &self.literals {
            match literal.value(assignment) {
                Some(true) => return ClauseState::Satisfied,
                Some(false) => {}
                None => {
                    unassigned_count += 1;
                    unassigned = Some(literal);
                }
            }
        }
        match (unassigned_count, unassigned) {
            (0, _) => ClauseState::Conflict,
            (1, Some(literal)) => ClauseState::Unit(literal),
            _ => ClauseState::Unresolved,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{literal}")?;
        }
        write!(f, ")")
    }
}
