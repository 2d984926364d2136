//! Variables and literals.

use std::fmt;
use std::ops::Not;

/// A boolean variable, identified by its index in the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(pub usize);

impl Variable {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// The literal asserting this variable is true.
    #[inline]
    pub fn positive(self) -> Literal {
        Literal::new(self, true)
    }

    /// The literal asserting this variable is false.
    #[inline]
    pub fn negative(self) -> Literal {
        Literal::new(self, false)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable with a polarity.
///
/// A literal is satisfied when its variable is assigned its polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub variable: Variable,
    pub polarity: bool,
}

impl Literal {
    #[inline]
    pub fn new(variable: Variable, polarity: bool) -> Self {
        Self { variable, polarity }
    }

    /// Evaluates the literal against a partial assignment.
    #[inline]
    pub fn value(self, assignment: &[Option<bool>]) -> Option<bool> {
        assignment[self.variable.0].map(|v| v == self.polarity)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal::new(self.variable, !self.polarity)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.polarity {
            write!(f, "{}", self.variable)
        } else {
            write!(f, "¬{}", self.variable)
        }
    }
}
