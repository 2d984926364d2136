//! Truth-table compilation of boolean predicates into CNF.

use std::collections::HashMap;
use std::fmt;

use crate::clause::Clause;
use crate::error::SatError;
use crate::literal::{Literal, Variable};

/// Largest input count the builder will enumerate (2^n rows).
pub const MAX_INPUTS: usize = 16;

/// Compiles an arbitrary predicate over N boolean inputs into clauses.
///
/// The 2^N rows of the truth table are enumerated and every row for which
/// the predicate is false becomes one clause forbidding exactly that
/// combination. Row patterns are cached per input count, so building the
/// same constraint over many variable groups costs one enumeration.
///
/// Row `r` assigns input `i` the value of bit `i` of `r`.
///
/// # Example
///
/// ```
/// use castforge_sat::{Clause, ExpressionBuilder, Variable};
///
/// let (a, b) = (Variable(0), Variable(1));
/// let mut builder = ExpressionBuilder::keep_together();
/// let clauses = builder.build(&[a, b]).unwrap();
///
/// assert_eq!(clauses, vec![
///     Clause::new([a.negative(), b.positive()]),
///     Clause::new([a.positive(), b.negative()]),
/// ]);
/// ```
pub struct ExpressionBuilder<F> {
    predicate: F,
    false_rows: HashMap<usize, Vec<Vec<bool>>>,
}

impl<F> fmt::Debug for ExpressionBuilder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionBuilder")
            .field("cached_sizes", &self.false_rows.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ExpressionBuilder<fn(&[bool]) -> bool> {
    /// Builder for "all inputs share one value".
    pub fn keep_together() -> Self {
        fn all_equal(inputs: &[bool]) -> bool {
            inputs.windows(2).all(|w| w[0] == w[1])
        }
        Self::new(all_equal)
    }

    /// Builder for "exactly half the inputs are true".
    pub fn keep_separate() -> Self {
        fn evenly_split(inputs: &[bool]) -> bool {
            let trues = inputs.iter().filter(|&&v| v).count();
            trues * 2 == inputs.len()
        }
        Self::new(evenly_split)
    }
}

impl<F: Fn(&[bool]) -> bool> ExpressionBuilder<F> {
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            false_rows: HashMap::new(),
        }
    }

    /// Emits the clauses constraining `variables` to satisfy the predicate.
    ///
    /// A predicate that is true on every row yields no clauses.
    pub fn build(&mut self, variables: &[Variable]) -> Result<Vec<Clause>, SatError> {
        let rows = self.false_rows(variables.len())?;
        Ok(rows
            .iter()
            .map(|row| {
                Clause::new(
                    variables
                        .iter()
                        .zip(row)
                        .map(|(&variable, &value)| Literal::new(variable, !value)),
                )
            })
            .collect())
    }

    fn false_rows(&mut self, inputs: usize) -> Result<&Vec<Vec<bool>>, SatError> {
        if inputs > MAX_INPUTS {
            return Err(SatError::TooManyVariables {
                count: inputs,
                limit: MAX_INPUTS,
            });
        }
        let predicate = &self.predicate;
        Ok(self.false_rows.entry(inputs).or_insert_with(|| {
            (0..1usize << inputs)
                .map(|row| (0..inputs).map(|i| row >> i & 1 == 1).collect::<Vec<_>>())
                .filter(|values| !predicate(values))
                .collect()
        }))
    }

    /// Number of input sizes enumerated so far.
    pub fn cached_sizes(&self) -> usize {
        self.false_rows.len()
    }
}
