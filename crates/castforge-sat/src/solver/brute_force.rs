//! Exhaustive enumeration of complete assignments.

use super::{Solver, SolverStats};
use crate::error::SatError;
use crate::expression::Expression;
use crate::solution::Solution;

/// Largest variable count the brute force solver accepts.
pub const MAX_VARIABLES: usize = 24;

/// Tries all 2^n complete assignments in counting order.
///
/// Exponential; meant for checking the other solvers on small inputs.
#[derive(Debug, Clone, Default)]
pub struct BruteForceSolver {
    stats: SolverStats,
}

impl BruteForceSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn enumerate(
        &mut self,
        expression: &Expression,
        variable_count: usize,
        first_only: bool,
    ) -> Result<Vec<Solution>, SatError> {
        expression.check(variable_count)?;
        if variable_count > MAX_VARIABLES {
            return Err(SatError::TooManyVariables {
                count: variable_count,
                limit: MAX_VARIABLES,
            });
        }
        self.stats.reset();
        let mut solutions = Vec::new();
        let mut values = vec![false; variable_count];
        for bits in 0..1u64 << variable_count {
            self.stats.record_node();
            for (i, value) in values.iter_mut().enumerate() {
                *value = bits >> i & 1 == 1;
            }
            if expression.evaluate(&values)? {
                self.stats.record_solution();
                solutions.push(Solution::complete(&values));
                if first_only {
                    break;
                }
            }
        }
        Ok(solutions)
    }
}

impl Solver for BruteForceSolver {
    fn solve(
        &mut self,
        expression: &Expression,
        variable_count: usize,
    ) -> Result<Option<Solution>, SatError> {
        Ok(self
            .enumerate(expression, variable_count, true)?
            .into_iter()
            .next())
    }

    fn solve_all(
        &mut self,
        expression: &Expression,
        variable_count: usize,
    ) -> Result<Vec<Solution>, SatError> {
        self.enumerate(expression, variable_count, false)
    }

    fn stats(&self) -> &SolverStats {
        &self.stats
    }

    fn solver_type_name(&self) -> &'static str {
        "BruteForce"
    }
}
