//! Classic DPLL search.

use tracing::trace;

use super::{
    branch, eliminate_pure_literals, open_variable, propagate_units, Solver, SolverStats,
};
use crate::clause::Clause;
use crate::error::SatError;
use crate::expression::Expression;
use crate::solution::Solution;

/// Davis–Putnam–Logemann–Loveland search for a single solution.
///
/// Each node runs unit propagation and pure-literal elimination to a fixed
/// point, then branches on the lowest open variable, trying `true` first
/// and backtracking on conflict. Variables that no remaining clause depends
/// on are left unassigned in the returned solution.
///
/// # Example
///
/// ```
/// use castforge_sat::{Clause, DpllSolver, Expression, Solver, Variable};
///
/// let (a, b) = (Variable(0), Variable(1));
/// let expression = Expression::from_clauses([
///     Clause::new([a.positive(), b.positive()]),
///     Clause::new([a.negative(), b.negative()]),
///     Clause::unit(a.negative()),
/// ]);
///
/// let solution = DpllSolver::new().solve(&expression, 2).unwrap().unwrap();
/// assert_eq!(solution.get(a), Some(false));
/// assert_eq!(solution.get(b), Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DpllSolver {
    stats: SolverStats,
}

impl DpllSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn search(
        &mut self,
        clauses: &[Clause],
        mut assignment: Vec<Option<bool>>,
    ) -> Option<Vec<Option<bool>>> {
        self.stats.record_node();
        loop {
            if !propagate_units(clauses, &mut assignment, &mut self.stats) {
                self.stats.record_conflict();
                return None;
            }
            if !eliminate_pure_literals(clauses, &mut assignment, &mut self.stats) {
                break;
            }
        }

        let Some(variable) = open_variable(clauses, &assignment) else {
            return Some(assignment);
        };
        for value in [true, false] {
            trace!(event = "branch", variable = variable.0, value);
            if let Some(found) = self.search(clauses, branch(&assignment, variable, value)) {
                return Some(found);
            }
        }
        None
    }
}

impl Solver for DpllSolver {
    fn solve(
        &mut self,
        expression: &Expression,
        variable_count: usize,
    ) -> Result<Option<Solution>, SatError> {
        expression.check(variable_count)?;
        self.stats.reset();
        let found = self.search(expression.clauses(), vec![None; variable_count]);
        if found.is_some() {
            self.stats.record_solution();
        }
        Ok(found.map(Solution::new))
    }

    fn stats(&self) -> &SolverStats {
        &self.stats
    }

    fn solver_type_name(&self) -> &'static str {
        "Dpll"
    }
}
