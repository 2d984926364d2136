//! DPLL enumerating every solution.

use super::{branch, open_variable, propagate_units, Solver, SolverStats};
use crate::clause::Clause;
use crate::error::SatError;
use crate::expression::Expression;
use crate::solution::Solution;

/// DPLL search that keeps going after the first solution.
///
/// Both branches are explored at every split, so the returned partial
/// solutions cover disjoint parts of the assignment space and together
/// cover every satisfying complete assignment. Pure-literal elimination
/// is not applied because it discards solutions.
#[derive(Debug, Clone, Default)]
pub struct DpllAllSolver {
    stats: SolverStats,
}

impl DpllAllSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn search(
        &mut self,
        clauses: &[Clause],
        mut assignment: Vec<Option<bool>>,
        solutions: &mut Vec<Solution>,
    ) {
        self.stats.record_node();
        if !propagate_units(clauses, &mut assignment, &mut self.stats) {
            self.stats.record_conflict();
            return;
        }
        match open_variable(clauses, &assignment) {
            None => {
                self.stats.record_solution();
                solutions.push(Solution::new(assignment));
            }
            Some(variable) => {
                for value in [true, false] {
                    self.search(clauses, branch(&assignment, variable, value), solutions);
                }
            }
        }
    }
}

impl Solver for DpllAllSolver {
    fn solve(
        &mut self,
        expression: &Expression,
        variable_count: usize,
    ) -> Result<Option<Solution>, SatError> {
        Ok(self.solve_all(expression, variable_count)?.into_iter().next())
    }

    fn solve_all(
        &mut self,
        expression: &Expression,
        variable_count: usize,
    ) -> Result<Vec<Solution>, SatError> {
        expression.check(variable_count)?;
        self.stats.reset();
        let mut solutions = Vec::new();
        self.search(
            expression.clauses(),
            vec![None; variable_count],
            &mut solutions,
        );
        Ok(solutions)
    }

    fn stats(&self) -> &SolverStats {
        &self.stats
    }

    fn solver_type_name(&self) -> &'static str {
        "DpllAll"
    }
}
