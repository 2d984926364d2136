//! DPLL search minimising a cost function.

use std::fmt;

use super::{branch, propagate_units, unassigned_variable, Solver, SolverStats};
use crate::clause::Clause;
use crate::error::SatError;
use crate::expression::Expression;
use crate::solution::Solution;

/// Finds the satisfying complete assignment with the lowest cost.
///
/// The cost function is evaluated on partial assignments too, where it must
/// return a lower bound on the cost of any completion: a branch is pruned
/// as soon as its bound is not strictly better than the best complete
/// solution found so far. On complete assignments it returns the exact cost.
///
/// # Example
///
/// ```
/// use castforge_sat::{BranchAndBoundSolver, Clause, Expression, Solver, Variable};
///
/// let (a, b) = (Variable(0), Variable(1));
/// let expression = Expression::from_clauses([Clause::new([a.positive(), b.positive()])]);
///
/// // Count of true values; unassigned values can still be false.
/// let cost = |values: &[Option<bool>]| values.iter().filter(|v| **v == Some(true)).count();
/// let mut solver = BranchAndBoundSolver::new(cost);
/// let best = solver.solve(&expression, 2).unwrap().unwrap();
///
/// assert_eq!(best.values().iter().filter(|v| **v == Some(true)).count(), 1);
/// assert_eq!(solver.best_cost(), Some(&1));
/// ```
pub struct BranchAndBoundSolver<C, F> {
    cost: F,
    best: Option<(C, Vec<Option<bool>>)>,
    stats: SolverStats,
}

impl<C: fmt::Debug, F> fmt::Debug for BranchAndBoundSolver<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BranchAndBoundSolver")
            .field("best_cost", &self.best.as_ref().map(|(c, _)| c))
            .field("stats", &self.stats)
            .finish()
    }
}

impl<C, F> BranchAndBoundSolver<C, F>
where
    C: PartialOrd,
    F: FnMut(&[Option<bool>]) -> C,
{
    pub fn new(cost: F) -> Self {
        Self {
            cost,
            best: None,
            stats: SolverStats::default(),
        }
    }

    /// Cost of the best solution from the last solve.
    pub fn best_cost(&self) -> Option<&C> {
        self.best.as_ref().map(|(cost, _)| cost)
    }

    fn search(&mut self, clauses: &[Clause], mut assignment: Vec<Option<bool>>) {
        self.stats.record_node();
        if !propagate_units(clauses, &mut assignment, &mut self.stats) {
            self.stats.record_conflict();
            return;
        }
        let bound = (self.cost)(&assignment);
        if let Some((best, _)) = &self.best {
            if !(bound < *best) {
                self.stats.record_prune();
                return;
            }
        }
        match unassigned_variable(&assignment) {
            // Complete and conflict free, so every clause holds.
            None => {
                self.stats.record_solution();
                self.best = Some((bound, assignment));
            }
            Some(variable) => {
                for value in [true, false] {
                    self.search(clauses, branch(&assignment, variable, value));
                }
            }
        }
    }
}

impl<C, F> Solver for BranchAndBoundSolver<C, F>
where
    C: PartialOrd,
    F: FnMut(&[Option<bool>]) -> C,
{
    fn solve(
        &mut self,
        expression: &Expression,
        variable_count: usize,
    ) -> Result<Option<Solution>, SatError> {
        expression.check(variable_count)?;
        self.stats.reset();
        self.best = None;
        self.search(expression.clauses(), vec![None; variable_count]);
        Ok(self
            .best
            .as_ref()
            .map(|(_, assignment)| Solution::new(assignment.clone())))
    }

    fn stats(&self) -> &SolverStats {
        &self.stats
    }

    fn solver_type_name(&self) -> &'static str {
        "BranchAndBound"
    }
}
