//! DPLL search with an external theory predicate.

use std::fmt;

use super::{branch, open_variable, propagate_units, unassigned_variable, Solver, SolverStats};
use crate::clause::Clause;
use crate::error::SatError;
use crate::expression::Expression;
use crate::solution::Solution;

/// DPLL search that also consults a three-valued theory.
///
/// The theory sees every partial assignment after propagation and returns
/// `Some(false)` to reject the branch, `Some(true)` to accept it, or `None`
/// while it cannot yet decide. A branch is pruned on `Some(false)` even if
/// the clauses are still satisfiable. When the clauses are satisfied but the
/// theory is undecided, search continues on the remaining free variables;
/// an undecided verdict on a complete assignment counts as acceptance.
///
/// Pure-literal elimination is not applied, since a value the clauses are
/// indifferent to can still matter to the theory.
///
/// # Example
///
/// ```
/// use castforge_sat::{Clause, DpllTheorySolver, Expression, Solver, Variable};
///
/// let vars: Vec<_> = (0..4).map(Variable).collect();
/// // At least one of the first two is true.
/// let expression =
///     Expression::from_clauses([Clause::new([vars[0].positive(), vars[1].positive()])]);
///
/// // Exactly two of the four are true.
/// let theory = |values: &[Option<bool>]| {
///     let trues = values.iter().filter(|v| **v == Some(true)).count();
///     let falses = values.iter().filter(|v| **v == Some(false)).count();
///     if trues > 2 || falses > 2 { Some(false) }
///     else if trues == 2 && falses == 2 { Some(true) }
///     else { None }
/// };
/// let solution = DpllTheorySolver::new(theory).solve(&expression, 4).unwrap().unwrap();
/// assert_eq!(solution.values().iter().filter(|v| **v == Some(true)).count(), 2);
/// ```
pub struct DpllTheorySolver<F> {
    theory: F,
    stats: SolverStats,
}

impl<F> fmt::Debug for DpllTheorySolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DpllTheorySolver")
            .field("stats", &self.stats)
            .finish()
    }
}

impl<F> DpllTheorySolver<F>
where
    F: FnMut(&[Option<bool>]) -> Option<bool>,
{
    pub fn new(theory: F) -> Self {
        Self {
            theory,
            stats: SolverStats::default(),
        }
    }

    fn search(
        &mut self,
        clauses: &[Clause],
        mut assignment: Vec<Option<bool>>,
    ) -> Option<Vec<Option<bool>>> {
        self.stats.record_node();
        if !propagate_units(clauses, &mut assignment, &mut self.stats) {
            self.stats.record_conflict();
            return None;
        }
        let verdict = (self.theory)(&assignment);
        if verdict == Some(false) {
            self.stats.record_prune();
            return None;
        }

        let variable = match open_variable(clauses, &assignment) {
            Some(variable) => variable,
            None if verdict == Some(true) => return Some(assignment),
            None => match unassigned_variable(&assignment) {
                Some(variable) => variable,
                None => return Some(assignment),
            },
        };
        for value in [true, false] {
            if let Some(found) = self.search(clauses, branch(&assignment, variable, value)) {
                return Some(found);
            }
        }
        None
    }
}

impl<F> Solver for DpllTheorySolver<F>
where
    F: FnMut(&[Option<bool>]) -> Option<bool>,
{
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
        "DpllTheory"
    }
}
