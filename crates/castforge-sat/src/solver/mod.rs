//! Solver family.
//!
//! All solvers share the same vocabulary: a partial assignment is a
//! `Vec<Option<bool>>` indexed by variable, simplified by unit propagation
//! and (for the first-solution DPLL) pure-literal elimination, then split on
//! the lowest-numbered open variable, `true` first.

mod branch_and_bound;
mod brute_force;
mod dpll;
mod dpll_all;
mod dpll_theory;

pub use branch_and_bound::BranchAndBoundSolver;
pub use brute_force::BruteForceSolver;
pub use dpll::DpllSolver;
pub use dpll_all::DpllAllSolver;
pub use dpll_theory::DpllTheorySolver;

use crate::clause::{Clause, ClauseState};
use crate::error::SatError;
use crate::expression::Expression;
use crate::literal::Variable;
use crate::solution::Solution;

/// Search counters for one solver.
///
/// # Example
///
/// ```
/// use castforge_sat::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.record_node();
/// stats.record_conflict();
///
/// assert_eq!(stats.nodes_explored, 1);
/// assert_eq!(stats.conflicts, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Search nodes (partial assignments) visited.
    pub nodes_explored: u64,
    /// Values forced by unit propagation.
    pub propagations: u64,
    /// Values fixed by pure-literal elimination.
    pub pure_literals: u64,
    /// Branches abandoned on an empty clause.
    pub conflicts: u64,
    /// Branches abandoned by a bound or theory.
    pub pruned: u64,
    /// Solutions reported.
    pub solutions: u64,
}

impl SolverStats {
    pub fn record_node(&mut self) {
        self.nodes_explored += 1;
    }

    pub fn record_conflict(&mut self) {
        self.conflicts += 1;
    }

    pub fn record_prune(&mut self) {
        self.pruned += 1;
    }

    pub fn record_solution(&mut self) {
        self.solutions += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A SAT solver.
///
/// Every solver validates its input with [`Expression::check`] and reports
/// malformed input as an error. An unsatisfiable expression is `Ok(None)`.
pub trait Solver {
    /// Finds one satisfying (partial) assignment over `variable_count` variables.
    fn solve(
        &mut self,
        expression: &Expression,
        variable_count: usize,
    ) -> Result<Option<Solution>, SatError>;

    /// Finds every solution the solver enumerates.
    ///
    /// Solvers that stop at the first solution return at most one.
    fn solve_all(
        &mut self,
        expression: &Expression,
        variable_count: usize,
    ) -> Result<Vec<Solution>, SatError> {
        Ok(self.solve(expression, variable_count)?.into_iter().collect())
    }

    fn stats(&self) -> &SolverStats;

    fn solver_type_name(&self) -> &'static str;
}

/// Applies unit propagation until nothing changes.
///
/// Returns false on conflict.
pub(crate) fn propagate_units(
    clauses: &[Clause],
    assignment: &mut [Option<bool>],
    stats: &mut SolverStats,
) -> bool {
    loop {
        let mut changed = false;
        for clause in clauses {
            match clause.state(assignment) {
                ClauseState::Conflict => return false,
                ClauseState::Unit(literal) => {
                    assignment[literal.variable.0] = Some(literal.polarity);
                    stats.propagations += 1;
                    changed = true;
                }
                ClauseState::Satisfied | ClauseState::Unresolved => {}
            }
        }
        if !changed {
            return true;
        }
    }
}

/// Fixes every variable that appears with only one polarity among the
/// clauses not yet satisfied. Returns true if anything was assigned.
pub(crate) fn eliminate_pure_literals(
    clauses: &[Clause],
    assignment: &mut [Option<bool>],
    stats: &mut SolverStats,
) -> bool {
    // Bit 0: seen positive, bit 1: seen negative.
    let mut seen = vec![0u8; assignment.len()];
    for clause in clauses {
        if clause.state(assignment) == ClauseState::Satisfied {
            continue;
        }
        for literal in clause.literals() {
            if assignment[literal.variable.0].is_none() {
                seen[literal.variable.0] |= if literal.polarity { 1 } else { 2 };
            }
        }
    }
    let mut changed = false;
    for (index, flags) in seen.into_iter().enumerate() {
        let value = match flags {
            1 => true,
            2 => false,
            _ => continue,
        };
        assignment[index] = Some(value);
        stats.pure_literals += 1;
        changed = true;
    }
    changed
}

/// Lowest-numbered unassigned variable in a clause that is not yet satisfied.
pub(crate) fn open_variable(clauses: &[Clause], assignment: &[Option<bool>]) -> Option<Variable> {
    clauses
        .iter()
        .filter(|c| c.state(assignment) != ClauseState::Satisfied)
        .flat_map(|c| c.literals())
        .filter(|l| assignment[l.variable.0].is_none())
        .map(|l| l.variable)
        .min()
}

/// Lowest-numbered unassigned variable overall.
pub(crate) fn unassigned_variable(assignment: &[Option<bool>]) -> Option<Variable> {
    assignment.iter().position(Option::is_none).map(Variable)
}

/// Returns a copy of `assignment` with `variable` set to `value`.
pub(crate) fn branch(
    assignment: &[Option<bool>],
    variable: Variable,
    value: bool,
) -> Vec<Option<bool>> {
    let mut next = assignment.to_vec();
    next[variable.0] = Some(value);
    next
}
