//! CastForge SAT - Boolean satisfiability for cast balancing
//!
//! This crate provides a small, self-contained SAT toolkit:
//! - `Variable`, `Literal`, `Clause`, `Expression`: conjunctive normal form
//! - `VariableSet`: maps caller values (such as applicants) to variables
//! - `Solution`, `Assignment`: partial assignments returned by solvers
//! - `ExpressionBuilder`: compiles a boolean predicate into CNF by truth table
//! - Solvers: brute force, DPLL, all-solutions DPLL, branch-and-bound and
//!   DPLL with an external theory predicate

pub mod builder;
pub mod clause;
pub mod error;
pub mod expression;
pub mod literal;
pub mod solution;
pub mod solver;
pub mod variables;

#[cfg(test)]
mod tests;

pub use builder::ExpressionBuilder;
pub use clause::{Clause, ClauseState};
pub use error::SatError;
pub use expression::Expression;
pub use literal::{Literal, Variable};
pub use solution::{Assignment, Solution};
pub use solver::{
    BranchAndBoundSolver, BruteForceSolver, DpllAllSolver, DpllSolver, DpllTheorySolver, Solver,
    SolverStats,
};
pub use variables::VariableSet;
