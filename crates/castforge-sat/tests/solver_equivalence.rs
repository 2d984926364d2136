//! Solvers checked against exhaustive enumeration on random expressions.

use castforge_sat::{
    BranchAndBoundSolver, BruteForceSolver, DpllAllSolver, DpllSolver, Solution, Solver,
};
use castforge_test::random_expression;

#[test]
fn test_dpll_solutions_hold_for_both_completions() {
    for seed in 0..40 {
        let expression = random_expression(seed, 10, 30, 3);
        let dpll = DpllSolver::new().solve(&expression, 10).unwrap();
        let brute = BruteForceSolver::new().solve(&expression, 10).unwrap();
        assert_eq!(dpll.is_some(), brute.is_some(), "seed {seed}");

        for solution in dpll.iter().chain(brute.iter()) {
            assert!(expression.evaluate(&solution.fill(true)).unwrap(), "seed {seed}");
            assert!(expression.evaluate(&solution.fill(false)).unwrap(), "seed {seed}");
        }
    }
}

#[test]
fn test_dpll_all_matches_brute_force_count() {
    for seed in 0..25 {
        let expression = random_expression(seed, 8, 14, 3);
        let brute = BruteForceSolver::new().solve_all(&expression, 8).unwrap();
        let all = DpllAllSolver::new().solve_all(&expression, 8).unwrap();

        let dpll_count: u128 = all.iter().map(Solution::full_assignment_count).sum();
        assert_eq!(dpll_count, brute.len() as u128, "seed {seed}");

        for solution in &all {
            for values in solution.expand() {
                assert!(expression.evaluate(&values).unwrap(), "seed {seed}");
            }
        }
    }
}

#[test]
fn test_branch_and_bound_finds_minimum() {
    let weights = [5u32, 3, 8, 1, 4, 7];
    for seed in 0..15 {
        let expression = random_expression(seed, 6, 10, 2);

        let best_brute = BruteForceSolver::new()
            .solve_all(&expression, 6)
            .unwrap()
            .iter()
            .map(|s| {
                s.fill(false)
                    .iter()
                    .zip(weights)
                    .filter(|(v, _)| **v)
                    .map(|(_, w)| w)
                    .sum::<u32>()
            })
            .min();

        // Weight of values already true; free values can still be false.
        let cost = |values: &[Option<bool>]| -> u32 {
            values
                .iter()
                .zip(weights)
                .filter(|(v, _)| **v == Some(true))
                .map(|(_, w)| w)
                .sum()
        };
        let mut solver = BranchAndBoundSolver::new(cost);
        let solution = solver.solve(&expression, 6).unwrap();

        assert_eq!(solver.best_cost().copied(), best_brute, "seed {seed}");
        if let Some(solution) = solution {
            assert!(solution.is_complete());
            assert!(expression.evaluate(&solution.fill(false)).unwrap());
        }
    }
}

