//! Tests for the SAT core.

use crate::*;

fn vars(n: usize) -> Vec<Variable> {
    (0..n).map(Variable).collect()
}

// ============================================================================
// Check
// ============================================================================

#[test]
fn test_check_rejects_empty_expression() {
    assert_eq!(Expression::new().check(3), Err(SatError::EmptyExpression));
}

#[test]
fn test_check_rejects_empty_clause() {
    let expression = Expression::from_clauses([Clause::new([])]);
    assert_eq!(expression.check(1), Err(SatError::EmptyClause { clause: 0 }));
}

#[test]
fn test_check_rejects_duplicate_clause() {
    let v = vars(2);
    let expression = Expression::from_clauses([
        Clause::new([v[0].positive(), v[1].negative()]),
        Clause::new([v[1].negative(), v[0].positive()]),
    ]);
    assert_eq!(
        expression.check(2),
        Err(SatError::DuplicateClause {
            clause: 1,
            original: 0
        })
    );
}

#[test]
fn test_insert_ignores_duplicate_clause() {
    let v = vars(2);
    let mut expression = Expression::new();
    assert!(expression.insert(Clause::new([v[0].positive(), v[1].positive()])));
    assert!(!expression.insert(Clause::new([v[1].positive(), v[0].positive()])));
    assert_eq!(expression.len(), 1);
}

#[test]
fn test_check_rejects_duplicate_literal() {
    let v = vars(1);
    let expression = Expression::from_clauses([Clause::new([v[0].positive(), v[0].positive()])]);
    assert_eq!(
        expression.check(1),
        Err(SatError::DuplicateLiteral {
            clause: 0,
            literal: v[0].positive()
        })
    );
}

#[test]
fn test_check_rejects_contradictory_literals() {
    let v = vars(2);
    let expression = Expression::from_clauses([Clause::new([
        v[1].positive(),
        v[0].negative(),
        v[0].positive(),
    ])]);
    assert_eq!(
        expression.check(2),
        Err(SatError::ContradictoryLiteral {
            clause: 0,
            variable: v[0]
        })
    );
}

#[test]
fn test_check_rejects_unregistered_variable() {
    let expression = Expression::from_clauses([Clause::unit(Variable(5).positive())]);
    assert!(matches!(
        expression.check(3),
        Err(SatError::UnregisteredVariable { variable: Variable(5), .. })
    ));
}

#[test]
fn test_evaluate_rejects_short_assignment() {
    let expression = Expression::from_clauses([Clause::unit(Variable(2).positive())]);
    assert_eq!(
        expression.evaluate(&[true]),
        Err(SatError::LengthMismatch {
            expected: 3,
            actual: 1
        })
    );
}

// ============================================================================
// Clauses and partial evaluation
// ============================================================================

#[test]
fn test_clause_state() {
    let v = vars(3);
    let clause = Clause::new([v[0].positive(), v[1].negative(), v[2].positive()]);

    assert_eq!(clause.state(&[None, None, None]), ClauseState::Unresolved);
    assert_eq!(
        clause.state(&[Some(false), Some(true), None]),
        ClauseState::Unit(v[2].positive())
    );
    assert_eq!(
        clause.state(&[Some(false), Some(true), Some(false)]),
        ClauseState::Conflict
    );
    assert_eq!(
        clause.state(&[None, Some(false), None]),
        ClauseState::Satisfied
    );
}

#[test]
fn test_evaluate_partial() {
    let v = vars(2);
    let expression = Expression::from_clauses([
        Clause::new([v[0].positive(), v[1].positive()]),
        Clause::unit(v[0].negative()),
    ]);
    assert_eq!(expression.evaluate_partial(&[None, None]), None);
    assert_eq!(expression.evaluate_partial(&[Some(true), None]), Some(false));
    assert_eq!(expression.evaluate_partial(&[Some(false), Some(true)]), Some(true));
}

#[test]
fn test_variable_set_and_assignments() {
    let mut variables = VariableSet::new();
    let alice = variables.register("alice");
    let bob = variables.register("bob");
    assert_eq!(variables.register("alice"), alice);
    assert_eq!(variables.len(), 2);
    assert_eq!(variables.literal(&"bob", false), Some(bob.negative()));
    assert_eq!(variables.literal(&"carol", true), None);

    let solution = Solution::new(vec![Some(true), None]);
    let assignments: Vec<_> = solution.assignments(&variables).collect();
    assert_eq!(
        assignments,
        vec![
            Assignment {
                variable: &"alice",
                value: Some(true)
            },
            Assignment {
                variable: &"bob",
                value: None
            },
        ]
    );
}

#[test]
fn test_solution_expansion() {
    let solution = Solution::new(vec![None, Some(true), None]);
    assert_eq!(solution.full_assignment_count(), 4);
    let expanded = solution.expand();
    assert_eq!(expanded.len(), 4);
    assert!(expanded.iter().all(|values| values[1]));
    assert_eq!(solution.fill(false), vec![false, true, false]);
}

// ============================================================================
// Expression builder
// ============================================================================

#[test]
fn test_builder_equality_two_inputs() {
    let v = vars(2);
    let mut builder = ExpressionBuilder::new(|inputs: &[bool]| inputs[0] == inputs[1]);
    let clauses = builder.build(&v).unwrap();
    assert_eq!(
        clauses,
        vec![
            Clause::new([v[0].negative(), v[1].positive()]),
            Clause::new([v[0].positive(), v[1].negative()]),
        ]
    );
}

#[test]
fn test_builder_even_split_two_inputs() {
    let v = vars(2);
    let mut builder = ExpressionBuilder::keep_separate();
    let clauses = builder.build(&v).unwrap();
    assert_eq!(
        clauses,
        vec![
            Clause::new([v[0].positive(), v[1].positive()]),
            Clause::new([v[0].negative(), v[1].negative()]),
        ]
    );
}

#[test]
fn test_builder_keep_together_three_inputs() {
    let v = vars(3);
    let mut builder = ExpressionBuilder::keep_together();
    let clauses = builder.build(&v).unwrap();
    // Rows 1..=6 (every mixed combination) are forbidden.
    let expected: Vec<Clause> = (1..7usize)
        .map(|row| {
            Clause::new(
                (0..3).map(|i| Literal::new(v[i], row >> i & 1 == 0)),
            )
        })
        .collect();
    assert_eq!(clauses, expected);
    assert_eq!(
        clauses[0],
        Clause::new([v[0].negative(), v[1].positive(), v[2].positive()])
    );
}

#[test]
fn test_builder_even_split_three_inputs_is_unsatisfiable() {
    let v = vars(3);
    let mut builder = ExpressionBuilder::keep_separate();
    let clauses = builder.build(&v).unwrap();
    assert_eq!(clauses.len(), 8);

    let expression = Expression::from_clauses(clauses);
    assert_eq!(DpllSolver::new().solve(&expression, 3).unwrap(), None);
}

#[test]
fn test_builder_caches_per_size() {
    let v = vars(4);
    let mut builder = ExpressionBuilder::keep_separate();
    builder.build(&v[..2]).unwrap();
    builder.build(&v[2..]).unwrap();
    assert_eq!(builder.cached_sizes(), 1);
    builder.build(&v).unwrap();
    assert_eq!(builder.cached_sizes(), 2);
}

#[test]
fn test_builder_rejects_large_inputs() {
    let v = vars(builder::MAX_INPUTS + 1);
    let mut builder = ExpressionBuilder::keep_together();
    assert!(matches!(
        builder.build(&v),
        Err(SatError::TooManyVariables { .. })
    ));
}

// ============================================================================
// Solvers
// ============================================================================

#[test]
fn test_unsatisfiable_is_none() {
    let v = vars(1);
    let expression = Expression::from_clauses([
        Clause::unit(v[0].positive()),
        Clause::unit(v[0].negative()),
    ]);
    assert_eq!(DpllSolver::new().solve(&expression, 1).unwrap(), None);
    assert_eq!(BruteForceSolver::new().solve(&expression, 1).unwrap(), None);
    assert!(DpllAllSolver::new().solve_all(&expression, 1).unwrap().is_empty());
}

#[test]
fn test_solvers_reject_malformed_input() {
    let expression = Expression::from_clauses([Clause::unit(Variable(4).positive())]);
    assert!(DpllSolver::new().solve(&expression, 2).is_err());
    assert!(BruteForceSolver::new().solve(&expression, 2).is_err());
}

#[test]
fn test_brute_force_variable_limit() {
    let expression = Expression::from_clauses([Clause::unit(Variable(0).positive())]);
    assert!(matches!(
        BruteForceSolver::new().solve(&expression, 30),
        Err(SatError::TooManyVariables { count: 30, .. })
    ));
}

#[test]
fn test_theory_prunes_satisfiable_branches() {
    let v = vars(4);
    // Without the theory the first solution found would be all true.
    let expression = Expression::from_clauses([
        Clause::new([v[0].positive(), v[1].positive()]),
        Clause::new([v[2].positive(), v[3].positive()]),
    ]);
    let balanced = |values: &[Option<bool>]| {
        let trues = values.iter().filter(|v| **v == Some(true)).count();
        let falses = values.iter().filter(|v| **v == Some(false)).count();
        if trues > 2 || falses > 2 {
            Some(false)
        } else if trues + falses == values.len() {
            Some(true)
        } else {
            None
        }
    };
    let mut solver = DpllTheorySolver::new(balanced);
    let solution = solver.solve(&expression, 4).unwrap().unwrap();

    assert!(solution.is_complete());
    assert_eq!(solution.values().iter().filter(|v| **v == Some(true)).count(), 2);
    assert!(expression.evaluate(&solution.fill(false)).unwrap());
    assert!(solver.stats().pruned > 0);
}

#[test]
fn test_theory_can_make_expression_unsolvable() {
    let v = vars(2);
    let expression = Expression::from_clauses([
        Clause::unit(v[0].positive()),
        Clause::unit(v[1].positive()),
    ]);
    let never_both = |values: &[Option<bool>]| {
        (values == [Some(true), Some(true)]).then_some(false)
    };
    assert_eq!(DpllTheorySolver::new(never_both).solve(&expression, 2).unwrap(), None);
}

#[test]
fn test_dpll_leaves_irrelevant_variables_free() {
    let v = vars(3);
    let expression = Expression::from_clauses([Clause::unit(v[0].positive())]);
    let solution = DpllSolver::new().solve(&expression, 3).unwrap().unwrap();
    assert_eq!(solution.get(v[0]), Some(true));
    assert_eq!(solution.unassigned_count(), 2);
}
