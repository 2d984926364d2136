//! Seedable random CNF expressions.

use castforge_sat::{Clause, Expression, Literal, Variable};
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generates a well-formed expression of up to `clauses` distinct clauses.
///
/// Each clause holds `width` distinct variables (capped at `variables`)
/// with random polarities, so the result always passes
/// [`Expression::check`]. Duplicate draws are skipped, so the expression
/// may hold fewer clauses than requested.
///
/// # Example
///
/// ```
/// use castforge_test::random_expression;
///
/// let expression = random_expression(7, 5, 10, 3);
/// assert!(expression.check(5).is_ok());
/// assert_eq!(expression, random_expression(7, 5, 10, 3));
/// ```
pub fn random_expression(seed: u64, variables: usize, clauses: usize, width: usize) -> Expression {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let width = width.clamp(1, variables.max(1));
    let mut expression = Expression::new();
    for _ in 0..clauses {
        let literals: Vec<Literal> = sample(&mut rng, variables, width)
            .into_iter()
            .map(|index| Literal::new(Variable(index), rng.random_bool(0.5)))
            .collect();
        expression.insert(Clause::new(literals));
    }
    expression
}
