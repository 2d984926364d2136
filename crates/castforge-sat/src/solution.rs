//! Solver output.

use crate::literal::Variable;
use crate::variables::VariableSet;

/// A variable of the caller's type with its resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<T> {
    pub variable: T,
    /// `None` when the solver left the variable free.
    pub value: Option<bool>,
}

/// A satisfying partial assignment.
///
/// Unassigned variables may take either value without breaking the
/// expression the solution was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    assignments: Vec<Option<bool>>,
}

impl Solution {
    pub fn new(assignments: Vec<Option<bool>>) -> Self {
        Self { assignments }
    }

    /// A solution with every variable fixed.
    pub fn complete(values: &[bool]) -> Self {
        Self {
            assignments: values.iter().map(|&v| Some(v)).collect(),
        }
    }

    #[inline]
    pub fn get(&self, variable: Variable) -> Option<bool> {
        self.assignments.get(variable.0).copied().flatten()
    }

    #[inline]
    pub fn values(&self) -> &[Option<bool>] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of variables the solver left free.
    pub fn unassigned_count(&self) -> usize {
        self.assignments.iter().filter(|v| v.is_none()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.assignments.iter().all(Option::is_some)
    }

    /// Completes the solution by giving every free variable `value`.
    pub fn fill(&self, value: bool) -> Vec<bool> {
        self.assignments.iter().map(|v| v.unwrap_or(value)).collect()
    }

    /// Number of complete assignments this partial solution stands for.
    pub fn full_assignment_count(&self) -> u128 {
        1u128 << self.unassigned_count()
    }

    /// Every complete assignment covered by this partial solution.
    pub fn expand(&self) -> Vec<Vec<bool>> {
        let free: Vec<usize> = self
            .assignments
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| i)
            .collect();
        let base = self.fill(false);
        (0..1u64 << free.len())
            .map(|bits| {
                let mut values = base.clone();
                for (bit, &index) in free.iter().enumerate() {
                    values[index] = bits >> bit & 1 == 1;
                }
                values
            })
            .collect()
    }

    /// Pairs each registered value with its assignment.
    pub fn assignments<'a, T>(
        &'a self,
        variables: &'a VariableSet<T>,
    ) -> impl Iterator<Item = Assignment<&'a T>> + 'a
    where
        T: Eq + std::hash::Hash + Clone,
    {
        variables.iter().map(move |(variable, value)| Assignment {
            variable: value,
            value: self.get(variable),
        })
    }
}
