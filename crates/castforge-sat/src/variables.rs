//! Mapping between caller values and solver variables.

use std::collections::HashMap;
use std::hash::Hash;

use crate::literal::{Literal, Variable};

/// Registers caller values (applicants, indices, ...) as solver variables.
///
/// Variables are numbered in registration order, which is also the order
/// the solvers branch in.
#[derive(Debug, Clone)]
pub struct VariableSet<T> {
    values: Vec<T>,
    lookup: HashMap<T, Variable>,
}

impl<T> Default for VariableSet<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            lookup: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> VariableSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a value, returning its existing variable if already present.
    pub fn register(&mut self, value: T) -> Variable {
        if let Some(&variable) = self.lookup.get(&value) {
            return variable;
        }
        let variable = Variable(self.values.len());
        self.values.push(value.clone());
        self.lookup.insert(value, variable);
        variable
    }

    pub fn get(&self, value: &T) -> Option<Variable> {
        self.lookup.get(value).copied()
    }

    /// Literal for a registered value, `None` if it was never registered.
    pub fn literal(&self, value: &T, polarity: bool) -> Option<Literal> {
        self.get(value).map(|v| Literal::new(v, polarity))
    }

    /// The value a variable was registered for.
    pub fn value(&self, variable: Variable) -> &T {
        &self.values[variable.0]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &T)> {
        self.values.iter().enumerate().map(|(i, v)| (Variable(i), v))
    }
}
