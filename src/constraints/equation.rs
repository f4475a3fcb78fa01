//! Linear multi-point constraint equations

use serde::{Deserialize, Serialize};

/// One `coefficient * displacement(node, dof)` term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquationTerm {
    pub node: usize,
    pub dof: usize,
    pub coefficient: f64,
}

impl EquationTerm {
    pub fn new(node: usize, dof: impl Into<usize>, coefficient: f64) -> Self {
        Self {
            node,
            dof: dof.into(),
            coefficient,
        }
    }
}

/// Enforces `sum(coefficient * displacement) = 0` over its terms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    pub terms: Vec<EquationTerm>,
}

impl Equation {
    pub fn new(terms: Vec<EquationTerm>) -> Self {
        Self { terms }
    }

    /// Constrain two DOFs to move together: d_a - d_b = 0
    pub fn equal(
        node_a: usize,
        dof_a: impl Into<usize>,
        node_b: usize,
        dof_b: impl Into<usize>,
    ) -> Self {
        Self::new(vec![
            EquationTerm::new(node_a, dof_a, 1.0),
            EquationTerm::new(node_b, dof_b, -1.0),
        ])
    }

    /// Add a term
    pub fn with_term(mut self, node: usize, dof: impl Into<usize>, coefficient: f64) -> Self {
        self.terms.push(EquationTerm::new(node, dof, coefficient));
        self
    }

    /// Evaluate the weighted sum for a displacement lookup
    pub fn residual<F>(&self, displacement: F) -> f64
    where
        F: Fn(usize, usize) -> f64,
    {
        self.terms
            .iter()
            .map(|t| t.coefficient * displacement(t.node, t.dof))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Dof;

    #[test]
    fn test_equal_equation() {
        let eq = Equation::equal(1, Dof::DisplacementY, 2, Dof::DisplacementY);
        assert_eq!(eq.terms.len(), 2);
        assert_eq!(eq.residual(|_, _| 3.0), 0.0);
    }

    #[test]
    fn test_with_term() {
        let eq = Equation::default()
            .with_term(0, 0usize, 2.0)
            .with_term(1, 0usize, -1.0);
        assert_eq!(eq.residual(|node, _| if node == 0 { 1.0 } else { 2.0 }), 0.0);
    }
}
