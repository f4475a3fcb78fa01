//! Prescribed displacement boundary conditions

use serde::{Deserialize, Serialize};

use crate::elements::{Dof, NUM_DOFS};

/// Prescribes the displacement (or rotation) of one nodal DOF.
///
/// Enforced exactly through a Lagrange multiplier, so nonzero values are
/// supported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCondition {
    pub node: usize,
    pub dof: usize,
    #[serde(default)]
    pub value: f64,
}

impl BoundaryCondition {
    pub fn new(node: usize, dof: impl Into<usize>, value: f64) -> Self {
        Self {
            node,
            dof: dof.into(),
            value,
        }
    }

    /// Hold one DOF at zero
    pub fn restrain(node: usize, dof: impl Into<usize>) -> Self {
        Self::new(node, dof, 0.0)
    }

    /// Fully fixed node (all six DOFs held at zero)
    pub fn fixed(node: usize) -> Vec<Self> {
        (0..NUM_DOFS).map(|dof| Self::restrain(node, dof)).collect()
    }

    /// Pinned node (translations held, rotations free)
    pub fn pinned(node: usize) -> Vec<Self> {
        [Dof::DisplacementX, Dof::DisplacementY, Dof::DisplacementZ]
            .into_iter()
            .map(|dof| Self::restrain(node, dof))
            .collect()
    }
}
