//! Nodal forces - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

use crate::elements::{Dof, NUM_DOFS};

/// A force (dof 0-2) or moment (dof 3-5) applied at one nodal DOF.
/// Forces on the same DOF are summed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Force {
    pub node: usize,
    pub dof: usize,
    pub value: f64,
}

impl Force {
    pub fn new(node: usize, dof: impl Into<usize>, value: f64) -> Self {
        Self {
            node,
            dof: dof.into(),
            value,
        }
    }

    /// Force in X direction
    pub fn fx(node: usize, value: f64) -> Self {
        Self::new(node, Dof::DisplacementX, value)
    }

    /// Force in Y direction
    pub fn fy(node: usize, value: f64) -> Self {
        Self::new(node, Dof::DisplacementY, value)
    }

    /// Force in Z direction
    pub fn fz(node: usize, value: f64) -> Self {
        Self::new(node, Dof::DisplacementZ, value)
    }

    /// Expand a full [FX, FY, FZ, MX, MY, MZ] load into per-DOF forces,
    /// skipping zero components
    pub fn from_array(node: usize, load: [f64; NUM_DOFS]) -> Vec<Self> {
        load.iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(dof, &value)| Self::new(node, dof, value))
            .collect()
    }
}
