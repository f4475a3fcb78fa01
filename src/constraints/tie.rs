//! Elastic ties between node pairs

use serde::{Deserialize, Serialize};

use crate::elements::NUM_DOFS;

/// Couples every DOF of two nodes with a penalty spring.
///
/// Translational DOFs use `lmult`, rotational DOFs use `rmult`. Ties are an
/// approximation of a rigid link: the coupling becomes exact only in the
/// limit of infinite spring constants, and constants many orders of
/// magnitude above the surrounding element stiffness degrade the
/// conditioning of the factorization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tie {
    pub node_a: usize,
    pub node_b: usize,
    /// Spring constant for DOFs 0-2
    pub lmult: f64,
    /// Spring constant for DOFs 3-5
    pub rmult: f64,
}

impl Tie {
    pub fn new(node_a: usize, node_b: usize, lmult: f64, rmult: f64) -> Self {
        Self {
            node_a,
            node_b,
            lmult,
            rmult,
        }
    }

    /// Spring constant acting on a DOF
    #[inline]
    pub fn spring_constant(&self, dof: usize) -> f64 {
        debug_assert!(dof < NUM_DOFS);
        if dof < 3 {
            self.lmult
        } else {
            self.rmult
        }
    }
}
