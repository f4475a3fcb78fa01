//! Constraint injection into the augmented system
//!
//! Layout of the augmented unknown vector:
//!
//! ```text
//! [ 6 * num_nodes displacements | one multiplier per BC | one multiplier per equation ]
//! ```
//!
//! Boundary conditions and equations are enforced exactly through Lagrange
//! multipliers. Ties are penalty springs added to the stiffness block and
//! add no unknowns.

mod boundary;
mod equation;
mod tie;

pub use boundary::BoundaryCondition;
pub use equation::{Equation, EquationTerm};
pub use tie::Tie;

use crate::elements::{global_dof, NUM_DOFS};
use crate::loads::Force;
use crate::math::{SparseMatrixBuilder, Vec as FEVec};

/// Size of the augmented system
pub fn augmented_size(num_nodes: usize, num_bcs: usize, num_equations: usize) -> usize {
    NUM_DOFS * num_nodes + num_bcs + num_equations
}

/// Add tie springs to the stiffness triplets: `+k` on both nodes' diagonal,
/// `-k` on the cross terms, per DOF
pub fn load_ties(k: &mut SparseMatrixBuilder, ties: &[Tie]) {
    for tie in ties {
        for dof in 0..NUM_DOFS {
            let spring = tie.spring_constant(dof);
            let a = global_dof(tie.node_a, dof);
            let b = global_dof(tie.node_b, dof);

            k.add(a, a, spring);
            k.add(b, b, spring);
            k.add(a, b, -spring);
            k.add(b, a, -spring);
        }
    }
}

/// Couple each BC's DOF to its multiplier and put nonzero prescribed values
/// in the right-hand side. The stiffness diagonal is left untouched.
pub fn load_bcs(
    k: &mut SparseMatrixBuilder,
    rhs: &mut FEVec,
    bcs: &[BoundaryCondition],
    num_nodes: usize,
) {
    let multiplier_start = NUM_DOFS * num_nodes;

    for (i, bc) in bcs.iter().enumerate() {
        let dof = global_dof(bc.node, bc.dof);
        let multiplier = multiplier_start + i;

        k.add(dof, multiplier, 1.0);
        k.add(multiplier, dof, 1.0);

        if bc.value.abs() > f64::EPSILON {
            rhs[multiplier] = bc.value;
        }
    }
}

/// Write each equation's coefficients into its multiplier row and column
pub fn load_equations(
    k: &mut SparseMatrixBuilder,
    equations: &[Equation],
    num_nodes: usize,
    num_bcs: usize,
) {
    let multiplier_start = NUM_DOFS * num_nodes + num_bcs;

    for (i, equation) in equations.iter().enumerate() {
        let multiplier = multiplier_start + i;
        for term in &equation.terms {
            let dof = global_dof(term.node, term.dof);
            k.add(multiplier, dof, term.coefficient);
            k.add(dof, multiplier, term.coefficient);
        }
    }
}

/// Accumulate nodal forces into the right-hand side
pub fn load_forces(rhs: &mut FEVec, forces: &[Force]) {
    for force in forces {
        rhs[global_dof(force.node, force.dof)] += force.value;
    }
}
