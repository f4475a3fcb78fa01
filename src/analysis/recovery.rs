//! Force recovery from the solved displacement field

use nalgebra_sparse::CsrMatrix;

use crate::constraints::Tie;
use crate::elements::NUM_DOFS;
use crate::math::{round_small, sparse_matvec, Mat12, Vec as FEVec, Vec12};
use crate::model::Job;

/// Split the first `6 * num_nodes` entries of `values` into per-node rows,
/// zeroing entries below `epsilon`
pub fn node_table(values: &FEVec, num_nodes: usize, epsilon: f64) -> Vec<[f64; NUM_DOFS]> {
    (0..num_nodes)
        .map(|node| std::array::from_fn(|dof| round_small(values[NUM_DOFS * node + dof], epsilon)))
        .collect()
}

/// Global nodal forces `K * d` using the stiffness block without constraint
/// rows. Includes reactions at restrained DOFs.
pub fn nodal_forces(stiffness: &CsrMatrix<f64>, displacements: &FEVec) -> FEVec {
    sparse_matvec(stiffness, displacements)
}

/// Spring force of each tie per DOF: `k * (d_b - d_a)`
pub fn tie_forces(
    ties: &[Tie],
    displacements: &[[f64; NUM_DOFS]],
    epsilon: f64,
) -> Vec<[f64; NUM_DOFS]> {
    ties.iter()
        .map(|tie| {
            let d_a = &displacements[tie.node_a];
            let d_b = &displacements[tie.node_b];
            std::array::from_fn(|dof| {
                round_small(tie.spring_constant(dof) * (d_b[dof] - d_a[dof]), epsilon)
            })
        })
        .collect()
}

/// Local-frame end forces of every element.
///
/// The node 0 half of `Klocal * R * d` is negated and the node 1 half is
/// kept, so both ends share one internal-force sign convention: a
/// stretched element reports positive axial force at both ends.
pub fn element_forces(
    job: &Job,
    per_elem_klocal_r: &[Mat12],
    displacements: &[[f64; NUM_DOFS]],
    epsilon: f64,
) -> Vec<[f64; 2 * NUM_DOFS]> {
    job.elems
        .iter()
        .zip(per_elem_klocal_r)
        .map(|(elem, klocal_r)| {
            let [node0, node1] = elem.nodes;
            let d = Vec12::from_iterator(
                displacements[node0]
                    .iter()
                    .chain(displacements[node1].iter())
                    .copied(),
            );
            let f = klocal_r * d;
            std::array::from_fn(|i| {
                let value = if i < NUM_DOFS { -f[i] } else { f[i] };
                round_small(value, epsilon)
            })
        })
        .collect()
}
