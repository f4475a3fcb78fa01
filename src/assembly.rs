//! Global stiffness assembly
//!
//! Each element is formulated independently into its `Klocal * R` product
//! and a list of global (row, col, value) triplets. Formulation can run in
//! parallel; the merge into one triplet builder is serial and in element
//! order.

use log::debug;
use rayon::prelude::*;

use crate::constraints::{self, Tie};
use crate::elements::NUM_DOFS;
use crate::error::FEAResult;
use crate::math::{self, Mat12, SparseMatrixBuilder};
use crate::model::Job;

/// One element's contribution to the global system
#[derive(Debug, Clone)]
pub struct ElementContribution {
    /// Local stiffness times the 12x12 rotation, kept for force recovery
    pub klocal_r: Mat12,
    /// Nonzero entries of `Rᵀ Klocal R` in global DOF coordinates
    pub triplets: Vec<(usize, usize, f64)>,
}

/// Map a row/column of the 12x12 element matrix to its global DOF.
/// Indices 0-5 belong to `node0`, 6-11 to `node1` (base offset `6 * node1`).
#[inline]
pub fn element_to_global(local: usize, node0: usize, node1: usize) -> usize {
    if local < NUM_DOFS {
        NUM_DOFS * node0 + local
    } else {
        NUM_DOFS * node1 + (local - NUM_DOFS)
    }
}

/// Formulate element `index` of `job`. The job must already be validated.
pub fn element_contribution(job: &Job, index: usize) -> FEAResult<ElementContribution> {
    let (length, r) = job.element_frame(index)?;
    let k_local = math::beam_local_stiffness(&job.props[index], length);
    let t = math::transformation_matrix(&r);

    let klocal_r = k_local * t;
    let k_elem = t.transpose() * klocal_r;

    let [node0, node1] = job.elems[index].nodes;
    let mut triplets = Vec::with_capacity(2 * NUM_DOFS * 2 * NUM_DOFS);
    for col in 0..2 * NUM_DOFS {
        for row in 0..2 * NUM_DOFS {
            let value = k_elem[(row, col)];
            if value != 0.0 {
                triplets.push((
                    element_to_global(row, node0, node1),
                    element_to_global(col, node0, node1),
                    value,
                ));
            }
        }
    }

    Ok(ElementContribution { klocal_r, triplets })
}

/// Assembles the global stiffness matrix and owns the per-element
/// `Klocal * R` products for the lifetime of one solve
#[derive(Debug, Default)]
pub struct GlobalStiffAssembler {
    parallel: bool,
    per_elem_klocal_r: Vec<Mat12>,
}

impl GlobalStiffAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formulate elements on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the `6 * num_nodes` square stiffness block, including tie springs
    pub fn assemble(&mut self, job: &Job, ties: &[Tie]) -> FEAResult<SparseMatrixBuilder> {
        let contributions: Vec<FEAResult<ElementContribution>> = if self.parallel {
            (0..job.num_elems())
                .into_par_iter()
                .map(|i| element_contribution(job, i))
                .collect()
        } else {
            (0..job.num_elems())
                .map(|i| element_contribution(job, i))
                .collect()
        };

        let nnz_estimate = 40 * job.num_elems() + 4 * NUM_DOFS * ties.len();
        let mut k = SparseMatrixBuilder::with_capacity(job.num_dofs(), nnz_estimate);

        self.per_elem_klocal_r.clear();
        self.per_elem_klocal_r.reserve(job.num_elems());
        for contribution in contributions {
            let contribution = contribution?;
            k.extend(contribution.triplets);
            self.per_elem_klocal_r.push(contribution.klocal_r);
        }

        constraints::load_ties(&mut k, ties);

        debug!(
            "Assembled {} elements and {} ties into {} triplets",
            job.num_elems(),
            ties.len(),
            k.nnz()
        );
        Ok(k)
    }

    /// `Klocal * R` for every element, in element order
    pub fn per_elem_klocal_r(&self) -> &[Mat12] {
        &self.per_elem_klocal_r
    }
}
