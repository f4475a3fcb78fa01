//! Linear static solve of the augmented system

use std::time::Instant;

use log::{log, Level};

use super::recovery;
use super::{AnalysisOptions, SolverKind};
use crate::assembly::GlobalStiffAssembler;
use crate::constraints::{self, BoundaryCondition, Equation, Tie};
use crate::elements::NUM_DOFS;
use crate::error::{FEAError, FEAResult};
use crate::loads::Force;
use crate::math::{SparseLuSolver, SparseMatrixBuilder, Vec as FEVec};
use crate::model::Job;
use crate::results::{Summary, Timings};

/// Entries of the assembled system below this magnitude are dropped before
/// factorization
const PRUNE_TOL: f64 = 1e-14;

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Run a linear static analysis.
///
/// Assembles the global stiffness (elements plus tie springs), augments it
/// with one Lagrange multiplier per boundary condition and per equation,
/// solves, then recovers nodal, tie and element forces. All reported values
/// with magnitude below `options.epsilon` are exactly zero.
pub fn solve(
    job: &Job,
    bcs: &[BoundaryCondition],
    forces: &[Force],
    ties: &[Tie],
    equations: &[Equation],
    options: &AnalysisOptions,
) -> FEAResult<Summary> {
    let level = if options.verbose {
        Level::Info
    } else {
        Level::Debug
    };
    let total_start = Instant::now();
    let mut timings = Timings::default();

    job.validate()?;
    job.validate_inputs(bcs, forces, ties, equations)?;

    let num_nodes = job.num_nodes();
    let size = constraints::augmented_size(num_nodes, bcs.len(), equations.len());
    if size == 0 {
        return Err(FEAError::SingularMatrix("empty system".into()));
    }

    log!(
        level,
        "Solving {} nodes, {} elements, {} BCs, {} ties, {} equations",
        num_nodes,
        job.num_elems(),
        bcs.len(),
        ties.len(),
        equations.len()
    );

    // Stiffness block
    let start = Instant::now();
    let mut assembler = GlobalStiffAssembler::new().with_parallel(options.parallel_assembly);
    let k_stiff = assembler.assemble(job, ties)?;
    timings.assembly_ms = elapsed_ms(start);
    log!(level, "Assembly: {:.3} ms", timings.assembly_ms);

    // Augmented system
    let mut k_aug = k_stiff.resized(size);
    let mut rhs = FEVec::zeros(size);
    constraints::load_bcs(&mut k_aug, &mut rhs, bcs, num_nodes);
    constraints::load_equations(&mut k_aug, equations, num_nodes, bcs.len());
    constraints::load_forces(&mut rhs, forces);

    let solution = match options.solver {
        SolverKind::SparseLu => solve_sparse(&k_aug, &rhs, &mut timings)?,
        SolverKind::DenseLu => solve_dense(&k_aug, &rhs, &mut timings)?,
    };
    log!(
        level,
        "Solver: preprocessing {:.3} ms, factorization {:.3} ms, solve {:.3} ms",
        timings.preprocessing_ms,
        timings.factorization_ms,
        timings.solve_ms
    );

    let nodal_displacements = recovery::node_table(&solution, num_nodes, options.epsilon);
    // Reactions come from the unrounded solution; only the force table is rounded
    let displacement_vec: FEVec = solution.rows(0, NUM_DOFS * num_nodes).into_owned();

    let start = Instant::now();
    let nodal_force_vec = recovery::nodal_forces(&k_stiff.to_csr(), &displacement_vec);
    let nodal_forces = recovery::node_table(&nodal_force_vec, num_nodes, options.epsilon);
    timings.nodal_forces_ms = elapsed_ms(start);

    let start = Instant::now();
    let tie_forces = recovery::tie_forces(ties, &nodal_displacements, options.epsilon);
    timings.tie_forces_ms = elapsed_ms(start);

    let start = Instant::now();
    let element_forces = recovery::element_forces(
        job,
        assembler.per_elem_klocal_r(),
        &nodal_displacements,
        options.epsilon,
    );
    timings.element_forces_ms = elapsed_ms(start);

    timings.total_ms = elapsed_ms(total_start);
    log!(
        level,
        "Recovery: nodal {:.3} ms, ties {:.3} ms, elements {:.3} ms; total {:.3} ms",
        timings.nodal_forces_ms,
        timings.tie_forces_ms,
        timings.element_forces_ms,
        timings.total_ms
    );

    let summary = Summary {
        num_nodes,
        num_elems: job.num_elems(),
        num_bcs: bcs.len(),
        num_ties: ties.len(),
        num_equations: equations.len(),
        timings,
        nodal_displacements,
        nodal_forces,
        tie_forces,
        element_forces,
    };

    if options.verbose {
        log!(level, "\n{}", summary.full_report());
    }
    Ok(summary)
}

fn solve_sparse(
    k_aug: &SparseMatrixBuilder,
    rhs: &FEVec,
    timings: &mut Timings,
) -> FEAResult<FEVec> {
    let csc = k_aug.to_csc(PRUNE_TOL);

    let start = Instant::now();
    let mut solver = SparseLuSolver::analyze_pattern(&csc).map_err(FEAError::SingularMatrix)?;
    timings.preprocessing_ms = elapsed_ms(start);

    let start = Instant::now();
    solver.factorize().map_err(FEAError::SingularMatrix)?;
    timings.factorization_ms = elapsed_ms(start);

    let start = Instant::now();
    let x = solver.solve(rhs).map_err(FEAError::SingularMatrix)?;
    timings.solve_ms = elapsed_ms(start);
    Ok(x)
}

fn solve_dense(k_aug: &SparseMatrixBuilder, rhs: &FEVec, timings: &mut Timings) -> FEAResult<FEVec> {
    let start = Instant::now();
    let dense = k_aug.to_dense();
    timings.preprocessing_ms = elapsed_ms(start);

    let start = Instant::now();
    let lu = dense.lu();
    timings.factorization_ms = elapsed_ms(start);

    let start = Instant::now();
    let x = lu
        .solve(rhs)
        .ok_or_else(|| FEAError::SingularMatrix("zero pivot in dense LU".into()))?;
    timings.solve_ms = elapsed_ms(start);

    if let Some(i) = x.iter().position(|v| !v.is_finite()) {
        return Err(FEAError::SingularMatrix(format!(
            "Zero pivot: non-finite solution at unknown {i}"
        )));
    }
    Ok(x)
}
