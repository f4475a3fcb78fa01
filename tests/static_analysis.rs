use approx::assert_relative_eq;
use beam_fea::assembly::GlobalStiffAssembler;
use beam_fea::prelude::*;
use nalgebra::Vector3;

const EA: f64 = 1.0e4;
const EI: f64 = 1.0e3;
const GJ: f64 = 8.0e2;

fn prop(normal: [f64; 3]) -> ElementProperty {
    ElementProperty::new(EA, EI, EI, GJ, normal)
}

/// Straight beam along X split into `segments` elements
fn beam_along_x(length: f64, segments: usize) -> Job {
    let mut job = Job::default();
    for i in 0..=segments {
        job.add_node(Node::new(length * i as f64 / segments as f64, 0.0, 0.0));
    }
    for i in 0..segments {
        job.add_element(i, i + 1, prop([0.0, 1.0, 0.0]));
    }
    job
}

/// Four fixed-base columns with a rectangular ring of beams on top
fn space_frame() -> (Job, Vec<BoundaryCondition>, Vec<Force>) {
    let mut job = Job::default();
    let (w, d, h) = (4.0, 3.0, 3.0);
    let corners = [(0.0, 0.0), (w, 0.0), (w, d), (0.0, d)];

    let base: Vec<usize> = corners
        .iter()
        .map(|&(x, y)| job.add_node(Node::new(x, y, 0.0)))
        .collect();
    let top: Vec<usize> = corners
        .iter()
        .map(|&(x, y)| job.add_node(Node::new(x, y, h)))
        .collect();

    for i in 0..4 {
        job.add_element(base[i], top[i], prop([1.0, 0.0, 0.0]));
        job.add_element(top[i], top[(i + 1) % 4], prop([0.0, 0.0, 1.0]));
    }

    let bcs = base.iter().flat_map(|&n| BoundaryCondition::fixed(n)).collect();
    let mut forces = Force::from_array(top[0], [5.0, -2.0, -10.0, 0.0, 0.0, 1.5]);
    forces.extend(Force::from_array(top[2], [0.0, 3.0, -10.0, 2.0, 0.0, 0.0]));
    forces.push(Force::fz(top[1], -4.0));

    (job, bcs, forces)
}

#[test]
fn test_axial_bar() {
    let length = 3.0;
    let force = 12.0;
    let job = beam_along_x(length, 1);
    let summary = solve(
        &job,
        &BoundaryCondition::fixed(0),
        &[Force::fx(1, force)],
        &[],
        &[],
        &AnalysisOptions::default(),
    )
    .unwrap();

    let d = summary.node_displacement(1).unwrap();
    assert_relative_eq!(d.dx, force * length / EA, max_relative = 1e-10);
    assert_eq!(d.dy, 0.0);
    assert_eq!(d.dz, 0.0);
    assert_eq!(d.rotation_magnitude(), 0.0);

    // Tension reads positive at both ends
    let ef = summary.element_force(0).unwrap();
    assert_relative_eq!(ef.node0.axial, force, max_relative = 1e-10);
    assert_relative_eq!(ef.node1.axial, force, max_relative = 1e-10);
}

#[test]
fn test_simply_supported_midspan_deflection() {
    let length = 6.0;
    let load = 9.0;
    let job = beam_along_x(length, 2);

    let mut bcs = BoundaryCondition::pinned(0);
    bcs.push(BoundaryCondition::restrain(0, Dof::RotationX));
    bcs.push(BoundaryCondition::restrain(2, Dof::DisplacementY));
    bcs.push(BoundaryCondition::restrain(2, Dof::DisplacementZ));

    let summary = solve(
        &job,
        &bcs,
        &[Force::fy(1, -load)],
        &[],
        &[],
        &AnalysisOptions::default(),
    )
    .unwrap();

    let expected = -load * length.powi(3) / (48.0 * EI);
    assert_relative_eq!(summary.nodal_displacements[1][1], expected, max_relative = 1e-9);
    // Symmetric supports share the load equally
    assert_relative_eq!(summary.nodal_forces[0][1], load / 2.0, max_relative = 1e-9);
    assert_relative_eq!(summary.nodal_forces[2][1], load / 2.0, max_relative = 1e-9);
    // Midspan rotation vanishes by symmetry
    assert!(summary.nodal_displacements[1][5].abs() < 1e-12);
}

#[test]
fn test_cantilever_element_end_forces() {
    let length = 4.0;
    let load = 2.5;
    let job = beam_along_x(length, 1);
    let summary = solve(
        &job,
        &BoundaryCondition::fixed(0),
        &[Force::fy(1, -load)],
        &[],
        &[],
        &AnalysisOptions::default(),
    )
    .unwrap();

    let ef = summary.element_force(0).unwrap();
    assert_relative_eq!(ef.node0.shear_y, -load, max_relative = 1e-9);
    assert_relative_eq!(ef.node1.shear_y, -load, max_relative = 1e-9);
    assert_relative_eq!(ef.node0.moment_z, -load * length, max_relative = 1e-9);
    assert!(ef.node1.moment_z.abs() < 1e-9);
}

#[test]
fn test_global_stiffness_symmetric() {
    let (job, _, _) = space_frame();
    let ties = [Tie::new(4, 6, 250.0, 40.0)];
    let k = GlobalStiffAssembler::new()
        .with_parallel(true)
        .assemble(&job, &ties)
        .unwrap()
        .to_dense();
    assert_eq!(k.nrows(), 48);
    assert_relative_eq!(k, k.transpose(), epsilon = 1e-8, max_relative = 1e-12);
}

#[test]
fn test_global_equilibrium() {
    let (job, bcs, forces) = space_frame();
    let summary = solve(&job, &bcs, &forces, &[], &[], &AnalysisOptions::default()).unwrap();

    let position = |n: usize| job.nodes[n].position();
    let mut total_force = Vector3::zeros();
    let mut total_moment = Vector3::zeros();

    for f in &forces {
        let mut load = Vector3::zeros();
        if f.dof < 3 {
            load[f.dof] = f.value;
            total_force += load;
            total_moment += position(f.node).cross(&load);
        } else {
            load[f.dof - 3] = f.value;
            total_moment += load;
        }
    }

    // Reactions live at the four base nodes
    for node in 0..4 {
        let r = summary.nodal_forces[node];
        let force = Vector3::new(r[0], r[1], r[2]);
        total_force += force;
        total_moment += position(node).cross(&force) + Vector3::new(r[3], r[4], r[5]);
    }

    assert!(total_force.norm() < 1e-8, "force residual {total_force}");
    assert!(total_moment.norm() < 1e-8, "moment residual {total_moment}");
}

#[test]
fn test_free_dof_residual() {
    let (job, bcs, forces) = space_frame();
    let summary = solve(&job, &bcs, &forces, &[], &[], &AnalysisOptions::default()).unwrap();

    let mut applied = vec![[0.0; NUM_DOFS]; job.num_nodes()];
    for f in &forces {
        applied[f.node][f.dof] += f.value;
    }

    // K d reproduces the load vector at every unrestrained node
    for node in 4..8 {
        for dof in 0..NUM_DOFS {
            assert_relative_eq!(
                summary.nodal_forces[node][dof],
                applied[node][dof],
                epsilon = 1e-8
            );
        }
    }
}

#[test]
fn test_rounding_threshold() {
    let job = beam_along_x(3.0, 1);
    let forces = [Force::fx(1, 12.0)];
    let bcs = BoundaryCondition::fixed(0);

    // Axial displacement is 3.6e-3; a coarser threshold zeroes it
    let coarse = AnalysisOptions::default().with_epsilon(1e-2);
    let summary = solve(&job, &bcs, &forces, &[], &[], &coarse).unwrap();
    assert_eq!(summary.nodal_displacements[1][0], 0.0);
    assert!(summary.nodal_displacements.iter().flatten().all(|v| *v == 0.0));
    // Zero displacements produce zero recovered forces
    assert!(summary.element_forces[0].iter().all(|v| *v == 0.0));

    let fine = AnalysisOptions::default().with_epsilon(1e-6);
    let summary = solve(&job, &bcs, &forces, &[], &[], &fine).unwrap();
    assert!(summary.nodal_displacements[1][0] > 0.0);
    for value in summary.nodal_displacements.iter().flatten() {
        assert!(*value == 0.0 || value.abs() >= 1e-6);
    }
}

#[test]
fn test_reactions_survive_coarse_rounding() {
    // Stiff bar: the 5e-7 tip displacement sits below epsilon, the forces
    // do not
    let load = 1000.0;
    let mut job = Job::default();
    job.add_node(Node::new(0.0, 0.0, 0.0));
    job.add_node(Node::new(1.0, 0.0, 0.0));
    job.add_element(0, 1, ElementProperty::new(2.0e9, 1.0e6, 1.0e6, 1.0e6, [0.0, 1.0, 0.0]));

    let options = AnalysisOptions::default().with_epsilon(1e-6);
    let summary = solve(
        &job,
        &BoundaryCondition::fixed(0),
        &[Force::fx(1, load)],
        &[],
        &[],
        &options,
    )
    .unwrap();

    assert_eq!(summary.nodal_displacements[1][0], 0.0);
    let reaction = summary.nodal_force(0).unwrap();
    let tip = summary.nodal_force(1).unwrap();
    assert_relative_eq!(reaction.fx, -load, max_relative = 1e-9);
    assert_relative_eq!(tip.fx, load, max_relative = 1e-9);
    assert_relative_eq!(reaction.fx + tip.fx, 0.0, epsilon = 1e-6);
}

#[test]
fn test_inclined_member_matches_axis_aligned() {
    // The same cantilever rotated into a general direction gives the same
    // local end forces
    let length: f64 = 3.0;
    let dir = Vector3::new(1.0, 2.0, 2.0).normalize();
    let tip = dir * length;

    let mut job = Job::default();
    job.add_node(Node::new(0.0, 0.0, 0.0));
    job.add_node(Node::new(tip.x, tip.y, tip.z));
    job.add_element(0, 1, prop([0.0, 0.0, 1.0]));

    let axial_load = dir * 7.0;
    let forces = [
        Force::fx(1, axial_load.x),
        Force::fy(1, axial_load.y),
        Force::fz(1, axial_load.z),
    ];
    let summary = solve(
        &job,
        &BoundaryCondition::fixed(0),
        &forces,
        &[],
        &[],
        &AnalysisOptions::default(),
    )
    .unwrap();

    let d = summary.node_displacement(1).unwrap();
    assert_relative_eq!(d.translation_magnitude(), 7.0 * length / EA, max_relative = 1e-8);
    let ef = summary.element_force(0).unwrap();
    assert_relative_eq!(ef.node1.axial, 7.0, max_relative = 1e-8);
    assert!(ef.node1.shear_y.abs() < 1e-8);
    assert!(ef.node1.shear_z.abs() < 1e-8);
}

#[test]
fn test_sparse_and_dense_solvers_agree() {
    let (job, bcs, forces) = space_frame();
    let ties = [Tie::new(5, 7, 1.0e3, 1.0e2)];
    let equations = [Equation::equal(4, Dof::DisplacementX, 6, Dof::DisplacementX)];

    let sparse = solve(&job, &bcs, &forces, &ties, &equations, &AnalysisOptions::default()).unwrap();
    let dense = solve(
        &job,
        &bcs,
        &forces,
        &ties,
        &equations,
        &AnalysisOptions::default().with_solver(SolverKind::DenseLu),
    )
    .unwrap();

    for (a, b) in sparse
        .nodal_displacements
        .iter()
        .flatten()
        .zip(dense.nodal_displacements.iter().flatten())
    {
        assert_relative_eq!(*a, *b, epsilon = 1e-12, max_relative = 1e-8);
    }
    for (a, b) in sparse.tie_forces[0].iter().zip(dense.tie_forces[0].iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-10, max_relative = 1e-8);
    }
}

#[test]
fn test_serial_and_parallel_assembly_agree() {
    let (job, bcs, forces) = space_frame();
    let parallel = solve(&job, &bcs, &forces, &[], &[], &AnalysisOptions::default()).unwrap();
    let serial = solve(
        &job,
        &bcs,
        &forces,
        &[],
        &[],
        &AnalysisOptions::default().with_parallel_assembly(false),
    )
    .unwrap();
    assert_eq!(parallel.nodal_displacements, serial.nodal_displacements);
    assert_eq!(parallel.element_forces, serial.element_forces);
}
