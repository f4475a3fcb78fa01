//! Result types for static analysis

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::elements::NUM_DOFS;

/// Displacement results at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction
    pub dz: f64,
    /// Rotation about X axis
    pub rx: f64,
    /// Rotation about Y axis
    pub ry: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ, RX, RY, RZ]
    pub fn from_array(arr: [f64; NUM_DOFS]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
            rz: arr[5],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }

    /// Get rotation magnitude
    pub fn rotation_magnitude(&self) -> f64 {
        (self.rx.powi(2) + self.ry.powi(2) + self.rz.powi(2)).sqrt()
    }
}

/// Global nodal force, K·d restricted to one node. At restrained DOFs this
/// is the support reaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodalForce {
    pub fx: f64,
    pub fy: f64,
    pub fz: f64,
    pub mx: f64,
    pub my: f64,
    pub mz: f64,
}

impl NodalForce {
    /// Create from array [FX, FY, FZ, MX, MY, MZ]
    pub fn from_array(arr: [f64; NUM_DOFS]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            fz: arr[2],
            mx: arr[3],
            my: arr[4],
            mz: arr[5],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2) + self.fz.powi(2)).sqrt()
    }
}

/// Internal force resultants at one end of an element, in the element's
/// local frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force in local y direction
    pub shear_y: f64,
    /// Shear force in local z direction
    pub shear_z: f64,
    /// Torsion
    pub torsion: f64,
    /// Bending moment about local y axis
    pub moment_y: f64,
    /// Bending moment about local z axis
    pub moment_z: f64,
}

impl EndForces {
    fn from_slice(forces: &[f64]) -> Self {
        Self {
            axial: forces[0],
            shear_y: forces[1],
            shear_z: forces[2],
            torsion: forces[3],
            moment_y: forces[4],
            moment_z: forces[5],
        }
    }
}

/// Internal forces at both ends of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementForces {
    pub node0: EndForces,
    pub node1: EndForces,
}

impl ElementForces {
    /// Split a reported 12-vector into its two ends
    pub fn from_array(forces: &[f64; 2 * NUM_DOFS]) -> Self {
        Self {
            node0: EndForces::from_slice(&forces[..NUM_DOFS]),
            node1: EndForces::from_slice(&forces[NUM_DOFS..]),
        }
    }
}

/// Wall-clock time spent in each phase, in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    pub assembly_ms: f64,
    /// Symbolic analysis (fill-reducing ordering)
    pub preprocessing_ms: f64,
    pub factorization_ms: f64,
    pub solve_ms: f64,
    pub nodal_forces_ms: f64,
    pub tie_forces_ms: f64,
    pub element_forces_ms: f64,
    /// Filled in by [`crate::io::save_results`]
    pub file_save_ms: f64,
    pub total_ms: f64,
}

/// Output of one static solve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub num_nodes: usize,
    pub num_elems: usize,
    pub num_bcs: usize,
    pub num_ties: usize,
    pub num_equations: usize,
    pub timings: Timings,
    /// One [DX, DY, DZ, RX, RY, RZ] row per node
    pub nodal_displacements: Vec<[f64; NUM_DOFS]>,
    /// One [FX, FY, FZ, MX, MY, MZ] row per node
    pub nodal_forces: Vec<[f64; NUM_DOFS]>,
    /// One row per tie: spring constant times (node_b - node_a) displacement
    pub tie_forces: Vec<[f64; NUM_DOFS]>,
    /// One row per element: six local resultants at node 0, then six at node 1
    pub element_forces: Vec<[f64; 2 * NUM_DOFS]>,
}

impl Summary {
    /// Get node displacement
    pub fn node_displacement(&self, node: usize) -> Option<NodeDisplacement> {
        self.nodal_displacements
            .get(node)
            .map(|d| NodeDisplacement::from_array(*d))
    }

    /// Get nodal force (reaction at restrained DOFs)
    pub fn nodal_force(&self, node: usize) -> Option<NodalForce> {
        self.nodal_forces
            .get(node)
            .map(|f| NodalForce::from_array(*f))
    }

    /// Get element end forces
    pub fn element_force(&self, element: usize) -> Option<ElementForces> {
        self.element_forces.get(element).map(ElementForces::from_array)
    }

    /// Largest translation magnitude and the node where it occurs
    pub fn max_displacement(&self) -> Option<(usize, f64)> {
        self.nodal_displacements
            .iter()
            .map(|d| NodeDisplacement::from_array(*d).translation_magnitude())
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Largest nodal force magnitude and the node where it occurs
    pub fn max_nodal_force(&self) -> Option<(usize, f64)> {
        self.nodal_forces
            .iter()
            .map(|f| NodalForce::from_array(*f).force_magnitude())
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Plain-text report of model size, timings and peak results
    pub fn full_report(&self) -> String {
        let mut out = String::new();
        let t = &self.timings;

        // Writing into a String cannot fail
        let _ = writeln!(out, "==== Analysis Summary ====");
        let _ = writeln!(out, "Nodes:                 {}", self.num_nodes);
        let _ = writeln!(out, "Elements:              {}", self.num_elems);
        let _ = writeln!(out, "Boundary conditions:   {}", self.num_bcs);
        let _ = writeln!(out, "Ties:                  {}", self.num_ties);
        let _ = writeln!(out, "Equations:             {}", self.num_equations);
        let _ = writeln!(out);
        let _ = writeln!(out, "---- Timings (ms) ----");
        let _ = writeln!(out, "Assembly:              {:.3}", t.assembly_ms);
        let _ = writeln!(out, "Preprocessing:         {:.3}", t.preprocessing_ms);
        let _ = writeln!(out, "Factorization:         {:.3}", t.factorization_ms);
        let _ = writeln!(out, "Solve:                 {:.3}", t.solve_ms);
        let _ = writeln!(out, "Nodal forces:          {:.3}", t.nodal_forces_ms);
        let _ = writeln!(out, "Tie forces:            {:.3}", t.tie_forces_ms);
        let _ = writeln!(out, "Element forces:        {:.3}", t.element_forces_ms);
        let _ = writeln!(out, "File save:             {:.3}", t.file_save_ms);
        let _ = writeln!(out, "Total:                 {:.3}", t.total_ms);

        if let Some((node, value)) = self.max_displacement() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Max displacement:      {value:.6e} at node {node}");
        }
        if let Some((node, value)) = self.max_nodal_force() {
            let _ = writeln!(out, "Max nodal force:       {value:.6e} at node {node}");
        }
        out
    }
}
