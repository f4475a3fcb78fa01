//! Beam FEA - linear static analysis of 3D Euler-Bernoulli frames
//!
//! This library assembles 12-DOF beam elements into a global stiffness
//! matrix and solves for nodal displacements, supporting:
//! - Prescribed displacements (boundary conditions) via Lagrange multipliers
//! - Linear multi-point constraint equations
//! - Penalty-spring ties between node pairs
//! - Recovery of nodal, tie and element end forces
//!
//! ## Example
//! ```rust
//! use beam_fea::prelude::*;
//!
//! let mut job = Job::default();
//! let n0 = job.add_node(Node::new(0.0, 0.0, 0.0));
//! let n1 = job.add_node(Node::new(10.0, 0.0, 0.0));
//!
//! let prop = ElementProperty::from_section(
//!     &Material::steel(),
//!     &Section::rectangular(0.1, 0.2),
//!     [0.0, 1.0, 0.0],
//! );
//! job.add_element(n0, n1, prop);
//!
//! let bcs = BoundaryCondition::fixed(n0);
//! let forces = [Force::fy(n1, -1000.0)];
//!
//! let summary = solve(&job, &bcs, &forces, &[], &[], &AnalysisOptions::default()).unwrap();
//! let tip = summary.node_displacement(n1).unwrap();
//! assert!(tip.dy < 0.0);
//! ```

pub mod analysis;
pub mod assembly;
pub mod constraints;
pub mod elements;
pub mod error;
pub mod io;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

pub use analysis::solve;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{solve, AnalysisOptions, SolverKind};
    pub use crate::constraints::{BoundaryCondition, Equation, EquationTerm, Tie};
    pub use crate::elements::{Dof, Element, ElementProperty, Material, Node, Section, NUM_DOFS};
    pub use crate::error::{FEAError, FEAResult};
    pub use crate::io::{save_results, JobFile};
    pub use crate::loads::Force;
    pub use crate::model::Job;
    pub use crate::results::{ElementForces, EndForces, NodalForce, NodeDisplacement, Summary};
}
