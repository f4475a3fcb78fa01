//! Geometry and property model

mod element;
mod material;
mod node;
mod property;
mod section;

pub use element::Element;
pub use material::Material;
pub use node::Node;
pub use property::ElementProperty;
pub use section::Section;

/// Number of degrees of freedom per node
pub const NUM_DOFS: usize = 6;

/// Nodal degrees of freedom, in global DOF order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dof {
    DisplacementX = 0,
    DisplacementY = 1,
    DisplacementZ = 2,
    RotationX = 3,
    RotationY = 4,
    RotationZ = 5,
}

impl Dof {
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<Dof> for usize {
    fn from(dof: Dof) -> Self {
        dof.index()
    }
}

/// Global DOF index of `dof` at `node`
#[inline]
pub fn global_dof(node: usize, dof: usize) -> usize {
    NUM_DOFS * node + dof
}
