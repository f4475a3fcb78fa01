//! Job - the immutable analysis input

use serde::{Deserialize, Serialize};

use crate::constraints::{BoundaryCondition, Equation, Tie};
use crate::elements::{Element, ElementProperty, Node, NUM_DOFS};
use crate::error::{FEAError, FEAResult};
use crate::loads::Force;
use crate::math::{self, FrameError, Mat3};

/// Nodes, elements and one property per element. `props[i]` belongs to
/// `elems[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub nodes: Vec<Node>,
    pub elems: Vec<Element>,
    pub props: Vec<ElementProperty>,
}

impl Job {
    /// Create a job from its parts
    pub fn new(nodes: Vec<Node>, elems: Vec<Element>, props: Vec<ElementProperty>) -> Self {
        Self {
            nodes,
            elems,
            props,
        }
    }

    /// Add a node, returning its index
    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Add an element with its property, returning the element index
    pub fn add_element(&mut self, node0: usize, node1: usize, prop: ElementProperty) -> usize {
        self.elems.push(Element::new(node0, node1));
        self.props.push(prop);
        self.elems.len() - 1
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_elems(&self) -> usize {
        self.elems.len()
    }

    /// Number of displacement unknowns
    pub fn num_dofs(&self) -> usize {
        NUM_DOFS * self.nodes.len()
    }

    /// Length and direction cosine matrix of element `index`
    pub fn element_frame(&self, index: usize) -> FEAResult<(f64, Mat3)> {
        let elem = &self.elems[index];
        let p0 = self.nodes[elem.node0()].position();
        let p1 = self.nodes[elem.node1()].position();

        let geometry_error = |e: FrameError| match e {
            FrameError::ZeroLength => FEAError::ZeroLengthElement { element: index },
            FrameError::NonFinite => FEAError::NonFiniteGeometry { element: index },
            FrameError::Collinear => FEAError::CollinearOrientation { element: index },
        };

        let length = math::element_length(&p0, &p1).map_err(geometry_error)?;
        let r = math::rotation_matrix(&p0, &p1, &self.props[index].normal())
            .map_err(geometry_error)?;
        Ok((length, r))
    }

    /// Check connectivity and geometry of every element
    pub fn validate(&self) -> FEAResult<()> {
        if self.elems.len() != self.props.len() {
            return Err(FEAError::PropertyCountMismatch {
                elements: self.elems.len(),
                properties: self.props.len(),
            });
        }

        for (i, elem) in self.elems.iter().enumerate() {
            for &node in &elem.nodes {
                self.check_node(node, || format!("Element {i}"))?;
            }
            if elem.node0() == elem.node1() {
                return Err(FEAError::DegenerateElement {
                    element: i,
                    node: elem.node0(),
                });
            }
        }

        for i in 0..self.elems.len() {
            self.element_frame(i)?;
        }
        Ok(())
    }

    /// Check that every BC, force, tie and equation refers to an existing
    /// node and a valid DOF
    pub fn validate_inputs(
        &self,
        bcs: &[BoundaryCondition],
        forces: &[Force],
        ties: &[Tie],
        equations: &[Equation],
    ) -> FEAResult<()> {
        for (i, bc) in bcs.iter().enumerate() {
            let context = || format!("Boundary condition {i}");
            self.check_node(bc.node, context)?;
            check_dof(bc.dof, context)?;
        }

        for (i, force) in forces.iter().enumerate() {
            let context = || format!("Force {i}");
            self.check_node(force.node, context)?;
            check_dof(force.dof, context)?;
        }

        for (i, tie) in ties.iter().enumerate() {
            let context = || format!("Tie {i}");
            self.check_node(tie.node_a, context)?;
            self.check_node(tie.node_b, context)?;
        }

        for (i, equation) in equations.iter().enumerate() {
            if equation.terms.is_empty() {
                return Err(FEAError::EmptyEquation { equation: i });
            }
            for (j, term) in equation.terms.iter().enumerate() {
                let context = || format!("Equation {i} term {j}");
                self.check_node(term.node, context)?;
                check_dof(term.dof, context)?;
            }
        }
        Ok(())
    }

    fn check_node<F>(&self, node: usize, context: F) -> FEAResult<()>
    where
        F: Fn() -> String,
    {
        if node >= self.nodes.len() {
            return Err(FEAError::NodeOutOfRange {
                context: context(),
                node,
                num_nodes: self.nodes.len(),
            });
        }
        Ok(())
    }
}

fn check_dof<F>(dof: usize, context: F) -> FEAResult<()>
where
    F: Fn() -> String,
{
    if dof >= NUM_DOFS {
        return Err(FEAError::DofOutOfRange {
            context: context(),
            dof,
        });
    }
    Ok(())
}
