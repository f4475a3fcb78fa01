//! Two-node beam element connectivity

use serde::{Deserialize, Serialize};

/// A beam element between two nodes. The local x axis runs from `nodes[0]`
/// to `nodes[1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Element {
    pub nodes: [usize; 2],
}

impl Element {
    pub fn new(node0: usize, node1: usize) -> Self {
        Self {
            nodes: [node0, node1],
        }
    }

    pub fn node0(&self) -> usize {
        self.nodes[0]
    }

    pub fn node1(&self) -> usize {
        self.nodes[1]
    }
}

impl From<[usize; 2]> for Element {
    fn from(nodes: [usize; 2]) -> Self {
        Self { nodes }
    }
}

impl From<Element> for [usize; 2] {
    fn from(elem: Element) -> Self {
        elem.nodes
    }
}
