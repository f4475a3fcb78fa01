//! Error types for the beam solver

use thiserror::Error;

/// Main error type for beam analysis
#[derive(Error, Debug)]
pub enum FEAError {
    #[error("Element {element} has zero length")]
    ZeroLengthElement { element: usize },

    #[error("Element {element} has non-finite geometry")]
    NonFiniteGeometry { element: usize },

    #[error("Element {element}: orientation vector is parallel to the element axis")]
    CollinearOrientation { element: usize },

    #[error("Element {element} connects node {node} to itself")]
    DegenerateElement { element: usize, node: usize },

    #[error("Job has {elements} elements but {properties} element properties")]
    PropertyCountMismatch { elements: usize, properties: usize },

    #[error("{context}: node {node} out of range (model has {num_nodes} nodes)")]
    NodeOutOfRange {
        context: String,
        node: usize,
        num_nodes: usize,
    },

    #[error("{context}: degree of freedom {dof} out of range [0, 6)")]
    DofOutOfRange { context: String, dof: usize },

    #[error("Equation {equation} has no terms")]
    EmptyEquation { equation: usize },

    #[error("Singular stiffness matrix - model may be unstable or over-constrained: {0}")]
    SingularMatrix(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for beam analysis operations
pub type FEAResult<T> = Result<T, FEAError>;
