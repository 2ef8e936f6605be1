//! MeshError: Unified error type for mesh-revision public APIs
//!
//! This error type is used throughout the crate to provide non-panicking
//! error handling at the API boundary. Failures that only concern a single
//! element during revision are not errors; they are reported as
//! [`ElementDiagnostic`](crate::revision::ElementDiagnostic)s instead.

use crate::topology::element_type::ElementType;
use thiserror::Error;

/// Unified error type for mesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Coincidence tolerance must be finite and non-negative.
    #[error("invalid tolerance {0}: expected a finite, non-negative value")]
    InvalidTolerance(f64),
    /// Minimum element dimension outside `1..=3`.
    #[error("invalid minimum element dimension {0}: expected 1, 2 or 3")]
    InvalidMinElementDim(u8),
    /// An element was given the wrong number of nodes for its type.
    #[error("{element_type:?} expects {expected} nodes, got {found}")]
    NodeCountMismatch {
        element_type: ElementType,
        expected: usize,
        found: usize,
    },
    /// An element references a node outside the mesh's node sequence.
    #[error("element {element} references node {node}, but the mesh has {node_count} nodes")]
    NodeOutOfRange {
        element: usize,
        node: usize,
        node_count: usize,
    },
    /// Invalid geometric input (bad cell size, non-finite coordinate, ...).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Bounding box whose minimum exceeds its maximum on some axis.
    #[error("invalid bounding box: min {min:?} exceeds max {max:?}")]
    InvalidBoundingBox { min: [f64; 3], max: [f64; 3] },
}
