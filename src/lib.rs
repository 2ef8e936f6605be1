#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-revision
//!
//! mesh-revision is a Rust library for topological editing of unstructured
//! finite-element meshes. Its core is a revision engine that merges
//! geometrically coincident nodes and rebuilds a consistent, non-degenerate
//! mesh from the result.
//!
//! ## Features
//! - Explicit node/element mesh model with line, triangle, quad, tetrahedron,
//!   hexahedron, pyramid and prism elements
//! - Tolerance-based node collapse backed by a uniform proximity grid
//! - Reduction of collapsed elements to lower-order element types
//! - Subdivision of non-planar elements into simplices
//! - Element validation (zero volume, non-coplanar, non-convex, node order)
//! - Regular mesh generators and element extraction utilities
//!
//! ## Determinism
//!
//! Every operation is single-threaded and visits nodes and elements in index
//! order, so repeated runs on the same input produce identical meshes.
//!
//! ## Usage
//! ```rust
//! use mesh_revision::prelude::*;
//!
//! let nodes = vec![
//!     Node::new(0.0, 0.0, 0.0),
//!     Node::new(1.0, 0.0, 0.0),
//!     Node::new(1.0, 0.0, 0.0),
//!     Node::new(0.0, 1.0, 0.0),
//! ];
//! let quad = Element::quad([0, 1, 2, 3].map(NodeId::new), 0);
//! let mesh = Mesh::try_new("input", nodes, vec![quad])?;
//!
//! let revised = MeshRevision::new(&mesh)
//!     .simplify_mesh("revised", 1e-8, 2)?
//!     .expect("one triangle survives");
//! assert_eq!(revised.n_nodes(), 3);
//! assert_eq!(revised.elements()[0].element_type(), ElementType::Triangle);
//! # Ok::<(), MeshError>(())
//! ```
//!
//! ## Logging
//! The crate reports through the [`log`] facade and installs no logger.
//! Dropped elements are logged at `error` level, per-run summaries at `info`.

pub mod algs;
pub mod geometry;
pub mod mesh;
pub mod mesh_error;
pub mod revision;
pub mod spatial;
pub mod topology;

/// A convenient prelude to import the most-used types:
pub mod prelude {
    pub use crate::algs::extraction::ElementExtraction;
    pub use crate::algs::meshgen::{
        MeshGenOptions, line_mesh, regular_hex_mesh, regular_quad_mesh,
    };
    pub use crate::geometry::validation::{
        ElementErrorCode, ElementErrorFlag, MeshValidation, validate_element, validate_mesh,
    };
    pub use crate::mesh::Mesh;
    pub use crate::mesh_error::MeshError;
    pub use crate::revision::{
        ElementDiagnostic, ElementFailure, MeshRevision, RevisionOptions, RevisionReport,
    };
    pub use crate::topology::element::Element;
    pub use crate::topology::element_type::ElementType;
    pub use crate::topology::node::{Node, NodeId};
}
