//! Mesh-level algorithms built on top of the core types.

pub mod extraction;
pub mod meshgen;

pub use extraction::ElementExtraction;
pub use meshgen::{MeshGenOptions, line_mesh, regular_hex_mesh, regular_quad_mesh};
