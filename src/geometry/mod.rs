//! Geometry for mesh elements.
//!
//! [`predicates`] holds the raw vector helpers and the coplanarity, volume and
//! area primitives; [`validation`] evaluates element content and defect flags
//! on top of them.

pub mod predicates;
pub mod validation;

pub use validation::{ElementErrorCode, ElementErrorFlag, MeshValidation, validate_element, validate_mesh};
