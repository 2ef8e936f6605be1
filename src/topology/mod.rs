//! Core mesh entities: node handles and coordinates, element types with
//! their local topology tables, and elements.

pub mod element;
pub mod element_type;
pub mod node;

pub use element::Element;
pub use element_type::ElementType;
pub use node::{Node, NodeId};
