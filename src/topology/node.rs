//! `NodeId` and `Node`: arena handles and coordinates for mesh nodes.
//!
//! A mesh owns its nodes in a dense `Vec<Node>`; elements refer to them by
//! `NodeId`, which is nothing more than the node's position in that vector.
//! Nodes carry no identity of their own, so revision algorithms keep any
//! clustering state outside of them and never mutate the source mesh.

use std::fmt;

/// Strong handle for a node inside its owning mesh.
///
/// This type is `repr(transparent)` over `u32`; ids are dense and zero-based.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a handle from a node position.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit into `u32`. Meshes with more than
    /// `u32::MAX` nodes are not supported.
    #[inline]
    pub fn new(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("node index exceeds u32::MAX"))
    }

    /// Returns the position of the node in its mesh.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw `u32` value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        NodeId(raw)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId").field(&self.0).finish()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mesh node: an immutable point in 3D.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    coords: [f64; 3],
}

impl Node {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { coords: [x, y, z] }
    }

    #[inline]
    pub const fn from_coords(coords: [f64; 3]) -> Self {
        Self { coords }
    }

    #[inline]
    pub const fn coords(&self) -> [f64; 3] {
        self.coords
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.coords[0]
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.coords[1]
    }

    #[inline]
    pub const fn z(&self) -> f64 {
        self.coords[2]
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn sqr_dist(&self, other: &Node) -> f64 {
        let dx = self.coords[0] - other.coords[0];
        let dy = self.coords[1] - other.coords[1];
        let dz = self.coords[2] - other.coords[2];
        dx * dx + dy * dy + dz * dz
    }
}

impl From<[f64; 3]> for Node {
    fn from(coords: [f64; 3]) -> Self {
        Node { coords }
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    assert_eq_size!(NodeId, u32);
    assert_eq_align!(NodeId, u32);
}


#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let id = NodeId::new(123);
        let s = serde_json::to_string(&id).unwrap();
        assert_eq!(s, "123");
        let id2: NodeId = serde_json::from_str(&s).unwrap();
        assert_eq!(id2, id);

        let n = Node::new(1.5, -2.0, 0.25);
        let s = serde_json::to_string(&n).unwrap();
        let n2: Node = serde_json::from_str(&s).unwrap();
        assert_eq!(n, n2);
    }

    #[test]
    fn bincode_roundtrip() {
        let id = NodeId::new(456);
        let bytes = bincode::serialize(&id).unwrap();
        let id2: NodeId = bincode::deserialize(&bytes).unwrap();
        assert_eq!(id2, id);
    }
}
