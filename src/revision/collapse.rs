//! Node collapse: clustering of coincident nodes and id compaction.
//!
//! Clusters live in a union-find forest over node indices. Nodes are visited
//! in ascending order; node `k` claims every canonical node `t` of another
//! cluster closer than `eps`, attaching `t`'s whole cluster below `k`.
//! Because a claim always joins two distinct trees, no cycle can form, and
//! chains of any length resolve to a single root.

use crate::spatial::Grid;
use crate::topology::node::{Node, NodeId};

/// Flattened node-identity map: `root(i)` is the canonical node of `i`'s
/// cluster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdMap {
    parent: Vec<usize>,
}

impl IdMap {
    /// Every node is its own cluster.
    pub fn identity(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    /// Cluster `nodes` with coincidence tolerance `eps`.
    ///
    /// `eps` must be finite and non-negative; two nodes at distance exactly
    /// `eps` do not merge.
    pub fn resolve(nodes: &[Node], eps: f64, max_points_per_cell: usize) -> Self {
        let mut map = Self::identity(nodes.len());
        if eps <= 0.0 || nodes.len() < 2 {
            return map;
        }
        let coords: Vec<[f64; 3]> = nodes.iter().map(Node::coords).collect();
        let grid = Grid::new(&coords, max_points_per_cell);
        let sqr_eps = eps * eps;
        for k in 0..nodes.len() {
            for bucket in grid.cells_intersecting_cube(coords[k], eps) {
                for &t in bucket {
                    if map.parent[t] != t || map.find(k) == map.find(t) {
                        continue;
                    }
                    if nodes[k].sqr_dist(&nodes[t]) < sqr_eps {
                        map.parent[t] = k;
                    }
                }
            }
        }
        for i in 0..map.parent.len() {
            let root = map.find(i);
            map.parent[i] = root;
        }
        map
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            let grandparent = self.parent[self.parent[i]];
            self.parent[i] = grandparent;
            i = grandparent;
        }
        i
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Canonical node of `i`'s cluster.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn root(&self, i: usize) -> usize {
        self.parent[i]
    }

    #[inline]
    pub fn is_canonical(&self, i: usize) -> bool {
        self.parent[i] == i
    }

    /// Number of nodes that are not canonical, i.e. would disappear on
    /// compaction.
    pub fn n_collapsed(&self) -> usize {
        (0..self.len()).filter(|&i| !self.is_canonical(i)).count()
    }

    /// Keep one node per cluster and renumber densely.
    ///
    /// Returns the canonical nodes in ascending original order and, per
    /// original node, the compacted id of its cluster.
    pub fn compact(&self, nodes: &[Node]) -> (Vec<Node>, Vec<NodeId>) {
        debug_assert_eq!(nodes.len(), self.len());
        let mut kept = Vec::with_capacity(nodes.len() - self.n_collapsed());
        let mut new_ids = vec![NodeId::new(0); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            if self.is_canonical(i) {
                new_ids[i] = NodeId::new(kept.len());
                kept.push(*node);
            }
        }
        for i in 0..nodes.len() {
            new_ids[i] = new_ids[self.root(i)];
        }
        (kept, new_ids)
    }
}
