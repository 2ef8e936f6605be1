//! Spatial acceleration structures for proximity queries on node sets.

pub mod grid;

pub use grid::Grid;
