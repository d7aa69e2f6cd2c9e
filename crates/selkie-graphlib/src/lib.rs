//! Graph container APIs used by `selkie`.
//!
//! A small directed/undirected multigraph with string node ids, insertion-ordered
//! deterministic iteration, and compound (parent/children) support. Storage is an
//! append-only arena: removal tombstones a slot instead of shifting, so node and
//! edge indices stay stable while the layout pipeline mutates the graph.

mod graph;
mod priority_queue;

pub use graph::{EdgeKey, Graph, GraphOptions, alg};
pub use priority_queue::PriorityQueue;
