//! Hierarchical (Sugiyama) layout for directed graphs.
//!
//! Given a graph whose nodes carry a width and height and whose edges may carry
//! a minimum rank span and a label box, [`layout`] produces a new graph where
//! every node has an (x, y) position and every edge a polyline of control
//! points: edges flow in one direction, crossings are reduced, and node/edge
//! separation is respected.

pub use selkie_graphlib as graphlib;

pub mod acyclic;
pub mod coordinate_system;
pub mod error;
pub mod greedy_fas;
pub mod model;
pub mod normalize;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod util;

pub use error::{Error, Result};
pub use model::{
    EdgeValue, GraphValue, LayoutConfig, NodeValue, OrigEdge, Point, PrefRank, RankDir, SelfLoop,
};
pub use pipeline::layout;
