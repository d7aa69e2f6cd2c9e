//! Label types and configuration for the layout pipeline.
//!
//! Labels are plain `Clone`-friendly structs; coordinates are `Option` so a
//! half-run graph is distinguishable from a positioned one.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl FromStr for RankDir {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "TB" | "tb" => Ok(RankDir::TB),
            "BT" | "bt" => Ok(RankDir::BT),
            "LR" | "lr" => Ok(RankDir::LR),
            "RL" | "rl" => Ok(RankDir::RL),
            other => Err(Error::InvalidInput {
                message: format!("unknown rankdir: {other:?}"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub nodesep: f64,
    pub edgesep: f64,
    /// When set, replaces `nodesep`/`edgesep` as the separation between every
    /// pair of adjacent nodes in a rank.
    pub universalsep: Option<f64>,
    pub ranksep: f64,
    pub rankdir: RankDir,
    /// 0 silent, 1 per-stage timing, 2 adds per-stage JSON probes.
    pub debug_level: u8,
    pub order_max_sweeps: usize,
    pub use_simplex: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            nodesep: 50.0,
            edgesep: 10.0,
            universalsep: None,
            ranksep: 30.0,
            rankdir: RankDir::TB,
            debug_level: 0,
            order_max_sweeps: 24,
            use_simplex: true,
        }
    }
}

/// A rank constraint attached to an input node. Nodes sharing `Same(k)` end up
/// on one rank; `Min`/`Max` nodes rank no later/earlier than any other node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefRank {
    Same(i32),
    Min,
    Max,
}

/// One control point of an edge polyline. `ul`/`ur`/`dl`/`dr` are the point's
/// cross-axis coordinate under each of the four alignment passes, kept so edge
/// endpoints can be placed consistently with a chosen alignment.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub ul: f64,
    pub ur: f64,
    pub dl: f64,
    pub dr: f64,
}

/// Inline record of the original edge a dummy chain subdivides. Stored on every
/// dummy of the chain so denormalization can rebuild the edge without chasing
/// references through a mutated graph.
#[derive(Debug, Clone, PartialEq)]
pub struct OrigEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub name: Option<String>,
    pub attrs: EdgeValue,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeValue {
    pub width: f64,
    pub height: f64,
    pub pref_rank: Option<PrefRank>,

    pub rank: Option<i32>,
    pub order: Option<usize>,

    pub dummy: bool,
    /// Dummy nodes only: the subdivided original edge.
    pub edge: Option<OrigEdge>,
    /// Dummy nodes only: 0 or 1, marking the chain ends that contribute
    /// polyline points.
    pub index: Option<usize>,

    pub x: Option<f64>,
    pub y: Option<f64>,
    pub ul: Option<f64>,
    pub ur: Option<f64>,
    pub dl: Option<f64>,
    pub dr: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeValue {
    /// Minimum rank span. Defaults to 1; the build stage doubles it while the
    /// working ranksep is halved, reserving a label rank between layers.
    pub minlen: usize,
    pub width: f64,
    pub height: f64,
    pub points: Vec<Point>,
    /// Set by the acyclic stage when the edge was flipped to break a cycle.
    pub reversed: bool,
    /// The multigraph name the edge had before it was flipped.
    pub forward_name: Option<String>,
    /// Stable original-edge id assigned by the build stage. Duplicates of an
    /// undirected input edge share it.
    pub e: Option<String>,
    /// Caller attributes, carried through the pipeline untouched.
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Default for EdgeValue {
    fn default() -> Self {
        Self {
            minlen: 1,
            width: 0.0,
            height: 0.0,
            points: Vec::new(),
            reversed: false,
            forward_name: None,
            e: None,
            extras: BTreeMap::new(),
        }
    }
}

/// A self-loop pulled out of the working graph before cycle breaking and
/// re-attached at emit.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfLoop {
    pub node: String,
    pub name: Option<String>,
    pub value: EdgeValue,
}

/// Graph-level working state: the effective configuration plus stage scratch
/// that has to live on the graph itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphValue {
    pub rankdir: RankDir,
    pub nodesep: f64,
    pub edgesep: f64,
    pub universalsep: Option<f64>,
    pub ranksep: f64,
    pub order_max_sweeps: usize,
    pub use_simplex: bool,
    pub debug_level: u8,

    pub self_loops: Vec<SelfLoop>,
}

impl Default for GraphValue {
    fn default() -> Self {
        GraphValue::from_config(&LayoutConfig::default())
    }
}

impl GraphValue {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            rankdir: config.rankdir,
            nodesep: config.nodesep,
            edgesep: config.edgesep,
            universalsep: config.universalsep,
            ranksep: config.ranksep,
            order_max_sweeps: config.order_max_sweeps,
            use_simplex: config.use_simplex,
            debug_level: config.debug_level,
            self_loops: Vec::new(),
        }
    }
}
