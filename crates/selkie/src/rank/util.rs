//! Ranking helpers.

use crate::graphlib::{EdgeKey, Graph};
use crate::{EdgeValue, GraphValue, NodeValue};

/// `rank(w) - rank(v) - minlen`; non-negative in any feasible ranking, zero
/// when the edge is tight.
pub fn slack(g: &Graph<NodeValue, EdgeValue, GraphValue>, e: &EdgeKey) -> i32 {
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    let minlen = g.edge_by_key(e).map(|label| label.minlen).unwrap_or(1) as i32;
    w_rank - v_rank - minlen
}

/// Shifts every rank so the component's minimum is 0. Callers run this on a
/// single-component graph.
pub fn normalize_component(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    let mut min_rank = i32::MAX;
    g.for_each_node(|_id, node| {
        if let Some(rank) = node.rank {
            min_rank = min_rank.min(rank);
        }
    });
    if min_rank == i32::MAX {
        return;
    }
    g.for_each_node_mut(|_id, node| {
        if let Some(rank) = node.rank {
            node.rank = Some(rank - min_rank);
        }
    });
}
