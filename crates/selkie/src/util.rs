//! Shared helpers for the pipeline stages.

use crate::graphlib::{Graph, GraphOptions};
use crate::{EdgeValue, GraphValue, NodeValue};
use std::collections::BTreeMap;
use std::time::Instant;

/// Collapses multi-edges into single entries whose `minlen` is the max over the
/// group. Used by the ranking refinement, which treats parallel edges as one
/// constraint.
pub fn simplify(
    g: &Graph<NodeValue, EdgeValue, GraphValue>,
) -> Graph<NodeValue, EdgeValue, GraphValue> {
    let mut simplified: Graph<NodeValue, EdgeValue, GraphValue> = Graph::new(GraphOptions {
        directed: true,
        multigraph: false,
        compound: false,
    });
    simplified.set_graph(g.graph().clone());

    for v in g.node_ids() {
        if let Some(label) = g.node(&v) {
            simplified.set_node(v, label.clone());
        }
    }

    let mut merged: BTreeMap<(String, String), usize> = BTreeMap::new();
    for e in g.edges() {
        let minlen = g.edge_by_key(e).map(|label| label.minlen).unwrap_or(1);
        let entry = merged.entry((e.v.clone(), e.w.clone())).or_insert(minlen);
        *entry = (*entry).max(minlen);
    }

    for ((v, w), minlen) in merged {
        simplified.set_edge_with_label(
            v,
            w,
            EdgeValue {
                minlen,
                ..Default::default()
            },
        );
    }

    simplified
}

/// Nodes grouped by rank, each layer sorted by `order`. Empty ranks are kept so
/// layer indices line up with ranks.
pub fn build_layer_matrix(g: &Graph<NodeValue, EdgeValue, GraphValue>) -> Vec<Vec<String>> {
    let mut min_rank = i32::MAX;
    let mut max_rank = i32::MIN;
    let mut entries: Vec<(i32, usize, String)> = Vec::new();

    g.for_each_node(|id, node| {
        let Some(rank) = node.rank else {
            return;
        };
        min_rank = min_rank.min(rank);
        max_rank = max_rank.max(rank);
        entries.push((rank, node.order.unwrap_or(0), id.to_string()));
    });

    if max_rank == i32::MIN {
        return Vec::new();
    }

    let shift = if min_rank < 0 { -min_rank } else { 0 };
    let len = (max_rank + shift + 1).max(0) as usize;
    let mut layers: Vec<Vec<(usize, String)>> = vec![Vec::new(); len];
    for (rank, order, id) in entries {
        let idx = (rank + shift).max(0) as usize;
        if idx < layers.len() {
            layers[idx].push((order, id));
        }
    }

    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by(|a, b| a.0.cmp(&b.0));
            layer.into_iter().map(|(_, id)| id).collect()
        })
        .collect()
}

/// A node id starting with `prefix` that is not yet taken in `g`.
pub fn unused_node_id<N, E, G>(g: &Graph<N, E, G>, prefix: &str) -> String
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    if !g.has_node(prefix) {
        return prefix.to_string();
    }
    for i in 1usize.. {
        let candidate = format!("{prefix}{i}");
        if !g.has_node(&candidate) {
            return candidate;
        }
    }
    unreachable!()
}

pub fn time_to_writer<T>(name: &str, writer: &mut dyn std::io::Write, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let ms = start.elapsed().as_millis();
    let _ = writeln!(writer, "{name} time: {ms}ms");
    let _ = writer.flush();
    out
}

pub fn time<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let mut stdout = std::io::stdout();
    time_to_writer(name, &mut stdout, f)
}

/// Emits a one-line JSON summary of the graph after a stage. Debug only, never
/// load-bearing.
pub fn stage_probe(g: &Graph<NodeValue, EdgeValue, GraphValue>, stage: &str) {
    let mut min_rank: Option<i32> = None;
    let mut max_rank: Option<i32> = None;
    g.for_each_node(|_id, node| {
        if let Some(rank) = node.rank {
            min_rank = Some(min_rank.map_or(rank, |m| m.min(rank)));
            max_rank = Some(max_rank.map_or(rank, |m| m.max(rank)));
        }
    });
    let probe = serde_json::json!({
        "stage": stage,
        "nodes": g.node_count(),
        "edges": g.edge_count(),
        "min_rank": min_rank,
        "max_rank": max_rank,
    });
    println!("{probe}");
}
