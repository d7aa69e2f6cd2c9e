//! Cycle breaking and its undo.
//!
//! `run` reverses a greedy feedback arc set so the working graph becomes a DAG,
//! after pulling self-loops out of the working set (they cannot take part in a
//! layered drawing; emit re-attaches them). `reverse_points` and `undo` are the
//! two halves of restoration: polylines of flipped edges are reversed once,
//! then the edges get their original orientation and name back.

use crate::graphlib::{EdgeKey, Graph};
use crate::{EdgeValue, GraphValue, NodeValue, SelfLoop, greedy_fas};
use rustc_hash::FxHashMap;

pub fn run(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    remove_self_loops(g);

    let fas = greedy_fas::greedy_fas(g);
    for e in fas {
        let Some(label) = g.edge_by_key(&e).cloned() else {
            continue;
        };
        g.remove_edge_key(&e);

        let mut label = label;
        label.forward_name = e.name.clone();
        label.reversed = true;

        let name = unique_rev_name(g, &e.w, &e.v);
        g.set_edge_named(e.w.clone(), e.v.clone(), Some(name), Some(label));
    }
}

/// Drops the redundant copy of each undirected input edge. The build stage adds
/// both directions with a shared original id; after cycle breaking the pair sits
/// in parallel, one copy flagged `reversed`.
pub fn remove_duplicate_edges(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    let mut count: FxHashMap<String, usize> = FxHashMap::default();
    for key in g.edge_keys() {
        if let Some(id) = g.edge_by_key(&key).and_then(|label| label.e.clone()) {
            *count.entry(id).or_insert(0) += 1;
        }
    }

    for key in g.edge_keys() {
        let Some(label) = g.edge_by_key(&key) else {
            continue;
        };
        let Some(id) = label.e.clone() else {
            continue;
        };
        if !label.reversed {
            continue;
        }
        let Some(remaining) = count.get_mut(&id) else {
            continue;
        };
        if *remaining < 2 {
            continue;
        }
        *remaining -= 1;
        g.remove_edge_key(&key);
    }
}

/// Reverses the polylines of flipped edges: their dummy chains were laid out
/// target-to-source, so the stored point order is backwards.
pub fn reverse_points(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    g.for_each_edge_mut(|_e, label| {
        if label.reversed {
            label.points.reverse();
        }
    });
}

/// Restores the original orientation and multigraph name of every flipped edge
/// and clears the flag.
pub fn undo(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    for e in g.edge_keys() {
        let Some(label) = g.edge_by_key(&e).cloned() else {
            continue;
        };
        if !label.reversed {
            continue;
        }
        g.remove_edge_key(&e);

        let mut label = label;
        let forward_name = label.forward_name.take();
        label.reversed = false;
        g.set_edge_named(e.w.clone(), e.v.clone(), forward_name, Some(label));
    }
}

fn remove_self_loops(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    let loops: Vec<EdgeKey> = g.edge_keys().into_iter().filter(|e| e.v == e.w).collect();
    for e in loops {
        let Some(value) = g.edge_by_key(&e).cloned() else {
            continue;
        };
        g.remove_edge_key(&e);
        g.graph_mut().self_loops.push(SelfLoop {
            node: e.v.clone(),
            name: e.name.clone(),
            value,
        });
    }
}

fn unique_rev_name(g: &Graph<NodeValue, EdgeValue, GraphValue>, v: &str, w: &str) -> String {
    for i in 1usize.. {
        let candidate = format!("rev{i}");
        if !g.has_edge(v, w, Some(&candidate)) {
            return candidate;
        }
    }
    unreachable!()
}
