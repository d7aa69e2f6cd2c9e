//! Within-rank ordering / crossing reduction.
//!
//! Initial order comes from a DFS over the ranked graph; alternating down/up
//! barycenter sweeps then shuffle each layer toward the weighted center of its
//! fixed-layer neighbors. The best layering seen (by bilayer crossing count) is
//! what gets applied.

use crate::graphlib::Graph;
use crate::{EdgeValue, GraphValue, NodeValue};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

pub fn order(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    let max_sweeps = g.graph().order_max_sweeps;

    let mut layering = init_order(g);
    let mut best = layering.clone();
    let mut best_cc = cross_count(g, &layering);

    let mut sweeps = 0usize;
    let mut stale = 0usize;
    while sweeps < max_sweeps && best_cc > 0 && stale < 4 {
        sweep(g, &mut layering, sweeps % 2 == 0);
        let cc = cross_count(g, &layering);
        if cc < best_cc {
            best_cc = cc;
            best = layering.clone();
            stale = 0;
        } else {
            stale += 1;
        }
        sweeps += 1;
    }

    apply_order(g, &best);
}

/// Layers in rank order, each filled by DFS from the nodes in insertion order.
pub fn init_order(g: &Graph<NodeValue, EdgeValue, GraphValue>) -> Vec<Vec<String>> {
    let mut max_rank = i32::MIN;
    g.for_each_node(|_id, node| {
        if let Some(rank) = node.rank {
            max_rank = max_rank.max(rank);
        }
    });
    if max_rank == i32::MIN {
        return Vec::new();
    }

    let mut layers: Vec<Vec<String>> = vec![Vec::new(); (max_rank + 1).max(1) as usize];
    let mut visited: FxHashMap<String, bool> = FxHashMap::default();

    fn dfs(
        g: &Graph<NodeValue, EdgeValue, GraphValue>,
        v: &str,
        visited: &mut FxHashMap<String, bool>,
        layers: &mut [Vec<String>],
    ) {
        if visited.get(v).copied().unwrap_or(false) {
            return;
        }
        visited.insert(v.to_string(), true);

        if let Some(rank) = g.node(v).and_then(|n| n.rank) {
            let idx = rank.max(0) as usize;
            if let Some(layer) = layers.get_mut(idx) {
                layer.push(v.to_string());
            }
        }

        let successors: Vec<String> = g.successors(v).into_iter().map(str::to_string).collect();
        for w in successors {
            dfs(g, &w, visited, layers);
        }
    }

    for v in g.node_ids() {
        dfs(g, &v, &mut visited, &mut layers);
    }

    layers
}

fn sweep(
    g: &Graph<NodeValue, EdgeValue, GraphValue>,
    layering: &mut [Vec<String>],
    downward: bool,
) {
    if layering.len() < 2 {
        return;
    }
    if downward {
        for r in 1..layering.len() {
            let (fixed, movable) = layering.split_at_mut(r);
            sort_layer(g, &mut movable[0], &fixed[r - 1], true);
        }
    } else {
        for r in (0..layering.len() - 1).rev() {
            let (movable, fixed) = layering.split_at_mut(r + 1);
            sort_layer(g, &mut movable[r], &fixed[0], false);
        }
    }
}

/// Stable sort of `layer` by the mean fixed-layer position of each node's
/// neighbors; neighborless nodes keep their current position as the key.
fn sort_layer(
    g: &Graph<NodeValue, EdgeValue, GraphValue>,
    layer: &mut Vec<String>,
    fixed: &[String],
    use_predecessors: bool,
) {
    let mut pos: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, v) in fixed.iter().enumerate() {
        pos.insert(v.as_str(), i);
    }

    let mut keyed: Vec<(f64, usize, String)> = Vec::with_capacity(layer.len());
    for (i, v) in layer.iter().enumerate() {
        let neighbors = if use_predecessors {
            g.predecessors(v)
        } else {
            g.successors(v)
        };
        let mut sum = 0.0;
        let mut n = 0usize;
        for u in neighbors {
            if let Some(&p) = pos.get(u) {
                sum += p as f64;
                n += 1;
            }
        }
        let barycenter = if n > 0 { sum / n as f64 } else { i as f64 };
        keyed.push((barycenter, i, v.clone()));
    }

    keyed.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });
    *layer = keyed.into_iter().map(|(_, _, v)| v).collect();
}

fn apply_order(g: &mut Graph<NodeValue, EdgeValue, GraphValue>, layering: &[Vec<String>]) {
    for layer in layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}

/// Total crossings between every adjacent layer pair.
pub fn cross_count(g: &Graph<NodeValue, EdgeValue, GraphValue>, layering: &[Vec<String>]) -> usize {
    let mut cc = 0usize;
    for pair in layering.windows(2) {
        cc += two_layer_cross_count(g, &pair[0], &pair[1]);
    }
    cc
}

/// Bilayer crossings via the accumulation tree: southern endpoints are visited
/// in northern order and each counts the endpoints already seen to its right.
fn two_layer_cross_count(
    g: &Graph<NodeValue, EdgeValue, GraphValue>,
    north: &[String],
    south: &[String],
) -> usize {
    if south.is_empty() {
        return 0;
    }

    let mut south_pos: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, v) in south.iter().enumerate() {
        south_pos.insert(v.as_str(), i);
    }

    let mut south_entries: Vec<usize> = Vec::new();
    for v in north {
        let mut entries: Vec<usize> = g
            .out_edges(v, None)
            .into_iter()
            .filter_map(|e| south_pos.get(e.w.as_str()).copied())
            .collect();
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc = 0usize;
    for pos in south_entries {
        let mut index = pos + first_index;
        tree[index] += 1;
        while index > 0 {
            if index % 2 == 1 {
                cc += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
    }

    cc
}
