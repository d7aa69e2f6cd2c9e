//! Network simplex refinement over the tight spanning tree.
//!
//! Tree nodes carry DFS postorder labels (`low`/`lim`, giving O(1) ancestor
//! tests) and each tree edge a cut value: the signed count of graph edges
//! crossing the partition obtained by removing it. A negative cut value means
//! the ranking can be improved by exchanging that edge for the minimum-slack
//! edge re-connecting the two halves.

use super::tree::{TreeEdgeValue, TreeNodeValue};
use super::util::slack;
use crate::error::{Error, Result};
use crate::graphlib::{EdgeKey, Graph, alg};
use crate::{EdgeValue, GraphValue, NodeValue};
use rustc_hash::FxHashSet;

type TreeGraph = Graph<TreeNodeValue, TreeEdgeValue, ()>;

pub fn refine(t: &mut TreeGraph, g: &mut Graph<NodeValue, EdgeValue, GraphValue>) -> Result<()> {
    init_low_lim(t, None);
    init_cut_values(t, g);

    // Safety cap; a healthy run pivots far fewer times.
    let limit = g.node_count().saturating_mul(g.edge_count()).max(1);
    let mut pivots = 0usize;

    while let Some(e) = leave_edge(t) {
        if pivots >= limit {
            return Err(Error::PivotLimit { limit });
        }
        pivots += 1;
        let f = enter_edge(t, g, &e)?;
        exchange(t, g, &e, &f);
    }

    Ok(())
}

/// Assigns `low`/`lim` postorder labels and parent pointers, rooted at `root`
/// (or the first tree node). Iterative so tree depth cannot overflow the call
/// stack.
pub fn init_low_lim(t: &mut TreeGraph, root: Option<&str>) {
    struct Frame {
        v: String,
        parent: Option<String>,
        low: i32,
        neighbors: Vec<String>,
        next: usize,
    }

    fn push_frame(
        t: &TreeGraph,
        visited: &mut FxHashSet<String>,
        stack: &mut Vec<Frame>,
        v: String,
        parent: Option<String>,
        low: i32,
    ) {
        visited.insert(v.clone());
        let neighbors = t.neighbors(&v).into_iter().map(str::to_string).collect();
        stack.push(Frame {
            v,
            parent,
            low,
            neighbors,
            next: 0,
        });
    }

    let preferred = root
        .map(str::to_string)
        .or_else(|| t.nodes().next().map(str::to_string));
    let Some(preferred) = preferred else {
        return;
    };

    let mut starts: Vec<String> = vec![preferred];
    starts.extend(t.node_ids());

    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut stack: Vec<Frame> = Vec::new();
    let mut next_lim: i32 = 1;

    for start in starts {
        if visited.contains(&start) {
            continue;
        }
        push_frame(t, &mut visited, &mut stack, start, None, next_lim);

        while !stack.is_empty() {
            let next_child = {
                let Some(top) = stack.last_mut() else {
                    break;
                };
                let mut child = None;
                while top.next < top.neighbors.len() {
                    let w = top.neighbors[top.next].clone();
                    top.next += 1;
                    if !visited.contains(&w) {
                        child = Some((w, top.v.clone()));
                        break;
                    }
                }
                child
            };

            if let Some((w, parent)) = next_child {
                push_frame(t, &mut visited, &mut stack, w, Some(parent), next_lim);
                continue;
            }

            let Some(frame) = stack.pop() else {
                break;
            };
            if let Some(label) = t.node_mut(&frame.v) {
                label.low = frame.low;
                label.lim = next_lim;
                label.parent = frame.parent;
            }
            next_lim += 1;
        }
    }
}

/// Computes every tree edge's cut value, children before parents.
pub fn init_cut_values(t: &mut TreeGraph, g: &Graph<NodeValue, EdgeValue, GraphValue>) {
    let ids = t.node_ids();
    let roots: Vec<&str> = ids.iter().map(String::as_str).collect();
    for v in alg::postorder(t, &roots) {
        assign_cut_value(t, g, &v);
    }
}

fn assign_cut_value(t: &mut TreeGraph, g: &Graph<NodeValue, EdgeValue, GraphValue>, child: &str) {
    let Some(parent) = t.node(child).and_then(|label| label.parent.clone()) else {
        return;
    };
    let cutvalue = calc_cut_value(t, g, child);
    if let Some(edge) = t.edge_mut(child, &parent, None) {
        edge.cutvalue = cutvalue;
    }
}

/// Cut value of the tree edge between `child` and its parent. Edges aligned
/// with the underlying graph edge's direction count +1, anti-aligned -1; a
/// grandchild subtree contributes through its already-computed cut value.
pub fn calc_cut_value(
    t: &TreeGraph,
    g: &Graph<NodeValue, EdgeValue, GraphValue>,
    child: &str,
) -> f64 {
    let Some(parent) = t.node(child).and_then(|label| label.parent.clone()) else {
        return 0.0;
    };

    let mut child_is_tail = true;
    if g.edge(child, &parent, None).is_none() {
        child_is_tail = false;
        if g.edge(&parent, child, None).is_none() {
            return 0.0;
        }
    }

    let mut cut_value: f64 = 1.0;

    for e in g.out_edges(child, None) {
        let other = e.w.as_str();
        if other == parent {
            continue;
        }
        let points_to_head = child_is_tail;
        cut_value += if points_to_head { 1.0 } else { -1.0 };

        if let Some(other_edge) = t.edge(child, other, None) {
            let other_cut = other_edge.cutvalue;
            cut_value += if points_to_head { -other_cut } else { other_cut };
        }
    }

    for e in g.in_edges(child, None) {
        let other = e.v.as_str();
        if other == parent {
            continue;
        }
        let points_to_head = !child_is_tail;
        cut_value += if points_to_head { 1.0 } else { -1.0 };

        if let Some(other_edge) = t.edge(child, other, None) {
            let other_cut = other_edge.cutvalue;
            cut_value += if points_to_head { -other_cut } else { other_cut };
        }
    }

    cut_value
}

/// Any tree edge with a negative cut value, scanning in edge insertion order.
/// The contract is "any such edge"; first-found keeps pivots deterministic.
pub fn leave_edge(t: &TreeGraph) -> Option<EdgeKey> {
    t.edges()
        .find(|e| {
            t.edge_by_key(e)
                .map(|label| label.cutvalue < 0.0)
                .unwrap_or(false)
        })
        .cloned()
}

/// The minimum-slack graph edge that re-connects the two tree halves in the
/// direction opposite to the leaving edge.
pub fn enter_edge(
    t: &TreeGraph,
    g: &Graph<NodeValue, EdgeValue, GraphValue>,
    edge: &EdgeKey,
) -> Result<EdgeKey> {
    // Orient the leaving tree edge by its underlying graph edge.
    let (v, w) = if g.has_edge(&edge.v, &edge.w, None) {
        (edge.v.as_str(), edge.w.as_str())
    } else {
        (edge.w.as_str(), edge.v.as_str())
    };

    let Some((v_low, v_lim)) = t.node(v).map(|l| (l.low, l.lim)) else {
        return Err(no_enter_edge(edge));
    };
    let Some((w_low, w_lim)) = t.node(w).map(|l| (l.low, l.lim)) else {
        return Err(no_enter_edge(edge));
    };

    // The endpoint with the smaller lim roots the lower subtree.
    let ((tail_low, tail_lim), flip) = if v_lim > w_lim {
        ((w_low, w_lim), true)
    } else {
        ((v_low, v_lim), false)
    };

    let mut best: Option<(i32, EdgeKey)> = None;
    for e in g.edges() {
        let Some(v_label) = t.node(&e.v) else {
            continue;
        };
        let Some(w_label) = t.node(&e.w) else {
            continue;
        };
        let v_desc = tail_low <= v_label.lim && v_label.lim <= tail_lim;
        let w_desc = tail_low <= w_label.lim && w_label.lim <= tail_lim;

        if flip == v_desc && flip != w_desc {
            let s = slack(g, e);
            if best.as_ref().is_none_or(|(best_slack, _)| s < *best_slack) {
                best = Some((s, e.clone()));
            }
        }
    }

    best.map(|(_, e)| e).ok_or_else(|| no_enter_edge(edge))
}

fn no_enter_edge(edge: &EdgeKey) -> Error {
    Error::NoEnterEdge {
        v: edge.v.clone(),
        w: edge.w.clone(),
    }
}

/// Swaps the leaving edge for the entering one and relabels the tree.
pub fn exchange(
    t: &mut TreeGraph,
    g: &mut Graph<NodeValue, EdgeValue, GraphValue>,
    e: &EdgeKey,
    f: &EdgeKey,
) {
    t.remove_edge(&e.v, &e.w, None);
    t.set_edge(f.v.clone(), f.w.clone());
    init_low_lim(t, None);
    init_cut_values(t, g);
    update_ranks(t, g);
}

/// Re-derives ranks from the tree: walking parents before children, each node
/// sits exactly `minlen` from its parent along their shared graph edge.
fn update_ranks(t: &TreeGraph, g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    let root = t
        .nodes()
        .find(|v| {
            t.node(v)
                .map(|label| label.parent.is_none())
                .unwrap_or(false)
        })
        .or_else(|| t.nodes().next())
        .map(str::to_string);
    let Some(root) = root else {
        return;
    };

    for v in alg::preorder(t, &[root.as_str()]).into_iter().skip(1) {
        let Some(parent) = t.node(&v).and_then(|label| label.parent.clone()) else {
            continue;
        };

        let (minlen, flipped) = match g.edge(&v, &parent, None) {
            Some(label) => (label.minlen as i32, false),
            None => {
                let Some(label) = g.edge(&parent, &v, None) else {
                    continue;
                };
                (label.minlen as i32, true)
            }
        };

        let Some(parent_rank) = g.node(&parent).and_then(|n| n.rank) else {
            continue;
        };
        let rank = if flipped {
            parent_rank + minlen
        } else {
            parent_rank - minlen
        };
        if let Some(node) = g.node_mut(&v) {
            node.rank = Some(rank);
        }
    }
}
