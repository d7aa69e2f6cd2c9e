//! Coordinate assignment.
//!
//! y follows from cumulative rank heights plus the (halved) working ranksep.
//! x is computed four times, once per alignment: sweeping down or up, each node
//! aims for the median x of its neighbors in the already-placed adjacent rank
//! and is then compacted left-to-right or right-to-left subject to the
//! separation function. The final x is the mean of the two medians; all four
//! alignment values are kept on the node so edge endpoints can be placed
//! consistently with any one of them.

use crate::graphlib::Graph;
use crate::{EdgeValue, GraphValue, NodeValue, util};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;

pub fn position(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    let layering = util::build_layer_matrix(g);
    if layering.is_empty() {
        return;
    }
    assign_y(g, &layering);
    assign_x(g, &layering);
}

fn assign_y(g: &mut Graph<NodeValue, EdgeValue, GraphValue>, layering: &[Vec<String>]) {
    let rank_sep = g.graph().ranksep;
    let mut cursor = 0.0_f64;
    for (i, layer) in layering.iter().enumerate() {
        let max_height = layer
            .iter()
            .filter_map(|id| g.node(id).map(|n| n.height))
            .fold(0.0_f64, f64::max);
        let y = cursor + max_height / 2.0;
        for id in layer {
            if let Some(node) = g.node_mut(id) {
                node.y = Some(y);
            }
        }
        cursor += max_height;
        if i + 1 < layering.len() {
            cursor += rank_sep;
        }
    }
}

/// Minimum center distance between `u` and `v` when adjacent in a rank.
fn sep(g: &Graph<NodeValue, EdgeValue, GraphValue>, u: &str, v: &str) -> f64 {
    if let Some(s) = g.graph().universalsep {
        return s;
    }
    let (u_width, u_dummy) = g.node(u).map(|n| (n.width, n.dummy)).unwrap_or((0.0, false));
    let (v_width, v_dummy) = g.node(v).map(|n| (n.width, n.dummy)).unwrap_or((0.0, false));
    let gap = if u_dummy || v_dummy {
        g.graph().edgesep
    } else {
        g.graph().nodesep
    };
    (u_width + v_width) / 2.0 + gap
}

fn assign_x(g: &mut Graph<NodeValue, EdgeValue, GraphValue>, layering: &[Vec<String>]) {
    // Starting positions: nodes packed left-to-right by separation.
    let mut init: FxHashMap<String, f64> = FxHashMap::default();
    for layer in layering {
        let mut cursor = 0.0_f64;
        let mut prev: Option<&String> = None;
        for v in layer {
            if let Some(p) = prev {
                cursor += sep(g, p, v);
            }
            init.insert(v.clone(), cursor);
            prev = Some(v);
        }
    }

    let ul = align_pass(g, layering, &init, true, true);
    let ur = align_pass(g, layering, &init, true, false);
    let dl = align_pass(g, layering, &init, false, true);
    let dr = align_pass(g, layering, &init, false, false);

    let mut min_x = f64::INFINITY;
    for v in g.node_ids() {
        let mut xs = [
            ul.get(&v).copied().unwrap_or(0.0),
            ur.get(&v).copied().unwrap_or(0.0),
            dl.get(&v).copied().unwrap_or(0.0),
            dr.get(&v).copied().unwrap_or(0.0),
        ];
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let x = (xs[1] + xs[2]) / 2.0;

        let Some(node) = g.node_mut(&v) else {
            continue;
        };
        node.x = Some(x);
        min_x = min_x.min(x - node.width / 2.0);

        node.ul = ul.get(&v).copied();
        node.ur = ur.get(&v).copied();
        node.dl = dl.get(&v).copied();
        node.dr = dr.get(&v).copied();
    }

    if !min_x.is_finite() || min_x == 0.0 {
        return;
    }
    g.for_each_node_mut(|_id, node| {
        if let Some(x) = node.x {
            node.x = Some(x - min_x);
        }
        for alignment in [&mut node.ul, &mut node.ur, &mut node.dl, &mut node.dr] {
            if let Some(value) = alignment {
                *value -= min_x;
            }
        }
    });
}

/// One alignment pass. `top_down` fixes the rank above (the "u" alignments),
/// otherwise the rank below; `leftward` compacts left-to-right with a lower
/// median bias, otherwise right-to-left with an upper one.
fn align_pass(
    g: &Graph<NodeValue, EdgeValue, GraphValue>,
    layering: &[Vec<String>],
    init: &FxHashMap<String, f64>,
    top_down: bool,
    leftward: bool,
) -> FxHashMap<String, f64> {
    let mut xs = init.clone();
    if layering.len() < 2 {
        return xs;
    }

    let ranks: Vec<usize> = if top_down {
        (1..layering.len()).collect()
    } else {
        (0..layering.len() - 1).rev().collect()
    };

    for r in ranks {
        let fixed_rank = if top_down { r - 1 } else { r + 1 };
        let fixed: FxHashSet<&str> = layering[fixed_rank]
            .iter()
            .map(String::as_str)
            .collect();
        let layer = &layering[r];

        let desired: Vec<Option<f64>> = layer
            .iter()
            .map(|v| {
                let neighbors = if top_down {
                    g.predecessors(v)
                } else {
                    g.successors(v)
                };
                let mut neighbor_xs: Vec<f64> = neighbors
                    .into_iter()
                    .filter(|u| fixed.contains(u))
                    .filter_map(|u| xs.get(u).copied())
                    .collect();
                if neighbor_xs.is_empty() {
                    return None;
                }
                neighbor_xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                let n = neighbor_xs.len();
                let median = if leftward {
                    neighbor_xs[(n - 1) / 2]
                } else {
                    neighbor_xs[n / 2]
                };
                Some(median)
            })
            .collect();

        if leftward {
            let mut prev: Option<&String> = None;
            for (i, v) in layer.iter().enumerate() {
                let mut x = desired[i].unwrap_or_else(|| xs.get(v).copied().unwrap_or(0.0));
                if let Some(p) = prev {
                    let floor = xs.get(p).copied().unwrap_or(0.0) + sep(g, p, v);
                    x = x.max(floor);
                }
                xs.insert(v.clone(), x);
                prev = Some(v);
            }
        } else {
            let mut next: Option<&String> = None;
            for (i, v) in layer.iter().enumerate().rev() {
                let mut x = desired[i].unwrap_or_else(|| xs.get(v).copied().unwrap_or(0.0));
                if let Some(n) = next {
                    let ceiling = xs.get(n).copied().unwrap_or(0.0) - sep(g, v, n);
                    x = x.min(ceiling);
                }
                xs.insert(v.clone(), x);
                next = Some(v);
            }
        }
    }

    xs
}
